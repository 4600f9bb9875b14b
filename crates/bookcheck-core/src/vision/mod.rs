mod client;
mod image;
mod parser;

pub use client::{IdentifyError, IdentifyResult, VisionClient, SYSTEM_PROMPT};
pub use image::{EncodedImage, ImageFormat};
pub use parser::{parse_vlm_response, strip_code_fence, ParseError, ParseResult};
