use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;

use super::client::{IdentifyError, IdentifyResult};

/// Image encodings the vision endpoint accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> IdentifyResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| IdentifyError::UnsupportedImageFormat("no extension".into()))?;

        Self::from_extension(ext).ok_or_else(|| IdentifyError::UnsupportedImageFormat(ext.into()))
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

/// Image bytes ready to inline into a request
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub format: ImageFormat,
    pub base64: String,
}

impl EncodedImage {
    #[must_use]
    pub fn from_bytes(format: ImageFormat, bytes: &[u8]) -> Self {
        Self {
            format,
            base64: STANDARD.encode(bytes),
        }
    }

    /// Read and encode `path`; the format check happens before any I/O
    pub async fn load(path: &Path) -> IdentifyResult<Self> {
        let format = ImageFormat::from_path(path)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| IdentifyError::ReadImage {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_bytes(format, &bytes))
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.base64)
    }
}
