mod client;
mod transport;

pub use client::HttpClient;
pub use transport::{HttpResponse, HttpTransport, TransportError, TransportResult};
