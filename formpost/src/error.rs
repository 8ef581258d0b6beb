use hyper::http;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(String),
    #[error("Invalid header value for {0}")]
    InvalidHeaderValue(String),
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("Parse URI Error: {0}")]
    ParseUriError(String),
    #[error("Invalid base url {0}, expected an http:// or https:// address")]
    InvalidBaseUrl(String),
    #[error("Invalid body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("Hyper error: {0}")]
    HyperError(#[from] hyper::Error),
    #[error("Http Error: {0}")]
    HttpError(#[from] http::Error),
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] toml::de::Error),
    #[error("Request rejected by interceptor: {0}")]
    Rejected(String),
}


impl Error {
    /// Whether the error was raised before the request left the process, by an
    /// interceptor or while building the transport request. Those errors have
    /// already been handed to the interceptors' error hooks.
    pub fn is_request_phase(&self) -> bool {
        !matches!(self, Error::HyperError(_) | Error::IoError(_))
    }
}
