#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} is not a valid phone number")]
    InvalidPhone(String),
    #[error("The server answered with error code {code}")]
    Api { code: i64 },
    #[error("The server answered with HTTP status {0}")]
    HttpStatus(u16),
    #[error("{0}")]
    Request(#[from] formpost::Error),
    #[error("Unexpected response: {0}")]
    DeserializationError(#[from] serde_json::Error),
}
