pub mod data;
pub mod error;
mod user_api_client;

pub use error::Error;
pub use user_api_client::{UserApiClient, UserApiClientBuilder};
