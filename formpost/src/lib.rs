mod client;
mod configuration;
mod data;
mod error;
pub mod form;
mod http_client;
pub mod indicator;
pub mod interceptors;
mod util;

pub use client::Client;
pub use configuration::ClientConfiguration;
pub use data::{RequestBody, RequestConfig, ResponseData};
pub use error::Error;
pub use http_client::{build_request, HttpClient, HyperHttpClient};
pub use indicator::{LoadingHandle, LoadingIndicator};
pub use interceptors::{
    FormUrlEncodedInterceptor, InterceptorId, InterceptorManager, InterceptorsBuilder,
    RequestInterceptor,
};

pub use hyper::{Body, Request};
