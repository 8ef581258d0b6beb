use crate::{
    data::{RequestBody, RequestConfig},
    error::Error,
    util, ResponseData,
};
use async_trait::async_trait;
use hyper::{body, client::HttpConnector, Body, Method, Request, Uri};
use hyper_tls::HttpsConnector;
use std::fmt::Debug;
use tracing::debug;

#[async_trait]
pub trait HttpClient: Debug {
    async fn make_request(&self, request: Request<Body>) -> Result<ResponseData, Error>;
}

#[derive(Debug)]
pub struct HyperHttpClient {
    client: hyper::Client<HttpsConnector<HttpConnector>>,
}

impl HyperHttpClient {
    pub fn new() -> Self {
        Self {
            client: hyper::Client::builder().build(HttpsConnector::new()),
        }
    }
}

#[async_trait]
impl HttpClient for HyperHttpClient {
    async fn make_request(&self, request: Request<Body>) -> Result<ResponseData, Error> {
        debug!(method = %request.method(), uri = %request.uri(), "sending request");

        let response = self.client.request(request).await?;

        let status_code = response.status().as_u16();
        let headers = util::extract_headers(response.headers());
        let cookies = util::extract_set_cookies(response.headers());
        let body = body::to_bytes(response.into_body()).await?;
        let body: String = String::from_utf8_lossy(&body).into();

        debug!(status_code, "received response");

        Ok(ResponseData {
            status_code,
            body,
            headers,
            cookies,
        })
    }
}

impl Default for HyperHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns an intercepted request into the transport request. Any failure here
/// means the request never left the process.
pub fn build_request(base_url: Option<&str>, config: &RequestConfig) -> Result<Request<Body>, Error> {
    let url = util::join_url(base_url, &config.url);
    let uri: Uri = url.parse().map_err(|_| Error::ParseUriError(url.clone()))?;
    let method = Method::from_bytes(config.method.to_uppercase().as_bytes())
        .map_err(|_| Error::InvalidMethod(config.method.clone()))?;

    let mut request_builder = Request::builder().uri(uri).method(method);

    if let Some(headers_mut) = request_builder.headers_mut() {
        util::put_headers(
            headers_mut,
            config
                .headers
                .iter()
                .filter(|(header_name, _)| !header_name.eq_ignore_ascii_case("host")),
        )?;
    }

    let body = match &config.data {
        RequestBody::Empty => Body::empty(),
        RequestBody::Text(text) => Body::from(text.clone()),
        RequestBody::Record(value) => Body::from(serde_json::to_string(value)?),
    };

    Ok(request_builder.body(body)?)
}
