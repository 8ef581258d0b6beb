use crate::{
    configuration::ClientConfiguration,
    data::{RequestBody, RequestConfig, ResponseData},
    error::Error,
    http_client::{self, HttpClient, HyperHttpClient},
    interceptors::{InterceptorManager, InterceptorsBuilder},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// An HTTP client that passes every request through its interceptors before
/// handing it to the transport.
#[derive(Debug)]
pub struct Client {
    configuration: ClientConfiguration,
    http_client: Arc<dyn HttpClient + Send + Sync>,
    interceptors: InterceptorManager,
}

impl Client {
    pub fn new(configuration: ClientConfiguration) -> Self {
        Self {
            configuration,
            http_client: Arc::new(HyperHttpClient::new()),
            interceptors: InterceptorManager::new(),
        }
    }

    pub fn configuration(&self) -> &ClientConfiguration {
        &self.configuration
    }

    pub fn set_http_client(&mut self, http_client: Arc<dyn HttpClient + Send + Sync>) {
        self.http_client = http_client;
    }

    pub fn interceptors(&self) -> &InterceptorManager {
        &self.interceptors
    }

    pub fn interceptors_mut(&mut self) -> &mut InterceptorManager {
        &mut self.interceptors
    }

    pub fn add_interceptors<F: FnOnce(&mut InterceptorsBuilder) -> &mut InterceptorsBuilder>(
        &mut self,
        func: F,
    ) {
        let mut interceptors = InterceptorsBuilder::new();
        let _ = func(&mut interceptors);
        for interceptor in interceptors.into_interceptors() {
            self.interceptors.use_shared(interceptor);
        }
    }

    pub async fn get<S: Into<String>>(&self, url: S) -> Result<ResponseData, Error> {
        self.request(RequestConfig::new("get", url)).await
    }

    pub async fn post<S: Into<String>, B: Into<RequestBody>>(
        &self,
        url: S,
        data: B,
    ) -> Result<ResponseData, Error> {
        self.request(RequestConfig::new("post", url).with_data(data))
            .await
    }

    pub async fn request(&self, config: RequestConfig) -> Result<ResponseData, Error> {
        let config = self.interceptors.run(self.with_default_headers(config))?;

        let request = http_client::build_request(self.configuration.base_url(), &config)
            .map_err(|error| {
                warn!(%error, url = %config.url, "could not build request");
                self.interceptors.reject(error)
            })?;

        debug!(method = %config.method, url = %config.url, "dispatching request");
        self.http_client.make_request(request).await
    }

    fn with_default_headers(&self, mut config: RequestConfig) -> RequestConfig {
        for (name, value) in self.configuration.headers() {
            if config.header(name).is_none() {
                config.headers.insert(name.clone(), value.clone());
            }
        }
        config
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfiguration::default())
    }
}
