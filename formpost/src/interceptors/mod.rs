mod form_urlencoded;
mod remove_headers;
mod set_header;

use crate::{error::Error, LoadingIndicator, RequestConfig};
use regex::Regex;
use std::{fmt::Debug, sync::Arc};
use tracing::{debug, warn};

pub use form_urlencoded::{FormUrlEncodedInterceptor, CONTENT_TYPE, FORM_URLENCODED};
pub use remove_headers::{RemoveHeadersInterceptor, RemoveHeadersRegexInterceptor};
pub use set_header::SetHeaderInterceptor;

/// A hook that sees every request before it is sent.
pub trait RequestInterceptor: Debug + Send + Sync {
    fn on_request(&self, config: RequestConfig) -> Result<RequestConfig, Error>;

    /// Called when the request failed before reaching the network. Whatever is
    /// returned is what the caller receives.
    fn on_request_error(&self, error: Error) -> Error {
        error
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InterceptorId(usize);

/// Registered request interceptors.
///
/// Interceptors run in reverse registration order: the one registered last
/// sees the request first. Ejected slots stay empty so ids remain valid.
#[derive(Debug, Default)]
pub struct InterceptorManager {
    handlers: Vec<Option<Arc<dyn RequestInterceptor>>>,
}

impl InterceptorManager {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn use_interceptor<I: RequestInterceptor + 'static>(&mut self, interceptor: I) -> InterceptorId {
        self.use_shared(Arc::new(interceptor))
    }

    pub fn use_shared(&mut self, interceptor: Arc<dyn RequestInterceptor>) -> InterceptorId {
        debug!(?interceptor, "registering request interceptor");
        self.handlers.push(Some(interceptor));
        InterceptorId(self.handlers.len() - 1)
    }

    /// Returns false if the id was unknown or already ejected.
    pub fn eject(&mut self, id: InterceptorId) -> bool {
        self.handlers
            .get_mut(id.0)
            .and_then(Option::take)
            .is_some()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs every interceptor over `config`. If one of them fails, the ones
    /// that would have run after it get the error instead.
    pub fn run(&self, mut config: RequestConfig) -> Result<RequestConfig, Error> {
        let mut chain = self.handlers.iter().flatten().rev();

        while let Some(interceptor) = chain.next() {
            match interceptor.on_request(config) {
                Ok(next) => config = next,
                Err(error) => {
                    warn!(%error, "request interceptor failed");
                    return Err(chain.fold(error, |error, interceptor| {
                        interceptor.on_request_error(error)
                    }));
                }
            }
        }

        Ok(config)
    }

    /// Hands a failure that happened while building the request to every
    /// interceptor's error hook.
    pub fn reject(&self, error: Error) -> Error {
        self.handlers
            .iter()
            .flatten()
            .rev()
            .fold(error, |error, interceptor| interceptor.on_request_error(error))
    }
}

pub struct InterceptorsBuilder {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorsBuilder {
    pub(crate) fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    pub fn form_urlencoded(&mut self, indicator: Arc<dyn LoadingIndicator>) -> &mut Self {
        self.add_interceptor(FormUrlEncodedInterceptor::new(indicator))
    }

    pub fn set_header<S1: Into<String>, S2: Into<String>>(
        &mut self,
        header_name: S1,
        header_value: S2,
    ) -> &mut Self {
        self.add_interceptor(SetHeaderInterceptor::new(header_name, header_value))
    }

    pub fn remove_headers<S: Into<String>, I: IntoIterator<Item = S>>(
        &mut self,
        headers: I,
    ) -> &mut Self {
        self.add_interceptor(RemoveHeadersInterceptor::new(headers))
    }

    pub fn remove_headers_regex<I: IntoIterator<Item = Regex>>(
        &mut self,
        patterns: I,
    ) -> &mut Self {
        self.add_interceptor(RemoveHeadersRegexInterceptor::new(patterns))
    }

    pub fn add_interceptor<I: RequestInterceptor + 'static>(&mut self, interceptor: I) -> &mut Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn into_interceptors(self) -> Vec<Arc<dyn RequestInterceptor>> {
        self.interceptors
    }
}

impl Default for InterceptorsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
