use super::RequestInterceptor;
use crate::{data::RequestBody, error::Error, form, indicator, LoadingIndicator, RequestConfig};
use std::sync::Arc;
use tracing::{debug, warn};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Sends every request as a form: forces the form content type and encodes
/// `post` bodies. A request-phase failure closes the loading indicator before
/// the error goes back to the caller.
#[derive(Debug, Clone)]
pub struct FormUrlEncodedInterceptor {
    indicator: Arc<dyn LoadingIndicator>,
}

impl FormUrlEncodedInterceptor {
    pub fn new(indicator: Arc<dyn LoadingIndicator>) -> Self {
        Self { indicator }
    }
}

impl Default for FormUrlEncodedInterceptor {
    fn default() -> Self {
        Self::new(indicator::global())
    }
}

impl RequestInterceptor for FormUrlEncodedInterceptor {
    fn on_request(&self, mut config: RequestConfig) -> Result<RequestConfig, Error> {
        config.set_header(CONTENT_TYPE, FORM_URLENCODED);

        if config.method == "post" {
            let encoded = form::stringify(&form::shallow_record(&config.data));
            debug!(url = %config.url, bytes = encoded.len(), "form encoded post body");
            config.data = RequestBody::Text(encoded);
        }

        Ok(config)
    }

    fn on_request_error(&self, error: Error) -> Error {
        warn!(%error, "request failed before sending, closing loading indicator");
        self.indicator.close();
        error
    }
}
