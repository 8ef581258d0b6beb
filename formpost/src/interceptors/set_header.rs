use super::RequestInterceptor;
use crate::{error::Error, RequestConfig};
use tracing::trace;

#[derive(Debug)]
pub struct SetHeaderInterceptor {
    header_name: String,
    header_value: String,
}

impl SetHeaderInterceptor {
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, value: S2) -> Self {
        Self {
            header_name: name.into(),
            header_value: value.into(),
        }
    }
}

impl RequestInterceptor for SetHeaderInterceptor {
    fn on_request(&self, mut config: RequestConfig) -> Result<RequestConfig, Error> {
        trace!(header = %self.header_name, "setting header");
        config.set_header(self.header_name.clone(), self.header_value.clone());
        Ok(config)
    }
}
