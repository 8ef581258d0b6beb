use super::RequestInterceptor;
use crate::{error::Error, RequestConfig};
use regex::Regex;

#[derive(Debug)]
pub struct RemoveHeadersInterceptor {
    headers: Vec<String>,
}

impl RemoveHeadersInterceptor {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(headers: I) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }
}

impl RequestInterceptor for RemoveHeadersInterceptor {
    fn on_request(&self, mut config: RequestConfig) -> Result<RequestConfig, Error> {
        for header_name in &self.headers {
            config.remove_header(header_name);
        }
        Ok(config)
    }
}

/// Removes every header whose lowercase name matches one of the patterns.
#[derive(Debug)]
pub struct RemoveHeadersRegexInterceptor {
    patterns: Vec<Regex>,
}

impl RemoveHeadersRegexInterceptor {
    pub fn new<I: IntoIterator<Item = Regex>>(patterns: I) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }
}

impl RequestInterceptor for RemoveHeadersRegexInterceptor {
    fn on_request(&self, mut config: RequestConfig) -> Result<RequestConfig, Error> {
        config.headers.retain(|name, _| {
            let name = name.to_lowercase();
            !self.patterns.iter().any(|pattern| pattern.is_match(&name))
        });
        Ok(config)
    }
}
