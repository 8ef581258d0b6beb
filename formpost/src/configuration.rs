use crate::error::Error;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

/// Settings shared by every request a [`Client`](crate::Client) sends.
///
/// ```toml
/// base_url = "http://127.0.0.1:8000"
///
/// [headers]
/// X-Requested-With = "XMLHttpRequest"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfiguration {
    base_url: Option<String>,
    headers: HashMap<String, String>,
}

impl ClientConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let configuration: Self = toml::from_str(content)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn set_base_url<S: Into<String>>(&mut self, base_url: S) -> Result<(), Error> {
        let base_url = base_url.into();
        check_base_url(&base_url)?;
        self.base_url = Some(base_url);
        Ok(())
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn set_header<S1: Into<String>, S2: Into<String>>(&mut self, name: S1, value: S2) {
        self.headers.insert(name.into(), value.into());
    }

    /// Headers added to each request unless the request sets them itself.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn validate(&self) -> Result<(), Error> {
        match &self.base_url {
            Some(base_url) => check_base_url(base_url),
            None => Ok(()),
        }
    }
}

fn check_base_url(base_url: &str) -> Result<(), Error> {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::InvalidBaseUrl(base_url.into()))
    }
}
