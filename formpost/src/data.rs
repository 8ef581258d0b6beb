use crate::error::Error;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Payload carried by a [`RequestConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// A structured record, serialized by whoever handles the request last.
    Record(Value),
    /// A text payload, sent as is unless an interceptor rewrites it.
    Text(String),
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Record(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.into())
    }
}

/// One outgoing call. Created per request, mutated by the interceptors and
/// consumed when the transport request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub data: RequestBody,
}

impl RequestConfig {
    /// The method is stored lowercase, the way interceptors expect to see it.
    pub fn new<S1: AsRef<str>, S2: Into<String>>(method: S1, url: S2) -> Self {
        Self {
            url: url.into(),
            method: method.as_ref().to_lowercase(),
            headers: HashMap::new(),
            data: RequestBody::Empty,
        }
    }

    pub fn with_data<B: Into<RequestBody>>(mut self, data: B) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.set_header(name, value);
        self
    }

    /// Replaces every header whose name matches `name` ignoring ASCII case.
    pub fn set_header<S1: Into<String>, S2: Into<String>>(&mut self, name: S1, value: S2) {
        let name = name.into();
        self.remove_header(&name);
        self.headers.insert(name, value.into());
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
    }

    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResponseData {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// Every `Set-Cookie` value, in the order received. `headers` only keeps
    /// the last one.
    pub cookies: Vec<String>,
    pub body: String,
}

impl ResponseData {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
