use crate::error::Error;
use hyper::{
    header::{HeaderName, HeaderValue, SET_COOKIE},
    HeaderMap,
};
use std::collections::HashMap;

pub fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    // it currently ignores header values with opaque characters
    header_map
        .iter()
        .map(|(k, v)| (String::from(k.as_str()), v.to_str()))
        .filter_map(|(key, value)| value.ok().map(|v| (key, String::from(v))))
        .collect::<HashMap<_, _>>()
}

pub fn extract_set_cookies(header_map: &HeaderMap) -> Vec<String> {
    header_map
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(String::from)
        .collect()
}

pub fn put_headers<'a, I: IntoIterator<Item = (&'a String, &'a String)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_lowercase(key.to_lowercase().as_bytes())
            .map_err(|_| Error::InvalidHeaderName(key.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| Error::InvalidHeaderValue(key.clone()))?;
        header_map.insert(header_name, header_value);
    }

    Ok(())
}

/// Joins a base url and a request path without doubling or dropping the `/`.
/// Absolute request urls are returned as they are.
pub fn join_url(base_url: Option<&str>, url: &str) -> String {
    match base_url {
        Some(base) if !is_absolute(url) => {
            match (base.ends_with('/'), url.starts_with('/')) {
                (true, true) => format!("{}{}", base, &url[1..]),
                (false, false) if !url.is_empty() => format!("{}/{}", base, url),
                _ => format!("{}{}", base, url),
            }
        }
        _ => url.to_string(),
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
