//! `application/x-www-form-urlencoded` serialization of structured records.
//!
//! Nested values are flattened with bracket notation: `{"a": {"b": 1}}`
//! becomes `a[b]=1` and `{"a": ["x", "y"]}` becomes `a[0]=x&a[1]=y`, with the
//! brackets percent-encoded like any other reserved byte. Empty arrays and
//! objects produce no pair, `null` produces an empty value.
//!
//! Keys and values are percent-encoded per RFC 3986: only `A-Z a-z 0-9 - . _ ~`
//! pass through, a space becomes `%20`.

use crate::data::RequestBody;
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Top level copy of a request body, the way spreading it into a fresh record
/// would look.
pub fn shallow_record(body: &RequestBody) -> Map<String, Value> {
    match body {
        RequestBody::Empty => Map::new(),
        RequestBody::Record(value) => spread(value),
        RequestBody::Text(text) => spread_chars(text),
    }
}

fn spread(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map.clone(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item.clone()))
            .collect(),
        Value::String(text) => spread_chars(text),
        Value::Null | Value::Bool(_) | Value::Number(_) => Map::new(),
    }
}

fn spread_chars(text: &str) -> Map<String, Value> {
    text.chars()
        .enumerate()
        .map(|(index, c)| (index.to_string(), Value::String(c.to_string())))
        .collect()
}

pub fn stringify(record: &Map<String, Value>) -> String {
    let mut pairs = Vec::new();

    for (key, value) in record {
        append_value(&mut pairs, key, value);
    }

    pairs.join("&")
}

/// Serializes any serializable value. Values that are not records contribute
/// the keys a shallow copy of them would have.
pub fn to_string<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;

    Ok(stringify(&spread(&value)))
}

fn append_value(pairs: &mut Vec<String>, key: &str, value: &Value) {
    match value {
        Value::Null => append_pair(pairs, key, ""),
        Value::Bool(flag) => append_pair(pairs, key, if *flag { "true" } else { "false" }),
        Value::Number(number) => append_pair(pairs, key, &number.to_string()),
        Value::String(text) => append_pair(pairs, key, text),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                append_value(pairs, &format!("{}[{}]", key, index), item);
            }
        }
        Value::Object(map) => {
            for (sub_key, item) in map {
                append_value(pairs, &format!("{}[{}]", key, sub_key), item);
            }
        }
    }
}

fn append_pair(pairs: &mut Vec<String>, key: &str, value: &str) {
    pairs.push(format!("{}={}", encode(key), encode(value)));
}

/// The form serializer writes a space as `+`, keeps `*` and escapes `~`.
/// Those are the only bytes where it differs from RFC 3986, and a literal `+`
/// or `%` is always escaped, so the rewrite below is unambiguous.
fn encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}
