use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub phonenum: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Debug)]
pub struct LoginData {
    pub user: User,
}

/// Every endpoint answers with `{"code": <int>, "data": <any>}`; `0` means
/// success and anything else is an error code.
#[derive(Deserialize, Debug)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub data: Value,
}
