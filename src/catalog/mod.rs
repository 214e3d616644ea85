//! Catalog endpoints: cities, per-city product listings and product details.

pub mod cities;
pub mod detail;
pub mod products;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use cities::{list_cities, City};
pub use detail::product_info;
pub use products::product_ids_for_city;

/// Every endpoint wraps its payload as `{"data": ..., "meta": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageMeta {
    #[serde(default)]
    pub next: Value,
    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u64>,
}

/// Identifier the API sends either as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiId {
    Num(i64),
    Text(String),
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiId::Num(n) => write!(f, "{n}"),
            ApiId::Text(s) => f.write_str(s),
        }
    }
}

/// JSON truthiness: null, false, 0, "" and empty containers are false.
pub(crate) fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_id_renders_numbers_and_strings() {
        let ids: Vec<ApiId> = serde_json::from_value(json!([1234, "abc-9"])).unwrap();
        assert_eq!(ids[0].to_string(), "1234");
        assert_eq!(ids[1].to_string(), "abc-9");
    }

    #[test]
    fn truthiness_follows_json_semantics() {
        for falsy in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(2), json!("/page/2"), json!([1])] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }
}
