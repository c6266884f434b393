//! Response accumulator of the REST API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use evocms_core::result::AppResult;

/// Collects the JSON body of a REST response.
///
/// A response is either keyed (a JSON object built with [`add`],
/// [`add_integer`] and [`push_to`]) or a flat list built with [`push`].
/// [`replace`] swaps the whole body for a single object.
///
/// [`add`]: RestResponse::add
/// [`add_integer`]: RestResponse::add_integer
/// [`push_to`]: RestResponse::push_to
/// [`push`]: RestResponse::push
/// [`replace`]: RestResponse::replace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestResponse {
    keyed: Map<String, Value>,
    list: Vec<Value>,
}

impl RestResponse {
    /// An empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing was added yet.
    pub fn is_empty(&self) -> bool {
        self.keyed.is_empty() && self.list.is_empty()
    }

    /// Set `key` to `value`.
    pub fn add(&mut self, key: &str, value: impl Into<Value>) {
        self.keyed.insert(key.to_string(), value.into());
    }

    /// Set `key` to an integer.
    pub fn add_integer(&mut self, key: &str, value: i64) {
        self.add(key, value);
    }

    /// Append `value` to the array under `key`, creating it when needed.
    pub fn push_to(&mut self, key: &str, value: impl Serialize) -> AppResult<()> {
        let value = serde_json::to_value(value)?;
        let entry = self
            .keyed
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(items) => items.push(value),
            other => *other = Value::Array(vec![value]),
        }
        Ok(())
    }

    /// Append `value` to the flat list.
    pub fn push(&mut self, value: impl Serialize) -> AppResult<()> {
        self.list.push(serde_json::to_value(value)?);
        Ok(())
    }

    /// Replace the whole body with one serialized value.
    pub fn replace(&mut self, value: impl Serialize) -> AppResult<()> {
        self.keyed.clear();
        self.list.clear();
        match serde_json::to_value(value)? {
            Value::Object(map) => self.keyed = map,
            Value::Array(list) => self.list = list,
            other => self.list.push(other),
        }
        Ok(())
    }

    /// The JSON body: an array when only flat entries were pushed, an
    /// object otherwise. Flat entries mixed with keys are keyed by position.
    pub fn into_value(self) -> Value {
        if self.keyed.is_empty() && !self.list.is_empty() {
            return Value::Array(self.list);
        }
        let mut map: Map<String, Value> = self
            .list
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect();
        map.extend(self.keyed);
        Value::Object(map)
    }
}

impl IntoResponse for RestResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.into_value())).into_response()
    }
}
