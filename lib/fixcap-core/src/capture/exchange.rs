//! Data model for captured exchanges and their on-disk fixture form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single request header as observed by the runner.
///
/// Headers are kept as an ordered sequence of pairs rather than a map:
/// request order is preserved in the fixture and repeated keys are legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderPair {
    /// Header name, exactly as sent.
    pub key: String,
    /// Header value, exactly as sent (possibly empty).
    pub value: String,
}

impl HeaderPair {
    /// Creates a header pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One observed request/response pair.
///
/// Assembled once per completed runner exchange and then handed through the
/// pipeline, which only replaces values with masked or reordered copies;
/// nothing mutates an `Exchange` in place after assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    /// Request method, e.g. `GET`.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Request headers in emission order.
    pub headers: Vec<HeaderPair>,
    /// Request body, absent for body-less requests.
    pub body: Option<Value>,
    /// Response status code.
    pub status: u16,
    /// Response body; `{}` when the raw response was empty or not JSON.
    pub response_body: Value,
}

/// The persisted form of one [`Exchange`].
///
/// Serializes to the fixture file shape:
///
/// ```json
/// {
///   "request": { "method": "...", "url": "...", "headers": [], "body": null },
///   "response": { "code": 200, "body": {} }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRecord {
    /// The captured request description.
    pub request: RequestRecord,
    /// The captured response description.
    pub response: ResponseRecord,
}

/// Request half of a [`FixtureRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Request method.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Request headers in emission order.
    pub headers: Vec<HeaderPair>,
    /// Request body; `null` when the request had none.
    pub body: Option<Value>,
}

/// Response half of a [`FixtureRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Response status code.
    pub code: u16,
    /// Response body.
    pub body: Value,
}

impl From<Exchange> for FixtureRecord {
    fn from(exchange: Exchange) -> Self {
        let Exchange {
            method,
            url,
            headers,
            body,
            status,
            response_body,
        } = exchange;
        Self {
            request: RequestRecord {
                method,
                url,
                headers,
                body,
            },
            response: ResponseRecord {
                code: status,
                body: response_body,
            },
        }
    }
}
