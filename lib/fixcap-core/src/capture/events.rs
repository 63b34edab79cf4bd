//! Lifecycle events consumed from the collection runner.
//!
//! The runner is an external collaborator: it parses a collection definition,
//! performs the HTTP calls, and reports what happened. This module is the
//! whole boundary: the capture pipeline only ever sees these payloads, in
//! the order the runner emits them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::exchange::{Exchange, HeaderPair};

/// A lifecycle event emitted by the collection runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// The run has begun; the destination directory should be prepared.
    Started,
    /// One collection item finished executing.
    ExchangeCompleted(ExchangeCompleted),
    /// The run is over, successfully or not.
    Ended {
        /// Runner-reported collection-level error, if any.
        error: Option<String>,
    },
}

/// Payload of [`RunEvent::ExchangeCompleted`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeCompleted {
    /// Human-readable name of the collection item.
    pub label: String,
    /// Request method.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Request headers in emission order.
    pub headers: Vec<HeaderPair>,
    /// Request body, if the item sent one.
    pub body: Option<Value>,
    /// Response status code.
    pub status: u16,
    /// Raw response body text; may be empty or not JSON at all.
    pub response_text: String,
}

impl ExchangeCompleted {
    /// Assembles the [`Exchange`] this event describes.
    ///
    /// The raw response text is parsed as JSON; an empty or unparseable body
    /// is captured as an empty object so that one malformed response never
    /// aborts the surrounding run.
    pub fn into_exchange(self) -> Exchange {
        let Self {
            label,
            method,
            url,
            headers,
            body,
            status,
            response_text,
        } = self;

        let response_body = if response_text.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            match serde_json::from_str(&response_text) {
                Ok(value) => value,
                Err(error) => {
                    warn!(%error, %label, "response body is not JSON, capturing an empty object");
                    Value::Object(Map::new())
                }
            }
        };

        Exchange {
            method,
            url,
            headers,
            body,
            status,
            response_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(response_text: &str) -> ExchangeCompleted {
        ExchangeCompleted {
            label: "Get Order".to_string(),
            method: "GET".to_string(),
            url: "https://api.example.com/orders/1".to_string(),
            headers: vec![],
            body: None,
            status: 200,
            response_text: response_text.to_string(),
        }
    }

    #[test]
    fn should_parse_json_response_body() {
        let exchange = event(r#"{"id": 1}"#).into_exchange();
        assert_eq!(exchange.response_body, json!({"id": 1}));
    }

    #[test]
    fn should_capture_empty_response_as_empty_object() {
        let exchange = event("").into_exchange();
        assert_eq!(exchange.response_body, json!({}));
    }

    #[test]
    fn should_capture_non_json_response_as_empty_object() {
        let exchange = event("not json").into_exchange();
        assert_eq!(exchange.response_body, json!({}));
    }

    #[test]
    fn should_keep_request_fields() {
        let mut completed = event("{}");
        completed.body = Some(json!({"a": 1}));

        let exchange = completed.into_exchange();

        assert_eq!(exchange.method, "GET");
        assert_eq!(exchange.url, "https://api.example.com/orders/1");
        assert_eq!(exchange.status, 200);
        assert_eq!(exchange.body, Some(json!({"a": 1})));
    }
}
