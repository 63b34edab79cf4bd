//! Masking of sensitive values in captured exchanges.
//!
//! A [`RedactionRules`] value carries three independent lists: sensitive
//! header names, request-body field selectors and response-body field
//! selectors. Applying the rules is a pure transformation of an
//! [`Exchange`]; every matched value is replaced with the fixed
//! [`MASKED_VALUE`] sentinel, so applying the same rules twice yields the
//! same exchange.
//!
//! Header names match case-sensitively and exactly. Field selectors are
//! JSONPath expressions (see [`FieldSelector`]); each one may match zero or
//! more locations per body, and matching nothing is not an error.

use jsonptr::Pointer;
use jsonptr::assign::Assign;
use serde_json::Value;
use tracing::warn;

use super::error::CaptureError;
use super::exchange::Exchange;

mod selector;

pub use self::selector::FieldSelector;

/// Replacement written over every masked header and body field.
pub const MASKED_VALUE: &str = "CONFIDENTIAL";

/// The correlation header the runner stamps on every request.
///
/// It carries a per-request token with no replay value, so it is treated as
/// sensitive even when the caller configures no header rules at all.
pub const CORRELATION_HEADER: &str = "Postman-Token";

/// The redaction rule set for one capture run.
///
/// Fixed for the whole run and read-only during capture.
#[derive(Debug, Clone)]
pub struct RedactionRules {
    sensitive_headers: Vec<String>,
    request_fields: Vec<FieldSelector>,
    response_fields: Vec<FieldSelector>,
}

impl RedactionRules {
    /// Builds a rule set from header names and selector expressions.
    ///
    /// [`CORRELATION_HEADER`] is appended to the sensitive header list when
    /// the caller did not already include it. Selector expressions are
    /// parsed eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::InvalidSelector`] for the first expression
    /// that is not valid JSONPath.
    pub fn new(
        mut sensitive_headers: Vec<String>,
        request_selectors: &[String],
        response_selectors: &[String],
    ) -> Result<Self, CaptureError> {
        if !sensitive_headers.iter().any(|name| name == CORRELATION_HEADER) {
            sensitive_headers.push(CORRELATION_HEADER.to_string());
        }

        let request_fields = request_selectors
            .iter()
            .map(|expression| FieldSelector::parse(expression))
            .collect::<Result<Vec<_>, _>>()?;
        let response_fields = response_selectors
            .iter()
            .map(|expression| FieldSelector::parse(expression))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            sensitive_headers,
            request_fields,
            response_fields,
        })
    }

    /// The sensitive header names, including [`CORRELATION_HEADER`].
    pub fn sensitive_headers(&self) -> &[String] {
        &self.sensitive_headers
    }

    /// Returns a copy of `exchange` with every sensitive value masked.
    ///
    /// Header masking applies to request headers whose key matches a
    /// sensitive name exactly and whose value is non-empty; an empty value
    /// has nothing to leak and is left as is. Field masking assigns
    /// [`MASKED_VALUE`] at every location matched by the request selectors
    /// (against the request body) and the response selectors (against the
    /// response body). An absent request body stays absent: selector
    /// evaluation against it could not match anything.
    #[must_use]
    pub fn apply(&self, exchange: Exchange) -> Exchange {
        let Exchange {
            method,
            url,
            mut headers,
            body,
            status,
            response_body,
        } = exchange;

        for header in &mut headers {
            let sensitive = self.sensitive_headers.iter().any(|name| name == &header.key);
            if sensitive && !header.value.is_empty() {
                header.value = MASKED_VALUE.to_string();
            }
        }

        let body = body.map(|value| mask_fields(value, &self.request_fields));
        let response_body = mask_fields(response_body, &self.response_fields);

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

impl Default for RedactionRules {
    /// The built-in rule set: only [`CORRELATION_HEADER`] is sensitive.
    fn default() -> Self {
        Self {
            sensitive_headers: vec![CORRELATION_HEADER.to_string()],
            request_fields: Vec::new(),
            response_fields: Vec::new(),
        }
    }
}

fn mask_fields(mut body: Value, selectors: &[FieldSelector]) -> Value {
    for selector in selectors {
        for location in selector.locate(&body) {
            match Pointer::parse(&location) {
                Ok(pointer) => {
                    if let Err(error) = body.assign(pointer, MASKED_VALUE) {
                        warn!(
                            ?error,
                            expression = selector.expression(),
                            %location,
                            "failed to mask matched field"
                        );
                    }
                }
                Err(error) => {
                    warn!(?error, %location, "selector match is not a valid pointer");
                }
            }
        }
    }
    body
}
