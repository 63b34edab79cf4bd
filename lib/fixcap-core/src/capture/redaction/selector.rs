//! Parsed body-field selectors.

use serde_json_path::JsonPath;

use crate::capture::error::CaptureError;

/// A validated path expression addressing zero or more locations in a body.
///
/// Selectors use JSONPath (RFC 9535) syntax, which covers everything the
/// rule set needs: exact field addressing (`$.user.ssn`), wildcard traversal
/// of sequences (`$.items[*].token`) and recursive descent (`$..secret`).
/// Matching zero locations is never an error; body shapes legitimately vary
/// between exchanges of the same collection.
#[derive(Debug, Clone)]
pub struct FieldSelector {
    expression: String,
    path: JsonPath,
}

impl FieldSelector {
    /// Parses a selector expression.
    ///
    /// Expressions are parsed eagerly so that a typo fails the configuration
    /// step, before any run starts.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::InvalidSelector`] when the expression is not
    /// valid JSONPath.
    pub fn parse(expression: &str) -> Result<Self, CaptureError> {
        let path = JsonPath::parse(expression).map_err(|error| CaptureError::InvalidSelector {
            expression: expression.to_string(),
            message: error.to_string(),
        })?;
        Ok(Self {
            expression: expression.to_string(),
            path,
        })
    }

    /// The source expression this selector was parsed from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Resolves the selector against `body`, returning the matched locations
    /// as concrete JSON Pointers.
    pub(crate) fn locate(&self, body: &serde_json::Value) -> Vec<String> {
        self.path
            .query_located(body)
            .locations()
            .map(|location| location.to_json_pointer())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_parse_exact_field_selector() {
        let selector = FieldSelector::parse("$.user.ssn").expect("should parse");
        assert_eq!(selector.expression(), "$.user.ssn");
    }

    #[test]
    fn should_reject_invalid_expression() {
        let result = FieldSelector::parse("$[");
        assert!(matches!(
            result,
            Err(CaptureError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn should_locate_exact_field() {
        let selector = FieldSelector::parse("$.user.ssn").expect("should parse");
        let body = json!({"user": {"ssn": "000-00-0000"}});

        assert_eq!(selector.locate(&body), vec!["/user/ssn"]);
    }

    #[test]
    fn should_locate_wildcard_matches() {
        let selector = FieldSelector::parse("$.items[*].token").expect("should parse");
        let body = json!({
            "items": [
                {"token": "a"},
                {"token": "b"},
                {"name": "no token here"}
            ]
        });

        assert_eq!(
            selector.locate(&body),
            vec!["/items/0/token", "/items/1/token"]
        );
    }

    #[test]
    fn should_locate_recursive_descent_matches() {
        let selector = FieldSelector::parse("$..secret").expect("should parse");
        let body = json!({
            "secret": "top",
            "nested": {"secret": "inner"}
        });

        let locations = selector.locate(&body);
        assert_eq!(locations.len(), 2);
        assert!(locations.contains(&"/secret".to_string()));
        assert!(locations.contains(&"/nested/secret".to_string()));
    }

    #[test]
    fn should_locate_nothing_without_error() {
        let selector = FieldSelector::parse("$.absent").expect("should parse");
        let body = json!({"present": true});

        assert!(selector.locate(&body).is_empty());
    }
}
