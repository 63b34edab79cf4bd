//! # Fixcap Core
//!
//! Capture the request/response traffic of a collection run as
//! deterministic, redacted fixture files.
//!
//! An external collection runner executes a predefined sequence of HTTP
//! calls and emits lifecycle events. This crate consumes those events and
//! persists one JSON fixture per completed exchange, after running it
//! through a small pipeline:
//!
//! 1. **Redact**: sensitive headers and JSONPath-addressed body fields are
//!    masked with a fixed sentinel ([`MASKED_VALUE`]).
//! 2. **Canonicalize** (opt-in): the response body is reordered into a
//!    deterministic form, with object keys sorted lexicographically and
//!    arrays sorted by a content hash of each element ([`canonicalize_value`]).
//! 3. **Name**: a stable, filesystem-safe file name is derived from the
//!    collection file and the exchange label ([`fixture_file_name`]).
//! 4. **Persist**: the record is written as pretty-printed JSON, replacing
//!    any previous fixture with the same name.
//!
//! The result is byte-stable, privacy-safe output regardless of field or
//! array ordering nondeterminism upstream, which is exactly what a
//! regression or contract-snapshot suite wants to diff against.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fixcap_core::{CaptureConfig, CaptureCoordinator, ExchangeCompleted, HeaderPair, RunEvent};
//!
//! # fn main() -> Result<(), fixcap_core::CaptureError> {
//! let config = CaptureConfig::builder()
//!     .with_collection_path("Orders.postman_collection.json")
//!     .with_output_dir("fixtures/orders")
//!     .with_canonicalized_responses(true)
//!     .add_sensitive_header("Authorization")
//!     .add_response_selector("$..token")
//!     .build()?;
//!
//! let mut coordinator = CaptureCoordinator::new(config);
//!
//! // Wire these calls to the runner's event emissions:
//! coordinator.handle_event(RunEvent::Started);
//! coordinator.handle_event(RunEvent::ExchangeCompleted(ExchangeCompleted {
//!     label: "Get Order #1".into(),
//!     method: "GET".into(),
//!     url: "https://api.example.com/orders/1".into(),
//!     headers: vec![HeaderPair::new("Authorization", "Bearer xyz")],
//!     body: None,
//!     status: 200,
//!     response_text: r#"{"id": 1, "token": "secret"}"#.into(),
//! }));
//! coordinator.handle_event(RunEvent::Ended { error: None });
//!
//! let outcome = coordinator.outcome().expect("run finished");
//! assert!(outcome.success);
//! // fixtures/orders/orders.get_order__1.json now exists, with the
//! // Authorization header and the token field masked as CONFIDENTIAL.
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! Collection parsing and HTTP execution belong to the runner; this crate
//! neither performs network calls nor retries them. Capture is best-effort
//! and per-exchange: one malformed exchange is logged and skipped without
//! touching its siblings, and only a runner-reported error or an unusable
//! destination directory fails the run as a whole.

mod capture;

pub use self::capture::{
    CORRELATION_HEADER, CaptureConfig, CaptureConfigBuilder, CaptureCoordinator, CaptureError,
    Exchange, ExchangeCompleted, FieldSelector, FixtureRecord, FixtureWriter, HeaderPair,
    MASKED_VALUE, RedactionRules, RequestRecord, ResponseRecord, RunEvent, RunOutcome, RunState,
    canonicalize_value, fixture_file_name,
};
