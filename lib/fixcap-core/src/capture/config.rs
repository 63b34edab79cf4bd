//! Capture run configuration.

use std::path::{Path, PathBuf};

use super::error::CaptureError;
use super::redaction::RedactionRules;

/// Default destination directory, relative to the working directory.
const DEFAULT_OUTPUT_DIR: &str = "responses";

/// Immutable configuration for one capture run.
///
/// Built once through [`CaptureConfigBuilder`] before the run starts and
/// shared read-only with every pipeline stage; there is no process-wide
/// state and nothing mutates the configuration mid-run.
///
/// # Example
///
/// ```
/// use fixcap_core::CaptureConfig;
///
/// # fn example() -> Result<(), fixcap_core::CaptureError> {
/// let config = CaptureConfig::builder()
///     .with_collection_path("Orders.postman_collection.json")
///     .with_output_dir("fixtures/orders")
///     .with_overwrite(true)
///     .with_canonicalized_responses(true)
///     .add_sensitive_header("Authorization")
///     .add_request_selector("$.card.number")
///     .add_response_selector("$..token")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    collection_path: PathBuf,
    output_dir: PathBuf,
    overwrite: bool,
    canonicalize_responses: bool,
    rules: RedactionRules,
}

impl CaptureConfig {
    /// Starts building a configuration.
    #[must_use]
    pub fn builder() -> CaptureConfigBuilder {
        CaptureConfigBuilder::default()
    }

    /// Path of the collection file the runner executes; names the fixtures.
    pub fn collection_path(&self) -> &Path {
        &self.collection_path
    }

    /// Directory fixture files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether the destination is cleared before the run.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Whether response bodies are canonicalized after redaction.
    pub fn canonicalize_responses(&self) -> bool {
        self.canonicalize_responses
    }

    /// The redaction rule set for the run.
    pub fn rules(&self) -> &RedactionRules {
        &self.rules
    }
}

/// Builder for [`CaptureConfig`].
///
/// Selector expressions and the collection path are validated in
/// [`build`](Self::build), so a misconfiguration fails before any run
/// starts.
#[derive(Debug, Clone, Default)]
pub struct CaptureConfigBuilder {
    collection_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    overwrite: bool,
    canonicalize_responses: bool,
    sensitive_headers: Vec<String>,
    request_selectors: Vec<String>,
    response_selectors: Vec<String>,
}

impl CaptureConfigBuilder {
    /// Sets the collection file path. Required.
    #[must_use]
    pub fn with_collection_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.collection_path = Some(path.into());
        self
    }

    /// Sets the destination directory. Defaults to `responses`.
    #[must_use]
    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Clears the destination directory before the run starts.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Canonicalizes response bodies after redaction.
    ///
    /// Canonicalization sorts object keys and reorders arrays by content
    /// fingerprint; see [`canonicalize_value`](crate::canonicalize_value)
    /// for why array reordering is opt-in.
    #[must_use]
    pub fn with_canonicalized_responses(mut self, canonicalize: bool) -> Self {
        self.canonicalize_responses = canonicalize;
        self
    }

    /// Adds one sensitive header name (case-sensitive exact match).
    #[must_use]
    pub fn add_sensitive_header(mut self, name: impl Into<String>) -> Self {
        self.sensitive_headers.push(name.into());
        self
    }

    /// Adds sensitive header names.
    #[must_use]
    pub fn with_sensitive_headers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_headers.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds one sensitive request-body field selector.
    #[must_use]
    pub fn add_request_selector(mut self, expression: impl Into<String>) -> Self {
        self.request_selectors.push(expression.into());
        self
    }

    /// Adds sensitive request-body field selectors.
    #[must_use]
    pub fn with_request_selectors<I, S>(mut self, expressions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request_selectors
            .extend(expressions.into_iter().map(Into::into));
        self
    }

    /// Adds one sensitive response-body field selector.
    #[must_use]
    pub fn add_response_selector(mut self, expression: impl Into<String>) -> Self {
        self.response_selectors.push(expression.into());
        self
    }

    /// Adds sensitive response-body field selectors.
    #[must_use]
    pub fn with_response_selectors<I, S>(mut self, expressions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.response_selectors
            .extend(expressions.into_iter().map(Into::into));
        self
    }

    /// Builds the configuration, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::MissingCollectionPath`] when no collection
    /// path was set, and [`CaptureError::InvalidSelector`] for the first
    /// selector expression that fails to parse.
    pub fn build(self) -> Result<CaptureConfig, CaptureError> {
        let Self {
            collection_path,
            output_dir,
            overwrite,
            canonicalize_responses,
            sensitive_headers,
            request_selectors,
            response_selectors,
        } = self;

        let collection_path = collection_path.ok_or(CaptureError::MissingCollectionPath)?;
        let rules = RedactionRules::new(sensitive_headers, &request_selectors, &response_selectors)?;

        Ok(CaptureConfig {
            collection_path,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            overwrite,
            canonicalize_responses,
            rules,
        })
    }
}
