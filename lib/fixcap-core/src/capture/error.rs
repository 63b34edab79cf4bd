/// Errors that can occur while capturing a collection run.
///
/// Variants are split along the failure taxonomy of the pipeline: filesystem
/// and serialization failures surface while preparing the destination or
/// persisting a fixture, selector and collection-path problems are
/// configuration errors raised before a run starts.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum CaptureError {
    /// Filesystem failure while preparing the destination directory or
    /// writing a fixture file.
    Io(std::io::Error),

    /// Fixture record serialization failure.
    ///
    /// Occurs when a record cannot be rendered as JSON text.
    Json(serde_json::Error),

    /// A sensitive-field selector expression could not be parsed.
    ///
    /// Raised when the rule set is constructed, before any run starts.
    #[display("Invalid selector '{expression}': {message}")]
    #[from(skip)]
    InvalidSelector {
        /// The selector expression as provided by the caller.
        expression: String,
        /// Description of the parse failure.
        message: String,
    },

    /// No collection path was provided.
    ///
    /// The collection path is required to derive fixture file names.
    #[display("A collection path is required")]
    MissingCollectionPath,
}
