//! The capture pipeline: coordinator, redaction, canonicalization, naming
//! and persistence.
//!
//! The [`CaptureCoordinator`] subscribes to the collection runner's
//! lifecycle events and turns every completed exchange into one fixture
//! file: redact, optionally canonicalize the response body, derive the file
//! name, write. Exchanges are processed strictly one at a time in emission
//! order; each write completes before the next event is handled.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

mod canonical;
mod config;
mod error;
mod events;
mod exchange;
mod naming;
mod redaction;
mod writer;

pub use self::canonical::canonicalize_value;
pub use self::config::{CaptureConfig, CaptureConfigBuilder};
pub use self::error::CaptureError;
pub use self::events::{ExchangeCompleted, RunEvent};
pub use self::exchange::{Exchange, FixtureRecord, HeaderPair, RequestRecord, ResponseRecord};
pub use self::naming::fixture_file_name;
pub use self::redaction::{CORRELATION_HEADER, FieldSelector, MASKED_VALUE, RedactionRules};
pub use self::writer::FixtureWriter;

/// Lifecycle state of a capture run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// No run has started yet.
    Idle,
    /// A run is in progress; exchanges are being captured.
    Running,
    /// The run is over.
    Finished(RunOutcome),
}

/// Aggregate result of a finished run.
///
/// Exchange-level capture failures do not fail a run: capture is
/// best-effort, and whether the collection itself executed correctly is the
/// runner's verdict, reported through [`RunEvent::Ended`]. The captured and
/// skipped tallies record how the best effort went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Whether the runner completed the collection without a run-level error.
    pub success: bool,
    /// The run-level error description, when there is one.
    pub error: Option<String>,
    /// Number of exchanges persisted as fixtures.
    pub captured: usize,
    /// Number of exchanges that failed capture and were skipped.
    pub skipped: usize,
}

/// Drives the capture of one collection run.
///
/// Feed it the runner's events in emission order via
/// [`handle_event`](Self::handle_event):
///
/// - [`RunEvent::Started`] prepares the destination directory. A
///   destination that cannot be prepared is fatal: the run finishes failed
///   and later events are ignored.
/// - [`RunEvent::ExchangeCompleted`] runs one exchange through the
///   pipeline. A failure here is logged, counted as skipped and does not
///   abort the run: exchanges are isolated from each other.
/// - [`RunEvent::Ended`] finalizes the [`RunOutcome`].
///
/// Events arriving in a state that does not expect them are logged and
/// dropped; the runner owns the lifecycle and the coordinator never guesses
/// a missing transition.
#[derive(Debug)]
pub struct CaptureCoordinator {
    config: CaptureConfig,
    writer: FixtureWriter,
    state: RunState,
    captured: usize,
    skipped: usize,
}

impl CaptureCoordinator {
    /// Creates a coordinator for one run of `config`.
    #[must_use]
    pub fn new(config: CaptureConfig) -> Self {
        let writer = FixtureWriter::new(config.output_dir(), config.overwrite());
        Self {
            config,
            writer,
            state: RunState::Idle,
            captured: 0,
            skipped: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// The run outcome, once the run has finished.
    pub fn outcome(&self) -> Option<&RunOutcome> {
        match &self.state {
            RunState::Finished(outcome) => Some(outcome),
            RunState::Idle | RunState::Running => None,
        }
    }

    /// Handles one runner lifecycle event.
    pub fn handle_event(&mut self, event: RunEvent) {
        match event {
            RunEvent::Started => self.on_started(),
            RunEvent::ExchangeCompleted(completed) => self.on_exchange_completed(completed),
            RunEvent::Ended { error } => self.on_ended(error),
        }
    }

    fn on_started(&mut self) {
        if self.state != RunState::Idle {
            warn!(state = ?self.state, "ignoring start event, run already started");
            return;
        }

        match self.writer.prepare() {
            Ok(()) => {
                debug!(destination = %self.writer.destination().display(), "destination ready");
                self.state = RunState::Running;
            }
            Err(prepare_error) => {
                error!(
                    error = %prepare_error,
                    destination = %self.writer.destination().display(),
                    "cannot prepare the destination, aborting the run"
                );
                self.state = RunState::Finished(RunOutcome {
                    success: false,
                    error: Some(prepare_error.to_string()),
                    captured: 0,
                    skipped: 0,
                });
            }
        }
    }

    fn on_exchange_completed(&mut self, completed: ExchangeCompleted) {
        if self.state != RunState::Running {
            warn!(
                state = ?self.state,
                label = %completed.label,
                "ignoring exchange event outside of a running capture"
            );
            return;
        }

        let label = completed.label.clone();
        match self.capture_exchange(completed) {
            Ok(path) => {
                self.captured += 1;
                debug!(%label, path = %path.display(), "exchange captured");
            }
            Err(capture_error) => {
                self.skipped += 1;
                warn!(error = %capture_error, %label, "exchange capture failed, continuing");
            }
        }
    }

    fn on_ended(&mut self, error: Option<String>) {
        if self.state != RunState::Running {
            warn!(state = ?self.state, "ignoring end event outside of a running capture");
            return;
        }

        match &error {
            Some(message) => {
                error!(
                    %message,
                    captured = self.captured,
                    skipped = self.skipped,
                    "collection run failed"
                );
            }
            None => {
                info!(
                    captured = self.captured,
                    skipped = self.skipped,
                    "collection capture finished"
                );
            }
        }

        self.state = RunState::Finished(RunOutcome {
            success: error.is_none(),
            error,
            captured: self.captured,
            skipped: self.skipped,
        });
    }

    /// Runs one exchange through redact → canonicalize → name → write.
    fn capture_exchange(&self, completed: ExchangeCompleted) -> Result<PathBuf, CaptureError> {
        let label = completed.label.clone();
        let exchange = completed.into_exchange();

        let mut exchange = self.config.rules().apply(exchange);
        if self.config.canonicalize_responses() {
            let response_body = std::mem::take(&mut exchange.response_body);
            exchange.response_body = canonicalize_value(response_body);
        }

        let file_name = fixture_file_name(self.config.collection_path(), &label);
        let record = FixtureRecord::from(exchange);
        self.writer.write(&file_name, &record)
    }
}
