//! Progress Notifications
//!
//! Side channel from the orchestrator to a UI layer. The sink is an injected
//! trait object called at well-defined checkpoints; it is not part of the
//! enrichment computation and holds no pipeline state.

use serde::{Deserialize, Serialize};

/// Coarse phase attached to a progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Enriching,
    Done,
}

/// One progress notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    pub progress: u64,
    pub max_progress: u64,
    pub text: String,
}

impl ProgressEvent {
    /// Event emitted once the base record count is known, before fan-out
    pub fn located(count: u64) -> Self {
        Self {
            status: ProgressStatus::Enriching,
            progress: 0,
            max_progress: count,
            text: format!("enriching {count} metadata records"),
        }
    }
}

/// Receiver for progress events.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Default sink that discards everything
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Sink that forwards events to tracing
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn emit(&self, event: ProgressEvent) {
        tracing::info!(
            status = ?event.status,
            progress = event.progress,
            max_progress = event.max_progress,
            "{}",
            event.text
        );
    }
}
