use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

pub const UPLOADING_MESSAGE: &str = "⏳ Uploading and compiling...";
pub const ERROR_PREFIX: &str = "❌ Error: ";

pub fn error_text(message: &str) -> String {
    format!("{}{}", ERROR_PREFIX, message)
}

/// Ticket for one submission. Only the newest ticket may write the status
/// region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubmissionToken(u64);

impl SubmissionToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The single text region every submission reports into.
pub trait StatusPort: Send + Sync {
    fn begin(&self) -> SubmissionToken;

    /// Returns false when the write was dropped because a newer submission
    /// started.
    fn write(&self, token: SubmissionToken, text: &str) -> bool;
}

#[derive(Debug, Default)]
struct BoardInner {
    latest: u64,
    text: String,
}

#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    inner: Arc<Mutex<BoardInner>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    fn lock(&self) -> MutexGuard<'_, BoardInner> {
        // A poisoned board still holds valid text.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StatusPort for StatusBoard {
    fn begin(&self) -> SubmissionToken {
        let mut inner = self.lock();
        inner.latest += 1;
        SubmissionToken(inner.latest)
    }

    fn write(&self, token: SubmissionToken, text: &str) -> bool {
        let mut inner = self.lock();
        if token.0 != inner.latest {
            debug!(
                token = token.0,
                latest = inner.latest,
                "dropping status from superseded submission"
            );
            return false;
        }
        inner.text = text.to_string();
        true
    }
}
