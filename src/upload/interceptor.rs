use super::error::SubmitError;
use super::types::{FileSelection, SelectedFile};

/// Picks the file a submission will upload. An empty selection aborts the
/// submission before anything is written or sent.
pub fn intercept(selection: &FileSelection) -> Result<&SelectedFile, SubmitError> {
    selection.first().ok_or(SubmitError::Validation)
}
