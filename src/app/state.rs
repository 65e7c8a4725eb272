use crate::upload::{FileSelection, PhaseUpdate, Submission, SubmissionPhase, SubmissionToken};
use crate::utils::file_size::format_size;
use derivative::Derivative;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub token: SubmissionToken,
    pub file_name: String,
    pub phase: SubmissionPhase,
}

#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct UploadState {
    pub selection: FileSelection,
    pub selected_size: Option<u64>,
    pub phase: SubmissionPhase,
    pub latest_token: Option<SubmissionToken>,
    pub submissions: Vec<SubmissionRecord>,
    pub show_details: bool,
    #[derivative(Debug = "ignore")]
    pub phase_receiver: Option<Receiver<PhaseUpdate>>,
}

impl UploadState {
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.selected_size = None;
    }

    pub fn track(&mut self, submission: &Submission) {
        self.latest_token = Some(submission.token);
        self.phase = SubmissionPhase::Uploading;
        self.submissions.push(SubmissionRecord {
            token: submission.token,
            file_name: submission.file.name.clone(),
            phase: SubmissionPhase::Uploading,
        });
    }

    /// Records a phase change. The headline phase follows only the newest
    /// submission.
    pub fn apply(&mut self, update: PhaseUpdate) {
        if let Some(record) = self
            .submissions
            .iter_mut()
            .find(|record| record.token == update.token)
        {
            record.phase = update.phase;
        }
        if self.latest_token == Some(update.token) {
            self.phase = update.phase;
        }
    }

    /// Drains pending phase updates; returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        let updates: Vec<PhaseUpdate> = match &self.phase_receiver {
            Some(receiver) => receiver.try_iter().collect(),
            None => return false,
        };
        let changed = !updates.is_empty();
        for update in updates {
            self.apply(update);
        }
        changed
    }

    pub fn in_flight(&self) -> usize {
        self.submissions
            .iter()
            .filter(|record| !record.phase.is_terminal())
            .count()
    }

    pub fn selection_label(&self) -> Option<String> {
        let file = self.selection.first()?;
        Some(match self.selected_size {
            Some(size) => format!("{} ({})", file.name, format_size(size)),
            None => file.name.clone(),
        })
    }
}
