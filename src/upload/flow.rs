use super::client::{self, UploadTransport};
use super::error::{SubmitError, NO_FILE_MESSAGE};
use super::interceptor;
use super::interpreter;
use super::status::{error_text, StatusPort, SubmissionToken, UPLOADING_MESSAGE};
use super::types::{FileSelection, NavigationTarget, QueryEncoding, SelectedFile, SubmitOutcome};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Blocking notification shown to the user.
pub trait Alert: Send + Sync {
    fn alert(&self, message: &str);
}

/// Opens the results page for a finished submission.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &NavigationTarget) -> std::io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Aborted,
    Uploading,
    ParsingResponse,
    NavigatingSuccess,
    NavigatingFail,
    Failed,
}

impl SubmissionPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Validating => "Validating",
            Self::Aborted => "Aborted",
            Self::Uploading => "📤 Uploading",
            Self::ParsingResponse => "Reading response",
            Self::NavigatingSuccess => "✅ Opened results",
            Self::NavigatingFail => "❌ Opened failure page",
            Self::Failed => "Failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Aborted | Self::NavigatingSuccess | Self::NavigatingFail | Self::Failed
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhaseUpdate {
    pub token: SubmissionToken,
    pub phase: SubmissionPhase,
}

/// A submission that passed validation and owns a status token.
#[derive(Debug, Clone)]
pub struct Submission {
    pub token: SubmissionToken,
    pub file: SelectedFile,
}

#[derive(Clone)]
pub struct SubmitFlow {
    status: Arc<dyn StatusPort>,
    alert: Arc<dyn Alert>,
    navigator: Arc<dyn Navigator>,
    transport: Arc<dyn UploadTransport>,
    encoding: QueryEncoding,
    phases: Option<Sender<PhaseUpdate>>,
}

impl SubmitFlow {
    pub fn new(
        status: Arc<dyn StatusPort>,
        alert: Arc<dyn Alert>,
        navigator: Arc<dyn Navigator>,
        transport: Arc<dyn UploadTransport>,
    ) -> Self {
        Self {
            status,
            alert,
            navigator,
            transport,
            encoding: QueryEncoding::default(),
            phases: None,
        }
    }

    pub fn with_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_phase_updates(mut self, sender: Sender<PhaseUpdate>) -> Self {
        self.phases = Some(sender);
        self
    }

    /// Synchronous half of a submission: validate, take a token and show the
    /// progress text. `None` means the submission was aborted.
    pub fn start(&self, selection: &FileSelection) -> Option<Submission> {
        let file = match interceptor::intercept(selection) {
            Ok(file) => file.clone(),
            Err(err) => {
                info!("submission aborted: {}", err);
                self.alert.alert(NO_FILE_MESSAGE);
                return None;
            }
        };

        let token = self.status.begin();
        info!(token = token.id(), file = %file.name, "submission started");
        self.status.write(token, UPLOADING_MESSAGE);

        Some(Submission { token, file })
    }

    /// Asynchronous half: upload, interpret, then navigate or report.
    pub async fn finish(&self, submission: Submission) -> SubmitOutcome {
        let token = submission.token;
        self.report_phase(token, SubmissionPhase::Uploading);

        match self.run(&submission).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = err.to_string();
                warn!(token = token.id(), error = %message, "submission failed");
                self.status.write(token, &error_text(&message));
                self.report_phase(token, SubmissionPhase::Failed);
                SubmitOutcome::Failed(message)
            }
        }
    }

    async fn run(&self, submission: &Submission) -> Result<SubmitOutcome, SubmitError> {
        let token = submission.token;
        let response = client::upload(self.transport.as_ref(), &submission.file).await?;

        self.report_phase(token, SubmissionPhase::ParsingResponse);
        let target = interpreter::interpret(&response, self.encoding)?;

        let phase = if target.is_success() {
            SubmissionPhase::NavigatingSuccess
        } else {
            SubmissionPhase::NavigatingFail
        };

        info!(token = token.id(), target = %target, "opening results page");
        self.navigator
            .navigate(&target)
            .map_err(|e| SubmitError::Navigation(e.to_string()))?;
        self.report_phase(token, phase);

        Ok(if target.is_success() {
            SubmitOutcome::NavigatedSuccess(target)
        } else {
            SubmitOutcome::NavigatedFail(target)
        })
    }

    fn report_phase(&self, token: SubmissionToken, phase: SubmissionPhase) {
        if let Some(sender) = &self.phases {
            if sender.send(PhaseUpdate { token, phase }).is_err() {
                debug!(token = token.id(), ?phase, "phase receiver gone");
            }
        }
    }
}
