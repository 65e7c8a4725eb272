mod client;
mod error;
mod flow;
mod interceptor;
mod interpreter;
mod status;
mod types;

pub use client::{HttpTransport, UploadTransport};
pub use error::{SubmitError, TransportError};
pub use flow::{Alert, Navigator, PhaseUpdate, Submission, SubmissionPhase, SubmitFlow};
pub use status::{StatusBoard, StatusPort, SubmissionToken, ERROR_PREFIX};
pub use types::{
    FileSelection, NavigationTarget, QueryEncoding, SelectedFile, SubmitOutcome,
    UploadResult,
};
