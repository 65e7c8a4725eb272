mod platform;
mod state;
mod ui;

use crate::config::Settings;
use crate::upload::{FileSelection, HttpTransport, StatusBoard, SubmissionPhase, SubmitFlow};
use derivative::Derivative;
use eframe::{egui, App};
use platform::{BrowserNavigator, DialogAlert};
use rfd::FileDialog;
use state::UploadState;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{info, warn};

#[derive(Derivative)]
#[derivative(Debug)]
pub struct InoUploader {
    state: UploadState,
    status: StatusBoard,
    #[derivative(Debug = "ignore")]
    flow: SubmitFlow,
    runtime: Runtime,
}

impl InoUploader {
    pub fn new(settings: &Settings, runtime: Runtime) -> anyhow::Result<Self> {
        info!(service = %settings.service_url, "initializing ino uploader");

        let status = StatusBoard::new();
        let transport = HttpTransport::new(&settings.service_url)?;
        let (phase_sender, phase_receiver) = mpsc::channel();

        let flow = SubmitFlow::new(
            Arc::new(status.clone()),
            Arc::new(DialogAlert),
            Arc::new(BrowserNavigator::new(settings.service_url.clone())),
            Arc::new(transport),
        )
        .with_encoding(settings.query_encoding)
        .with_phase_updates(phase_sender);

        Ok(Self {
            state: UploadState {
                phase_receiver: Some(phase_receiver),
                ..Default::default()
            },
            status,
            flow,
            runtime,
        })
    }

    pub fn select_file(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Arduino sketch", &["ino"])
            .pick_file()
        else {
            return;
        };

        self.state.selected_size = match std::fs::metadata(&path) {
            Ok(meta) => Some(meta.len()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not stat selected file");
                None
            }
        };
        self.state.selection = FileSelection::single(path);
    }

    /// Runs the synchronous checks on the UI thread, then hands the upload to
    /// the runtime. Earlier submissions keep running.
    pub fn submit(&mut self) {
        self.state.phase = SubmissionPhase::Validating;

        let Some(submission) = self.flow.start(&self.state.selection) else {
            self.state.phase = SubmissionPhase::Aborted;
            return;
        };

        self.state.track(&submission);
        let flow = self.flow.clone();
        self.runtime.spawn(async move {
            flow.finish(submission).await;
        });
    }

    pub fn status_text(&self) -> String {
        self.status.text()
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.state.poll() {
            ctx.request_repaint();
        }
        if self.state.in_flight() > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl App for InoUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
