use super::InoUploader;
use crate::upload::{SubmissionPhase, ERROR_PREFIX};
use eframe::egui::{self, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(0, 151, 157);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
const MUTED: Color32 = Color32::from_rgb(150, 150, 150);

fn phase_color(phase: SubmissionPhase) -> Color32 {
    match phase {
        SubmissionPhase::NavigatingSuccess => SUCCESS,
        SubmissionPhase::NavigatingFail | SubmissionPhase::Failed => ERROR,
        SubmissionPhase::Idle | SubmissionPhase::Aborted => MUTED,
        _ => ACCENT,
    }
}

impl InoUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Ino Uploader");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Compile an Arduino sketch and get board files")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);

                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        if ui.button("📁 Select .ino File").clicked() {
                            self.select_file();
                        }
                        match self.state.selection_label() {
                            Some(label) => {
                                ui.label(format!("Selected: {}", label));
                                if ui.small_button("✖").on_hover_text("Clear").clicked() {
                                    self.state.clear_selection();
                                }
                            }
                            None => {
                                ui.label(RichText::new("No file selected").color(MUTED));
                            }
                        }
                    });
                });

                ui.add_space(20.0);

                ui.vertical_centered(|ui| {
                    let button =
                        egui::Button::new("📤 Upload & Compile").min_size(egui::vec2(200.0, 40.0));
                    if ui.add(button).clicked() {
                        self.submit();
                    }
                });

                ui.add_space(20.0);

                let status = self.status_text();
                if !status.is_empty() {
                    ui.vertical_centered(|ui| {
                        let color = if status.starts_with(ERROR_PREFIX) {
                            ERROR
                        } else {
                            ui.visuals().text_color()
                        };
                        ui.colored_label(color, status);
                    });
                }

                if self.state.phase != SubmissionPhase::Idle {
                    ui.add_space(5.0);
                    ui.vertical_centered(|ui| {
                        ui.colored_label(phase_color(self.state.phase), self.state.phase.label());
                    });
                }

                if !self.state.submissions.is_empty() {
                    ui.add_space(10.0);
                    self.render_details(ui);
                }
            });
        });
    }

    fn render_details(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(if self.state.show_details {
                "Hide Details"
            } else {
                "Show Details"
            })
            .clicked()
        {
            self.state.show_details = !self.state.show_details;
        }

        if !self.state.show_details {
            return;
        }

        egui::ScrollArea::vertical()
            .id_source("submission_details")
            .max_height(200.0)
            .show(ui, |ui| {
                egui::Frame::none()
                    .fill(ui.style().visuals.extreme_bg_color)
                    .show(ui, |ui| {
                        ui.add_space(8.0);
                        for record in self.state.submissions.iter().rev() {
                            ui.horizontal(|ui| {
                                ui.label(format!("#{}", record.token.id()));
                                ui.colored_label(
                                    phase_color(record.phase),
                                    format!("{} - {}", record.file_name, record.phase.label()),
                                );
                            });
                            ui.add_space(4.0);
                        }
                        ui.add_space(8.0);
                    });
            });
    }
}
