//! Main application UI.
//! Binds the study session to egui widgets and applies background task results every frame.

use eframe::egui;
use flashcards_app::api::generation::SUPPORTED_EXTENSIONS;
use flashcards_app::config::Config;
use flashcards_app::export::json::{default_export_name, export_deck_to_path, import_deck};
use flashcards_app::markdown::{Block, Span, parse_explanation};
use flashcards_app::models::{ExplanationKind, ExplanationState, StudySession};
use flashcards_app::tasks::{TaskManager, TaskResult};
use log::warn;

const FLIP_SECONDS: f32 = 0.4;

/// Main application state
pub struct MyApp {
    config: Config,
    session: StudySession,
    tasks: TaskManager,

    show_result_dialog: bool,
    result_message: String,
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_task_results();

        self.render_main_screen(ctx);
        self.render_explanation_modal(ctx);

        if self.session.is_loading() {
            egui::Window::new("🧠 Cooking up your flashcards...")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.spinner();
                        ui.label("Analyzing your content and generating smart questions...");
                    });
                });
        }

        if self.show_result_dialog {
            egui::Window::new("Import/Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_result_dialog = false;
                    }
                });
        }

        if self.session.card_view().is_typing() {
            self.session
                .card_view_mut()
                .advance_typing(self.config.typing_chars_per_frame);
            ctx.request_repaint();
        }
    }
}

impl MyApp {
    pub fn new(config: Config, tasks: TaskManager) -> Self {
        Self {
            config,
            session: StudySession::new(),
            tasks,
            show_result_dialog: false,
            result_message: String::new(),
        }
    }

    /// Feeds finished uploads and explanations back into the session
    fn apply_task_results(&mut self) {
        for result in self.tasks.poll_results() {
            match result {
                TaskResult::FlashcardsGenerated { seq, result } => {
                    self.session.finish_upload(seq, result);
                }
                TaskResult::ExplanationReady { seq, response } => {
                    self.session.finish_explanation(seq, response);
                }
            }
        }
    }

    /// Renders the upload section, the current card and navigation
    fn render_main_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🧠 Try Mode - Flashcards");
            ui.label("Upload your study material and let AI create interactive flashcards");
            ui.separator();

            // Deferred so the session isn't borrowed while widgets are drawn
            let mut action_pick = false;
            let mut action_upload = false;
            let mut action_export = false;
            let mut action_import = false;

            ui.horizontal(|ui| {
                if ui.button("Choose File...").clicked() {
                    action_pick = true;
                }
                match self.session.selected_file().and_then(|p| p.file_name()) {
                    Some(name) => ui.label(name.to_string_lossy().into_owned()),
                    None => ui.label("No file selected (.pdf, .docx, .pptx, .txt)"),
                };
            });

            let upload_text = if self.session.is_loading() {
                "Generating..."
            } else {
                "✨ Generate Flashcards"
            };
            if ui
                .add_enabled(self.session.can_upload(), egui::Button::new(upload_text))
                .clicked()
            {
                action_upload = true;
            }

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.session.deck().is_empty(), egui::Button::new("Export Deck"))
                    .clicked()
                {
                    action_export = true;
                }
                if ui.button("Import Deck").clicked() {
                    action_import = true;
                }
            });

            if let Some(message) = self.session.last_error() {
                ui.colored_label(
                    egui::Color32::LIGHT_RED,
                    format!("Could not generate flashcards: {}", message),
                );
            }

            ui.separator();

            if !self.session.deck().is_empty() {
                self.render_card(ui);
                ui.add_space(10.0);
                self.render_navigation(ui);
            }

            if action_pick {
                self.handle_pick_file();
            }
            if action_upload {
                self.handle_upload();
            }
            if action_export {
                self.handle_export();
            }
            if action_import {
                self.handle_import();
            }
        });
    }

    /// Renders the flip card and, on its answer side, the explanation buttons
    fn render_card(&mut self, ui: &mut egui::Ui) {
        let Some(card) = self.session.deck().current().cloned() else {
            return;
        };
        let view = self.session.card_view();
        let flipped = view.is_flipped();
        let flip_id = egui::Id::new(("card_flip", view.id()));

        let progress = ui.ctx().animate_bool_with_time(flip_id, flipped, FLIP_SECONDS);
        let target = if flipped { 1.0 } else { 0.0 };
        if view.is_animating() && (progress - target).abs() < 1e-3 {
            self.session.card_view_mut().finish_animation();
        }
        let show_back = progress >= 0.5;

        let response = ui
            .group(|ui| {
                ui.set_min_height(250.0);
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    if show_back {
                        ui.heading("💡 Answer");
                        ui.add_space(10.0);
                        ui.label(egui::RichText::new(&card.answer).size(18.0));
                    } else {
                        ui.heading("🤔 Question");
                        ui.add_space(10.0);
                        ui.label(egui::RichText::new(&card.question).size(18.0));
                    }
                    ui.add_space(20.0);
                    let hint = if show_back {
                        "Click to return to question ↑"
                    } else {
                        "Click to reveal answer ↓"
                    };
                    ui.label(egui::RichText::new(hint).italics().weak());
                });
            })
            .response
            .interact(egui::Sense::click());

        if response.clicked() {
            self.session.flip_card();
        }

        if show_back && flipped {
            let mut action_explain: Option<ExplanationKind> = None;

            ui.label(egui::RichText::new("Need more help? Click below:").italics());
            ui.horizontal(|ui| {
                for kind in ExplanationKind::ALL {
                    if ui.button(kind.button_label()).clicked() {
                        action_explain = Some(kind);
                    }
                }
            });

            if let Some(kind) = action_explain {
                if let Some(ticket) = self.session.request_explanation(kind) {
                    self.tasks.request_explanation(ticket);
                }
            }
        }
    }

    fn render_navigation(&mut self, ui: &mut egui::Ui) {
        let mut action_previous = false;
        let mut action_next = false;

        ui.horizontal(|ui| {
            let deck = self.session.deck();
            if ui
                .add_enabled(deck.has_previous(), egui::Button::new("Previous"))
                .clicked()
            {
                action_previous = true;
            }
            ui.label(format!("{} cards", deck.position_label()));
            if ui
                .add_enabled(deck.has_next(), egui::Button::new("Next"))
                .clicked()
            {
                action_next = true;
            }
        });

        if action_previous {
            self.session.previous_card();
        }
        if action_next {
            self.session.next_card();
        }
    }

    /// Renders the explanation window while the modal is open
    fn render_explanation_modal(&mut self, ctx: &egui::Context) {
        let (kind, body) = match self.session.card_view().explanation() {
            ExplanationState::Idle => return,
            ExplanationState::Loading { kind } => (*kind, None),
            ExplanationState::Displaying {
                kind,
                response,
                typing,
            } => (
                *kind,
                Some((
                    response.original_question().to_string(),
                    response.original_answer().to_string(),
                    typing.visible().to_string(),
                    None,
                )),
            ),
            ExplanationState::Error { kind, response } => (
                *kind,
                Some((
                    response.original_question().to_string(),
                    response.original_answer().to_string(),
                    response.explanation().to_string(),
                    response.error().map(str::to_string),
                )),
            ),
        };

        let mut open = true;
        let mut action_close = false;
        let mut action_skip = false;
        let typing = self.session.card_view().is_typing();

        egui::Window::new(kind.title())
            .id(egui::Id::new("explanation_modal"))
            .open(&mut open)
            .collapsible(false)
            .default_width(520.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                match &body {
                    None => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Generating explanation...");
                        });
                    }
                    Some((question, answer, text, error)) => {
                        egui::ScrollArea::vertical()
                            .max_height(400.0)
                            .show(ui, |ui| {
                                ui.label(egui::RichText::new("Original Question:").strong());
                                ui.label(question);
                                ui.add_space(8.0);
                                ui.label(egui::RichText::new("Original Answer:").strong());
                                ui.label(answer);
                                ui.add_space(8.0);
                                ui.label(
                                    egui::RichText::new(format!("{}:", kind.heading())).strong(),
                                );
                                render_markdown(ui, text);
                                if let Some(error) = error {
                                    ui.add_space(4.0);
                                    ui.label(egui::RichText::new(error).weak().small());
                                }
                            });
                    }
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Got it!").clicked() {
                        action_close = true;
                    }
                    if typing && ui.button("Skip").clicked() {
                        action_skip = true;
                    }
                });
            });

        if !open || action_close {
            self.session.card_view_mut().close_explanation();
        } else if action_skip {
            self.session.card_view_mut().skip_typing();
        }
    }

    fn handle_pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Study material", &SUPPORTED_EXTENSIONS)
            .pick_file()
        {
            self.session.select_file(path);
        }
    }

    fn handle_upload(&mut self) {
        match self.session.begin_upload() {
            Ok(ticket) => self.tasks.generate_flashcards(ticket),
            Err(e) => warn!("Upload not started: {}", e),
        }
    }

    /// Handles deck export to JSON file
    fn handle_export(&mut self) {
        let deck = self.session.deck();
        if deck.is_empty() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(default_export_name(deck))
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            self.result_message = match export_deck_to_path(deck, &path) {
                Ok(()) => format!("Deck with {} cards exported successfully!", deck.len()),
                Err(e) => format!("Export failed: {}", e),
            };
            self.show_result_dialog = true;
        }
    }

    /// Handles deck import from JSON file
    fn handle_import(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        {
            match import_deck(&path) {
                Ok(deck) => {
                    self.result_message =
                        format!("Deck imported successfully with {} cards!", deck.len());
                    self.session.load_deck(deck);
                }
                Err(e) => {
                    self.result_message = format!(
                        "Import failed: {}\n\nPlease check if the file has correct structure:\n{{\n  \"flashcards\": [{{\"question\": ..., \"answer\": ...}}]\n}}",
                        e
                    );
                }
            }
            self.show_result_dialog = true;
        }
    }
}

/// Draws an explanation written in markdown, or a prefix of one while it is being revealed
fn render_markdown(ui: &mut egui::Ui, text: &str) {
    for block in parse_explanation(text) {
        match block {
            Block::Heading { level, spans } => {
                let size = match level {
                    1 => 22.0,
                    2 => 19.0,
                    _ => 16.0,
                };
                ui.add_space(4.0);
                let job = spans_job(ui, &spans, Some(size), true);
                ui.label(job);
            }
            Block::Paragraph(spans) => {
                let job = spans_job(ui, &spans, None, false);
                ui.label(job);
            }
            Block::ListItem {
                marker,
                depth,
                spans,
            } => {
                ui.horizontal_wrapped(|ui| {
                    ui.add_space(12.0 + depth as f32 * 16.0);
                    ui.label(marker);
                    let job = spans_job(ui, &spans, None, false);
                    ui.label(job);
                });
            }
            Block::Quote(spans) => {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new("▎").weak());
                    let job = spans_job(ui, &spans, None, false);
                    ui.label(job);
                });
            }
            Block::CodeBlock(code) => {
                ui.code(code);
            }
            Block::Rule => {
                ui.separator();
            }
        }
    }
}

fn spans_job(
    ui: &egui::Ui,
    spans: &[Span],
    size: Option<f32>,
    heading: bool,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    for span in spans {
        let mut text = egui::RichText::new(&span.text);
        if span.strong || heading {
            text = text.strong();
        }
        if span.emphasis {
            text = text.italics();
        }
        if span.code {
            text = text.code();
        }
        if let Some(size) = size {
            text = text.size(size);
        }
        text.append_to(
            &mut job,
            ui.style(),
            egui::FontSelection::Default,
            egui::Align::Center,
        );
    }
    job
}
