use egui::{Color32, RichText};

#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
use rfd::FileDialog;

#[cfg(target_arch = "wasm32")]
use crate::file_picker;
use crate::session::{Session, SessionError};

const COORDINATES_HINT: &str = "One rectangle per line, as x,y,w,h\n\
    A region block is generated for every line you enter\n\
    e.g.\n198,0,229,162\n426,0,228,162";

const OUTPUT_HINT: &str = "Open a file and update the coordinates to see the new text here.";

/// The region editor window: one file, one coordinate list, one generated text.
///
/// Nothing is persisted; a fresh window starts with an empty session.
#[derive(Default)]
pub struct RegionEditorApp {
    session: Session,

    coordinates: String,

    // Blocking error shown in a modal until dismissed.
    error: Option<SessionError>,

    copied: bool,

    scroll_to_output: bool,
}

impl RegionEditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Set visuals to dark by default
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self::default()
    }

    fn report<T>(&mut self, result: Result<T, SessionError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("{e}");
                self.error = Some(e);
                None
            }
        }
    }

    fn open_file(&mut self) {
        #[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
        if let Some(path) = FileDialog::new()
            .add_filter("Region file", crate::session::SUPPORTED_EXTENSIONS)
            .pick_file()
        {
            let name = display_name(&path);
            let result = self.session.load(&name, || std::fs::read(&path));
            self.loaded(result);
        }

        #[cfg(target_arch = "wasm32")]
        file_picker::open_file_picker();
    }

    fn loaded(&mut self, result: Result<usize, SessionError>) {
        if self.report(result).is_some() {
            self.copied = false;
        }
    }

    /// Pick up a file the browser finished reading since the last frame.
    #[cfg(target_arch = "wasm32")]
    fn poll_file_picker(&mut self) {
        if let Some(pick) = file_picker::take_picked_file() {
            let result = pick.and_then(|file| self.session.load_bytes(&file.name, &file.bytes));
            self.loaded(result);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };
        let name = if file.name.is_empty() {
            file.path.as_deref().map(display_name).unwrap_or_default()
        } else {
            file.name.clone()
        };
        let result = match (&file.bytes, &file.path) {
            (Some(bytes), _) => self.session.load_bytes(&name, bytes),
            (None, Some(path)) => self.session.load(&name, || std::fs::read(path)),
            (None, None) => Err(SessionError::FileRead {
                name: name.clone(),
                source: std::io::Error::other("dropped file has no contents"),
            }),
        };
        self.loaded(result);
    }

    fn update_output(&mut self) {
        let result = self.session.regenerate(&self.coordinates).map(|_| ());
        if self.report(result).is_some() {
            self.copied = false;
            self.scroll_to_output = true;
        }
    }

    fn copy_output(&mut self, ctx: &egui::Context) {
        let result = self.session.clipboard_text().map(str::to_owned);
        if let Some(text) = self.report(result) {
            ctx.copy_text(text);
            self.copied = true;
        }
    }

    fn file_section(&mut self, ui: &mut egui::Ui) {
        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let stroke_color = if hovering {
            Color32::from_rgb(0xff, 0x70, 0x43)
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color
        };

        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(2.0, stroke_color))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    if ui.button("Open...").clicked() {
                        self.open_file();
                    }
                    ui.label("or drop a .til / .txt file here");
                });
                ui.horizontal(|ui| {
                    ui.label("File:");
                    ui.label(self.session.file_name().unwrap_or("(none)"));
                    ui.separator();
                    ui.label("Regions in file:");
                    let count = self
                        .session
                        .region_count()
                        .map_or_else(|| "-".to_owned(), |c| c.to_string());
                    ui.label(RichText::new(count).strong());
                });
            });
    }

    fn coordinates_section(&mut self, ui: &mut egui::Ui) {
        ui.label("Coordinates:");
        ui.add(
            egui::TextEdit::multiline(&mut self.coordinates)
                .hint_text(COORDINATES_HINT)
                .font(egui::TextStyle::Monospace)
                .desired_rows(8)
                .desired_width(f32::INFINITY),
        );
        if ui.button("Update").clicked() {
            self.update_output();
        }
    }

    fn output_section(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Output:");
            if ui.button("Copy").clicked() {
                self.copy_output(ui.ctx());
            }
            if self.copied {
                ui.colored_label(Color32::from_rgb(0x4c, 0xaf, 0x50), "Copied");
            }
        });

        let mut text = self.session.output().unwrap_or_default();
        let response = ui.add(
            egui::TextEdit::multiline(&mut text)
                .hint_text(OUTPUT_HINT)
                .font(egui::TextStyle::Monospace)
                .desired_rows(10)
                .desired_width(f32::INFINITY),
        );
        if std::mem::take(&mut self.scroll_to_output) {
            response.scroll_to_me(Some(egui::Align::TOP));
        }
    }

    fn error_modal(&mut self, ctx: &egui::Context) {
        let Some(error) = &self.error else {
            return;
        };
        let message = error.to_string();
        let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
            ui.set_width(320.0);
            ui.heading("Cannot do that");
            ui.label(message.as_str());
            ui.add_space(8.0);
            ui.button("OK").clicked()
        });
        if modal.inner || modal.should_close() {
            self.error = None;
        }
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl eframe::App for RegionEditorApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        #[cfg(target_arch = "wasm32")]
        self.poll_file_picker();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                // NOTE: no File->Quit on web pages!
                let is_web = cfg!(target_arch = "wasm32");
                if !is_web {
                    ui.menu_button("File", |ui| {
                        if ui.button("Open...").clicked() {
                            self.open_file();
                        }
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                    ui.add_space(16.0);
                }

                egui::widgets::global_theme_preference_buttons(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("TIL Region Editor");
                ui.separator();

                self.file_section(ui);
                ui.add_space(8.0);
                self.coordinates_section(ui);
                ui.separator();
                self.output_section(ui);

                ui.add_space(8.0);
                egui::warn_if_debug_build(ui);
            });
        });

        self.error_modal(ctx);

        // The browser picker completes outside of egui's event loop.
        #[cfg(target_arch = "wasm32")]
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
