use crate::persist::{self, SaveSource, DEFAULT_FILE_NAME};
use crate::sim::Simulation;

pub const HELP_TEXT: &str = "F1 - Pause/start the simulation\n\
F2 - Clear the entire screen\n\
F3 - Save simulation to a file\n\
F4 - Load simulation from a file\n\
F5 - Show this help\n\
\n\
Left Mouse - Draw cell\n\
Right Mouse - Remove cell\n\
\n\
Scroll Wheel Up - Increase simulation speed\n\
Scroll Wheel Down - Decrease simulation speed";

/// Which dialog, if any, is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    None,
    Help,
    Save { source: SaveSource },
    Load,
}

/// egui overlay state: the open dialog, the path being edited and the last
/// save/load outcome.
pub struct Overlay {
    pub dialog: Dialog,
    pub path: String,
    pub message: Option<String>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            dialog: Dialog::None,
            path: DEFAULT_FILE_NAME.to_string(),
            message: None,
        }
    }
}

impl Overlay {
    pub fn open_help(&mut self) {
        self.dialog = Dialog::Help;
    }

    pub fn open_save(&mut self) {
        self.dialog = Dialog::Save { source: SaveSource::Current };
    }

    pub fn open_load(&mut self) {
        self.dialog = Dialog::Load;
    }

    /// Run the pending save. Failures are reported, never fatal.
    pub fn save(&mut self, sim: &Simulation, source: SaveSource) {
        let path = persist::resolve_path(&self.path);
        self.message = Some(match sim.save(&path, source) {
            Ok(()) => format!("Saved {:?} state to {}", source, path.display()),
            Err(e) => {
                log::warn!("Save to {} failed: {}", path.display(), e);
                format!("Save failed: {}", e)
            }
        });
        self.dialog = Dialog::None;
    }

    pub fn load(&mut self, sim: &mut Simulation) {
        let path = persist::resolve_path(&self.path);
        self.message = Some(match sim.load(&path) {
            Ok(()) => format!("Loaded {}", path.display()),
            Err(e) => {
                log::warn!("Load from {} failed: {}", path.display(), e);
                format!("Load failed: {}", e)
            }
        });
        self.dialog = Dialog::None;
    }
}

/// Draw the status line and any open dialog.
pub fn draw(ctx: &egui::Context, sim: &mut Simulation, overlay: &mut Overlay) {
    // Status in the top-left corner
    egui::Area::new(egui::Id::new("status_area"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(5.0, 5.0))
        .show(ctx, |ui| {
            let frame = egui::Frame {
                fill: egui::Color32::from_rgba_unmultiplied(25, 25, 25, 160),
                inner_margin: egui::Margin::same(4.0),
                ..Default::default()
            };
            frame.show(ui, |ui| {
                let status = if sim.is_running() { "Running" } else { "Paused" };
                ui.label(format!(
                    "{} | Generation: {} | Speed: 1/{} frames | Live: {}",
                    status,
                    sim.generation(),
                    sim.clock().threshold() + 1,
                    sim.grid().live_count()
                ));
                if let Some(message) = &overlay.message {
                    ui.label(message.as_str());
                }
                ui.label("F5 - Help");
            });
        });

    match overlay.dialog.clone() {
        Dialog::None => {}
        Dialog::Help => {
            let mut open = true;
            egui::Window::new("Help")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(HELP_TEXT);
                });
            if !open {
                overlay.dialog = Dialog::None;
            }
        }
        Dialog::Save { mut source } => {
            let mut confirmed = false;
            let mut cancelled = false;
            egui::Window::new("Saving")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label("Would you like to save the current or previous state?");
                    ui.horizontal(|ui| {
                        ui.radio_value(&mut source, SaveSource::Previous, "Previous");
                        ui.radio_value(&mut source, SaveSource::Current, "Current");
                    });
                    ui.horizontal(|ui| {
                        ui.label("File:");
                        ui.text_edit_singleline(&mut overlay.path);
                    });
                    ui.horizontal(|ui| {
                        confirmed = ui.button("Save").clicked();
                        cancelled = ui.button("Cancel").clicked();
                    });
                });

            if confirmed {
                overlay.save(sim, source);
            } else if cancelled {
                overlay.dialog = Dialog::None;
            } else {
                overlay.dialog = Dialog::Save { source };
            }
        }
        Dialog::Load => {
            let mut confirmed = false;
            let mut cancelled = false;
            egui::Window::new("Loading")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("File:");
                        ui.text_edit_singleline(&mut overlay.path);
                    });
                    ui.horizontal(|ui| {
                        confirmed = ui.button("Load").clicked();
                        cancelled = ui.button("Cancel").clicked();
                    });
                });

            if confirmed {
                overlay.load(sim);
            } else if cancelled {
                overlay.dialog = Dialog::None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_reports_success_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let mut overlay = Overlay::default();
        overlay.open_save();
        overlay.path = dir.path().join("state").to_string_lossy().into_owned();

        let sim = Simulation::new(4, 4, 1);
        overlay.save(&sim, SaveSource::Current);

        assert_eq!(overlay.dialog, Dialog::None);
        assert!(overlay.message.as_deref().unwrap().starts_with("Saved"));
        assert!(dir.path().join("state.gol").exists());
    }

    #[test]
    fn load_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut overlay = Overlay::default();
        overlay.open_load();
        overlay.path = dir.path().join("absent.gol").to_string_lossy().into_owned();

        let mut sim = Simulation::new(4, 4, 1);
        overlay.load(&mut sim);

        assert_eq!(overlay.dialog, Dialog::None);
        assert!(overlay.message.as_deref().unwrap().starts_with("Load failed"));
    }
}
