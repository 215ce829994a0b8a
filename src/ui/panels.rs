use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::EXPORT_FILE_NAME;
use crate::state::AppState;

/// Topic toggles per row in the side panel grid.
const TOGGLE_COLUMNS: usize = 3;

// ---------------------------------------------------------------------------
// Left side panel – year range, topic toggles, download
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };

    let (min_year, max_year) = (session.min_observed_year(), session.max_observed_year());
    let topics: Vec<String> = session.topics().map(str::to_string).collect();

    // ---- Year range ----
    ui.strong("📆 Select Year Range");
    let (mut lo, mut hi) = state.year_input;
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, min_year..=max_year).text("from"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, min_year..=max_year).text("to"))
        .changed();
    if lo_changed || hi_changed {
        state.year_input = (lo, hi);
        state.apply_year_input();
    }
    ui.separator();

    // ---- Topic toggles ----
    ui.strong("🔧 Show/Hide Topics");
    ui.horizontal(|ui: &mut Ui| {
        if let Some(session) = &mut state.session {
            if ui.small_button("All").clicked() {
                session.select_all_topics();
            }
            if ui.small_button("None").clicked() {
                session.select_no_topics();
            }
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height((ui.available_height() - 48.0).max(120.0))
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("topic_toggles")
                .num_columns(TOGGLE_COLUMNS)
                .show(ui, |ui: &mut Ui| {
                    for (i, topic) in topics.iter().enumerate() {
                        let Some(session) = &mut state.session else {
                            return;
                        };
                        let mut checked = session.is_topic_enabled(topic);
                        let text = RichText::new(topic).color(state.colors.color_for(topic));
                        if ui.checkbox(&mut checked, text).changed() {
                            session.set_topic_enabled(topic, checked);
                        }
                        if (i + 1) % TOGGLE_COLUMNS == 0 {
                            ui.end_row();
                        }
                    }
                });
        });
    ui.separator();

    // ---- Download ----
    if ui.button("📥 Download Filtered Data").clicked() {
        save_file_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export CSV…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            let counts = session.counts();
            ui.label(format!(
                "{} records, {} topics, {} of {} rows visible",
                counts.total_mentions(),
                counts.topics.len(),
                session.current_view().len(),
                counts.len()
            ));
            if let Some(src) = state.source.as_ref().and_then(|p| p.file_name()) {
                ui.label(RichText::new(src.to_string_lossy()).weak());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") || msg.starts_with("Export error") {
                Color32::RED
            } else {
                Color32::YELLOW
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open report spreadsheet")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Excel / ODS", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    if state.session.is_none() {
        state.status_message = Some("Nothing to export".to_string());
        return;
    }
    let file = rfd::FileDialog::new()
        .set_title("Download filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
