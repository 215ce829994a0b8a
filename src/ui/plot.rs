use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::data::series::{hover_text, topic_series};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Trend chart (central panel)
// ---------------------------------------------------------------------------

/// Render one line per visible topic: x = year, y = mentions.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    let session = match &state.session {
        Some(s) => s,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a spreadsheet to view topic trends  (File → Open…)");
            });
            return;
        }
    };

    let series = topic_series(&session.current_view());

    ui.heading("Main Topic Trends Over Time");
    ui.weak("Legend: Main Topic Summary");
    if series.is_empty() {
        ui.label("No topics selected for this year range.");
    }

    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of Mentions")
        .x_axis_formatter(|mark, _range| {
            // Years only; no fractional ticks.
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                hover_text(name, value.x.round() as i32, value.y.round().max(0.0) as u64)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in &series {
                let color = state.colors.color_for(&s.topic);

                let line = Line::new(PlotPoints::from(s.points.clone()))
                    .name(&s.topic)
                    .color(color)
                    .width(2.0);
                plot_ui.line(line);

                // Markers on every data point.
                let markers = Points::new(PlotPoints::from(s.points.clone()))
                    .name(&s.topic)
                    .color(color)
                    .radius(3.5);
                plot_ui.points(markers);
            }
        });
}
