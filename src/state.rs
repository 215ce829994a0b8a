use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::TopicColors;
use crate::config::Config;
use crate::data;
use crate::data::error::InvalidRangeError;
use crate::data::export;
use crate::data::filter::FilterController;
use crate::data::model::TopicCounts;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Filter session over the loaded counts (None until a file loads).
    pub session: Option<FilterController>,

    /// Stable colour per observed topic.
    pub colors: TopicColors,

    /// File the current session was loaded from.
    pub source: Option<PathBuf>,

    /// Year-range slider positions; applied through the session on change.
    pub year_input: (i32, i32),

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest newly loaded counts, reset filters and colours.
    pub fn set_counts(&mut self, counts: TopicCounts, source: Option<PathBuf>) {
        self.colors = TopicColors::new(&counts.topics);
        self.year_input = (counts.min_year, counts.max_year);
        self.status_message = drop_summary(&counts);
        self.session = Some(FilterController::new(Arc::new(counts)));
        self.source = source;
    }

    /// Load a file. On failure the previous session stays in place.
    pub fn load_path(&mut self, path: &Path) {
        match data::load_topic_counts(path) {
            Ok(counts) => self.set_counts(counts, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Push the slider positions into the session.
    ///
    /// An inverted range is rejected and the sliders snap back to the last
    /// accepted range.
    pub fn apply_year_input(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        let (lo, hi) = self.year_input;
        if let Err(e) = session.set_year_range(lo, hi) {
            log::debug!("Ignoring year range update: {e}");
        }
        let state = session.state();
        self.year_input = (state.year_min, state.year_max);
    }

    /// Write the current view to `path` and report the outcome in the status line.
    pub fn export_to(&mut self, path: &Path) {
        let Some(session) = &self.session else {
            self.status_message = Some("Nothing to export".to_string());
            return;
        };
        let view = session.current_view();
        self.status_message = Some(match export::write_csv(path, &view) {
            Ok(()) => format!("Exported {} rows to {}", view.len(), path.display()),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                format!("Export error: {e:#}")
            }
        });
    }
}

/// Status text for rows that did not make it into the counts, if any.
fn drop_summary(counts: &TopicCounts) -> Option<String> {
    if counts.undated_rows == 0 && counts.malformed_rows == 0 {
        return None;
    }
    Some(format!(
        "{} rows without a year in file_name and {} rows with empty cells were skipped",
        counts.undated_rows, counts.malformed_rows
    ))
}

/// Apply `--year-min`, `--year-max` and `--topic` to a fresh session.
///
/// Missing bounds default to the observed ones. Unknown topics are logged
/// and ignored.
pub fn apply_cli_selection(
    session: &mut FilterController,
    config: &Config,
) -> Result<(), InvalidRangeError> {
    let lo = config.year_min.unwrap_or(session.min_observed_year());
    let hi = config.year_max.unwrap_or(session.max_observed_year());
    session.set_year_range(lo, hi)?;

    if !config.topics.is_empty() {
        session.select_no_topics();
        for topic in &config.topics {
            if session.counts().topics.contains(topic) {
                session.set_topic_enabled(topic, true);
            } else {
                log::warn!("Unknown topic {topic:?}; ignoring");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CountRow;

    fn counts() -> TopicCounts {
        TopicCounts::from_rows(vec![
            CountRow::new(2018, "Budget", 1),
            CountRow::new(2019, "Healthcare", 2),
            CountRow::new(2020, "Budget", 1),
            CountRow::new(2021, "Trade", 3),
        ])
        .unwrap()
    }

    fn config(args: &[&str]) -> Config {
        use clap::Parser;
        Config::try_parse_from(std::iter::once("topic-trends").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn set_counts_resets_sliders() {
        let mut state = AppState::default();
        state.set_counts(counts(), None);
        assert_eq!(state.year_input, (2018, 2021));
        assert!(state.status_message.is_none());
        assert_eq!(state.session.as_ref().unwrap().current_view().len(), 4);
    }

    #[test]
    fn inverted_slider_snaps_back() {
        let mut state = AppState::default();
        state.set_counts(counts(), None);

        state.year_input = (2019, 2020);
        state.apply_year_input();
        assert_eq!(state.year_input, (2019, 2020));

        state.year_input = (2021, 2020);
        state.apply_year_input();
        assert_eq!(state.year_input, (2019, 2020));
    }

    #[test]
    fn failed_load_keeps_previous_session() {
        let mut state = AppState::default();
        state.set_counts(counts(), None);

        let dir = tempfile::tempdir().unwrap();
        state.load_path(&dir.path().join("missing.xlsx"));

        assert!(state.session.is_some());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn export_writes_current_view() {
        let mut state = AppState::default();
        state.set_counts(counts(), None);
        state
            .session
            .as_mut()
            .unwrap()
            .set_topic_enabled("Budget", false);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export::EXPORT_FILE_NAME);
        state.export_to(&path);

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "year,main_topic_summary,count\n2019,Healthcare,2\n2021,Trade,3\n"
        );
    }

    #[test]
    fn export_without_data_reports_nothing_to_export() {
        let mut state = AppState::default();
        let dir = tempfile::tempdir().unwrap();
        state.export_to(&dir.path().join("out.csv"));
        assert_eq!(state.status_message.as_deref(), Some("Nothing to export"));
    }

    #[test]
    fn cli_selection_restricts_topics_and_years() {
        let mut session = FilterController::new(Arc::new(counts()));
        let cfg = config(&["--year-min", "2019", "--topic", "Budget", "--topic", "Nope"]);
        apply_cli_selection(&mut session, &cfg).unwrap();
        assert_eq!(session.current_view(), vec![CountRow::new(2020, "Budget", 1)]);
    }

    #[test]
    fn cli_selection_rejects_inverted_years() {
        let mut session = FilterController::new(Arc::new(counts()));
        let cfg = config(&["--year-min", "2021", "--year-max", "2019"]);
        assert_eq!(
            apply_cli_selection(&mut session, &cfg),
            Err(InvalidRangeError { lo: 2021, hi: 2019 })
        );
    }
}
