use std::collections::BTreeSet;
use std::sync::Arc;

use super::error::InvalidRangeError;
use super::model::{CountRow, TopicCounts};

// ---------------------------------------------------------------------------
// Filter predicate: year range + selected topics
// ---------------------------------------------------------------------------

/// The user's current selection. `year_min <= year_max` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub year_min: i32,
    pub year_max: i32,
    pub selected_topics: BTreeSet<String>,
}

impl FilterState {
    /// Full observed year range with every topic selected (i.e., show everything).
    pub fn all(counts: &TopicCounts) -> Self {
        Self {
            year_min: counts.min_year,
            year_max: counts.max_year,
            selected_topics: counts.topics.clone(),
        }
    }

    fn admits(&self, row: &CountRow) -> bool {
        (self.year_min..=self.year_max).contains(&row.year)
            && self.selected_topics.contains(&row.topic)
    }
}

/// Rows of `counts` that pass `filters`, in (year, topic) order.
pub fn filtered_view(counts: &TopicCounts, filters: &FilterState) -> Vec<CountRow> {
    counts
        .rows
        .iter()
        .filter(|row| filters.admits(row))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// FilterController – one session's view over the shared counts
// ---------------------------------------------------------------------------

/// Owns a session's [`FilterState`] over a shared, read-only [`TopicCounts`].
#[derive(Debug, Clone)]
pub struct FilterController {
    counts: Arc<TopicCounts>,
    state: FilterState,
}

impl FilterController {
    pub fn new(counts: Arc<TopicCounts>) -> Self {
        let state = FilterState::all(&counts);
        Self { counts, state }
    }

    pub fn counts(&self) -> &TopicCounts {
        &self.counts
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn min_observed_year(&self) -> i32 {
        self.counts.min_year
    }

    pub fn max_observed_year(&self) -> i32 {
        self.counts.max_year
    }

    /// Observed topics in lexicographic order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.counts.topics.iter().map(String::as_str)
    }

    /// Set the visible year range, clamped into the observed bounds.
    ///
    /// An inverted range is rejected and the previous range is kept.
    pub fn set_year_range(&mut self, lo: i32, hi: i32) -> Result<(), InvalidRangeError> {
        if lo > hi {
            return Err(InvalidRangeError { lo, hi });
        }
        let (min, max) = (self.counts.min_year, self.counts.max_year);
        self.state.year_min = lo.clamp(min, max);
        self.state.year_max = hi.clamp(min, max);
        log::debug!(
            "Year range set to {}..={}",
            self.state.year_min,
            self.state.year_max
        );
        Ok(())
    }

    /// Show or hide one topic. Unknown topics are ignored.
    pub fn set_topic_enabled(&mut self, topic: &str, enabled: bool) {
        if !self.counts.topics.contains(topic) {
            return;
        }
        if enabled {
            self.state.selected_topics.insert(topic.to_string());
        } else {
            self.state.selected_topics.remove(topic);
        }
    }

    pub fn is_topic_enabled(&self, topic: &str) -> bool {
        self.state.selected_topics.contains(topic)
    }

    pub fn select_all_topics(&mut self) {
        self.state.selected_topics = self.counts.topics.clone();
    }

    pub fn select_no_topics(&mut self) {
        self.state.selected_topics.clear();
    }

    /// The filtered rows for the current state. Pure; safe to call every frame.
    pub fn current_view(&self) -> Vec<CountRow> {
        filtered_view(&self.counts, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_counts() -> Arc<TopicCounts> {
        Arc::new(
            TopicCounts::from_rows(vec![
                CountRow::new(2019, "Healthcare", 2),
                CountRow::new(2020, "Budget", 1),
            ])
            .unwrap(),
        )
    }

    fn wider_counts() -> Arc<TopicCounts> {
        let mut rows = Vec::new();
        for year in 2015..=2022 {
            for (i, topic) in ["Budget", "Defense", "Healthcare", "Trade"].iter().enumerate() {
                if (year as usize + i) % 3 != 0 {
                    rows.push(CountRow::new(year, *topic, (i + 1) as u64));
                }
            }
        }
        Arc::new(TopicCounts::from_rows(rows).unwrap())
    }

    #[test]
    fn initial_view_is_everything() {
        let counts = sample_counts();
        let ctl = FilterController::new(counts.clone());
        assert_eq!(ctl.current_view(), counts.rows);
        assert_eq!(ctl.min_observed_year(), 2019);
        assert_eq!(ctl.max_observed_year(), 2020);
        assert_eq!(ctl.topics().collect::<Vec<_>>(), vec!["Budget", "Healthcare"]);
    }

    #[test]
    fn single_year_single_topic() {
        let mut ctl = FilterController::new(sample_counts());
        ctl.set_year_range(2019, 2019).unwrap();
        ctl.set_topic_enabled("Budget", false);

        assert_eq!(
            ctl.state(),
            &FilterState {
                year_min: 2019,
                year_max: 2019,
                selected_topics: BTreeSet::from(["Healthcare".to_string()]),
            }
        );
        assert_eq!(ctl.current_view(), vec![CountRow::new(2019, "Healthcare", 2)]);
    }

    #[test]
    fn inverted_range_keeps_previous_state() {
        let mut ctl = FilterController::new(sample_counts());
        ctl.set_year_range(2020, 2020).unwrap();

        let err = ctl.set_year_range(2021, 2019).unwrap_err();
        assert_eq!(err, InvalidRangeError { lo: 2021, hi: 2019 });
        assert_eq!(ctl.state().year_min, 2020);
        assert_eq!(ctl.state().year_max, 2020);
    }

    #[test]
    fn range_is_clamped_to_observed_years() {
        let mut ctl = FilterController::new(sample_counts());
        ctl.set_year_range(1990, 2050).unwrap();
        assert_eq!((ctl.state().year_min, ctl.state().year_max), (2019, 2020));

        ctl.set_year_range(2030, 2040).unwrap();
        assert_eq!((ctl.state().year_min, ctl.state().year_max), (2020, 2020));
    }

    #[test]
    fn unknown_topic_is_ignored() {
        let mut ctl = FilterController::new(sample_counts());
        ctl.set_topic_enabled("Agriculture", true);
        assert!(!ctl.is_topic_enabled("Agriculture"));
        assert_eq!(ctl.state().selected_topics.len(), 2);
    }

    #[test]
    fn toggling_back_on_restores_rows() {
        let mut ctl = FilterController::new(sample_counts());
        ctl.set_topic_enabled("Budget", false);
        assert_eq!(ctl.current_view().len(), 1);
        ctl.set_topic_enabled("Budget", true);
        assert_eq!(ctl.current_view().len(), 2);
    }

    #[test]
    fn select_none_and_all() {
        let mut ctl = FilterController::new(sample_counts());
        ctl.select_no_topics();
        assert!(ctl.current_view().is_empty());
        ctl.select_all_topics();
        assert_eq!(ctl.current_view().len(), 2);
    }

    #[test]
    fn current_view_is_repeatable() {
        let mut ctl = FilterController::new(wider_counts());
        ctl.set_year_range(2017, 2020).unwrap();
        ctl.set_topic_enabled("Trade", false);
        assert_eq!(ctl.current_view(), ctl.current_view());
    }

    #[test]
    fn removing_topics_never_grows_view() {
        let mut ctl = FilterController::new(wider_counts());
        let mut previous = ctl.current_view().len();
        for topic in ["Trade", "Budget", "Healthcare", "Defense"] {
            ctl.set_topic_enabled(topic, false);
            let now = ctl.current_view().len();
            assert!(now <= previous);
            previous = now;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn narrowing_years_never_grows_view() {
        let mut ctl = FilterController::new(wider_counts());
        let mut previous = ctl.current_view().len();
        let (mut lo, mut hi) = (2015, 2022);
        while lo <= hi {
            ctl.set_year_range(lo, hi).unwrap();
            let view = ctl.current_view();
            assert!(view.len() <= previous);
            assert!(view.iter().all(|r| r.year >= lo && r.year <= hi));
            previous = view.len();
            lo += 1;
            hi -= 1;
        }
    }

    #[test]
    fn sessions_share_counts_but_not_state() {
        let counts = wider_counts();
        let mut a = FilterController::new(counts.clone());
        let b = FilterController::new(counts.clone());
        a.select_no_topics();
        assert!(a.current_view().is_empty());
        assert_eq!(b.current_view(), counts.rows);
    }
}
