use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::DataLoadError;

/// Name of the column holding the source report's file name.
pub const FILE_NAME_COLUMN: &str = "file_name";
/// Name of the column holding the free-text topic label.
pub const TOPIC_COLUMN: &str = "main_topic_summary";

// ---------------------------------------------------------------------------
// Record – one row of the source spreadsheet
// ---------------------------------------------------------------------------

/// One input row, restricted to the two columns the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Source report file name, expected to embed a four-digit year.
    pub file_name: String,
    /// Topic label as written in the sheet, punctuation and all.
    pub main_topic_summary: String,
}

impl Record {
    pub fn new(file_name: impl Into<String>, main_topic_summary: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            main_topic_summary: main_topic_summary.into(),
        }
    }
}

/// Records read from a file plus the number of rows skipped for empty cells.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    /// Rows with an empty `file_name` or `main_topic_summary` cell.
    pub malformed_rows: usize,
}

// ---------------------------------------------------------------------------
// NormalizedRecord – a record with a parsed year and a cleaned topic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub year: i32,
    pub topic: String,
}

// ---------------------------------------------------------------------------
// CountRow – mentions of one topic in one year
// ---------------------------------------------------------------------------

/// Field order is the CSV column order: `year,main_topic_summary,count`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountRow {
    pub year: i32,
    #[serde(rename = "main_topic_summary")]
    pub topic: String,
    pub count: u64,
}

impl CountRow {
    pub fn new(year: i32, topic: impl Into<String>, count: u64) -> Self {
        Self {
            year,
            topic: topic.into(),
            count,
        }
    }
}

// ---------------------------------------------------------------------------
// TopicCounts – the session dataset
// ---------------------------------------------------------------------------

/// Aggregated counts with pre-computed year bounds and topic index.
///
/// Built once per load and shared read-only for the rest of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicCounts {
    /// Sorted by (year, topic); unique per pair.
    pub rows: Vec<CountRow>,
    /// Distinct topics, lexicographically sorted.
    pub topics: BTreeSet<String>,
    pub min_year: i32,
    pub max_year: i32,
    /// Rows read from the source file, malformed ones included.
    pub source_rows: usize,
    /// Rows skipped because a required cell was empty.
    pub malformed_rows: usize,
    /// Rows dropped because `file_name` had no four-digit year.
    pub undated_rows: usize,
}

impl TopicCounts {
    /// Build the index from aggregated rows. Fails when there is nothing to bound.
    pub fn from_rows(mut rows: Vec<CountRow>) -> Result<Self, DataLoadError> {
        rows.sort();
        let min_year = rows.iter().map(|r| r.year).min();
        let max_year = rows.iter().map(|r| r.year).max();
        let (Some(min_year), Some(max_year)) = (min_year, max_year) else {
            return Err(DataLoadError::NoDatedRows);
        };
        let topics = rows.iter().map(|r| r.topic.clone()).collect();
        let total: u64 = rows.iter().map(|r| r.count).sum();

        Ok(TopicCounts {
            rows,
            topics,
            min_year,
            max_year,
            source_rows: total as usize,
            malformed_rows: 0,
            undated_rows: 0,
        })
    }

    /// Attach load diagnostics gathered before aggregation.
    pub fn with_diagnostics(mut self, malformed_rows: usize, undated_rows: usize) -> Self {
        self.malformed_rows = malformed_rows;
        self.undated_rows = undated_rows;
        self.source_rows += malformed_rows + undated_rows;
        self
    }

    /// Sum of all counts, i.e. the number of dated records.
    pub fn total_mentions(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Number of (year, topic) rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
