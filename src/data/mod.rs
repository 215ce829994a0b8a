/// Data layer: core types, loading, normalization, aggregation, filtering.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  clean topic, extract year, drop undated rows
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  (year, topic) → count
///   └───────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ TopicCounts  │  shared read-only for the session
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + topic toggles → filtered view
///   └──────────┘
///        │
///        ├──► series  (chart lines)
///        └──► export  (CSV)
/// ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod series;

use std::path::Path;

use error::DataLoadError;
use model::{LoadedRecords, TopicCounts};

/// Run the full load pipeline: read, normalize, aggregate, index.
pub fn load_topic_counts(path: &Path) -> Result<TopicCounts, DataLoadError> {
    let loaded = loader::load_file(path)?;
    let counts = counts_from_records(loaded)?;

    log::info!(
        "Loaded {} rows from {}: {} topics, years {}..={}",
        counts.source_rows,
        path.display(),
        counts.topics.len(),
        counts.min_year,
        counts.max_year
    );
    if counts.malformed_rows > 0 {
        log::warn!("Skipped {} rows with empty required cells", counts.malformed_rows);
    }
    if counts.undated_rows > 0 {
        log::warn!(
            "Dropped {} rows whose file name has no four-digit year",
            counts.undated_rows
        );
    }
    Ok(counts)
}

/// Normalize and aggregate already-loaded records.
pub fn counts_from_records(loaded: LoadedRecords) -> Result<TopicCounts, DataLoadError> {
    let normalized = normalize::normalize(&loaded.records);
    let rows = aggregate::aggregate(&normalized.records);
    Ok(TopicCounts::from_rows(rows)?.with_diagnostics(loaded.malformed_rows, normalized.undated))
}
