use std::path::Path;

use anyhow::{Context, Result};

use super::model::CountRow;

/// Suggested file name for the CSV download.
pub const EXPORT_FILE_NAME: &str = "filtered_topic_trends.csv";

/// Serialize rows as `year,main_topic_summary,count` CSV.
///
/// Rows are written in (year, topic) order regardless of input order, so equal
/// views always produce identical bytes.
pub fn to_csv_bytes(view: &[CountRow]) -> Result<Vec<u8>, csv::Error> {
    let mut rows: Vec<&CountRow> = view.iter().collect();
    rows.sort();

    let mut writer = csv::Writer::from_writer(Vec::new());
    // Explicit header: an empty view still gets one.
    writer.write_record(["year", "main_topic_summary", "count"])?;
    for row in rows {
        writer.write_record([row.year.to_string(), row.topic.clone(), row.count.to_string()])?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Write the view to `path` as CSV.
pub fn write_csv(path: &Path, view: &[CountRow]) -> Result<()> {
    let bytes = to_csv_bytes(view).context("serializing filtered view")?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} rows to {}", view.len(), path.display());
    Ok(())
}
