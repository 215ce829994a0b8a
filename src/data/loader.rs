use std::path::Path;

use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataLoadError;
use super::model::{LoadedRecords, Record, FILE_NAME_COLUMN, TOPIC_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load report records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, header row first
/// * `.csv`     – header row first
/// * `.json`    – `[{ "file_name": "...", "main_topic_summary": "...", ... }, ...]`
/// * `.parquet` – any column types; cells are rendered as text
///
/// Only `file_name` and `main_topic_summary` are read; other columns are ignored.
pub fn load_file(path: &Path) -> Result<LoadedRecords, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path),
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedFormat(other.to_string())),
    }
}

// -- shared helpers --

/// Position of a required column in a header row.
fn column_index<'a>(
    mut headers: impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<usize, DataLoadError> {
    headers
        .position(|h| h.trim() == name)
        .ok_or(DataLoadError::MissingColumn(name))
}

/// Push a row if both required cells are present, else count it as malformed.
fn push_row(out: &mut LoadedRecords, file_name: Option<String>, topic: Option<String>) {
    match (file_name, topic) {
        (Some(file_name), Some(topic)) => out.records.push(Record::new(file_name, topic)),
        _ => out.malformed_rows += 1,
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path) -> Result<LoadedRecords, DataLoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| DataLoadError::parse(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataLoadError::parse(path, "workbook has no worksheets"))?
        .map_err(|e| DataLoadError::parse(path, e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();
    let file_idx = column_index(headers.iter().map(String::as_str), FILE_NAME_COLUMN)?;
    let topic_idx = column_index(headers.iter().map(String::as_str), TOPIC_COLUMN)?;

    let mut out = LoadedRecords::default();
    for row in rows {
        push_row(
            &mut out,
            row.get(file_idx).and_then(cell_text),
            row.get(topic_idx).and_then(cell_text),
        );
    }
    Ok(out)
}

/// Render a spreadsheet cell as text. Empty and error cells have no text.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => non_empty(s),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LoadedRecords, DataLoadError> {
    // Short rows are malformed records, not a broken file.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| DataLoadError::parse(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| DataLoadError::parse(path, e))?
        .clone();
    let file_idx = column_index(headers.iter(), FILE_NAME_COLUMN)?;
    let topic_idx = column_index(headers.iter(), TOPIC_COLUMN)?;

    let mut out = LoadedRecords::default();
    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| DataLoadError::parse(path, format!("CSV row {row_no}: {e}")))?;
        push_row(
            &mut out,
            record.get(file_idx).and_then(non_empty),
            record.get(topic_idx).and_then(non_empty),
        );
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "file_name": "report_2019.xlsx", "main_topic_summary": "Healthcare." },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LoadedRecords, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|e| DataLoadError::parse(path, e))?;

    let records = root
        .as_array()
        .ok_or_else(|| DataLoadError::parse(path, "expected top-level JSON array"))?;

    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataLoadError::parse(path, format!("row {i} is not a JSON object")))?;
        objects.push(obj);
    }

    // A column exists when at least one record carries the key.
    for name in [FILE_NAME_COLUMN, TOPIC_COLUMN] {
        if !objects.iter().any(|o| o.contains_key(name)) {
            return Err(DataLoadError::MissingColumn(name));
        }
    }

    let mut out = LoadedRecords::default();
    for obj in objects {
        push_row(
            &mut out,
            obj.get(FILE_NAME_COLUMN).and_then(json_text),
            obj.get(TOPIC_COLUMN).and_then(json_text),
        );
    }
    Ok(out)
}

fn json_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => non_empty(s),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by **Pandas** (`df.to_parquet()`) or **Polars**.
fn load_parquet(path: &Path) -> Result<LoadedRecords, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| DataLoadError::parse(path, e))?;

    let schema = builder.schema().clone();
    let file_idx = column_index(
        schema.fields().iter().map(|f| f.name().as_str()),
        FILE_NAME_COLUMN,
    )?;
    let topic_idx = column_index(
        schema.fields().iter().map(|f| f.name().as_str()),
        TOPIC_COLUMN,
    )?;

    let reader = builder.build().map_err(|e| DataLoadError::parse(path, e))?;

    let mut out = LoadedRecords::default();
    for batch_result in reader {
        let batch = batch_result.map_err(|e| DataLoadError::parse(path, e))?;
        let file_col = batch.column(file_idx);
        let topic_col = batch.column(topic_idx);

        for row in 0..batch.num_rows() {
            let file_name = arrow_text(file_col.as_ref(), row)
                .map_err(|e| DataLoadError::parse(path, format!("row {row}: {e}")))?;
            let topic = arrow_text(topic_col.as_ref(), row)
                .map_err(|e| DataLoadError::parse(path, format!("row {row}: {e}")))?;
            push_row(&mut out, file_name, topic);
        }
    }
    Ok(out)
}

/// Render one Arrow cell as text; nulls have no text.
fn arrow_text(col: &dyn Array, row: usize) -> Result<Option<String>, arrow::error::ArrowError> {
    if col.is_null(row) {
        return Ok(None);
    }
    array_value_to_string(col, row).map(|s| non_empty(&s))
}
