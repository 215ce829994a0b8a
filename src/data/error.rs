use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a spreadsheet into a session dataset. Always fatal for the load.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("no rows with a four-digit year in 'file_name'")]
    NoDatedRows,
}

impl DataLoadError {
    pub(crate) fn parse(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        DataLoadError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// A year range whose lower bound exceeds its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid year range: {lo} > {hi}")]
pub struct InvalidRangeError {
    pub lo: i32,
    pub hi: i32,
}
