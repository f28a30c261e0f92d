//! Error types for the visualizer.
//!
//! Only dataset errors are fatal. Configuration errors are logged and the
//! defaults are used instead; asset errors surface when a screen asks for a
//! key that was never registered.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the two-column dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The file could not be opened or read.
    #[error("could not read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record did not have a label and a numeric value.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The spreadsheet could not be opened or its first sheet read.
    #[error("could not read workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// The spreadsheet has no sheets.
    #[error("workbook {} has no sheets", .0.display())]
    NoSheet(PathBuf),

    /// The file contained no records.
    #[error("dataset {} contains no values", .0.display())]
    Empty(PathBuf),
}

/// Failure to load or persist the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The platform has no per-user configuration directory.
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

/// Lookup of an asset key that was never registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("unknown image asset: {0}")]
    UnknownImage(String),

    #[error("unknown font asset: {0}")]
    UnknownFont(String),
}

/// Top-level error returned from application startup.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}
