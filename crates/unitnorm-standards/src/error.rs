#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("invalid settings: {message}")]
    InvalidSettings { message: String },

    #[error("unknown country in settings: {country}")]
    UnknownCountry { country: String },

    #[error("unknown frequency in settings: {frequency}")]
    UnknownFrequency { frequency: String },

    #[error("no mapping template configured for category '{category}'")]
    MissingTemplate { category: String },

    #[error("no '{key}' configured for country {country}")]
    MissingPath { country: String, key: String },

    #[error("invalid remediation token count '{key}' in {path}")]
    InvalidRemediationCount { path: PathBuf, key: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, error: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: error.to_string(),
        }
    }
}
