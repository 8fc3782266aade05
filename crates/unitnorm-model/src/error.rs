use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid country code: {0:?}")]
    InvalidCountryCode(String),
    #[error("invalid frequency code: {0:?}")]
    InvalidFrequencyCode(String),
}
