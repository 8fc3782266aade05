use unitnorm_ingest::IngestError;
use unitnorm_standards::StandardsError;

/// Failure of one (country, frequency) pair.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Standards(#[from] StandardsError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl NormalizeError {
    /// True for configuration problems (unknown pair, missing path key).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Standards(
                StandardsError::UnknownCountry { .. }
                    | StandardsError::UnknownFrequency { .. }
                    | StandardsError::MissingPath { .. }
                    | StandardsError::InvalidSettings { .. }
            )
        )
    }
}
