pub mod error;
pub mod ids;
pub mod options;
pub mod report;

pub use error::ModelError;
pub use ids::{CountryCode, FrequencyCode, PairKey};
pub use options::{NormalizeOptions, PersistPolicy};
pub use report::{PairFailure, PairReport, RunReport, UnresolvedLabel};
