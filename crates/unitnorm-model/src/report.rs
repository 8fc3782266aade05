use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ids::PairKey;

/// A label whose unit ordering could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedLabel {
    /// The label as it was passed through.
    pub label: String,
    /// Number of unit tokens detected in the label.
    pub token_count: usize,
    /// Detected unit tokens.
    pub tokens: Vec<String>,
    /// Remediation keys that matched (empty or more than one).
    pub candidates: Vec<String>,
}

/// Outcome of normalizing one (country, frequency) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairReport {
    #[serde(flatten)]
    pub key: PairKey,
    pub label_count: usize,
    pub currency_replacements: usize,
    pub exception_rule: String,
    pub exception_changes: usize,
    pub unit_reorders: usize,
    pub ignored: usize,
    pub unresolved: Vec<UnresolvedLabel>,
    pub output_path: Option<PathBuf>,
    pub persistence_blocked: bool,
}

impl PairReport {
    pub fn new(key: PairKey) -> Self {
        Self {
            key,
            label_count: 0,
            currency_replacements: 0,
            exception_rule: String::new(),
            exception_changes: 0,
            unit_reorders: 0,
            ignored: 0,
            unresolved: Vec::new(),
            output_path: None,
            persistence_blocked: false,
        }
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

/// A pair that failed before any label was normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairFailure {
    #[serde(flatten)]
    pub key: PairKey,
    pub message: String,
}

/// Result of a whole invocation across all requested pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub pairs: Vec<PairReport>,
    pub failures: Vec<PairFailure>,
    /// Hex sha256 of the mapping template the run was built from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_sha256: Option<String>,
}

impl RunReport {
    pub fn total_currency_replacements(&self) -> usize {
        self.pairs.iter().map(|p| p.currency_replacements).sum()
    }

    pub fn total_unit_reorders(&self) -> usize {
        self.pairs.iter().map(|p| p.unit_reorders).sum()
    }

    pub fn total_unresolved(&self) -> usize {
        self.pairs.iter().map(PairReport::unresolved_count).sum()
    }

    /// True when a pair failed or had its output blocked.
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || self.pairs.iter().any(|p| p.persistence_blocked)
    }
}
