//! Options controlling how a pair is processed.

use serde::{Deserialize, Serialize};

/// Whether unresolved labels may be written to the canonical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistPolicy {
    /// Write whenever persistence is requested, unresolved labels included.
    #[default]
    Always,
    /// Refuse to write a table that still has unresolved labels.
    Strict,
}

impl PersistPolicy {
    pub fn allows(self, unresolved: usize) -> bool {
        match self {
            Self::Always => true,
            Self::Strict => unresolved == 0,
        }
    }
}

/// Per-invocation processing options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Write the normalized table to its canonical output path.
    pub persist: bool,
    pub persist_policy: PersistPolicy,
}

impl NormalizeOptions {
    #[must_use]
    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PersistPolicy) -> Self {
        self.persist_policy = policy;
        self
    }
}
