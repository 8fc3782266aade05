//! Remediation table and ignore list used by the unit reorderer.
//!
//! The table captures observed historical inconsistencies: for a label with
//! `k` unit tokens that matches no canonical ordering, a malformed substring
//! is rewritten to its corrected form. It is plain data so new cases can be
//! added without touching the reorderer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::StandardsError;

const EMBEDDED_RULES: &str = include_str!("../data/reorder_rules.toml");
const EMBEDDED_SOURCE: &str = "<embedded reorder_rules.toml>";

#[derive(Debug, Deserialize)]
struct RawReorderRules {
    #[serde(default)]
    ignore: Vec<String>,
    #[serde(default)]
    remediation: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderRules {
    remediation: BTreeMap<usize, BTreeMap<String, String>>,
    ignore: Vec<String>,
}

impl ReorderRules {
    pub fn new(
        remediation: BTreeMap<usize, BTreeMap<String, String>>,
        ignore: Vec<String>,
    ) -> Self {
        Self {
            remediation,
            ignore,
        }
    }

    /// Rules shipped with the crate.
    pub fn embedded() -> Result<Self, StandardsError> {
        Self::parse(EMBEDDED_RULES, Path::new(EMBEDDED_SOURCE))
    }

    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        Self::parse(&contents, path)
    }

    pub fn parse(contents: &str, source: &Path) -> Result<Self, StandardsError> {
        let raw: RawReorderRules = toml::from_str(contents).map_err(|e| StandardsError::Toml {
            path: source.to_path_buf(),
            source: e,
        })?;
        let mut remediation = BTreeMap::new();
        for (key, entries) in raw.remediation {
            let count = key
                .trim()
                .parse::<usize>()
                .map_err(|_| StandardsError::InvalidRemediationCount {
                    path: PathBuf::from(source),
                    key: key.clone(),
                })?;
            remediation.insert(count, entries);
        }
        Ok(Self {
            remediation,
            ignore: raw.ignore,
        })
    }

    /// Remediation entries for labels with `count` tokens (empty if none).
    pub fn remediation(&self, count: usize) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.remediation
            .get(&count)
            .into_iter()
            .flat_map(|entries| entries.iter())
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    /// Remediation keys for `count` that occur in `label`.
    pub fn matching_keys<'a>(&'a self, count: usize, label: &str) -> Vec<(&'a str, &'a str)> {
        self.remediation(count)
            .filter(|(from, _)| label.contains(from))
            .collect()
    }

    pub fn ignore_list(&self) -> &[String] {
        &self.ignore
    }

    /// True when the label contains a token known to appear outside unit context.
    pub fn is_ignored(&self, label: &str) -> bool {
        self.ignore.iter().any(|token| label.contains(token.as_str()))
    }

    pub fn entry_count(&self) -> usize {
        self.remediation.values().map(BTreeMap::len).sum()
    }
}
