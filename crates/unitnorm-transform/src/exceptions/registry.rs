//! Exception rule trait and registry.
//!
//! # Architecture
//!
//! The [`ExceptionRule`] trait defines the single capability every
//! country/frequency exception has: transform the full label list before the
//! generic reordering runs. Rules are registered in the [`ExceptionRegistry`]
//! under a [`PairKey`]; pairs without a rule fall back to [`NoopRule`].
//!
//! # Example
//!
//! ```ignore
//! use unitnorm_transform::exceptions::default_registry;
//!
//! let registry = default_registry();
//! let rule = registry.get(&PairKey::parse("CN", "Q")?);
//! let labels = rule.apply(labels, &vocabulary);
//! ```

use std::collections::HashMap;

use unitnorm_model::PairKey;
use unitnorm_standards::UnitVocabulary;

/// A country/frequency-specific pre-transform of the label list.
///
/// Implementations must return exactly one label per input label, in the
/// same order.
pub trait ExceptionRule: Send + Sync {
    /// Short identifier shown in reports (e.g. `"append_missing_currency"`).
    fn name(&self) -> &str;

    /// Returns a human-readable description of the rule.
    fn description(&self) -> String {
        "Exception rule".to_string()
    }

    fn apply(&self, labels: Vec<String>, vocabulary: &UnitVocabulary) -> Vec<String>;
}

/// Identity rule used for pairs with no registered exception.
pub struct NoopRule;

impl ExceptionRule for NoopRule {
    fn name(&self) -> &str {
        "none"
    }

    fn description(&self) -> String {
        "No exception registered".to_string()
    }

    fn apply(&self, labels: Vec<String>, _vocabulary: &UnitVocabulary) -> Vec<String> {
        labels
    }
}

/// Registry of exception rules indexed by (country, frequency).
pub struct ExceptionRegistry {
    rules: HashMap<PairKey, Box<dyn ExceptionRule>>,
    default_rule: Box<dyn ExceptionRule>,
}

impl Default for ExceptionRegistry {
    fn default() -> Self {
        Self::new(Box::new(NoopRule))
    }
}

impl ExceptionRegistry {
    /// Creates a new empty registry with the given fallback rule.
    pub fn new(default_rule: Box<dyn ExceptionRule>) -> Self {
        Self {
            rules: HashMap::new(),
            default_rule,
        }
    }

    /// Registers a rule for a pair, replacing any existing one.
    pub fn register(&mut self, key: PairKey, rule: Box<dyn ExceptionRule>) {
        self.rules.insert(key, rule);
    }

    /// Gets the rule for a pair, or the fallback rule.
    pub fn get(&self, key: &PairKey) -> &dyn ExceptionRule {
        self.rules
            .get(key)
            .map(|rule| rule.as_ref())
            .unwrap_or(self.default_rule.as_ref())
    }

    /// Returns the number of registered rules (excluding the fallback).
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered pairs in sorted order.
    pub fn keys(&self) -> Vec<&PairKey> {
        let mut keys: Vec<&PairKey> = self.rules.keys().collect();
        keys.sort();
        keys
    }
}
