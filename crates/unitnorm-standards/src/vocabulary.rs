//! Unit vocabulary and canonical orderings derived from the mapping template.
//!
//! Every template row is one valid ordered unit combination such as
//! `"LCU, % QoQ, SA"`. Splitting all rows on commas gives the set of atomic
//! unit tokens; grouping the joined rows by token count gives the canonical
//! orderings a label with that many tokens is compared against.

use std::collections::{BTreeMap, BTreeSet};

/// Canonical currency tokens a normalized label may carry.
pub const CURRENCY_TOKENS: &[&str] = &["LCU", "USD"];

/// Currency token appended when a label carries none.
pub const DEFAULT_CURRENCY: &str = "LCU";

/// Separator between unit tokens inside a label.
pub const TOKEN_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitVocabulary {
    tokens: BTreeSet<String>,
    orderings: BTreeMap<usize, Vec<String>>,
}

impl UnitVocabulary {
    /// Build the vocabulary from raw unit combinations.
    pub fn from_combinations<I, S>(combinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = BTreeSet::new();
        let mut orderings: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for combination in combinations {
            let parts = split_units(combination.as_ref());
            if parts.is_empty() {
                continue;
            }
            let joined = parts.join(TOKEN_SEPARATOR);
            let bucket = orderings.entry(parts.len()).or_default();
            if !bucket.contains(&joined) {
                bucket.push(joined);
            }
            tokens.extend(parts);
        }
        Self { tokens, orderings }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Canonical orderings made of exactly `count` tokens.
    pub fn orderings(&self, count: usize) -> &[String] {
        self.orderings
            .get(&count)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Token counts that have at least one canonical ordering.
    pub fn ordering_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.orderings.keys().copied()
    }

    /// Unit tokens present in `label`.
    ///
    /// A token is present when it occurs as a substring of the label. Tokens
    /// contained in another present token (`% YoY` inside
    /// `Contribution to % YoY chg`, `ppt` inside `ppts`) are dropped.
    pub fn detect<'a>(&'a self, label: &str) -> Vec<&'a str> {
        let present: Vec<&str> = self
            .tokens
            .iter()
            .map(String::as_str)
            .filter(|token| label.contains(token))
            .collect();
        present
            .iter()
            .copied()
            .filter(|token| {
                !present
                    .iter()
                    .any(|other| other != token && other.contains(token))
            })
            .collect()
    }
}

/// Split a comma-joined unit combination into trimmed, non-empty tokens.
pub fn split_units(combination: &str) -> Vec<String> {
    combination
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when `label` carries one of the canonical currency tokens.
pub fn has_currency_token(label: &str) -> bool {
    CURRENCY_TOKENS.iter().any(|token| label.contains(token))
}
