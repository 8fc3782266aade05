//! Unit token reordering.
//!
//! A label is left alone when it already contains one of the canonical
//! orderings for its token count. Otherwise the remediation table for that
//! count is consulted; a single matching entry rewrites the label. Anything
//! else passes through unchanged and is reported.

use tracing::warn;
use unitnorm_model::UnresolvedLabel;
use unitnorm_standards::{ReorderRules, UnitVocabulary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Already in a canonical ordering.
    Canonical,
    /// Rewritten by exactly one remediation entry.
    Remediated { from: String, to: String },
    /// Not resolvable, but contains an ignore-list token.
    Ignored,
    /// Not resolvable; passed through unchanged.
    Unresolved(UnresolvedLabel),
}

/// Summary of reordering a label list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderSummary {
    pub reordered: usize,
    pub ignored: usize,
    pub unresolved: Vec<UnresolvedLabel>,
}

/// Vocabulary tokens present in `label`, owned.
pub fn detect_units(label: &str, vocabulary: &UnitVocabulary) -> Vec<String> {
    vocabulary
        .detect(label)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Reorder the unit tokens of one label.
///
/// Returns the (possibly rewritten) label and what happened to it.
pub fn reorder_label(
    label: &str,
    vocabulary: &UnitVocabulary,
    rules: &ReorderRules,
) -> (String, ReorderOutcome) {
    let tokens = detect_units(label, vocabulary);
    let count = tokens.len();

    if vocabulary
        .orderings(count)
        .iter()
        .any(|ordering| label.contains(ordering.as_str()))
    {
        return (label.to_string(), ReorderOutcome::Canonical);
    }

    let candidates = rules.matching_keys(count, label);
    if let [(from, to)] = candidates.as_slice() {
        return (
            label.replace(from, to),
            ReorderOutcome::Remediated {
                from: (*from).to_string(),
                to: (*to).to_string(),
            },
        );
    }

    if rules.is_ignored(label) {
        return (label.to_string(), ReorderOutcome::Ignored);
    }

    let unresolved = UnresolvedLabel {
        label: label.to_string(),
        token_count: count,
        tokens,
        candidates: candidates
            .iter()
            .map(|(from, _)| (*from).to_string())
            .collect(),
    };
    warn!(
        label,
        token_count = count,
        tokens = ?unresolved.tokens,
        candidates = ?unresolved.candidates,
        "wrong unit order"
    );
    (label.to_string(), ReorderOutcome::Unresolved(unresolved))
}

/// Reorder every label in place.
pub fn reorder_all(
    labels: &mut [String],
    vocabulary: &UnitVocabulary,
    rules: &ReorderRules,
) -> ReorderSummary {
    let mut summary = ReorderSummary::default();
    for label in labels.iter_mut() {
        let (rewritten, outcome) = reorder_label(label, vocabulary, rules);
        match outcome {
            ReorderOutcome::Canonical => {}
            ReorderOutcome::Remediated { .. } => {
                summary.reordered += 1;
                *label = rewritten;
            }
            ReorderOutcome::Ignored => summary.ignored += 1,
            ReorderOutcome::Unresolved(unresolved) => summary.unresolved.push(unresolved),
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> UnitVocabulary {
        UnitVocabulary::from_combinations([
            "LCU",
            "LCU, SA",
            "LCU, % QoQ",
            "LCU, % YoY",
            "LCU, % QoQ, SA",
            "USD, SA",
        ])
    }

    fn rules() -> ReorderRules {
        ReorderRules::embedded().unwrap()
    }

    #[test]
    fn canonical_label_is_unchanged() {
        let (label, outcome) = reorder_label("GDP, LCU, SA", &vocabulary(), &rules());
        assert_eq!(label, "GDP, LCU, SA");
        assert_eq!(outcome, ReorderOutcome::Canonical);
    }

    #[test]
    fn single_remediation_rewrites_label() {
        let (label, outcome) = reorder_label("GDP, SA, LCU", &vocabulary(), &rules());
        assert_eq!(label, "GDP, LCU, SA");
        assert_eq!(
            outcome,
            ReorderOutcome::Remediated {
                from: "SA, LCU".to_string(),
                to: "LCU, SA".to_string(),
            }
        );
    }

    #[test]
    fn ambiguous_label_is_unresolved_and_unchanged() {
        // both keys occur in the label
        let rules = ReorderRules::parse(
            "[remediation.3]\n\"SA, % QoQ\" = \"% QoQ, SA\"\n\"% QoQ, LCU\" = \"LCU, % QoQ\"\n",
            std::path::Path::new("rules.toml"),
        )
        .unwrap();
        let (label, outcome) = reorder_label("GDP, SA, % QoQ, LCU", &vocabulary(), &rules);
        assert_eq!(label, "GDP, SA, % QoQ, LCU");
        let ReorderOutcome::Unresolved(unresolved) = outcome else {
            panic!("expected unresolved outcome");
        };
        assert_eq!(unresolved.token_count, 3);
        assert_eq!(unresolved.candidates, vec!["% QoQ, LCU", "SA, % QoQ"]);
    }

    #[test]
    fn ignore_list_suppresses_report() {
        let (label, outcome) = reorder_label("Exports, SAAR, LCU", &vocabulary(), &rules());
        assert_eq!(label, "Exports, SAAR, LCU");
        assert_eq!(outcome, ReorderOutcome::Ignored);
    }

    #[test]
    fn missing_count_behaves_as_empty_table() {
        let (label, outcome) =
            reorder_label("GDP, SA, % YoY, % QoQ, LCU", &vocabulary(), &rules());
        assert_eq!(label, "GDP, SA, % YoY, % QoQ, LCU");
        assert!(matches!(outcome, ReorderOutcome::Unresolved(ref u) if u.token_count == 4));
    }

    #[test]
    fn detect_units_returns_owned_tokens() {
        let tokens = detect_units("GDP, SA, % QoQ, LCU", &vocabulary());
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().any(|t| t == "% QoQ"));
        assert!(detect_units("Imports", &vocabulary()).is_empty());
    }

    #[test]
    fn reorder_all_counts_outcomes() {
        let mut labels = vec![
            "GDP, SA, LCU".to_string(),
            "GDP, LCU".to_string(),
            "Exports SAAR".to_string(),
            "Imports".to_string(),
        ];
        let summary = reorder_all(&mut labels, &vocabulary(), &rules());
        assert_eq!(summary.reordered, 1);
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.unresolved.len(), 1);
        assert_eq!(summary.unresolved[0].label, "Imports");
        assert_eq!(labels[0], "GDP, LCU, SA");
    }
}
