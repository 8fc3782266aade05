//! Raw currency code substitution.

use unitnorm_standards::CurrencyMap;
use unitnorm_standards::currency::BILLIONS_SUFFIX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyOutcome {
    pub label: String,
    pub changed: bool,
}

/// Replace every raw currency code in `label` with its canonical token.
///
/// For each code the `"<CODE> bn"` form is replaced before the bare code, so
/// `"GDP CNY bn"` becomes `"GDP LCU"` rather than `"GDP LCU bn"`. Matching is
/// plain substring containment.
pub fn substitute_currency(label: &str, currencies: &CurrencyMap) -> CurrencyOutcome {
    let mut current = label.to_string();
    for (code, token) in currencies.iter() {
        if !current.contains(code) {
            continue;
        }
        current = current
            .replace(&format!("{code}{BILLIONS_SUFFIX}"), token)
            .replace(code, token);
    }
    let changed = current != label;
    CurrencyOutcome {
        label: current,
        changed,
    }
}

/// Apply [`substitute_currency`] to every label, returning the changed count.
pub fn substitute_all(labels: &mut [String], currencies: &CurrencyMap) -> usize {
    let mut replaced = 0;
    for label in labels.iter_mut() {
        let outcome = substitute_currency(label, currencies);
        if outcome.changed {
            replaced += 1;
            *label = outcome.label;
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cny() -> CurrencyMap {
        [("CNY bn", "LCU"), ("CNY", "LCU")].into_iter().collect()
    }

    #[test]
    fn billions_suffix_is_replaced_first() {
        let outcome = substitute_currency("GDP CNY bn", &cny());
        assert_eq!(outcome.label, "GDP LCU");
        assert!(outcome.changed);
    }

    #[test]
    fn bare_code_is_replaced() {
        let outcome = substitute_currency("Exports, CNY, SA", &cny());
        assert_eq!(outcome.label, "Exports, LCU, SA");
    }

    #[test]
    fn bare_code_alone_still_strips_suffix() {
        let map: CurrencyMap = [("KRW", "LCU")].into_iter().collect();
        let outcome = substitute_currency("GDP, KRW bn, SA", &map);
        assert_eq!(outcome.label, "GDP, LCU, SA");
    }

    #[test]
    fn no_match_leaves_label_unchanged() {
        let outcome = substitute_currency("Consumption SA", &cny());
        assert_eq!(outcome.label, "Consumption SA");
        assert!(!outcome.changed);
    }

    #[test]
    fn substitute_all_counts_changed_labels() {
        let mut labels = vec![
            "GDP CNY bn".to_string(),
            "CPI, % YoY".to_string(),
            "Imports, CNY, CNY".to_string(),
        ];
        assert_eq!(substitute_all(&mut labels, &cny()), 2);
        assert_eq!(labels, vec!["GDP LCU", "CPI, % YoY", "Imports, LCU, LCU"]);
    }
}
