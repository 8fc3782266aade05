//! Country/frequency exception rules.
//!
//! Some sources format their headers in ways the generic reorderer cannot
//! repair on its own, usually by leaving the currency implicit. Each such
//! (country, frequency) pair gets a rule that rewrites the whole label list
//! after currency substitution and before reordering.
//!
//! Built-in rules:
//!
//! | Pair | Rule |
//! |------|------|
//! | CN-Q | append `LCU` to `% YoY`/`% QoQ` labels and to contribution labels |
//! | KR-Q | append `LCU` when no currency token is present |
//! | TW-Q | append `LCU` when no currency token is present |
//! | JP-Q | append `LCU` when missing, then `SA % QoQ` to `SA, % QoQ` |
//!
//! Rules declared in the settings file replace the built-in rule for their
//! pair. Several declarations for the same pair are chained in order.

mod registry;
mod rules;

use std::collections::BTreeMap;

use tracing::debug;
use unitnorm_model::PairKey;
use unitnorm_standards::{DEFAULT_CURRENCY, ExceptionSpec, RuleSpec};

pub use registry::{ExceptionRegistry, ExceptionRule, NoopRule};
pub use rules::{
    AppendCurrencyBySignature, AppendMissingCurrency, RuleChain, SeparatorFix, UnitSignature,
};

fn pair(country: &str, frequency: &str) -> Option<PairKey> {
    PairKey::parse(country, frequency).ok()
}

fn cn_signatures() -> Vec<UnitSignature> {
    vec![
        UnitSignature::new([vec!["% YoY", "% QoQ"]]),
        UnitSignature::new([
            vec!["ppts"],
            vec!["Contribution to % YoY chg", "Contribution to % QoQ chg"],
        ]),
    ]
}

/// Registry holding the built-in exception rules.
pub fn default_registry() -> ExceptionRegistry {
    let mut registry = ExceptionRegistry::default();

    if let Some(key) = pair("CN", "Q") {
        registry.register(
            key,
            Box::new(AppendCurrencyBySignature::new(
                cn_signatures(),
                DEFAULT_CURRENCY,
            )),
        );
    }
    for country in ["KR", "TW"] {
        if let Some(key) = pair(country, "Q") {
            registry.register(key, Box::new(AppendMissingCurrency::new(DEFAULT_CURRENCY)));
        }
    }
    if let Some(key) = pair("JP", "Q") {
        registry.register(
            key,
            Box::new(RuleChain::new(vec![
                Box::new(AppendMissingCurrency::new(DEFAULT_CURRENCY)),
                Box::new(SeparatorFix::new("SA % QoQ", "SA, % QoQ")),
            ])),
        );
    }

    registry
}

/// Build a rule from its settings declaration.
pub fn rule_from_spec(spec: &RuleSpec) -> Box<dyn ExceptionRule> {
    match spec {
        RuleSpec::AppendMissingCurrency { currency } => Box::new(AppendMissingCurrency::new(
            currency.as_deref().unwrap_or(DEFAULT_CURRENCY),
        )),
        RuleSpec::AppendCurrencyBySignature {
            signatures,
            currency,
        } => Box::new(AppendCurrencyBySignature::new(
            signatures
                .iter()
                .map(|sig| UnitSignature::new(sig.slots.iter().cloned()))
                .collect(),
            currency.as_deref().unwrap_or(DEFAULT_CURRENCY),
        )),
        RuleSpec::SeparatorFix { from, to } => Box::new(SeparatorFix::new(from, to)),
    }
}

/// Built-in registry extended with the rules declared in settings.
pub fn registry_with_exceptions(exceptions: &[ExceptionSpec]) -> ExceptionRegistry {
    let mut registry = default_registry();

    let mut declared: BTreeMap<PairKey, Vec<Box<dyn ExceptionRule>>> = BTreeMap::new();
    for spec in exceptions {
        declared
            .entry(spec.key())
            .or_default()
            .push(rule_from_spec(&spec.rule));
    }

    for (key, mut rules) in declared {
        debug!(pair = %key, rules = rules.len(), "registering declared exception");
        let rule = if rules.len() == 1 {
            match rules.pop() {
                Some(rule) => rule,
                None => continue,
            }
        } else {
            Box::new(RuleChain::new(rules))
        };
        registry.register(key, rule);
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitnorm_standards::{SignatureSpec, UnitVocabulary};

    fn key(country: &str) -> PairKey {
        PairKey::parse(country, "Q").unwrap()
    }

    #[test]
    fn default_registry_covers_known_pairs() {
        let registry = default_registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.get(&key("CN")).name(),
            "append_currency_by_signature"
        );
        assert_eq!(registry.get(&key("KR")).name(), "append_missing_currency");
        assert_eq!(registry.get(&key("TW")).name(), "append_missing_currency");
        assert_eq!(
            registry.get(&key("JP")).name(),
            "append_missing_currency+separator_fix"
        );
        assert_eq!(registry.get(&key("US")).name(), "none");
    }

    #[test]
    fn registered_pairs_are_listed_sorted() {
        let registry = default_registry();
        let keys: Vec<String> = registry.keys().iter().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["CN-Q", "JP-Q", "KR-Q", "TW-Q"]);
        assert_eq!(
            registry.get(&key("CN")).description(),
            "Append LCU to labels matching 2 unit signature(s)"
        );
    }

    #[test]
    fn declared_rules_replace_builtin_and_chain() {
        let specs = vec![
            ExceptionSpec {
                country: "kr".parse().unwrap(),
                frequency: "q".parse().unwrap(),
                rule: RuleSpec::SeparatorFix {
                    from: "SA %".to_string(),
                    to: "SA, %".to_string(),
                },
            },
            ExceptionSpec {
                country: "KR".parse().unwrap(),
                frequency: "Q".parse().unwrap(),
                rule: RuleSpec::AppendCurrencyBySignature {
                    signatures: vec![SignatureSpec {
                        slots: vec![vec!["SA".to_string()]],
                    }],
                    currency: Some("USD".to_string()),
                },
            },
        ];
        let registry = registry_with_exceptions(&specs);
        assert_eq!(registry.len(), 4);
        let rule = registry.get(&key("KR"));
        assert_eq!(
            rule.name(),
            "separator_fix+append_currency_by_signature"
        );

        let vocabulary = UnitVocabulary::from_combinations(["LCU, SA", "USD, SA"]);
        let out = rule.apply(vec!["Exports SA".to_string()], &vocabulary);
        assert_eq!(out, vec!["Exports SA, USD"]);
    }
}
