//! Reusable exception rule shapes.

use unitnorm_standards::UnitVocabulary;
use unitnorm_standards::vocabulary::{TOKEN_SEPARATOR, has_currency_token};

use super::registry::ExceptionRule;

fn append_currency(label: &str, currency: &str) -> String {
    format!("{label}{TOKEN_SEPARATOR}{currency}")
}

/// Appends the default currency to labels that carry no currency token.
///
/// Used where a source never disambiguates currency in its headers.
pub struct AppendMissingCurrency {
    currency: String,
}

impl AppendMissingCurrency {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }
}

impl ExceptionRule for AppendMissingCurrency {
    fn name(&self) -> &str {
        "append_missing_currency"
    }

    fn description(&self) -> String {
        format!("Append {} to labels without a currency token", self.currency)
    }

    fn apply(&self, labels: Vec<String>, _vocabulary: &UnitVocabulary) -> Vec<String> {
        labels
            .into_iter()
            .map(|label| {
                if has_currency_token(&label) {
                    label
                } else {
                    append_currency(&label, &self.currency)
                }
            })
            .collect()
    }
}

/// A unit-token signature: one set of accepted tokens per slot.
///
/// A label matches when it has exactly as many detected tokens as there are
/// slots and every slot is satisfied by one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSignature {
    slots: Vec<Vec<String>>,
}

impl UnitSignature {
    pub fn new<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        Self {
            slots: slots
                .into_iter()
                .map(|slot| slot.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn matches(&self, tokens: &[&str]) -> bool {
        tokens.len() == self.slots.len()
            && self
                .slots
                .iter()
                .all(|slot| slot.iter().any(|accepted| tokens.contains(&accepted.as_str())))
    }
}

/// Appends the default currency only to labels matching a unit signature.
///
/// Used where blanket appending would corrupt unrelated labels.
pub struct AppendCurrencyBySignature {
    signatures: Vec<UnitSignature>,
    currency: String,
}

impl AppendCurrencyBySignature {
    pub fn new(signatures: Vec<UnitSignature>, currency: impl Into<String>) -> Self {
        Self {
            signatures,
            currency: currency.into(),
        }
    }
}

impl ExceptionRule for AppendCurrencyBySignature {
    fn name(&self) -> &str {
        "append_currency_by_signature"
    }

    fn description(&self) -> String {
        format!(
            "Append {} to labels matching {} unit signature(s)",
            self.currency,
            self.signatures.len()
        )
    }

    fn apply(&self, labels: Vec<String>, vocabulary: &UnitVocabulary) -> Vec<String> {
        labels
            .into_iter()
            .map(|label| {
                let tokens = vocabulary.detect(&label);
                if self.signatures.iter().any(|sig| sig.matches(&tokens)) {
                    append_currency(&label, &self.currency)
                } else {
                    label
                }
            })
            .collect()
    }
}

/// Rewrites a malformed substring, e.g. a missing comma between two tokens.
pub struct SeparatorFix {
    from: String,
    to: String,
}

impl SeparatorFix {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl ExceptionRule for SeparatorFix {
    fn name(&self) -> &str {
        "separator_fix"
    }

    fn description(&self) -> String {
        format!("Rewrite {:?} as {:?}", self.from, self.to)
    }

    fn apply(&self, labels: Vec<String>, _vocabulary: &UnitVocabulary) -> Vec<String> {
        if self.from.is_empty() {
            return labels;
        }
        labels
            .into_iter()
            .map(|label| {
                if label.contains(&self.from) {
                    label.replace(&self.from, &self.to)
                } else {
                    label
                }
            })
            .collect()
    }
}

/// Several rules applied in order.
pub struct RuleChain {
    name: String,
    rules: Vec<Box<dyn ExceptionRule>>,
}

impl RuleChain {
    pub fn new(rules: Vec<Box<dyn ExceptionRule>>) -> Self {
        let name = rules
            .iter()
            .map(|rule| rule.name())
            .collect::<Vec<_>>()
            .join("+");
        Self { name, rules }
    }
}

impl ExceptionRule for RuleChain {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        self.rules
            .iter()
            .map(|rule| rule.description())
            .collect::<Vec<_>>()
            .join(", then ")
    }

    fn apply(&self, labels: Vec<String>, vocabulary: &UnitVocabulary) -> Vec<String> {
        self.rules
            .iter()
            .fold(labels, |labels, rule| rule.apply(labels, vocabulary))
    }
}
