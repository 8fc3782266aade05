//! Per-pair normalization driver.

use tracing::{info, info_span, warn};
use unitnorm_ingest::{read_label_table, write_label_table};
use unitnorm_model::{NormalizeOptions, PairFailure, PairKey, PairReport, RunReport};
use unitnorm_standards::CurrencyMap;

use crate::context::NormalizeContext;
use crate::currency::substitute_all;
use crate::error::NormalizeError;
use crate::exceptions::ExceptionRule;
use crate::reorder::{ReorderSummary, reorder_all};

/// Labels after all three stages, with per-stage counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedLabels {
    pub labels: Vec<String>,
    pub currency_replacements: usize,
    pub exception_changes: usize,
    pub reorder: ReorderSummary,
}

/// Run currency substitution, the exception rule and reordering over
/// `labels`, in that order.
pub fn normalize_labels(
    mut labels: Vec<String>,
    currencies: &CurrencyMap,
    exception: &dyn ExceptionRule,
    ctx: &NormalizeContext,
) -> NormalizedLabels {
    let currency_replacements = substitute_all(&mut labels, currencies);

    let before = labels.clone();
    let mut labels = exception.apply(labels, &ctx.vocabulary);
    let exception_changes = before
        .iter()
        .zip(&labels)
        .filter(|(old, new)| old != new)
        .count();

    let reorder = reorder_all(&mut labels, &ctx.vocabulary, &ctx.rules);
    NormalizedLabels {
        labels,
        currency_replacements,
        exception_changes,
        reorder,
    }
}

/// Normalize the raw table of one pair and optionally persist it.
pub fn normalize_pair(
    ctx: &NormalizeContext,
    key: &PairKey,
    options: &NormalizeOptions,
) -> Result<PairReport, NormalizeError> {
    let span = info_span!("pair", country = %key.country, frequency = %key.frequency);
    let _guard = span.enter();

    let settings = &ctx.settings;
    let currencies = settings.currency_map(&key.country)?;
    let raw_path = settings.raw_data_path(key)?;
    let output_path = if options.persist {
        Some(settings.data_path(key)?)
    } else {
        None
    };

    let mut table = read_label_table(&raw_path)?;
    let exception = ctx.registry.get(key);
    let normalized = normalize_labels(table.labels.clone(), &currencies, exception, ctx);

    let mut report = PairReport::new(key.clone());
    report.label_count = normalized.labels.len();
    report.currency_replacements = normalized.currency_replacements;
    report.exception_rule = exception.name().to_string();
    report.exception_changes = normalized.exception_changes;
    report.unit_reorders = normalized.reorder.reordered;
    report.ignored = normalized.reorder.ignored;
    report.unresolved = normalized.reorder.unresolved;
    table.replace_labels(normalized.labels)?;

    info!(
        labels = report.label_count,
        currency_replacements = report.currency_replacements,
        "currency codes substituted"
    );
    info!(
        rule = %report.exception_rule,
        changed = report.exception_changes,
        unit_reorders = report.unit_reorders,
        unresolved = report.unresolved_count(),
        "unit order normalized"
    );

    if let Some(path) = output_path {
        if options.persist_policy.allows(report.unresolved_count()) {
            write_label_table(&table, &path)?;
            info!(path = %path.display(), "normalized table written");
            report.output_path = Some(path);
        } else {
            warn!(
                path = %path.display(),
                unresolved = report.unresolved_count(),
                "write blocked by unresolved labels"
            );
            report.persistence_blocked = true;
        }
    }

    Ok(report)
}

/// Normalize every pair in order, collecting failures without stopping.
pub fn normalize_all(
    ctx: &NormalizeContext,
    pairs: &[PairKey],
    options: &NormalizeOptions,
) -> RunReport {
    let mut run = RunReport {
        template_sha256: ctx.template_sha256.clone(),
        ..RunReport::default()
    };
    for key in pairs {
        match normalize_pair(ctx, key, options) {
            Ok(report) => run.pairs.push(report),
            Err(error) => {
                warn!(pair = %key, %error, "pair failed");
                run.failures.push(PairFailure {
                    key: key.clone(),
                    message: error.to_string(),
                });
            }
        }
    }
    run
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::exceptions::{NoopRule, default_registry};
    use unitnorm_standards::{ReorderRules, Settings, UnitVocabulary};

    fn context() -> NormalizeContext {
        let settings = Settings::parse(
            "[frequencies]\nQ = \"quarterly\"\n",
            Path::new("settings.toml"),
            Path::new("."),
        )
        .unwrap();
        NormalizeContext::new(
            settings,
            UnitVocabulary::from_combinations(["LCU", "LCU, SA", "LCU, % QoQ", "USD"]),
            ReorderRules::embedded().unwrap(),
            default_registry(),
        )
    }

    #[test]
    fn stages_run_in_order() {
        let ctx = context();
        let currencies: CurrencyMap = [("CNY", "LCU")].into_iter().collect();
        let out = normalize_labels(
            vec!["GDP, SA, CNY bn".to_string(), "GDP, USD".to_string()],
            &currencies,
            &NoopRule,
            &ctx,
        );
        assert_eq!(out.labels, vec!["GDP, LCU, SA", "GDP, USD"]);
        assert_eq!(out.currency_replacements, 1);
        assert_eq!(out.exception_changes, 0);
        assert_eq!(out.reorder.reordered, 1);
    }

    #[test]
    fn unknown_country_is_a_configuration_error() {
        let ctx = context();
        let key = PairKey::parse("XX", "Q").unwrap();
        let err = normalize_pair(&ctx, &key, &NormalizeOptions::default()).unwrap_err();
        assert!(err.is_configuration());
    }
}
