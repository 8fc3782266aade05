use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use unitnorm_cli::pairs::expand_pairs;
use unitnorm_cli::report::write_run_report;
use unitnorm_model::{NormalizeOptions, PersistPolicy, RunReport};
use unitnorm_standards::paths::settings_path;
use unitnorm_standards::{NATIONAL_ACCOUNTS, Settings, load_mapping_template};
use unitnorm_transform::{ExceptionRule, NormalizeContext, normalize_all, registry_with_exceptions};

use crate::cli::NormalizeArgs;
use crate::summary::apply_table_style;

fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let path = settings_path(explicit);
    Settings::load(&path).with_context(|| format!("load settings {}", path.display()))
}

pub fn run_normalize(settings: Option<&Path>, args: &NormalizeArgs) -> Result<RunReport> {
    let started = Instant::now();
    let pairs = expand_pairs(&args.country, &args.freq)?;
    let run_span = info_span!("normalize", pairs = pairs.len());
    let _run_guard = run_span.enter();

    let settings = load_settings(settings)?;
    let ctx = NormalizeContext::from_settings(settings).context("load mapping template")?;

    let options = NormalizeOptions::default()
        .with_persist(args.persist)
        .with_policy(if args.strict {
            PersistPolicy::Strict
        } else {
            PersistPolicy::Always
        });
    let run = normalize_all(&ctx, &pairs, &options);

    if let Some(path) = &args.report {
        write_run_report(&run, path)?;
        info!(path = %path.display(), "run report written");
    }
    info!(
        pairs = run.pairs.len(),
        failures = run.failures.len(),
        currency_replacements = run.total_currency_replacements(),
        unit_reorders = run.total_unit_reorders(),
        unresolved = run.total_unresolved(),
        elapsed_ms = started.elapsed().as_millis(),
        "normalization finished"
    );
    Ok(run)
}

pub fn run_vocabulary(settings: Option<&Path>) -> Result<()> {
    let settings = load_settings(settings)?;
    let (path, pin) = settings
        .template(NATIONAL_ACCOUNTS)
        .context("locate mapping template")?;
    let template = load_mapping_template(&path, pin).context("load mapping template")?;
    let vocabulary = template.vocabulary();

    println!("Template: {}", template.path.display());
    println!("sha256: {}", template.sha256);

    let mut tokens = Table::new();
    tokens.set_header(vec!["Token"]);
    apply_table_style(&mut tokens);
    for token in vocabulary.tokens() {
        tokens.add_row(vec![token]);
    }
    println!("{tokens}");

    let mut orderings = Table::new();
    orderings.set_header(vec!["Tokens", "Canonical orderings"]);
    apply_table_style(&mut orderings);
    for count in vocabulary.ordering_counts() {
        orderings.add_row(vec![
            Cell::new(count),
            Cell::new(vocabulary.orderings(count).join("\n")),
        ]);
    }
    println!("{orderings}");

    let registry = registry_with_exceptions(settings.exceptions());
    let mut rules = Table::new();
    rules.set_header(vec!["Pair", "Exception rule", "Description"]);
    apply_table_style(&mut rules);
    for key in registry.keys() {
        let rule: &dyn ExceptionRule = registry.get(key);
        rules.add_row(vec![
            Cell::new(key),
            Cell::new(rule.name()),
            Cell::new(rule.description()),
        ]);
    }
    println!("{rules}");
    Ok(())
}
