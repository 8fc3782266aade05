use tracing::info;
use unitnorm_standards::{
    NATIONAL_ACCOUNTS, ReorderRules, Settings, StandardsError, UnitVocabulary,
    load_mapping_template,
};

use crate::exceptions::{ExceptionRegistry, registry_with_exceptions};

/// Everything a run needs, built once and shared read-only by every pair.
pub struct NormalizeContext {
    pub settings: Settings,
    pub vocabulary: UnitVocabulary,
    pub rules: ReorderRules,
    pub registry: ExceptionRegistry,
    /// Hex sha256 of the mapping template that produced the vocabulary.
    pub template_sha256: Option<String>,
}

impl NormalizeContext {
    /// Load the mapping template, reorder rules and exception registry
    /// described by `settings`.
    pub fn from_settings(settings: Settings) -> Result<Self, StandardsError> {
        let (template_path, pin) = settings.template(NATIONAL_ACCOUNTS)?;
        let template = load_mapping_template(&template_path, pin)?;
        let vocabulary = template.vocabulary();
        let rules = settings.reorder_rules()?;
        let registry = registry_with_exceptions(settings.exceptions());
        info!(
            template = %template.path.display(),
            tokens = vocabulary.len(),
            remediation_entries = rules.entry_count(),
            exception_rules = registry.len(),
            "normalization context ready"
        );
        Ok(Self {
            settings,
            vocabulary,
            rules,
            registry,
            template_sha256: Some(template.sha256),
        })
    }

    /// Assemble a context from parts already in memory.
    pub fn new(
        settings: Settings,
        vocabulary: UnitVocabulary,
        rules: ReorderRules,
        registry: ExceptionRegistry,
    ) -> Self {
        Self {
            settings,
            vocabulary,
            rules,
            registry,
            template_sha256: None,
        }
    }
}
