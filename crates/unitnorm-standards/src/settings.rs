//! TOML settings provider.
//!
//! The settings file names, per country, the raw and canonical table
//! locations and the currency map, plus the frequency names and the mapping
//! template location shared by all countries.
//!
//! ```toml
//! [frequencies]
//! Q = "quarterly"
//!
//! [templates.national_accounts]
//! input_path = "templates/national_accounts.csv"
//!
//! [countries.CN.currencies]
//! CNY = "LCU"
//! "CNY bn" = "LCU"
//!
//! [countries.CN.national_accounts]
//! quarterly_raw_data_path = "raw/CN_quarterly.csv"
//! quarterly_data_path = "clean/CN_quarterly.csv"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use unitnorm_model::{CountryCode, FrequencyCode, PairKey};

use crate::currency::CurrencyMap;
use crate::error::StandardsError;
use crate::paths::resolve;
use crate::reorder_rules::ReorderRules;

/// Category holding the national-accounts tables and template.
pub const NATIONAL_ACCOUNTS: &str = "national_accounts";

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSettings {
    pub input_path: PathBuf,
    /// Optional pin verified before the template is parsed.
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountrySettings {
    #[serde(default)]
    pub currencies: BTreeMap<String, String>,
    #[serde(default)]
    pub national_accounts: BTreeMap<String, PathBuf>,
}

/// A signature: one set of accepted tokens per unit slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignatureSpec {
    pub slots: Vec<Vec<String>>,
}

/// Exception rule declared in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    AppendMissingCurrency {
        #[serde(default)]
        currency: Option<String>,
    },
    AppendCurrencyBySignature {
        signatures: Vec<SignatureSpec>,
        #[serde(default)]
        currency: Option<String>,
    },
    SeparatorFix {
        from: String,
        to: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExceptionSpec {
    pub country: CountryCode,
    pub frequency: FrequencyCode,
    #[serde(flatten)]
    pub rule: RuleSpec,
}

impl ExceptionSpec {
    pub fn key(&self) -> PairKey {
        PairKey::new(self.country.clone(), self.frequency.clone())
    }
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    remediation: Option<PathBuf>,
    #[serde(default)]
    frequencies: BTreeMap<String, String>,
    #[serde(default)]
    templates: BTreeMap<String, TemplateSettings>,
    #[serde(default)]
    countries: BTreeMap<String, CountrySettings>,
    #[serde(default)]
    exceptions: Vec<ExceptionSpec>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    base_dir: PathBuf,
    remediation: Option<PathBuf>,
    frequencies: BTreeMap<String, String>,
    templates: BTreeMap<String, TemplateSettings>,
    countries: BTreeMap<String, CountrySettings>,
    exceptions: Vec<ExceptionSpec>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let settings = Self::parse(&contents, path, &base_dir)?;
        debug!(
            path = %path.display(),
            countries = settings.countries.len(),
            frequencies = settings.frequencies.len(),
            exceptions = settings.exceptions.len(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Parse settings text; relative paths resolve against `base_dir`.
    pub fn parse(contents: &str, source: &Path, base_dir: &Path) -> Result<Self, StandardsError> {
        let raw: RawSettings = toml::from_str(contents).map_err(|e| StandardsError::Toml {
            path: source.to_path_buf(),
            source: e,
        })?;
        if raw.frequencies.is_empty() {
            return Err(StandardsError::InvalidSettings {
                message: format!("{} defines no frequencies", source.display()),
            });
        }
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            remediation: raw.remediation,
            frequencies: upper_keys(raw.frequencies),
            templates: raw.templates,
            countries: upper_keys(raw.countries),
            exceptions: raw.exceptions,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Full frequency name used to build path keys (`Q` -> `quarterly`).
    pub fn frequency_name(&self, frequency: &FrequencyCode) -> Result<&str, StandardsError> {
        self.frequencies
            .get(frequency.as_str())
            .map(String::as_str)
            .ok_or_else(|| StandardsError::UnknownFrequency {
                frequency: frequency.to_string(),
            })
    }

    pub fn country(&self, country: &CountryCode) -> Result<&CountrySettings, StandardsError> {
        self.countries
            .get(country.as_str())
            .ok_or_else(|| StandardsError::UnknownCountry {
                country: country.to_string(),
            })
    }

    pub fn currency_map(&self, country: &CountryCode) -> Result<CurrencyMap, StandardsError> {
        let entry = self.country(country)?;
        Ok(CurrencyMap::new(entry.currencies.clone()))
    }

    /// Raw input table for a pair.
    pub fn raw_data_path(&self, key: &PairKey) -> Result<PathBuf, StandardsError> {
        self.table_path(key, "raw_data_path")
    }

    /// Canonical output table for a pair.
    pub fn data_path(&self, key: &PairKey) -> Result<PathBuf, StandardsError> {
        self.table_path(key, "data_path")
    }

    fn table_path(&self, key: &PairKey, suffix: &str) -> Result<PathBuf, StandardsError> {
        let frequency = self.frequency_name(&key.frequency)?;
        let entry = self.country(&key.country)?;
        let path_key = format!("{frequency}_{suffix}");
        entry
            .national_accounts
            .get(&path_key)
            .map(|path| resolve(&self.base_dir, path))
            .ok_or_else(|| StandardsError::MissingPath {
                country: key.country.to_string(),
                key: path_key,
            })
    }

    /// Mapping template location (and optional pin) for a category.
    pub fn template(&self, category: &str) -> Result<(PathBuf, Option<&str>), StandardsError> {
        let template =
            self.templates
                .get(category)
                .ok_or_else(|| StandardsError::MissingTemplate {
                    category: category.to_string(),
                })?;
        Ok((
            resolve(&self.base_dir, &template.input_path),
            template.sha256.as_deref(),
        ))
    }

    /// Reorder rules from the configured file, or the embedded defaults.
    pub fn reorder_rules(&self) -> Result<ReorderRules, StandardsError> {
        match &self.remediation {
            Some(path) => ReorderRules::load(&resolve(&self.base_dir, path)),
            None => ReorderRules::embedded(),
        }
    }

    pub fn exceptions(&self) -> &[ExceptionSpec] {
        &self.exceptions
    }
}

fn upper_keys<V>(map: BTreeMap<String, V>) -> BTreeMap<String, V> {
    map.into_iter()
        .map(|(key, value)| (key.trim().to_ascii_uppercase(), value))
        .collect()
}
