use std::fs;
use std::path::Path;

use unitnorm_model::{CountryCode, FrequencyCode, PairKey};
use unitnorm_standards::hash::sha256_hex;
use unitnorm_standards::{
    NATIONAL_ACCOUNTS, RuleSpec, Settings, StandardsError, load_mapping_template,
};

const SETTINGS: &str = r#"
[frequencies]
q = "quarterly"
A = "annual"

[templates.national_accounts]
input_path = "templates/na.csv"

[countries.CN.currencies]
CNY = "LCU"
"CNY bn" = "LCU"

[countries.CN.national_accounts]
quarterly_raw_data_path = "raw/CN_quarterly.csv"
quarterly_data_path = "/srv/clean/CN_quarterly.csv"

[[exceptions]]
country = "id"
frequency = "Q"
kind = "append_missing_currency"

[[exceptions]]
country = "ID"
frequency = "Q"
kind = "separator_fix"
from = "SA % YoY"
to = "SA, % YoY"
"#;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn cn_q() -> PairKey {
    PairKey::parse("CN", "Q").unwrap()
}

#[test]
fn resolves_paths_relative_to_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    write(&path, SETTINGS);

    let settings = Settings::load(&path).expect("load settings");
    assert_eq!(
        settings.raw_data_path(&cn_q()).unwrap(),
        dir.path().join("raw/CN_quarterly.csv")
    );
    assert_eq!(
        settings.data_path(&cn_q()).unwrap(),
        Path::new("/srv/clean/CN_quarterly.csv")
    );
    let (template, pin) = settings.template(NATIONAL_ACCOUNTS).unwrap();
    assert_eq!(template, dir.path().join("templates/na.csv"));
    assert!(pin.is_none());
}

#[test]
fn keys_are_case_insensitive() {
    let settings = Settings::parse(SETTINGS, Path::new("s.toml"), Path::new("/base")).unwrap();
    let quarterly = FrequencyCode::new("Q").unwrap();
    assert_eq!(settings.frequency_name(&quarterly).unwrap(), "quarterly");
    let map = settings
        .currency_map(&CountryCode::new("CN").unwrap())
        .unwrap();
    let codes: Vec<&str> = map.iter().map(|(code, _)| code).collect();
    assert_eq!(codes, vec!["CNY bn", "CNY"]);
}

#[test]
fn unknown_country_and_frequency_are_configuration_errors() {
    let settings = Settings::parse(SETTINGS, Path::new("s.toml"), Path::new("/base")).unwrap();
    let err = settings
        .raw_data_path(&PairKey::parse("BR", "Q").unwrap())
        .unwrap_err();
    assert!(matches!(err, StandardsError::UnknownCountry { ref country } if country == "BR"));

    let err = settings
        .raw_data_path(&PairKey::parse("CN", "M").unwrap())
        .unwrap_err();
    assert!(matches!(err, StandardsError::UnknownFrequency { .. }));

    let err = settings
        .raw_data_path(&PairKey::parse("CN", "A").unwrap())
        .unwrap_err();
    assert!(
        matches!(err, StandardsError::MissingPath { ref key, .. } if key == "annual_raw_data_path")
    );
}

#[test]
fn declared_exceptions_are_parsed_in_order() {
    let settings = Settings::parse(SETTINGS, Path::new("s.toml"), Path::new("/base")).unwrap();
    let exceptions = settings.exceptions();
    assert_eq!(exceptions.len(), 2);
    assert_eq!(exceptions[0].key(), PairKey::parse("ID", "Q").unwrap());
    assert_eq!(
        exceptions[0].rule,
        RuleSpec::AppendMissingCurrency { currency: None }
    );
    assert_eq!(
        exceptions[1].rule,
        RuleSpec::SeparatorFix {
            from: "SA % YoY".to_string(),
            to: "SA, % YoY".to_string(),
        }
    );
}

#[test]
fn settings_without_frequencies_are_rejected() {
    let err = Settings::parse("[countries.CN]\n", Path::new("s.toml"), Path::new("/")).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidSettings { .. }));
}

#[test]
fn default_reorder_rules_are_embedded() {
    let settings = Settings::parse(SETTINGS, Path::new("s.toml"), Path::new("/base")).unwrap();
    let rules = settings.reorder_rules().unwrap();
    assert!(rules.entry_count() > 0);
}

#[test]
fn template_pin_is_verified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("na.csv");
    let contents = "Unit\n\"LCU, SA\"\nLCU\n";
    write(&path, contents);

    let good = sha256_hex(contents.as_bytes());
    let template = load_mapping_template(&path, Some(&good.to_uppercase())).unwrap();
    assert_eq!(template.combinations, vec!["LCU, SA", "LCU"]);
    assert_eq!(template.sha256, good);

    let err = load_mapping_template(&path, Some("00")).unwrap_err();
    assert!(matches!(err, StandardsError::Sha256Mismatch { .. }));
}

#[test]
fn missing_template_file_is_an_io_error() {
    let err = load_mapping_template(Path::new("/nonexistent/na.csv"), None).unwrap_err();
    assert!(matches!(err, StandardsError::Io { .. }));
}
