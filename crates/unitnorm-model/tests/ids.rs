use unitnorm_model::{CountryCode, FrequencyCode, ModelError, PairKey};

#[test]
fn codes_are_trimmed_and_uppercased() {
    let country = CountryCode::new(" jp ").unwrap();
    assert_eq!(country.as_str(), "JP");
    let frequency = FrequencyCode::new("q").unwrap();
    assert_eq!(frequency.as_str(), "Q");
}

#[test]
fn empty_codes_are_rejected() {
    assert_eq!(
        CountryCode::new("  "),
        Err(ModelError::InvalidCountryCode("  ".to_string()))
    );
    assert!(FrequencyCode::new("").is_err());
}

#[test]
fn frequency_rejects_digits() {
    assert!(FrequencyCode::new("Q1").is_err());
}

#[test]
fn pair_key_displays_with_dash() {
    let key = PairKey::parse("tw", "Q").unwrap();
    assert_eq!(key.to_string(), "TW-Q");
}

#[test]
fn country_code_deserializes_through_validation() {
    let code: CountryCode = serde_json::from_str("\"kr\"").unwrap();
    assert_eq!(code.as_str(), "KR");
    let bad: Result<CountryCode, _> = serde_json::from_str("\"K R\"");
    assert!(bad.is_err());
}
