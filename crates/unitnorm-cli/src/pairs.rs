//! Expansion of `--country`/`--freq` selections into pairs.

use anyhow::{Context, Result, ensure};
use unitnorm_model::{CountryCode, FrequencyCode, PairKey};

/// Every (country, frequency) combination, countries outermost, in the
/// order given. Repeated selections are processed once and empty entries
/// (as in `CN,`) are skipped.
pub fn expand_pairs(countries: &[String], frequencies: &[String]) -> Result<Vec<PairKey>> {
    let countries = non_empty(countries)
        .map(CountryCode::new)
        .collect::<Result<Vec<_>, _>>()
        .context("parse --country")?;
    let frequencies = non_empty(frequencies)
        .map(FrequencyCode::new)
        .collect::<Result<Vec<_>, _>>()
        .context("parse --freq")?;
    ensure!(!countries.is_empty(), "--country selects no country");
    ensure!(!frequencies.is_empty(), "--freq selects no frequency");

    let mut pairs: Vec<PairKey> = Vec::with_capacity(countries.len() * frequencies.len());
    for country in &countries {
        for frequency in &frequencies {
            let key = PairKey::new(country.clone(), frequency.clone());
            if !pairs.contains(&key) {
                pairs.push(key);
            }
        }
    }
    Ok(pairs)
}

fn non_empty(values: &[String]) -> impl Iterator<Item = &str> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}
