#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StandardsError;
use crate::hash::sha256_hex;
use crate::vocabulary::UnitVocabulary;

/// Column of the mapping template holding the unit combinations.
pub const UNIT_COLUMN: &str = "Unit";

/// The mapping template: an ordered list of valid unit combinations.
#[derive(Debug, Clone)]
pub struct MappingTemplate {
    pub path: PathBuf,
    pub sha256: String,
    pub combinations: Vec<String>,
}

impl MappingTemplate {
    pub fn vocabulary(&self) -> UnitVocabulary {
        UnitVocabulary::from_combinations(&self.combinations)
    }
}

/// Load a CSV mapping template, verifying `expected_sha256` when given.
pub fn load_mapping_template(
    path: &Path,
    expected_sha256: Option<&str>,
) -> Result<MappingTemplate, StandardsError> {
    let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;
    let actual = sha256_hex(&bytes);
    if let Some(expected) = expected_sha256 {
        let expected = expected.trim().to_ascii_lowercase();
        if actual != expected {
            return Err(StandardsError::Sha256Mismatch {
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }
    }
    let combinations = parse_unit_column(&bytes, path)?;
    debug!(
        path = %path.display(),
        combinations = combinations.len(),
        "mapping template loaded"
    );
    Ok(MappingTemplate {
        path: path.to_path_buf(),
        sha256: actual,
        combinations,
    })
}

/// Read the non-empty `Unit` cells of a template CSV, in file order.
pub fn parse_unit_column(bytes: &[u8], path: &Path) -> Result<Vec<String>, StandardsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| StandardsError::csv(path, &e))?
        .clone();
    let index = headers
        .iter()
        .position(|h| h.trim().trim_matches('\u{feff}') == UNIT_COLUMN)
        .ok_or_else(|| StandardsError::MissingColumn {
            path: path.to_path_buf(),
            column: UNIT_COLUMN.to_string(),
        })?;

    let mut combinations = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StandardsError::csv(path, &e))?;
        let Some(value) = row.get(index).map(str::trim) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        combinations.push(value.to_string());
    }
    Ok(combinations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_unit_column_and_skips_blanks() {
        let csv = "Category,Unit,Note\nGDP,\"LCU, SA\",x\nGDP,,\nCPI,\"% YoY\",\n";
        let combos = parse_unit_column(csv.as_bytes(), Path::new("t.csv")).unwrap();
        assert_eq!(combos, vec!["LCU, SA", "% YoY"]);
    }

    #[test]
    fn tolerates_bom_in_header() {
        let csv = "\u{feff}Unit\nLCU\n";
        let combos = parse_unit_column(csv.as_bytes(), Path::new("t.csv")).unwrap();
        assert_eq!(combos, vec!["LCU"]);
    }

    #[test]
    fn missing_unit_column_is_an_error() {
        let err = parse_unit_column(b"Name\nGDP\n", Path::new("t.csv")).unwrap_err();
        assert!(matches!(err, StandardsError::MissingColumn { .. }));
    }
}
