use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::debug;

use crate::error::IngestError;

/// A time-series table whose header row holds the series labels.
///
/// The first column is the row index (usually a period); its header is kept
/// as-is and is not a label. Data rows are carried through untouched.
#[derive(Debug, Clone)]
pub struct LabelTable {
    pub index_header: String,
    pub labels: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl LabelTable {
    pub fn new(index_header: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            index_header: index_header.into(),
            labels,
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Replace the header labels, keeping their count.
    pub fn replace_labels(&mut self, labels: Vec<String>) -> Result<(), IngestError> {
        if labels.len() != self.labels.len() {
            return Err(IngestError::LabelCount {
                expected: self.labels.len(),
                actual: labels.len(),
            });
        }
        self.labels = labels;
        Ok(())
    }

    fn header_record(&self) -> StringRecord {
        let mut record = StringRecord::with_capacity(0, self.labels.len() + 1);
        record.push_field(&self.index_header);
        for label in &self.labels {
            record.push_field(label);
        }
        record
    }
}

/// Load a label table from a CSV file.
pub fn read_label_table(path: &Path) -> Result<LabelTable, IngestError> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(|e| IngestError::csv(path, e))?,
        None => {
            return Err(IngestError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
    };
    let mut fields = header.iter();
    let index_header = fields
        .next()
        .map(|value| value.trim_start_matches('\u{feff}').to_string())
        .unwrap_or_default();
    let labels: Vec<String> = fields.map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in records {
        rows.push(record.map_err(|e| IngestError::csv(path, e))?);
    }
    debug!(
        path = %path.display(),
        labels = labels.len(),
        rows = rows.len(),
        "table loaded"
    );
    Ok(LabelTable {
        index_header,
        labels,
        rows,
    })
}

/// Write a label table to `path`, creating parent directories as needed.
pub fn write_label_table(table: &LabelTable, path: &Path) -> Result<(), IngestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IngestError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| IngestError::io(path, e))?;
    let mut writer = WriterBuilder::new().flexible(true).from_writer(file);
    writer
        .write_record(&table.header_record())
        .map_err(|e| IngestError::csv(path, e))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| IngestError::csv(path, e))?;
    }
    writer.flush().map_err(|e| IngestError::io(path, e))?;
    debug!(
        path = %path.display(),
        labels = table.labels.len(),
        rows = table.rows.len(),
        "table written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_record_puts_index_first() {
        let table = LabelTable::new("date", vec!["GDP, LCU".to_string(), "CPI".to_string()]);
        let header = table.header_record();
        assert_eq!(header.iter().collect::<Vec<_>>(), vec!["date", "GDP, LCU", "CPI"]);
    }

    #[test]
    fn replace_labels_rejects_count_change() {
        let mut table = LabelTable::new("date", vec!["A".to_string()]);
        let err = table
            .replace_labels(vec!["A".to_string(), "B".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::LabelCount {
                expected: 1,
                actual: 2
            }
        ));
    }
}
