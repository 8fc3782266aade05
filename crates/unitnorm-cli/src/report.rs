//! Machine-readable run report.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use unitnorm_model::RunReport;

/// Write `run` as pretty JSON, creating parent directories as needed.
pub fn write_run_report(run: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(run).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write run report {}", path.display()))?;
    Ok(())
}
