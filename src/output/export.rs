use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::formatter::format_records_json;
use crate::assessment::AssessmentRecord;

/// Write the session's assessments to `path` as JSON, atomically.
pub fn export_records(path: &Path, records: &[&AssessmentRecord]) -> Result<()> {
    let json = format_records_json(records)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write assessments to {}", path.display()))?;
    file.commit().context("Failed to save assessments")?;

    tracing::info!(path = %path.display(), count = records.len(), "assessments exported");
    Ok(())
}
