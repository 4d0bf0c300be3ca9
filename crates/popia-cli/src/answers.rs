//! Loading answer sheets from disk.

use std::path::Path;

use anyhow::{Context, Result};
use popia_assessment::AnswerSheet;

/// Read an [`AnswerSheet`] from a `.json` file, or YAML otherwise.
pub fn load_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let sheet = if is_json {
        serde_json::from_str(&text)
            .with_context(|| format!("invalid JSON answer sheet: {}", path.display()))?
    } else if text.trim().is_empty() {
        AnswerSheet::new()
    } else {
        serde_yaml::from_str(&text)
            .with_context(|| format!("invalid YAML answer sheet: {}", path.display()))?
    };
    Ok(sheet)
}
