use anyhow::{Context, Result};
use std::path::Path;

use super::catalog::QuestionCatalog;
use super::engine::{aggregate, AnswerMap, CategoryScoreSet};
use super::style::StyleClassification;
use super::validation::validate_answers;

/// Outcome of scoring an externally supplied answer set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub scores: CategoryScoreSet,
    pub classification: StyleClassification,
    /// Catalog questions with no answer; they score 0
    pub unanswered: usize,
}

/// Parse a YAML answer map (`{question_id: 0|1|2}`).
pub fn parse_answers(content: &str) -> Result<AnswerMap> {
    serde_saphyr::from_str(content).context("Failed to parse answers: invalid YAML")
}

/// Read and parse an answers file.
pub fn load_answers(path: &Path) -> Result<AnswerMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file at {}", path.display()))?;
    parse_answers(&content).with_context(|| format!("in {}", path.display()))
}

/// Validate answers against the catalog, then aggregate and classify.
///
/// Returns every validation error at once when the answers are unusable.
pub fn score_answers(
    catalog: &QuestionCatalog,
    answers: &AnswerMap,
) -> Result<ScoreReport, Vec<String>> {
    validate_answers(catalog, answers)?;

    let scores = aggregate(catalog, answers);
    Ok(ScoreReport {
        classification: scores.classify(),
        scores,
        unanswered: catalog.len().saturating_sub(answers.answered_count()),
    })
}
