use std::collections::HashSet;

use super::catalog::QuestionCatalog;
use super::engine::{AnswerMap, MAX_ANSWER};

/// Validate a question catalog at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_catalog(catalog: &QuestionCatalog) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, question) in catalog.iter().enumerate() {
        if !seen.insert(question.id) {
            errors.push(format!(
                "questions[{}].id: duplicate id {}",
                i, question.id
            ));
        }
        if question.text.trim().is_empty() {
            errors.push(format!("questions[{}].text: must not be empty", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check externally supplied answers against the catalog.
///
/// `aggregate` accepts anything; this is the caller-side contract check.
pub fn validate_answers(catalog: &QuestionCatalog, answers: &AnswerMap) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (id, value) in answers.iter() {
        if !catalog.contains(id) {
            errors.push(format!("answers[{}]: no such question", id));
        }
        if value > MAX_ANSWER {
            errors.push(format!(
                "answers[{}]: value {} out of range (0-{})",
                id, value, MAX_ANSWER
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Category, Question};

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            Question::new(1, "a", None, Category::Warmth),
            Question::new(2, "b", None, Category::Control),
        ])
    }

    #[test]
    fn test_valid_catalog() {
        assert!(validate_catalog(&catalog()).is_ok());
        assert!(validate_catalog(&QuestionCatalog::builtin()).is_ok());
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        assert!(validate_catalog(&QuestionCatalog::default()).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let catalog = QuestionCatalog::new(vec![
            Question::new(1, "a", None, Category::Warmth),
            Question::new(1, "b", None, Category::Support),
        ]);
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("questions[1].id"));
    }

    #[test]
    fn test_collects_all_catalog_errors() {
        let catalog = QuestionCatalog::new(vec![
            Question::new(1, "  ", None, Category::Warmth),
            Question::new(1, "", None, Category::Support),
        ]);
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_valid_answers() {
        let answers: AnswerMap = [(1, 0), (2, 2)].into_iter().collect();
        assert!(validate_answers(&catalog(), &answers).is_ok());
        assert!(validate_answers(&catalog(), &AnswerMap::new()).is_ok());
    }

    #[test]
    fn test_out_of_range_answer() {
        let answers: AnswerMap = [(1, 3)].into_iter().collect();
        let errors = validate_answers(&catalog(), &answers).unwrap_err();
        assert!(errors[0].contains("out of range"));
    }

    #[test]
    fn test_unknown_question() {
        let answers: AnswerMap = [(42, 1), (43, 9)].into_iter().collect();
        let errors = validate_answers(&catalog(), &answers).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("answers[42]"));
    }
}
