use serde::{Deserialize, Serialize};

use crate::scoring::{default_questions, Question, QuestionCatalog};

/// Color scheme selection for the TUI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// theme: auto
/// questions:
///   - id: 1
///     text: "Do you hug or cuddle your child every day?"
///     category: warmth
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeMode,

    /// Replaces the built-in catalog when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

impl Config {
    /// Default config with the built-in catalog written out, used by `init`
    pub fn with_builtin_questions() -> Self {
        Self {
            theme: ThemeMode::Auto,
            questions: Some(default_questions()),
        }
    }

    pub fn catalog(&self) -> QuestionCatalog {
        match &self.questions {
            Some(questions) => QuestionCatalog::new(questions.clone()),
            None => QuestionCatalog::builtin(),
        }
    }
}
