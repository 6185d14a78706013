use serde::{Deserialize, Serialize};
use std::fmt;

pub type QuestionId = u32;

/// Behavioral axis a question contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Warmth,
    Control,
    Support,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Warmth, Category::Control, Category::Support];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Warmth => "Warmth",
            Category::Control => "Control",
            Category::Support => "Support",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single catalog entry.
///
/// Example YAML:
/// ```yaml
/// - id: 1
///   text: "Do you hug your child every day?"
///   sub_text: "Any physical affection counts"
///   category: warmth
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_text: Option<String>,
    pub category: Category,
}

impl Question {
    pub fn new(id: QuestionId, text: &str, sub_text: Option<&str>, category: Category) -> Self {
        Self {
            id,
            text: text.to_string(),
            sub_text: sub_text.map(str::to_string),
            category,
        }
    }
}

/// Ordered, immutable question list. Its size and per-category membership
/// decide the maximum attainable score of every category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.get(id).is_some()
    }

    /// Number of questions tagged with `category`
    pub fn count(&self, category: Category) -> usize {
        self.questions
            .iter()
            .filter(|q| q.category == category)
            .count()
    }
}

impl<'a> IntoIterator for &'a QuestionCatalog {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// Built-in questionnaire: five questions per category.
pub fn default_questions() -> Vec<Question> {
    use Category::*;
    vec![
        Question::new(1, "Do you hug or cuddle your child every day?", None, Warmth),
        Question::new(
            2,
            "Do you praise your child when they do something well?",
            Some("Even small achievements count"),
            Warmth,
        ),
        Question::new(
            3,
            "Do you spend time playing or talking with your child without your phone?",
            None,
            Warmth,
        ),
        Question::new(4, "Do you tell your child that you love them?", None, Warmth),
        Question::new(
            5,
            "Do you stay calm and gentle when your child is upset?",
            None,
            Warmth,
        ),
        Question::new(
            6,
            "Does your child have fixed times for sleeping, eating and studying?",
            None,
            Control,
        ),
        Question::new(
            7,
            "Do you set clear rules and explain the reasons behind them?",
            None,
            Control,
        ),
        Question::new(
            8,
            "Do you follow through with consequences when a rule is broken?",
            Some("Without shouting or hitting"),
            Control,
        ),
        Question::new(
            9,
            "Do you limit your child's screen time?",
            None,
            Control,
        ),
        Question::new(
            10,
            "Do you know where your child is and who they are with?",
            None,
            Control,
        ),
        Question::new(
            11,
            "Do you listen to your child's problems before giving advice?",
            None,
            Support,
        ),
        Question::new(
            12,
            "Do you help your child with homework or school worries?",
            None,
            Support,
        ),
        Question::new(
            13,
            "Do you encourage your child to try again after a failure?",
            None,
            Support,
        ),
        Question::new(
            14,
            "Does your child come to you when they are scared or sad?",
            None,
            Support,
        ),
        Question::new(
            15,
            "Do you let your child make small choices on their own?",
            Some("Clothes, games, food"),
            Support,
        ),
    ]
}

impl QuestionCatalog {
    pub fn builtin() -> Self {
        Self::new(default_questions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = QuestionCatalog::builtin();
        assert_eq!(catalog.len(), 15);
        for category in Category::ALL {
            assert_eq!(catalog.count(category), 5);
        }
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = QuestionCatalog::builtin();
        let mut ids: Vec<_> = catalog.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = QuestionCatalog::builtin();
        assert_eq!(catalog.get(6).map(|q| q.category), Some(Category::Control));
        assert!(catalog.get(999).is_none());
        assert!(!catalog.contains(0));
    }

    #[test]
    fn test_question_yaml_parse() {
        let yaml = r#"
- id: 7
  text: "Do you read together?"
  category: support
- id: 8
  text: "Do you set bedtimes?"
  sub_text: "School nights"
  category: control
"#;
        let questions: Vec<Question> = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].category, Category::Support);
        assert!(questions[0].sub_text.is_none());
        assert_eq!(questions[1].sub_text.as_deref(), Some("School nights"));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let yaml = r#"
- id: 1
  text: "Anything"
  category: discipline
"#;
        let parsed: Result<Vec<Question>, _> = serde_saphyr::from_str(yaml);
        assert!(parsed.is_err());
    }
}
