pub mod answers;
pub mod catalog;
pub mod engine;
pub mod style;
pub mod validation;

pub use answers::{load_answers, parse_answers, score_answers, ScoreReport};
pub use catalog::{default_questions, Category, Question, QuestionCatalog, QuestionId};
pub use engine::{
    aggregate, AnswerMap, CategoryScore, CategoryScoreSet, ANSWER_NO, ANSWER_SOMETIMES,
    ANSWER_YES, MAX_ANSWER,
};
pub use style::{
    classify, Level, ParentingStyle, Recommendation, StyleClassification, HIGH_THRESHOLD,
    RECOMMENDATIONS, RULES,
};
pub use validation::{validate_answers, validate_catalog};
