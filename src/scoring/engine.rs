use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::catalog::{Category, QuestionCatalog, QuestionId};
use super::style::{classify, StyleClassification};

pub const ANSWER_NO: u8 = 0;
pub const ANSWER_SOMETIMES: u8 = 1;
pub const ANSWER_YES: u8 = 2;

/// Ceiling of a single answer; each question adds this to its category max.
pub const MAX_ANSWER: u8 = ANSWER_YES;

/// Sparse answers keyed by question id.
///
/// Unanswered questions are absent, not zero. Absence and an explicit
/// `ANSWER_NO` score the same; only `answered_count` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<QuestionId, u8>);

impl AnswerMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record (or overwrite) an answer. Values are not range-checked here.
    pub fn set(&mut self, id: QuestionId, value: u8) {
        self.0.insert(id, value);
    }

    pub fn get(&self, id: QuestionId) -> Option<u8> {
        self.0.get(&id).copied()
    }

    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn answered_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, u8)> + '_ {
        self.0.iter().map(|(id, v)| (*id, *v))
    }
}

impl FromIterator<(QuestionId, u8)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, u8)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u32,
    /// Never below 1, so ratios are always defined.
    pub max: u32,
}

impl CategoryScore {
    pub fn ratio(&self) -> f64 {
        self.score as f64 / self.max as f64
    }

    /// Ratio as a whole percentage (rounded half away from zero)
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScoreSet {
    pub warmth: CategoryScore,
    pub control: CategoryScore,
    pub support: CategoryScore,
}

impl CategoryScoreSet {
    pub fn get(&self, category: Category) -> CategoryScore {
        match category {
            Category::Warmth => self.warmth,
            Category::Control => self.control,
            Category::Support => self.support,
        }
    }

    /// Four-way style from the warmth and control axes. Support is ignored.
    pub fn classify(&self) -> StyleClassification {
        classify(
            self.warmth.score,
            self.control.score,
            self.warmth.max,
            self.control.max,
        )
    }
}

/// Sum answers per category over the catalog.
///
/// Every catalog question adds `MAX_ANSWER` to its category max whether or
/// not it was answered; a missing answer contributes 0 to the score. Each max
/// is floored at 1. Answers for ids outside the catalog are ignored and
/// out-of-range values are summed as given.
pub fn aggregate(catalog: &QuestionCatalog, answers: &AnswerMap) -> CategoryScoreSet {
    // [score, max] indexed by category
    let mut totals = [[0u32; 2]; 3];

    for question in catalog {
        let value = answers.get(question.id).unwrap_or(ANSWER_NO) as u32;
        let slot = &mut totals[category_index(question.category)];
        slot[0] += value;
        slot[1] += MAX_ANSWER as u32;
    }

    let finish = |[score, max]: [u32; 2]| CategoryScore {
        score,
        max: max.max(1),
    };

    CategoryScoreSet {
        warmth: finish(totals[0]),
        control: finish(totals[1]),
        support: finish(totals[2]),
    }
}

fn category_index(category: Category) -> usize {
    match category {
        Category::Warmth => 0,
        Category::Control => 1,
        Category::Support => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::catalog::Question;
    use crate::scoring::style::ParentingStyle;
    use pretty_assertions::assert_eq;

    /// 3 warmth + 2 control questions, no support
    fn small_catalog() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            Question::new(1, "w1", None, Category::Warmth),
            Question::new(2, "w2", None, Category::Warmth),
            Question::new(3, "w3", None, Category::Warmth),
            Question::new(4, "c1", None, Category::Control),
            Question::new(5, "c2", None, Category::Control),
        ])
    }

    fn all(catalog: &QuestionCatalog, value: u8) -> AnswerMap {
        catalog.iter().map(|q| (q.id, value)).collect()
    }

    #[test]
    fn test_all_yes_is_authoritative() {
        let catalog = small_catalog();
        let scores = aggregate(&catalog, &all(&catalog, ANSWER_YES));
        assert_eq!(scores.warmth, CategoryScore { score: 6, max: 6 });
        assert_eq!(scores.control, CategoryScore { score: 4, max: 4 });
        assert_eq!(scores.classify().style, ParentingStyle::Authoritative);
    }

    #[test]
    fn test_all_no_is_uninvolved() {
        let catalog = small_catalog();
        let scores = aggregate(&catalog, &all(&catalog, ANSWER_NO));
        assert_eq!(scores.warmth.score, 0);
        assert_eq!(scores.control.score, 0);
        assert_eq!(scores.classify().style, ParentingStyle::Uninvolved);
    }

    #[test]
    fn test_empty_answers_still_compute_max() {
        let catalog = small_catalog();
        let scores = aggregate(&catalog, &AnswerMap::new());
        assert_eq!(scores.warmth, CategoryScore { score: 0, max: 6 });
        assert_eq!(scores.control, CategoryScore { score: 0, max: 4 });
        assert_eq!(scores.support, CategoryScore { score: 0, max: 1 });
        assert_eq!(scores.classify().style, ParentingStyle::Uninvolved);
    }

    #[test]
    fn test_absent_and_explicit_zero_score_identically() {
        // Documented behavior: unanswered and "no" are indistinguishable here.
        let catalog = small_catalog();
        let zeros = all(&catalog, ANSWER_NO);
        let empty = AnswerMap::new();
        assert_eq!(aggregate(&catalog, &zeros), aggregate(&catalog, &empty));
        assert_eq!(zeros.answered_count(), 5);
        assert_eq!(empty.answered_count(), 0);
    }

    #[test]
    fn test_max_floor_on_empty_catalog() {
        let scores = aggregate(&QuestionCatalog::default(), &AnswerMap::new());
        for category in Category::ALL {
            assert_eq!(scores.get(category), CategoryScore { score: 0, max: 1 });
        }
    }

    #[test]
    fn test_unknown_answer_ids_ignored() {
        let catalog = small_catalog();
        let answers: AnswerMap = [(1, 2), (99, 2)].into_iter().collect();
        let scores = aggregate(&catalog, &answers);
        assert_eq!(scores.warmth.score, 2);
        assert_eq!(scores.control.score, 0);
    }

    #[test]
    fn test_out_of_range_values_summed_as_is() {
        let catalog = small_catalog();
        let answers: AnswerMap = [(4, 7)].into_iter().collect();
        let scores = aggregate(&catalog, &answers);
        // Caller error: exceeds max, not clamped.
        assert_eq!(scores.control, CategoryScore { score: 7, max: 4 });
    }

    #[test]
    fn test_score_within_bounds_for_every_in_range_answer_set() {
        let catalog = QuestionCatalog::builtin();
        // Walk a spread of answer patterns, including partially answered maps.
        for seed in 0..243u32 {
            let answers: AnswerMap = catalog
                .iter()
                .enumerate()
                .filter_map(|(i, q)| {
                    let digit = (seed / 3u32.pow((i % 5) as u32)) % 3;
                    if (seed + i as u32) % 4 == 0 {
                        None
                    } else {
                        Some((q.id, digit as u8))
                    }
                })
                .collect();
            let scores = aggregate(&catalog, &answers);
            for category in Category::ALL {
                let s = scores.get(category);
                assert!(s.max >= 1);
                assert!(s.score <= s.max, "{:?} out of bounds for seed {}", s, seed);
            }
        }
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let catalog = QuestionCatalog::builtin();
        let answers: AnswerMap = catalog.iter().map(|q| (q.id, (q.id % 3) as u8)).collect();
        let first = aggregate(&catalog, &answers);
        let second = aggregate(&catalog, &answers);
        assert_eq!(first, second);
        assert_eq!(first.classify(), second.classify());
    }

    #[test]
    fn test_percent_rounding() {
        let s = CategoryScore { score: 2, max: 3 };
        assert_eq!(s.percent(), 67);
        let s = CategoryScore { score: 1, max: 8 };
        // 12.5 rounds away from zero
        assert_eq!(s.percent(), 13);
    }

    #[test]
    fn test_answer_map_yaml_parse() {
        let yaml = "1: 2\n2: 0\n15: 1\n";
        let answers: AnswerMap = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(answers.answered_count(), 3);
        assert_eq!(answers.get(15), Some(ANSWER_SOMETIMES));
        assert_eq!(answers.get(3), None);
    }
}
