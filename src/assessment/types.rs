use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::scoring::{CategoryScoreSet, ParentingStyle};

pub const DEFAULT_SCHOOL_PERFORMANCE: u8 = 5;
pub const MIN_SCHOOL_PERFORMANCE: u8 = 1;
pub const MAX_SCHOOL_PERFORMANCE: u8 = 10;
pub const MAX_CHILDREN: u8 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonalDetails {
    pub name: String,
    pub age: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildDetails {
    pub count: u8,
    pub child1_age: String,
    /// Only meaningful when `count` is 2
    pub child2_age: String,
    /// Self-rated, 1-10
    pub school_performance: u8,
}

impl Default for ChildDetails {
    fn default() -> Self {
        Self {
            count: 1,
            child1_age: String::new(),
            child2_age: String::new(),
            school_performance: DEFAULT_SCHOOL_PERFORMANCE,
        }
    }
}

impl ChildDetails {
    pub fn is_complete(&self) -> bool {
        !self.child1_age.trim().is_empty()
    }

    /// Flip between one and two children
    pub fn toggle_count(&mut self) {
        self.count = if self.count >= MAX_CHILDREN { 1 } else { self.count + 1 };
    }

    /// Move the school rating by `delta`, clamped to 1-10
    pub fn adjust_school_performance(&mut self, delta: i8) {
        let next = self.school_performance as i16 + delta as i16;
        self.school_performance =
            next.clamp(MIN_SCHOOL_PERFORMANCE as i16, MAX_SCHOOL_PERFORMANCE as i16) as u8;
    }
}

/// Snapshot of one completed survey. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub personal: PersonalDetails,
    pub child: ChildDetails,
    pub scores: CategoryScoreSet,
    pub style: ParentingStyle,
}

impl AssessmentRecord {
    pub fn style_title(&self) -> String {
        self.style.to_string()
    }

    /// Date in day/month/year order, local time
    pub fn display_date(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%d/%m/%Y")
            .to_string()
    }

    /// Hour and minute, local time
    pub fn display_time(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M").to_string()
    }

    /// Raw warmth / control / support scores, e.g. "8/6/9"
    pub fn raw_scores(&self) -> String {
        format!(
            "{}/{}/{}",
            self.scores.warmth.score, self.scores.control.score, self.scores.support.score
        )
    }

    /// "8/10"
    pub fn school_performance_label(&self) -> String {
        format!("{}/{}", self.child.school_performance, MAX_SCHOOL_PERFORMANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::CategoryScore;
    use chrono::TimeZone;

    fn record() -> AssessmentRecord {
        let score = |score, max| CategoryScore { score, max };
        AssessmentRecord {
            id: "1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap(),
            personal: PersonalDetails::default(),
            child: ChildDetails {
                school_performance: 8,
                ..ChildDetails::default()
            },
            scores: CategoryScoreSet {
                warmth: score(8, 10),
                control: score(6, 10),
                support: score(9, 10),
            },
            style: ParentingStyle::Permissive,
        }
    }

    #[test]
    fn test_record_labels() {
        let r = record();
        assert_eq!(r.raw_scores(), "8/6/9");
        assert_eq!(r.school_performance_label(), "8/10");
        let local = r.timestamp.with_timezone(&Local);
        assert_eq!(r.display_time(), local.format("%H:%M").to_string());
        assert_eq!(r.display_date(), local.format("%d/%m/%Y").to_string());
        assert_eq!(r.display_time().len(), 5);
    }

    #[test]
    fn test_child_defaults() {
        let child = ChildDetails::default();
        assert_eq!(child.count, 1);
        assert_eq!(child.school_performance, 5);
        assert!(!child.is_complete());
    }

    #[test]
    fn test_toggle_count_wraps() {
        let mut child = ChildDetails::default();
        child.toggle_count();
        assert_eq!(child.count, 2);
        child.toggle_count();
        assert_eq!(child.count, 1);
    }

    #[test]
    fn test_school_performance_clamped() {
        let mut child = ChildDetails::default();
        child.adjust_school_performance(20);
        assert_eq!(child.school_performance, 10);
        child.adjust_school_performance(-100);
        assert_eq!(child.school_performance, 1);
        child.adjust_school_performance(3);
        assert_eq!(child.school_performance, 4);
    }
}
