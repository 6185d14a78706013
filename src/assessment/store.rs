use super::types::AssessmentRecord;

/// In-memory assessment history, newest first. Records are only ever added.
#[derive(Debug, Clone, Default)]
pub struct AssessmentStore {
    records: Vec<AssessmentRecord>,
}

impl AssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front so iteration order is newest-first
    pub fn push(&mut self, record: AssessmentRecord) {
        self.records.insert(0, record);
    }

    pub fn records(&self) -> &[AssessmentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssessmentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&AssessmentRecord> {
        self.records.first()
    }

    /// Case-insensitive substring match on the parent's name.
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&AssessmentRecord> {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| needle.is_empty() || r.personal.name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{ChildDetails, PersonalDetails};
    use crate::scoring::{aggregate, AnswerMap, ParentingStyle, QuestionCatalog};
    use chrono::Utc;

    fn record(id: &str, name: &str) -> AssessmentRecord {
        let scores = aggregate(&QuestionCatalog::builtin(), &AnswerMap::new());
        AssessmentRecord {
            id: id.to_string(),
            timestamp: Utc::now(),
            personal: PersonalDetails {
                name: name.to_string(),
                age: "30".to_string(),
                phone: String::new(),
            },
            child: ChildDetails::default(),
            scores,
            style: ParentingStyle::Uninvolved,
        }
    }

    #[test]
    fn test_newest_first() {
        let mut store = AssessmentStore::new();
        store.push(record("1", "Asha"));
        store.push(record("2", "Ravi"));
        store.push(record("3", "Meera"));

        let ids: Vec<_> = store.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(store.latest().map(|r| r.id.as_str()), Some("3"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_empty_store() {
        let store = AssessmentStore::new();
        assert!(store.is_empty());
        assert!(store.latest().is_none());
        assert!(store.search("anyone").is_empty());
    }

    #[test]
    fn test_search_case_insensitive() {
        let mut store = AssessmentStore::new();
        store.push(record("1", "Asha Verma"));
        store.push(record("2", "Ravi Kumar"));
        store.push(record("3", "Ashok"));

        let found: Vec<_> = store.search("ASH").iter().map(|r| r.id.clone()).collect();
        assert_eq!(found, vec!["3", "1"]);
        assert_eq!(store.search("kumar").len(), 1);
        assert_eq!(store.search("  ").len(), 3);
        assert!(store.search("zzz").is_empty());
    }
}
