//! Step-by-step questionnaire state.
//!
//! `Flow` owns everything the session collects and moves between steps only
//! through its transition methods. A transition whose precondition fails
//! returns `Blocked` and leaves the state as it was.

use std::fmt;

use crate::assessment::{
    AssessmentRecord, AssessmentStore, ChildDetails, Clock, IdSource, PersonalDetails,
    SystemClock, TimestampIds,
};
use crate::scoring::{
    aggregate, AnswerMap, CategoryScoreSet, QuestionCatalog, QuestionId, StyleClassification,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Welcome,
    PersonalInfo,
    ChildInfo,
    Survey,
    Results,
    Dashboard,
}

/// Why a transition was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blocked {
    WrongStep { expected: Step, actual: Step },
    MissingName,
    MissingAge,
    MissingChildAge,
    UnknownQuestion(QuestionId),
    Incomplete { answered: usize, total: usize },
}

impl fmt::Display for Blocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocked::WrongStep { expected, actual } => {
                write!(f, "not available on {:?} (needs {:?})", actual, expected)
            }
            Blocked::MissingName => write!(f, "Please enter your name"),
            Blocked::MissingAge => write!(f, "Please enter your age"),
            Blocked::MissingChildAge => write!(f, "Please enter the first child's age"),
            Blocked::UnknownQuestion(id) => write!(f, "No question with id {}", id),
            Blocked::Incomplete { answered, total } => {
                write!(f, "Answer every question first ({}/{})", answered, total)
            }
        }
    }
}

impl std::error::Error for Blocked {}

pub struct Flow {
    step: Step,
    /// Step to return to when the dashboard is closed
    return_step: Step,
    pub personal: PersonalDetails,
    pub child: ChildDetails,
    answers: AnswerMap,
    catalog: QuestionCatalog,
    store: AssessmentStore,
    last_result: Option<(AssessmentRecord, StyleClassification)>,
    clock: Box<dyn Clock + Send>,
    ids: Box<dyn IdSource + Send>,
}

impl Flow {
    pub fn new(catalog: QuestionCatalog) -> Self {
        Self::with_capabilities(catalog, Box::new(SystemClock), Box::new(TimestampIds::default()))
    }

    pub fn with_capabilities(
        catalog: QuestionCatalog,
        clock: Box<dyn Clock + Send>,
        ids: Box<dyn IdSource + Send>,
    ) -> Self {
        Self {
            step: Step::Welcome,
            return_step: Step::Welcome,
            personal: PersonalDetails::default(),
            child: ChildDetails::default(),
            answers: AnswerMap::new(),
            catalog,
            store: AssessmentStore::new(),
            last_result: None,
            clock,
            ids,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn store(&self) -> &AssessmentStore {
        &self.store
    }

    /// Record and classification from the most recent `finish_survey`
    pub fn last_result(&self) -> Option<&(AssessmentRecord, StyleClassification)> {
        self.last_result.as_ref()
    }

    fn expect_step(&self, expected: Step) -> Result<(), Blocked> {
        if self.step == expected {
            Ok(())
        } else {
            Err(Blocked::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    pub fn start(&mut self) -> Result<(), Blocked> {
        self.expect_step(Step::Welcome)?;
        self.step = Step::PersonalInfo;
        Ok(())
    }

    pub fn submit_personal(&mut self) -> Result<(), Blocked> {
        self.expect_step(Step::PersonalInfo)?;
        if self.personal.name.trim().is_empty() {
            return Err(Blocked::MissingName);
        }
        if self.personal.age.trim().is_empty() {
            return Err(Blocked::MissingAge);
        }
        self.step = Step::ChildInfo;
        Ok(())
    }

    pub fn submit_child(&mut self) -> Result<(), Blocked> {
        self.expect_step(Step::ChildInfo)?;
        if !self.child.is_complete() {
            return Err(Blocked::MissingChildAge);
        }
        self.step = Step::Survey;
        Ok(())
    }

    /// One step backwards within the form steps. Returns false elsewhere.
    pub fn back(&mut self) -> bool {
        let previous = match self.step {
            Step::ChildInfo => Step::PersonalInfo,
            Step::Survey => Step::ChildInfo,
            _ => return false,
        };
        self.step = previous;
        true
    }

    pub fn answer(&mut self, id: QuestionId, value: u8) -> Result<(), Blocked> {
        self.expect_step(Step::Survey)?;
        if !self.catalog.contains(id) {
            return Err(Blocked::UnknownQuestion(id));
        }
        self.answers.set(id, value);
        Ok(())
    }

    /// (answered, total) counted from answer keys, not from scores
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.answered_count(), self.catalog.len())
    }

    pub fn is_complete(&self) -> bool {
        let (answered, total) = self.progress();
        answered == total
    }

    /// Scores for the answers collected so far
    pub fn current_scores(&self) -> CategoryScoreSet {
        aggregate(&self.catalog, &self.answers)
    }

    /// Score the survey, store the record and show results.
    pub fn finish_survey(&mut self) -> Result<&AssessmentRecord, Blocked> {
        self.expect_step(Step::Survey)?;
        let (answered, total) = self.progress();
        if answered != total {
            return Err(Blocked::Incomplete { answered, total });
        }

        let scores = self.current_scores();
        let classification = scores.classify();
        let timestamp = self.clock.now();
        let record = AssessmentRecord {
            id: self.ids.next_id(timestamp),
            timestamp,
            personal: self.personal.clone(),
            child: self.child.clone(),
            scores,
            style: classification.style,
        };
        tracing::info!(id = %record.id, style = %record.style.title(), "assessment completed");

        self.store.push(record.clone());
        self.step = Step::Results;
        let (record, _) = self.last_result.insert((record, classification));
        Ok(record)
    }

    /// Clear the form and answers and go back to the welcome screen.
    /// Stored assessments are kept.
    pub fn restart(&mut self) {
        self.personal = PersonalDetails::default();
        self.child = ChildDetails::default();
        self.answers.clear();
        self.step = Step::Welcome;
        self.return_step = Step::Welcome;
    }

    pub fn open_dashboard(&mut self) {
        if self.step != Step::Dashboard {
            self.return_step = self.step;
            self.step = Step::Dashboard;
        }
    }

    pub fn close_dashboard(&mut self) {
        if self.step == Step::Dashboard {
            self.step = self.return_step;
        }
    }
}
