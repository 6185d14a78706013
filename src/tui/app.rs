use crate::assessment::AssessmentRecord;
use crate::flow::{Flow, Step};
use crate::scoring::Question;
use crate::tui::theme::ThemeColors;
use std::time::Instant;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    Name,
    Age,
    Phone,
}

impl PersonalField {
    pub const ALL: [PersonalField; 3] = [Self::Name, Self::Age, Self::Phone];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Your name",
            Self::Age => "Your age",
            Self::Phone => "Phone number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildField {
    Count,
    Child1Age,
    Child2Age,
    SchoolPerformance,
}

impl ChildField {
    pub const ALL: [ChildField; 4] = [
        Self::Count,
        Self::Child1Age,
        Self::Child2Age,
        Self::SchoolPerformance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Count => "Number of children",
            Self::Child1Age => "First child's age",
            Self::Child2Age => "Second child's age",
            Self::SchoolPerformance => "School performance (1-10)",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Child1Age | Self::Child2Age)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Info,
    Success,
    Error,
}

pub struct App {
    pub flow: Flow,
    pub colors: ThemeColors,
    pub personal_field: PersonalField,
    pub child_field: ChildField,
    pub selected_question: usize,
    pub table_state: ratatui::widgets::TableState,
    pub input_mode: InputMode,
    pub search_input: String,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(flow: Flow, colors: ThemeColors) -> Self {
        Self {
            flow,
            colors,
            personal_field: PersonalField::Name,
            child_field: ChildField::Count,
            selected_question: 0,
            table_state: ratatui::widgets::TableState::default(),
            input_mode: InputMode::Normal,
            search_input: String::new(),
            flash_message: None,
            should_quit: false,
        }
    }

    pub fn step(&self) -> Step {
        self.flow.step()
    }

    /// True when printable keys should go into a field instead of shortcuts
    pub fn is_text_entry(&self) -> bool {
        match self.input_mode {
            InputMode::Search => true,
            InputMode::Help => false,
            InputMode::Normal => match self.step() {
                Step::PersonalInfo => true,
                Step::ChildInfo => self.child_field.is_text(),
                _ => false,
            },
        }
    }

    fn active_text(&mut self) -> Option<&mut String> {
        if self.input_mode == InputMode::Search {
            return Some(&mut self.search_input);
        }
        match self.step() {
            Step::PersonalInfo => Some(match self.personal_field {
                PersonalField::Name => &mut self.flow.personal.name,
                PersonalField::Age => &mut self.flow.personal.age,
                PersonalField::Phone => &mut self.flow.personal.phone,
            }),
            Step::ChildInfo => match self.child_field {
                ChildField::Child1Age => Some(&mut self.flow.child.child1_age),
                ChildField::Child2Age => Some(&mut self.flow.child.child2_age),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(text) = self.active_text() {
            text.push(c);
        }
        if self.input_mode == InputMode::Search {
            self.reset_table_selection();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.active_text() {
            text.pop();
        }
        if self.input_mode == InputMode::Search {
            self.reset_table_selection();
        }
    }

    /// Child form fields in display order; the second age only with two children
    pub fn visible_child_fields(&self) -> Vec<ChildField> {
        ChildField::ALL
            .into_iter()
            .filter(|f| *f != ChildField::Child2Age || self.flow.child.count > 1)
            .collect()
    }

    /// Move focus to the next form field, wrapping around
    pub fn next_field(&mut self) {
        self.move_field(1);
    }

    pub fn previous_field(&mut self) {
        self.move_field(-1);
    }

    fn move_field(&mut self, delta: isize) {
        match self.step() {
            Step::PersonalInfo => {
                let fields = PersonalField::ALL;
                let i = fields
                    .iter()
                    .position(|f| *f == self.personal_field)
                    .unwrap_or(0);
                self.personal_field = fields[wrap(i, delta, fields.len())];
            }
            Step::ChildInfo => {
                let fields = self.visible_child_fields();
                let i = fields
                    .iter()
                    .position(|f| *f == self.child_field)
                    .unwrap_or(0);
                self.child_field = fields[wrap(i, delta, fields.len())];
            }
            _ => {}
        }
    }

    /// Left/Right on the child count or school rating
    pub fn adjust(&mut self, delta: i8) {
        if self.step() != Step::ChildInfo {
            return;
        }
        match self.child_field {
            ChildField::Count => {
                self.flow.child.toggle_count();
            }
            ChildField::SchoolPerformance => {
                self.flow.child.adjust_school_performance(delta);
            }
            _ => {}
        }
    }

    /// Enter: advance the current step if its requirements are met
    pub fn confirm(&mut self) {
        let result = match self.step() {
            Step::Welcome => self.flow.start(),
            Step::PersonalInfo => self.flow.submit_personal(),
            Step::ChildInfo => self.flow.submit_child().map(|_| {
                self.selected_question = 0;
            }),
            Step::Survey => self.flow.finish_survey().map(|record| {
                tracing::debug!(id = %record.id, "results ready");
            }),
            Step::Results | Step::Dashboard => return,
        };

        match result {
            Ok(()) => {
                self.personal_field = PersonalField::Name;
                self.child_field = ChildField::Count;
                if self.step() == Step::Results {
                    self.show_flash("Assessment saved to dashboard".to_string(), FlashKind::Success);
                }
            }
            Err(blocked) => self.show_flash(blocked.to_string(), FlashKind::Error),
        }
    }

    /// Esc: leave the dashboard, or step back through the form
    pub fn go_back(&mut self) {
        if self.step() == Step::Dashboard {
            self.flow.close_dashboard();
        } else {
            self.flow.back();
        }
    }

    pub fn open_dashboard(&mut self) {
        self.flow.open_dashboard();
        self.search_input.clear();
        self.reset_table_selection();
    }

    pub fn restart(&mut self) {
        self.flow.restart();
        self.selected_question = 0;
        self.personal_field = PersonalField::Name;
        self.child_field = ChildField::Count;
        self.show_flash("Starting a new assessment".to_string(), FlashKind::Info);
    }

    pub fn questions(&self) -> &[Question] {
        self.flow.catalog().questions()
    }

    pub fn selected_question(&self) -> Option<&Question> {
        self.questions().get(self.selected_question)
    }

    pub fn next_question(&mut self) {
        let len = self.questions().len();
        if len > 0 {
            self.selected_question = wrap(self.selected_question, 1, len);
        }
    }

    pub fn previous_question(&mut self) {
        let len = self.questions().len();
        if len > 0 {
            self.selected_question = wrap(self.selected_question, -1, len);
        }
    }

    /// Answer the highlighted question and move to the next unanswered one
    pub fn answer_selected(&mut self, value: u8) {
        let Some(id) = self.selected_question().map(|q| q.id) else {
            return;
        };
        if let Err(blocked) = self.flow.answer(id, value) {
            self.show_flash(blocked.to_string(), FlashKind::Error);
            return;
        }

        let len = self.questions().len();
        let answers = self.flow.answers();
        let next_open = (1..=len)
            .map(|offset| (self.selected_question + offset) % len)
            .find(|&i| !answers.is_answered(self.questions()[i].id));
        match next_open {
            Some(i) => self.selected_question = i,
            None => {
                self.show_flash(
                    "All questions answered. Press Enter to see your result".to_string(),
                    FlashKind::Success,
                );
            }
        }
    }

    /// Records shown on the dashboard, filtered by the search box
    pub fn dashboard_records(&self) -> Vec<&AssessmentRecord> {
        self.flow.store().search(&self.search_input)
    }

    fn reset_table_selection(&mut self) {
        let selected = if self.dashboard_records().is_empty() {
            None
        } else {
            Some(0)
        };
        self.table_state.select(selected);
    }

    pub fn next_row(&mut self) {
        let len = self.dashboard_records().len();
        if len == 0 {
            return;
        }
        let i = self.table_state.selected().map_or(0, |i| wrap(i, 1, len));
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.dashboard_records().len();
        if len == 0 {
            return;
        }
        let i = self.table_state.selected().map_or(0, |i| wrap(i, -1, len));
        self.table_state.select(Some(i));
    }

    pub fn start_search(&mut self) {
        if self.step() == Step::Dashboard {
            self.input_mode = InputMode::Search;
        }
    }

    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_input.clear();
        self.reset_table_selection();
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }
}

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{FixedClock, SequentialIds};
    use crate::scoring::{ParentingStyle, QuestionCatalog, ANSWER_YES};
    use chrono::Utc;

    fn app() -> App {
        let flow = Flow::with_capabilities(
            QuestionCatalog::builtin(),
            Box::new(FixedClock(Utc::now())),
            Box::new(SequentialIds::new("t")),
        );
        App::new(flow, ThemeColors::dark())
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.type_char(c);
        }
    }

    fn fill_forms(app: &mut App) {
        app.confirm();
        type_str(app, "Asha");
        app.next_field();
        type_str(app, "34");
        app.confirm();
        app.next_field();
        type_str(app, "7");
        app.confirm();
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(0, -1, 3), 2);
        assert_eq!(wrap(2, 1, 3), 0);
        assert_eq!(wrap(1, 1, 3), 2);
    }

    #[test]
    fn test_typing_fills_active_field() {
        let mut app = app();
        app.confirm();
        assert_eq!(app.step(), Step::PersonalInfo);
        assert!(app.is_text_entry());
        type_str(&mut app, "Ravx");
        app.backspace();
        app.type_char('i');
        assert_eq!(app.flow.personal.name, "Ravi");
    }

    #[test]
    fn test_blocked_confirm_shows_error() {
        let mut app = app();
        app.confirm();
        app.confirm();
        assert_eq!(app.step(), Step::PersonalInfo);
        let (msg, kind, _) = app.flash_message.clone().unwrap();
        assert_eq!(kind, FlashKind::Error);
        assert!(msg.contains("name"));
    }

    #[test]
    fn test_child2_field_hidden_for_one_child() {
        let mut app = app();
        app.confirm();
        type_str(&mut app, "Asha");
        app.next_field();
        type_str(&mut app, "34");
        app.confirm();
        assert_eq!(app.step(), Step::ChildInfo);

        app.next_field();
        app.next_field();
        assert_eq!(app.child_field, ChildField::SchoolPerformance);
        app.adjust(1);
        assert_eq!(app.flow.child.school_performance, 6);

        app.next_field(); // wraps to Count
        app.adjust(1);
        assert_eq!(app.flow.child.count, 2);
        app.next_field();
        app.next_field();
        assert_eq!(app.child_field, ChildField::Child2Age);
    }

    #[test]
    fn test_answering_advances_to_next_open_question() {
        let mut app = app();
        fill_forms(&mut app);
        assert_eq!(app.step(), Step::Survey);

        app.selected_question = 2;
        app.answer_selected(ANSWER_YES);
        assert_eq!(app.selected_question, 3);

        app.selected_question = 14;
        app.answer_selected(ANSWER_YES);
        // wraps to the first unanswered
        assert_eq!(app.selected_question, 0);
    }

    #[test]
    fn test_full_survey_reaches_results() {
        let mut app = app();
        fill_forms(&mut app);
        for _ in 0..app.questions().len() {
            app.answer_selected(ANSWER_YES);
        }
        assert!(app.flow.is_complete());
        app.confirm();
        assert_eq!(app.step(), Step::Results);
        let (record, _) = app.flow.last_result().unwrap();
        assert_eq!(record.style, ParentingStyle::Authoritative);
    }

    #[test]
    fn test_dashboard_search() {
        let mut app = app();
        fill_forms(&mut app);
        for _ in 0..app.questions().len() {
            app.answer_selected(ANSWER_YES);
        }
        app.confirm();
        app.open_dashboard();
        assert_eq!(app.table_state.selected(), Some(0));

        app.start_search();
        assert!(app.is_text_entry());
        type_str(&mut app, "zz");
        assert!(app.dashboard_records().is_empty());
        assert_eq!(app.table_state.selected(), None);
        app.cancel_search();
        assert_eq!(app.dashboard_records().len(), 1);

        app.go_back();
        assert_eq!(app.step(), Step::Results);
    }
}
