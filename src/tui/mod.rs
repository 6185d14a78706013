pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::flow::Step;
use crate::scoring::{ANSWER_NO, ANSWER_SOMETIMES, ANSWER_YES};

/// Run the interactive questionnaire until the user quits.
///
/// Returns the app so the caller can report on the session's assessments.
pub async fn run_tui(mut app: App) -> anyhow::Result<App> {
    // Buffer log output while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(anyhow::Error::from(e));
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered log lines now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result.map(|()| app)
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global chords work in every mode
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('d') => app.open_dashboard(),
            _ => {}
        }
        return;
    }

    match app.input_mode {
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
        app::InputMode::Search => match key.code {
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Char(c) => app.type_char(c),
            _ => {}
        },
        app::InputMode::Normal => match app.step() {
            Step::PersonalInfo | Step::ChildInfo => handle_form_key(app, key),
            Step::Survey => handle_survey_key(app, key),
            Step::Welcome | Step::Results | Step::Dashboard => handle_navigation_key(app, key),
        },
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm(),
        KeyCode::Esc => app.go_back(),
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.previous_field(),
        KeyCode::Left => app.adjust(-1),
        KeyCode::Right => app.adjust(1),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) if app.is_text_entry() => app.type_char(c),
        KeyCode::Char('+') => app.adjust(1),
        KeyCode::Char('-') => app.adjust(-1),
        _ => {}
    }
}

fn handle_survey_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('0') | KeyCode::Char('n') => app.answer_selected(ANSWER_NO),
        KeyCode::Char('1') | KeyCode::Char('s') => app.answer_selected(ANSWER_SOMETIMES),
        KeyCode::Char('2') | KeyCode::Char('y') => app.answer_selected(ANSWER_YES),
        KeyCode::Char('j') | KeyCode::Down => app.next_question(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_question(),
        KeyCode::Enter => app.confirm(),
        KeyCode::Esc => app.go_back(),
        _ => handle_navigation_key(app, key),
    }
}

fn handle_navigation_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help(),
        KeyCode::Char('d') if app.step() != Step::Dashboard => app.open_dashboard(),
        KeyCode::Enter => app.confirm(),
        KeyCode::Esc => app.go_back(),
        KeyCode::Char('r') if app.step() == Step::Results => app.restart(),
        KeyCode::Char('n') if app.step() == Step::Dashboard => app.restart(),
        KeyCode::Char('j') | KeyCode::Down if app.step() == Step::Dashboard => app.next_row(),
        KeyCode::Char('k') | KeyCode::Up if app.step() == Step::Dashboard => app.previous_row(),
        KeyCode::Char('/') => app.start_search(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{FixedClock, SequentialIds};
    use crate::flow::Flow;
    use crate::scoring::{ParentingStyle, QuestionCatalog};
    use chrono::Utc;

    fn app() -> App {
        let flow = Flow::with_capabilities(
            QuestionCatalog::builtin(),
            Box::new(FixedClock(Utc::now())),
            Box::new(SequentialIds::new("k")),
        );
        App::new(flow, ThemeColors::dark())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_keys(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_keyboard_walkthrough() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        // "q" and "d" are text while a form field is focused
        type_keys(&mut app, "qd");
        assert!(!app.should_quit);
        assert_eq!(app.flow.personal.name, "qd");
        press(&mut app, KeyCode::Tab);
        type_keys(&mut app, "40");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.step(), Step::ChildInfo);

        press(&mut app, KeyCode::Down);
        type_keys(&mut app, "9");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.step(), Step::Survey);

        for _ in 0..app.questions().len() {
            press(&mut app, KeyCode::Char('n'));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.step(), Step::Results);
        assert_eq!(
            app.flow.last_result().map(|(r, _)| r.style),
            Some(ParentingStyle::Uninvolved)
        );

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.step(), Step::Welcome);
        assert_eq!(app.flow.store().len(), 1);
    }

    #[test]
    fn test_ctrl_chords() {
        let mut app = app();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(app.step(), Step::Dashboard);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.step(), Step::Welcome);
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_new_assessment_from_dashboard() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_keys(&mut app, "Asha");
        press(&mut app, KeyCode::Tab);
        type_keys(&mut app, "35");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        type_keys(&mut app, "7");
        press(&mut app, KeyCode::Enter);
        for _ in 0..app.questions().len() {
            press(&mut app, KeyCode::Char('y'));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.step(), Step::Results);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.step(), Step::Dashboard);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.step(), Step::Welcome);
        assert!(app.flow.personal.name.is_empty());
        assert!(app.flow.answers().is_empty());
        assert_eq!(app.flow.store().len(), 1);
    }

    #[test]
    fn test_new_assessment_key_after_ctrl_d() {
        let mut app = app();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(app.step(), Step::Dashboard);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.step(), Step::Welcome);
        // Welcome works as usual after the restart
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.step(), Step::PersonalInfo);
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, app::InputMode::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }
}
