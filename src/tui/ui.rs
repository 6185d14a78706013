use ratatui::prelude::*;
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Cell, Clear, Gauge, Paragraph, Row, Table, Wrap,
};

use crate::flow::Step;
use crate::output::{bar_data, radar_data};
use crate::scoring::{ANSWER_NO, ANSWER_SOMETIMES, ANSWER_YES, RECOMMENDATIONS};
use crate::tui::app::{App, ChildField, FlashKind, InputMode, PersonalField};

const ANSWER_OPTIONS: [(u8, &str); 3] = [
    (ANSWER_NO, "No"),
    (ANSWER_SOMETIMES, "Sometimes"),
    (ANSWER_YES, "Yes"),
];

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    match app.step() {
        Step::Welcome => render_welcome(frame, chunks[1], app),
        Step::PersonalInfo => render_personal(frame, chunks[1], app),
        Step::ChildInfo => render_child(frame, chunks[1], app),
        Step::Survey => render_survey(frame, chunks[1], app),
        Step::Results => render_results(frame, chunks[1], app),
        Step::Dashboard => render_dashboard(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let left = "ParentingPulse";
    let right = format!("{} saved", app.flow.store().len());
    let padding = (area.width as usize).saturating_sub(left.len() + right.len());
    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(colors.title_color).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_welcome(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let inner = centered_rect_fixed(60, 9, area);
    let lines = vec![
        Line::from(Span::styled(
            "Parenting Style Assessment",
            Style::default().fg(colors.title_color).bold(),
        )),
        Line::from(""),
        Line::from("Every parent has their own style. Let's find out how"),
        Line::from("yours is helping your child grow."),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} questions, about five minutes", app.questions().len()),
            Style::default().fg(colors.muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to start",
            Style::default().fg(colors.status_key_color).bold(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

fn field_line<'a>(label: &'a str, value: String, active: bool, app: &App) -> Vec<Line<'a>> {
    let colors = &app.colors;
    let label_style = if active {
        colors.field_active
    } else {
        Style::default().fg(colors.field_label)
    };
    let cursor = if active { "|" } else { "" };
    vec![
        Line::from(Span::styled(label, label_style)),
        Line::from(vec![
            Span::styled(if active { "> " } else { "  " }, label_style),
            Span::styled(format!("{}{}", value, cursor), Style::default().fg(colors.text)),
        ]),
        Line::from(""),
    ]
}

fn render_personal(frame: &mut Frame, area: Rect, app: &App) {
    let personal = &app.flow.personal;
    let mut lines = Vec::new();
    for field in PersonalField::ALL {
        let value = match field {
            PersonalField::Name => personal.name.clone(),
            PersonalField::Age => personal.age.clone(),
            PersonalField::Phone => personal.phone.clone(),
        };
        lines.extend(field_line(field.label(), value, app.personal_field == field, app));
    }

    let block = Block::bordered().title(" Your details ");
    let form_area = centered_rect_fixed(56, 12, area);
    frame.render_widget(Paragraph::new(lines).block(block), form_area);
}

fn render_child(frame: &mut Frame, area: Rect, app: &App) {
    let child = &app.flow.child;
    let mut lines = Vec::new();
    for field in app.visible_child_fields() {
        let value = match field {
            ChildField::Count => format!("< {} >", child.count),
            ChildField::Child1Age => child.child1_age.clone(),
            ChildField::Child2Age => child.child2_age.clone(),
            ChildField::SchoolPerformance => format!(
                "< {:>2} > {}",
                child.school_performance,
                "■".repeat(child.school_performance as usize)
            ),
        };
        lines.extend(field_line(field.label(), value, app.child_field == field, app));
    }

    let height = lines.len() as u16 + 2;
    let block = Block::bordered().title(" About your children ");
    let form_area = centered_rect_fixed(56, height, area);
    frame.render_widget(Paragraph::new(lines).block(block), form_area);
}

fn render_survey(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).split(area);

    // Progress from answered-key count
    let (answered, total) = app.flow.progress();
    let ratio = if total == 0 {
        0.0
    } else {
        answered as f64 / total as f64
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(colors.title_color).bg(colors.gauge_empty))
        .ratio(ratio)
        .label(format!("{} / {}", answered, total));
    frame.render_widget(gauge, chunks[0]);

    let answers = app.flow.answers();
    let mut lines = Vec::new();
    let mut selected_line = 0usize;
    for (idx, question) in app.questions().iter().enumerate() {
        let selected = idx == app.selected_question;
        let answer = answers.get(question.id);
        if selected {
            selected_line = lines.len();
        }

        let number_style = if answer.is_some() {
            Style::default().fg(colors.answered).bold()
        } else {
            Style::default().fg(colors.unanswered)
        };
        let text_style = if selected {
            Style::default().fg(colors.text).bold()
        } else {
            Style::default().fg(colors.text)
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, colors.field_active),
            Span::styled(format!("{:>2}. ", idx + 1), number_style),
            Span::styled(question.text.clone(), text_style),
        ]));
        if let Some(sub) = &question.sub_text {
            lines.push(Line::from(Span::styled(
                format!("      {}", sub),
                Style::default().fg(colors.muted).italic(),
            )));
        }

        let mut options = vec![Span::raw("      ")];
        for (value, label) in ANSWER_OPTIONS {
            let style = if answer == Some(value) {
                colors.option_selected
            } else {
                Style::default().fg(colors.muted)
            };
            options.push(Span::styled(format!(" {}:{} ", value, label), style));
            options.push(Span::raw(" "));
        }
        lines.push(Line::from(options));
    }

    // Keep the highlighted question in view
    let visible = chunks[1].height as usize;
    let scroll = selected_line.saturating_sub(visible / 3) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[1]);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let Some((record, classification)) = app.flow.last_result() else {
        frame.render_widget(Paragraph::new("No result yet"), area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Fill(1),
    ])
    .split(area);

    // Summary card
    let summary = vec![
        Line::from(vec![
            Span::styled("Your parenting style: ", Style::default().fg(colors.muted)),
            Span::styled(
                record.style_title(),
                Style::default().fg(colors.title_color).bold(),
            ),
        ]),
        Line::from(classification.description()),
        Line::from(Span::styled(
            format!(
                "Children: {}   School performance: {}/10",
                record.child.count, record.child.school_performance
            ),
            Style::default().fg(colors.muted),
        )),
    ];
    frame.render_widget(
        Paragraph::new(summary)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(format!(" {} ", record.personal.name))),
        chunks[0],
    );

    let charts =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(chunks[1]);

    // Raw scores: warmth and control
    let bars: Vec<Bar> = bar_data(&record.scores)
        .into_iter()
        .map(|datum| {
            Bar::default()
                .value(datum.score as u64)
                .label(Line::from(datum.category.label()))
                .text_value(format!("{}/{}", datum.score, datum.full))
                .style(Style::default().fg(colors.category_color(datum.category)))
        })
        .collect();
    let max_full = bar_data(&record.scores)
        .iter()
        .map(|d| d.full as u64)
        .max()
        .unwrap_or(1);
    let bar_chart = BarChart::default()
        .block(Block::bordered().title(" Total score "))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(max_full)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(bar_chart, charts[0]);

    // Percentages: all three axes
    let block = Block::bordered().title(" Balance (%) ");
    let inner = block.inner(charts[1]);
    frame.render_widget(block, charts[1]);
    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(2),
    ])
    .split(inner);
    for (datum, row) in radar_data(&record.scores).iter().zip(rows.iter()) {
        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(colors.category_color(datum.category))
                    .bg(colors.gauge_empty),
            )
            .percent(datum.percent.min(100) as u16)
            .label(format!("{} {}%", datum.category.label(), datum.percent));
        frame.render_widget(gauge, Rect { height: 1, ..*row });
    }

    // Recommendations
    let mut tips = Vec::new();
    for tip in RECOMMENDATIONS.iter() {
        tips.push(Line::from(vec![
            Span::styled(format!("{}: ", tip.heading), Style::default().bold()),
            Span::raw(tip.body),
        ]));
    }
    frame.render_widget(
        Paragraph::new(tips)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Recommendations ")),
        chunks[2],
    );
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = app.colors.clone();
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).split(area);

    let search_style = if app.input_mode == InputMode::Search {
        colors.field_active
    } else {
        Style::default().fg(colors.muted)
    };
    let cursor = if app.input_mode == InputMode::Search { "|" } else { "" };
    let search = Line::from(vec![
        Span::styled("Search by name: ", search_style),
        Span::raw(format!("{}{}", app.search_input, cursor)),
    ]);
    frame.render_widget(Paragraph::new(search), chunks[0]);

    let records = app.dashboard_records();
    if records.is_empty() {
        let msg = if app.flow.store().is_empty() {
            "No assessments yet. Complete a survey to see it here."
        } else {
            "No assessments match the search"
        };
        frame.render_widget(
            Paragraph::new(msg).alignment(Alignment::Center),
            chunks[1],
        );
        return;
    }

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let warmth = record.scores.warmth.percent();
            let control = record.scores.control.percent();
            let support = record.scores.support.percent();
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(record.personal.name.clone()),
                Cell::from(record.personal.age.clone()),
                Cell::from(record.personal.phone.clone()),
                Cell::from(record.child.count.to_string()),
                Cell::from(record.school_performance_label()),
                Cell::from(record.style.title()),
                Cell::from(record.raw_scores()),
                Cell::from(format!("{}%", warmth)).style(Style::default().fg(colors.level_color(warmth))),
                Cell::from(format!("{}%", control)).style(Style::default().fg(colors.level_color(control))),
                Cell::from(format!("{}%", support)).style(Style::default().fg(colors.level_color(support))),
                Cell::from(record.display_date()),
                Cell::from(record.display_time()),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(13),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "Name", "Age", "Phone", "Children", "School", "Style", "W/C/S", "Warmth",
                "Control", "Support", "Date", "Time",
            ])
            .style(colors.header_style)
            .bottom_margin(1),
        )
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, chunks[1], &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        let msg_color = match kind {
            FlashKind::Error => colors.flash_error,
            FlashKind::Success => colors.flash_success,
            FlashKind::Info => colors.text,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: Vec<(&str, &str)> = match (app.step(), &app.input_mode) {
            (_, InputMode::Search) => vec![("Enter", ":done "), ("Esc", ":clear")],
            (Step::Welcome, _) => vec![("Enter", ":start "), ("d", ":dashboard "), ("?", ":help "), ("q", ":quit")],
            (Step::PersonalInfo, _) | (Step::ChildInfo, _) => vec![
                ("Tab", ":next field "),
                ("←/→", ":adjust "),
                ("Enter", ":continue "),
                ("Esc", ":back "),
                ("Ctrl-d", ":dashboard"),
            ],
            (Step::Survey, _) => vec![
                ("j/k", ":nav "),
                ("0/1/2", ":answer "),
                ("Enter", ":result "),
                ("Esc", ":back "),
                ("d", ":dashboard "),
                ("q", ":quit"),
            ],
            (Step::Results, _) => vec![("r", ":restart "), ("d", ":dashboard "), ("q", ":quit")],
            (Step::Dashboard, _) => vec![
                ("j/k", ":nav "),
                ("/", ":search "),
                ("n", ":new assessment "),
                ("Esc", ":back "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(colors.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let colors = &app.colors;
    let popup_area = centered_rect_fixed(52, 17, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_style(colors.popup_title)
        .border_style(Style::default().fg(colors.popup_border))
        .style(Style::default().bg(colors.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(colors.status_key_color).bold();
    let entries = [
        ("Enter         ", "Continue / see result"),
        ("Tab / Down    ", "Next form field"),
        ("Left / Right  ", "Change children or rating"),
        ("j / k         ", "Move between questions"),
        ("0 1 2         ", "Answer no / sometimes / yes"),
        ("n s y         ", "Same as 0 1 2"),
        ("Esc           ", "Back"),
        ("d / Ctrl-d    ", "Dashboard"),
        ("/             ", "Search the dashboard"),
        ("r             ", "Restart from results"),
        ("n             ", "New assessment from dashboard"),
        ("q / Ctrl-c    ", "Quit"),
    ];
    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
