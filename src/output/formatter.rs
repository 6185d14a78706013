use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::assessment::AssessmentRecord;
use crate::scoring::{
    Category, CategoryScore, CategoryScoreSet, QuestionCatalog, StyleClassification,
    HIGH_THRESHOLD, RECOMMENDATIONS, RULES,
};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// "score/max (pct%)"
pub fn format_category_score(score: &CategoryScore) -> String {
    format!("{}/{} ({}%)", score.score, score.max, score.percent())
}

/// Text bar of `width` cells for a 0-100 percentage
pub fn percent_bar(percent: u32, width: usize) -> String {
    let filled = ((percent.min(100) as f64 / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Style headline plus one line per category
pub fn format_scores(
    scores: &CategoryScoreSet,
    classification: &StyleClassification,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();
    let headline = classification.style.to_string();
    if use_colors {
        lines.push(format!("{}", headline.bold()));
    } else {
        lines.push(headline);
    }
    lines.push(format!("  {}", classification.description()));
    lines.push(String::new());

    for category in Category::ALL {
        let score = scores.get(category);
        let label = format!("{:<8}", category.label());
        let bar = percent_bar(score.percent(), 20);
        let value = format_category_score(&score);
        if use_colors {
            let bar = match category {
                Category::Warmth => bar.blue().to_string(),
                Category::Control => bar.red().to_string(),
                Category::Support => bar.magenta().to_string(),
            };
            lines.push(format!("  {} {} {}", label.bold(), bar, value));
        } else {
            lines.push(format!("  {} {} {}", label, bar, value));
        }
    }

    lines.join("\n")
}

/// Full result screen for a stored assessment
pub fn format_result_summary(record: &AssessmentRecord, use_colors: bool) -> String {
    let classification = record.scores.classify();
    let mut out = format_scores(&record.scores, &classification, use_colors);

    out.push_str(&format!(
        "\n\n  Children: {}   School performance: {}/10\n",
        record.child.count, record.child.school_performance
    ));

    out.push_str("\nRecommendations\n");
    for tip in RECOMMENDATIONS.iter() {
        if use_colors {
            out.push_str(&format!("  - {}: {}\n", tip.heading.bold(), tip.body));
        } else {
            out.push_str(&format!("  - {}: {}\n", tip.heading, tip.body));
        }
    }
    out
}

/// Scores and classification as pretty JSON
pub fn format_scores_json(
    scores: &CategoryScoreSet,
    classification: &StyleClassification,
) -> Result<String> {
    let value = serde_json::json!({
        "style": classification.style,
        "title": classification.title(),
        "description": classification.description(),
        "warmth_ratio": classification.warmth_ratio,
        "control_ratio": classification.control_ratio,
        "scores": scores,
        "bar": super::charts::bar_data(scores),
        "radar": super::charts::radar_data(scores),
    });
    serde_json::to_string_pretty(&value).context("Failed to serialize scores")
}

/// Numbered catalog listing with category tags
pub fn format_catalog(catalog: &QuestionCatalog, use_colors: bool) -> String {
    if catalog.is_empty() {
        return "No questions configured.".to_string();
    }

    catalog
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let index = format!("{:>2}.", idx + 1);
            let tag = format!("[{}]", q.category.label().to_lowercase());
            let mut line = if use_colors {
                format!("{} {} {} (id {})", index.dimmed(), q.text, tag.cyan(), q.id)
            } else {
                format!("{} {} {} (id {})", index, q.text, tag, q.id)
            };
            if let Some(sub) = &q.sub_text {
                line.push_str(&format!("\n    {}", sub));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const DASHBOARD_HEADERS: [&str; 12] = [
    "Name", "Age", "Phone", "Children", "School", "Style", "W/C/S", "Warmth", "Control",
    "Support", "Date", "Time",
];

/// Admin dashboard table, newest first as given
pub fn format_dashboard_table(records: &[&AssessmentRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No assessments yet.".to_string();
    }

    // Everything but the name column has a fixed width
    let fixed = [4, 12, 10, 6, 13, 9, 7, 7, 7, 10, 5];
    let fixed_width: usize = fixed.iter().sum::<usize>() + 2 * fixed.len();
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => (width - fixed_width).min(24),
        Some(_) => 10,
        None => 24,
    };
    let mut widths = [name_width; 12];
    widths[1..].copy_from_slice(&fixed);

    let row = |cells: [String; 12]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| pad(&truncate(cell, *w), *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header = row(DASHBOARD_HEADERS.map(str::to_string));
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for record in records {
        let children = if record.child.count > 1 {
            format!("{} ({}, {})", record.child.count, record.child.child1_age, record.child.child2_age)
        } else {
            format!("{} ({})", record.child.count, record.child.child1_age)
        };
        lines.push(row([
            record.personal.name.clone(),
            record.personal.age.clone(),
            record.personal.phone.clone(),
            children,
            record.school_performance_label(),
            record.style.title().to_string(),
            record.raw_scores(),
            format!("{}%", record.scores.warmth.percent()),
            format!("{}%", record.scores.control.percent()),
            format!("{}%", record.scores.support.percent()),
            record.display_date(),
            record.display_time(),
        ]));
    }

    lines.join("\n")
}

/// Session records as a pretty JSON array, newest first
pub fn format_records_json(records: &[&AssessmentRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize assessments")
}

/// How warmth and control levels map to a style
pub fn format_style_legend(use_colors: bool) -> String {
    let mut lines = vec![format!(
        "Styles (a level is high above {:.0}%)",
        HIGH_THRESHOLD * 100.0
    )];
    for (warmth, control, style) in RULES {
        let name = style.to_string();
        let name = if use_colors {
            name.bold().to_string()
        } else {
            name
        };
        lines.push(format!(
            "  {} warmth, {} control: {}",
            warmth.label(),
            control.label(),
            name
        ));
    }
    lines.join("\n")
}
