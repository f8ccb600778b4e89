//! Rendering of filtered quizzes to the terminal.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizgen_core::parser::ParseOutcome;
use quizgen_core::QuizView;

/// Print views as pretty JSON or as a table on stdout.
pub fn print_views(views: &[QuizView], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(views)?);
        return Ok(());
    }

    let mut table = Table::new();
    let mut header = vec!["#"];
    if views.iter().any(|v| v.prompt.is_some()) {
        header.push("Question");
    }
    if views.iter().any(|v| v.choices.is_some()) {
        header.push("Options");
    }
    if views.iter().any(|v| v.answer.is_some()) {
        header.push("Answer");
    }
    let show_prompt = header.contains(&"Question");
    let show_choices = header.contains(&"Options");
    let show_answer = header.contains(&"Answer");
    table.set_header(header);

    for (i, view) in views.iter().enumerate() {
        let mut row = vec![Cell::new(i + 1)];
        if show_prompt {
            row.push(Cell::new(view.prompt.as_deref().unwrap_or("")));
        }
        if show_choices {
            let choices = view
                .choices
                .as_deref()
                .map(|c| {
                    c.iter()
                        .enumerate()
                        .map(|(j, choice)| format!("{}) {choice}", letter(j)))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default();
            row.push(Cell::new(choices));
        }
        if show_answer {
            row.push(Cell::new(view.answer.as_deref().unwrap_or("")));
        }
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}

/// Warn on stderr about blocks the parser dropped.
pub fn report_rejections(outcome: &ParseOutcome) {
    if outcome.rejected.is_empty() {
        return;
    }
    eprintln!(
        "Warning: {} of {} question blocks could not be parsed",
        outcome.rejected_count(),
        outcome.blocks_seen()
    );
    for block in &outcome.rejected {
        eprintln!("  block {}: {}", block.index + 1, block.reason);
    }
}

fn letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
