//! Plain-text tables for terminal output.

use std::collections::BTreeMap;
use std::fmt::Write;

use irl_core::{EvalResult, Leaderboard};

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            // rank and label left aligned, scores right aligned
            if i <= 1 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn render_table(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

pub fn render_leaderboard(board: &Leaderboard, title: &str) -> String {
    let mut out = String::new();
    if !title.is_empty() {
        let _ = writeln!(out, "{title}\n");
    }
    if board.rows.is_empty() {
        out.push_str("no runs submitted yet\n");
        return out;
    }

    let mut header = vec!["#".to_string(), "Run".to_string()];
    header.extend(board.measures.iter().enumerate().map(|(i, m)| {
        if i == board.sort_index {
            format!("{m}*")
        } else {
            m.clone()
        }
    }));

    let rows = board
        .rows
        .iter()
        .enumerate()
        .map(|(rank, row)| {
            let mut cells = vec![(rank + 1).to_string(), row.label.clone()];
            cells.extend(row.measures.iter().map(|v| format!("{v:.4}")));
            cells
        })
        .collect();

    out.push_str(&render_table(header, rows));
    out
}

pub fn render_runs(team: &str, runs: &BTreeMap<String, EvalResult>) -> String {
    if runs.is_empty() {
        return format!("team {team} has no stored runs\n");
    }

    let rows = runs
        .iter()
        .flat_map(|(run_id, result)| {
            result
                .aggregate()
                .into_iter()
                .flatten()
                .map(move |(measure, value)| {
                    vec![run_id.clone(), measure.clone(), format!("{value:.4}")]
                })
        })
        .collect();

    render_table(
        vec!["Run".to_string(), "Measure".to_string(), "Value".to_string()],
        rows,
    )
}
