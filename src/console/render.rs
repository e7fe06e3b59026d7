//! Plain-text column layout for the queue and help table.

use crate::{console::command::BINDINGS, state::record::MatchRecord};

/// Left-align every column to its widest cell and join cells with a space.
pub fn columns<R>(rows: &[R]) -> Vec<String>
where
    R: AsRef<[String]>,
{
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (index, cell) in row.as_ref().iter().enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(index) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    rows.iter()
        .map(|row| {
            let line = row
                .as_ref()
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            line.trim_end().to_string()
        })
        .collect()
}

/// One line per queued match: marker and identifier, both tags, and "vs".
pub fn queue_lines(queue: &[MatchRecord]) -> Vec<String> {
    let rows: Vec<[String; 4]> = queue.iter().map(MatchRecord::display_fields).collect();
    columns(&rows)
}

/// Help table listing each single-character binding in declaration order.
pub fn help_lines() -> Vec<String> {
    let rows: Vec<[String; 4]> = BINDINGS
        .iter()
        .map(|binding| {
            [
                " ".to_string(),
                binding.long.to_string(),
                format!("({})", binding.short),
                format!(" {}", binding.help),
            ]
        })
        .collect();

    let mut lines = vec!["`A` represents the match identifier.".to_string()];
    lines.extend(columns(&rows));
    lines
}
