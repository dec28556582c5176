//! Fixed-width ASCII table helpers and due date rendering.
//!
//! Everything here is pure string formatting; no catalog or roster types
//! are involved.

use crate::error::{Result, StandingError};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Left-aligns `text` in exactly `width` characters, truncating if longer.
pub fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

/// Right-aligns `text` in at least `width` characters. Never truncates.
pub fn right(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}

/// Divider line: `+` followed by a run of dashes per column, each closed by `+`.
pub fn divider(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(*width));
        line.push('+');
    }
    line
}

/// Data line: each cell is wrapped as `| cell ` and the line closed by `|`.
///
/// Cells must already be sized with [`fit`] or [`right`].
pub fn row(cells: &[String]) -> String {
    let mut line = String::new();
    for cell in cells {
        line.push_str("| ");
        line.push_str(cell);
        line.push(' ');
    }
    line.push('|');
    line
}

/// Renders a YYMMDD timestamp as `Mon DD, 20YY`.
///
/// ```
/// use library_standing::table::due_date;
///
/// assert_eq!(due_date(231215).unwrap(), "Dec 15, 2023");
/// ```
pub fn due_date(timestamp: i64) -> Result<String> {
    if !(0..=999_999).contains(&timestamp) {
        return Err(StandingError::InvalidDate { timestamp });
    }

    let digits = format!("{:06}", timestamp);
    let month = digits[2..4]
        .parse::<usize>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or(StandingError::InvalidDate { timestamp })?;

    Ok(format!(
        "{} {}, 20{}",
        MONTHS[month - 1],
        &digits[4..6],
        &digits[0..2]
    ))
}
