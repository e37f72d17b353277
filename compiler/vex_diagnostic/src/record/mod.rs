//! Parsing raw `vcc` diagnostic lines.
//!
//! Grammar of one line:
//!
//! ```text
//! path[:row:columns]: severity: message
//! columns = N | N-M
//! ```
//!
//! The path is the shortest prefix that lets the rest of the line match, so
//! drive letters (`C:\...`) and colons inside paths survive. The positioned
//! form is tried before the bare form at each candidate split.

use std::fmt;

use crate::path::normalize_path;
use crate::FormatError;

/// One column or an inclusive column range, 1-based. Column 0 means the
/// tool reported none.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Columns {
    Single(usize),
    Range(usize, usize),
}

impl Default for Columns {
    fn default() -> Self {
        Columns::Single(0)
    }
}

impl Columns {
    /// Build from bounds, collapsing an empty range to a single column.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        if start == end {
            Columns::Single(start)
        } else {
            Columns::Range(start, end)
        }
    }

    pub fn start(self) -> usize {
        match self {
            Columns::Single(column) | Columns::Range(column, _) => column,
        }
    }

    pub fn end(self) -> usize {
        match self {
            Columns::Single(column) | Columns::Range(_, column) => column,
        }
    }

    /// `"column"` or `"columns"`, for report headers.
    pub fn label(self) -> &'static str {
        match self {
            Columns::Single(_) => "column",
            Columns::Range(..) => "columns",
        }
    }
}

impl fmt::Display for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Columns::Single(column) => write!(f, "{column}"),
            Columns::Range(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

/// A parsed diagnostic, positions still in the coordinates `vcc` used.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DiagnosticRecord {
    /// Normalized path.
    pub path: String,
    /// 1-based row; `None` for file-level diagnostics.
    pub row: Option<usize>,
    pub columns: Columns,
    /// Severity or category word as printed (`Error`, `Warning`, ...).
    pub severity: String,
    pub message: String,
}

impl DiagnosticRecord {
    pub fn is_error(&self) -> bool {
        self.severity.eq_ignore_ascii_case("error")
    }
}

fn parse_number(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parse `N` or `N-M`.
pub(crate) fn parse_columns(text: &str) -> Option<Columns> {
    match text.split_once('-') {
        Some((start, end)) => Some(Columns::Range(parse_number(start)?, parse_number(end)?)),
        None => parse_number(text).map(Columns::Single),
    }
}

/// Split `row:columns:` off the front of `rest`.
fn split_position(rest: &str) -> Option<(usize, Columns, &str)> {
    let (row, rest) = rest.split_once(':')?;
    let (columns, rest) = rest.split_once(':')?;
    Some((parse_number(row)?, parse_columns(columns)?, rest))
}

/// Split `<ws>severity:<ws>message`.
fn split_severity(tail: &str) -> Option<(&str, &str)> {
    let body = tail.trim_start();
    if body.len() == tail.len() {
        return None;
    }
    body.match_indices(':')
        .filter(|&(colon, _)| colon > 0)
        .find_map(|(colon, _)| {
            let after = &body[colon + 1..];
            let message = after.trim_start();
            (message.len() < after.len() && !message.is_empty()).then(|| (&body[..colon], message))
        })
}

/// Parse a single diagnostic line.
pub fn parse_line(line: &str) -> Option<DiagnosticRecord> {
    let line = line.trim_end_matches('\r');
    let record = |path: &str, row, columns, (severity, message): (&str, &str)| DiagnosticRecord {
        path: normalize_path(path),
        row,
        columns,
        severity: severity.to_owned(),
        message: message.to_owned(),
    };

    for (colon, _) in line.match_indices(':').filter(|&(colon, _)| colon > 0) {
        let path = &line[..colon];
        let rest = &line[colon + 1..];

        if let Some((row, columns, tail)) = split_position(rest) {
            if let Some(parts) = split_severity(tail) {
                return Some(record(path, Some(row), columns, parts));
            }
        }
        if let Some(parts) = split_severity(rest) {
            return Some(record(path, None, Columns::default(), parts));
        }
    }
    None
}

/// Parse every non-blank line of `output`.
///
/// Fails on the first line that is not a diagnostic; partial results are
/// never returned.
pub fn parse_output(output: &str) -> Result<Vec<DiagnosticRecord>, FormatError> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            parse_line(line).ok_or_else(|| FormatError::ParseFailure {
                line: line.to_owned(),
            })
        })
        .collect()
}
