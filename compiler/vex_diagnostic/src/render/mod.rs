//! Report block rendering.
//!
//! Each diagnostic becomes a block of three lines:
//!
//! ```text
//! File "wrangle.vfl", line 2, columns 3-6: Error: Read-only expression given for OUT argument.
//!     v@Cd = @P;
//!       ^^^^
//! ```
//!
//! The header line is also the navigation format; [`parse_report_header`]
//! reads it back.

use crate::record::parse_columns;
use crate::{Columns, DiagnosticRecord, FormatError};

/// Indentation of the excerpt and caret lines.
const EXCERPT_INDENT: &str = "    ";

/// Indentation of each reflowed overload candidate.
const CANDIDATE_INDENT: &str = "        ";

const CANDIDATES: &str = "Candidates are:";

/// Split a candidate list at top-level commas, so `f(int, int)` stays whole.
fn split_candidates(list: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (at, c) in list.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                candidates.push(list[start..at].trim());
                start = at + 1;
            }
            _ => {}
        }
    }
    candidates.push(list[start..].trim());
    candidates.retain(|candidate| !candidate.is_empty());
    candidates
}

/// Put each overload candidate of an ambiguous-call message on its own line.
///
/// Messages without a candidate list are returned unchanged.
pub fn reflow_candidates(message: &str) -> String {
    let Some(at) = message.find(CANDIDATES) else {
        return message.to_owned();
    };
    let (head, list) = message.split_at(at + CANDIDATES.len());

    let mut out = head.to_owned();
    for candidate in split_candidates(list) {
        out.push('\n');
        out.push_str(CANDIDATE_INDENT);
        out.push_str(candidate);
    }
    out
}

/// Spaces up to the first column, then one caret per covered column.
pub(crate) fn caret_line(columns: Columns) -> String {
    let start = columns.start();
    let pad = start.saturating_sub(1);
    let carets = (columns.end() + 1).saturating_sub(start.max(1)).max(1);
    format!("{}{}", " ".repeat(pad), "^".repeat(carets))
}

/// Where a positioned diagnostic points, in snippet coordinates.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct Location<'a> {
    pub path: &'a str,
    pub row: usize,
    pub columns: Columns,
}

/// Render one positioned diagnostic.
///
/// `excerpt` is the source line the diagnostic points at. When it could not
/// be read, the error is shown in its place and the caret line is dropped.
pub(crate) fn render_block(
    record: &DiagnosticRecord,
    location: &Location<'_>,
    excerpt: Result<&str, &FormatError>,
) -> String {
    let mut out = format!(
        "File \"{}\", line {}, {} {}: {}: {}\n",
        location.path,
        location.row,
        location.columns.label(),
        location.columns,
        record.severity,
        reflow_candidates(&record.message),
    );
    match excerpt {
        Ok(line) => {
            out.push_str(EXCERPT_INDENT);
            out.push_str(line.trim_end());
            out.push('\n');
            out.push_str(EXCERPT_INDENT);
            out.push_str(&caret_line(location.columns));
            out.push('\n');
        }
        Err(err) => out.push_str(&format!("{EXCERPT_INDENT}[{err}]\n")),
    }
    out
}

/// Render a diagnostic that carries no position.
pub(crate) fn render_positionless(record: &DiagnosticRecord, path: &str) -> String {
    format!(
        "File \"{path}\": {}: {}\n",
        record.severity,
        reflow_candidates(&record.message),
    )
}

/// A diagnostic location read back from a rendered report header.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ReportLocation {
    pub path: String,
    pub row: usize,
    pub columns: Columns,
    /// Everything after the columns: severity and message.
    pub text: String,
}

fn parse_header_tail(path: &str, tail: &str) -> Option<ReportLocation> {
    let (row, tail) = tail.split_once(", ")?;
    let row = row.parse().ok().filter(|_| row.bytes().all(|b| b.is_ascii_digit()))?;
    let tail = tail
        .strip_prefix("columns ")
        .or_else(|| tail.strip_prefix("column "))?;
    let (columns, text) = tail.split_once(": ")?;
    Some(ReportLocation {
        path: path.to_owned(),
        row,
        columns: parse_columns(columns)?,
        text: text.to_owned(),
    })
}

/// Parse a positioned block header back into its location.
///
/// Position-less headers and excerpt lines yield `None`.
pub fn parse_report_header(line: &str) -> Option<ReportLocation> {
    const ROW_SEPARATOR: &str = "\", line ";

    let rest = line.trim_end_matches('\r').strip_prefix("File \"")?;
    // Paths may themselves contain the separator; the last split that parses wins.
    rest.rmatch_indices(ROW_SEPARATOR)
        .map(|(at, _)| at)
        .filter(|&at| at > 0)
        .find_map(|at| parse_header_tail(&rest[..at], &rest[at + ROW_SEPARATOR.len()..]))
}
