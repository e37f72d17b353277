//! Report assembly.
//!
//! Turns the whole stderr of one `vcc` run into the text shown to the user.
//! Diagnostics against the generated wrapper are moved back onto the
//! snippet; diagnostics against any other file are shown with the line read
//! from disk.

use std::fs;
use std::path::Path;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::path::normalize_path;
use crate::record::parse_output;
use crate::remap::{match_columns, remap_row};
use crate::render::{render_block, render_positionless, Location};
use crate::{DiagnosticRecord, FormatError};

/// Heading printed above compiler output that could not be parsed.
const PARSE_FAILURE_HEADING: &str = "Could not parse compiler output for this input:";

/// Heading printed above the wrapper when it is shown.
const GENERATED_HEADING: &str = "Generated code:";

/// The wrapper that was compiled in place of a snippet.
#[derive(Copy, Clone, Debug)]
pub struct GeneratedSource<'a> {
    /// Path of the generated file as passed to `vcc`.
    pub path: &'a Path,
    /// Contents of the generated file.
    pub text: &'a str,
    /// The snippet the wrapper was generated from.
    pub original_text: &'a str,
    /// Path reported in place of the generated file.
    pub original_path: &'a Path,
}

/// Everything [`format_output`] needs besides the raw output.
#[derive(Copy, Clone, Debug, Default)]
pub struct FormatContext<'a> {
    /// Set when the compiled file was a generated wrapper.
    pub generated: Option<GeneratedSource<'a>>,
    /// Wall time of the compile, for the success message.
    pub elapsed: Duration,
    /// Append the wrapper text to reports with diagnostics.
    pub show_generated: bool,
}

/// The report for a run with no diagnostics.
pub fn success_message(elapsed: Duration) -> String {
    format!("Successfully compiled in {:.2}s", elapsed.as_secs_f64())
}

/// Lines of files read from disk, each file read at most once per report.
#[derive(Default)]
struct SourceCache {
    files: FxHashMap<String, Result<Vec<String>, String>>,
}

impl SourceCache {
    fn line(&mut self, path: &str, row: usize) -> Result<&str, FormatError> {
        let lines: &Result<Vec<String>, String> =
            self.files.entry(path.to_owned()).or_insert_with(|| {
                fs::read_to_string(path)
                    .map(|text| text.lines().map(str::to_owned).collect())
                    .map_err(|err| err.to_string())
            });

        let source_read = |reason: String| FormatError::SourceRead {
            path: path.to_owned(),
            row,
            reason,
        };
        match lines {
            Ok(lines) => row
                .checked_sub(1)
                .and_then(|index| lines.get(index))
                .map(String::as_str)
                .ok_or_else(|| source_read(format!("file has {} lines", lines.len()))),
            Err(reason) => Err(source_read(reason.clone())),
        }
    }
}

struct Formatter<'a> {
    generated: Option<GeneratedSource<'a>>,
    /// Normalized path of the generated file.
    generated_path: Option<String>,
    sources: SourceCache,
}

impl<'a> Formatter<'a> {
    fn new(generated: Option<GeneratedSource<'a>>) -> Self {
        Formatter {
            generated,
            generated_path: generated.map(|g| normalize_path(&g.path.to_string_lossy())),
            sources: SourceCache::default(),
        }
    }

    fn generated_for(&self, record: &DiagnosticRecord) -> Option<GeneratedSource<'a>> {
        self.generated
            .filter(|_| self.generated_path.as_deref() == Some(record.path.as_str()))
    }

    fn render(&mut self, record: &DiagnosticRecord) -> String {
        let generated = self.generated_for(record);
        let display_path = match generated {
            Some(g) => normalize_path(&g.original_path.to_string_lossy()),
            None => record.path.clone(),
        };

        let Some(reported_row) = record.row else {
            return render_positionless(record, &display_path);
        };

        match generated {
            Some(g) => {
                let source_lines: Vec<&str> = g.original_text.lines().collect();
                let row = remap_row(reported_row, source_lines.len());
                let source_line = source_lines.get(row - 1).copied().unwrap_or_default();
                let columns = reported_row
                    .checked_sub(1)
                    .and_then(|index| g.text.lines().nth(index))
                    .map_or(record.columns, |line| {
                        match_columns(record.columns, line, source_line)
                    });
                tracing::trace!(reported_row, row, %columns, "remapped diagnostic");

                let location = Location {
                    path: &display_path,
                    row,
                    columns,
                };
                render_block(record, &location, Ok(source_line))
            }
            None => {
                let location = Location {
                    path: &display_path,
                    row: reported_row,
                    columns: record.columns,
                };
                match self.sources.line(&record.path, reported_row) {
                    Ok(line) => render_block(record, &location, Ok(line)),
                    Err(err) => {
                        tracing::debug!(%err, "source line unavailable");
                        render_block(record, &location, Err(&err))
                    }
                }
            }
        }
    }
}

/// Turn raw `vcc` stderr into the report shown to the user.
///
/// Empty output means success. Output that does not parse is passed through
/// under a heading rather than dropped.
#[tracing::instrument(level = "debug", skip_all, fields(len = raw.len()))]
pub fn format_output(raw: &str, ctx: &FormatContext<'_>) -> String {
    if raw.trim().is_empty() {
        return success_message(ctx.elapsed);
    }

    let records = match parse_output(raw) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(%err, "compiler output not understood");
            return format!("{PARSE_FAILURE_HEADING}\n{raw}");
        }
    };
    tracing::debug!(diagnostics = records.len(), "parsed compiler output");

    let mut formatter = Formatter::new(ctx.generated);
    let blocks: Vec<String> = records.iter().map(|record| formatter.render(record)).collect();
    let mut output = blocks.join("\n");

    if ctx.show_generated {
        if let Some(generated) = ctx.generated {
            output.push('\n');
            output.push_str(GENERATED_HEADING);
            output.push('\n');
            output.push_str(generated.text);
        }
    }
    output
}
