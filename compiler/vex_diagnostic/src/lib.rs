//! Diagnostic normalization for `vcc` output.
//!
//! `vcc` reports problems one per line on stderr:
//!
//! ```text
//! /tmp/.tmpA1b2.vfl:4:9-12: Error: Read-only expression given for OUT argument.
//! ```
//!
//! This crate parses those lines, maps positions inside a wrapped snippet
//! back to the snippet the user edited, and renders a uniform report:
//!
//! ```text
//! File "wrangle.vfl", line 2, columns 3-6: Error: Read-only expression given for OUT argument.
//!     v@Cd = @P;
//!       ^^^^
//! ```
//!
//! Rendered headers are regular enough to be parsed back with
//! [`parse_report_header`] for click-to-navigate.

mod error;
pub mod path;
pub mod record;
pub mod remap;
pub mod render;
mod report;

pub use error::FormatError;
pub use path::normalize_path;
pub use record::{parse_line, parse_output, Columns, DiagnosticRecord};
pub use remap::{match_columns, remap_row};
pub use render::{parse_report_header, reflow_candidates, ReportLocation};
pub use report::{format_output, success_message, FormatContext, GeneratedSource};
