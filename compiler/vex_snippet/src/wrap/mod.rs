//! Wrapper synthesis.
//!
//! Walks the spans of a snippet, turns prototypes and bindings into
//! arguments, and emits the wrapper function. The [`BindingTable`] is plain
//! scratch state: each step takes it by value and hands it back.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::binding::{BindingError, BindingScanner};
use crate::prototype::parse_prototype;
use crate::scanner::{split_spans, SourceSpan, SpanKind};
use crate::types::VexType;
use crate::{MARKER, SIGIL, WRAPPER_NAME};

/// A wrapper function parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Argument {
    pub ty: VexType,
    pub name: String,
    pub is_array: bool,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {SIGIL}{}", self.ty, self.name)?;
        if self.is_array {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

/// Arguments collected so far, in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    arguments: Vec<Argument>,
    bound: FxHashSet<String>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bound.contains(name)
    }

    /// Record an argument unless its name is already bound.
    ///
    /// Returns `true` when the argument was added. The first binding of a
    /// name fixes its type for the rest of the snippet.
    pub fn bind(&mut self, ty: VexType, name: &str, is_array: bool) -> bool {
        if self.bound.contains(name) {
            return false;
        }
        self.bound.insert(name.to_owned());
        self.arguments.push(Argument {
            ty,
            name: name.to_owned(),
            is_array,
        });
        true
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn into_arguments(self) -> Vec<Argument> {
        self.arguments
    }
}

/// A wrapped snippet.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Wrapped {
    /// The generated function, ready for `vcc`.
    pub text: String,
    /// The wrapper's parameters in declaration order.
    pub arguments: Vec<Argument>,
}

/// Wrap a snippet into a function whose arguments declare its bindings.
///
/// The body keeps every line of `source` in place, so generated row `r`
/// corresponds to source row `r - HEADER_LINES`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn wrap(source: &str) -> Result<Wrapped, BindingError> {
    let mut table = BindingTable::new();
    let mut body = String::with_capacity(source.len());
    let mut line = 1;

    for span in split_spans(source) {
        match span.kind {
            SpanKind::Comment => body.push_str(span.text),
            SpanKind::Code => {
                let (text, next) = rewrite_code(&span, line, table)?;
                body.push_str(&text);
                table = next;
            }
        }
        line += span.newline_count();
    }

    let arguments = table.into_arguments();
    tracing::debug!(arguments = arguments.len(), "snippet wrapped");
    let text = synthesize(&arguments, &body);
    Ok(Wrapped { text, arguments })
}

/// Rewrite one code span starting at 1-based line `first_line`.
fn rewrite_code(
    span: &SourceSpan<'_>,
    first_line: usize,
    mut table: BindingTable,
) -> Result<(String, BindingTable), BindingError> {
    let mut out = String::with_capacity(span.text.len());

    for (index, piece) in span.text.split_inclusive('\n').enumerate() {
        let (line, newline) = match piece.strip_suffix('\n') {
            Some(line) => (line, "\n"),
            None => (piece, ""),
        };

        let at_line_start = index > 0 || span.at_line_start;
        if let Some(proto) = at_line_start.then(|| parse_prototype(line)).flatten() {
            if table.bind(proto.ty, proto.name, proto.is_array) {
                tracing::trace!(name = proto.name, ty = %proto.ty, "prototype");
            }
            out.push_str(&proto.placeholder());
            if line.ends_with('\r') {
                out.push('\r');
            }
        } else {
            table = rewrite_bindings(line, first_line + index, table, &mut out)?;
        }
        out.push_str(newline);
    }

    Ok((out, table))
}

/// Strip type tags from every binding on `line`, binding unseen names.
///
/// Tags are only resolved for names not bound yet; a later tag on a bound
/// name is dropped without being looked at.
fn rewrite_bindings(
    line: &str,
    line_no: usize,
    mut table: BindingTable,
    out: &mut String,
) -> Result<BindingTable, BindingError> {
    let mut last = 0;
    for token in BindingScanner::code(line) {
        let error = |kind| BindingError::new(token.name, kind, line_no);
        token.validate_name().map_err(error)?;
        if !table.is_bound(token.name) {
            let ty = token.resolve().map_err(error)?;
            table.bind(ty, token.name, token.is_array);
            tracing::trace!(name = token.name, %ty, "binding");
        }

        out.push_str(&line[last..token.range.start]);
        out.push(SIGIL);
        out.push_str(token.name);
        last = token.range.end;
    }
    out.push_str(&line[last..]);
    Ok(table)
}

fn synthesize(arguments: &[Argument], body: &str) -> String {
    let params = arguments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    let text = format!("void {WRAPPER_NAME}({params})\n{{\n{body}\n}}\n");
    text.replace(SIGIL, MARKER)
}
