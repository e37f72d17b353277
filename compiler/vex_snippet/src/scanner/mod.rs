//! Comment-aware span scanner.
//!
//! Splits source text into alternating code and comment spans without
//! allocating copies of the text. The scanner is a four-state machine:
//!
//! ```text
//!            "//"                    "\n"
//!   Code ───────────► LineComment ───────────► Code
//!    │ ▲   "/*"                      "*/"
//!    │ └──────────── BlockComment ◄───────────  (from Code)
//!    │  quote
//!    └────────────► Str(quote) ── quote | "\n" ──► Code
//! ```
//!
//! String literals stay inside code spans; the `Str` state only exists so
//! that `//` or `/*` inside a string never opens a comment.
//!
//! All transitions happen on ASCII bytes, so span boundaries always fall on
//! UTF-8 character boundaries.

/// What a [`SourceSpan`] contains.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SpanKind {
    /// Code, including any string literals.
    Code,
    /// A `//` line comment (without its newline) or a `/* */` block comment.
    Comment,
}

/// A contiguous slice of the source classified by [`split_spans`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SourceSpan<'a> {
    pub kind: SpanKind,
    pub text: &'a str,
    /// Whether the span begins at the start of a physical line.
    pub at_line_start: bool,
}

impl SourceSpan<'_> {
    /// Number of newlines inside the span.
    pub fn newline_count(&self) -> usize {
        self.text.bytes().filter(|&b| b == b'\n').count()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum State {
    Code,
    Str(u8),
    LineComment,
    BlockComment,
}

impl State {
    fn span_kind(self) -> SpanKind {
        match self {
            State::Code | State::Str(_) => SpanKind::Code,
            State::LineComment | State::BlockComment => SpanKind::Comment,
        }
    }
}

/// Accumulates spans, dropping empty ones.
struct SpanSink<'a> {
    source: &'a str,
    spans: Vec<SourceSpan<'a>>,
}

impl<'a> SpanSink<'a> {
    fn push(&mut self, kind: SpanKind, start: usize, end: usize) {
        if start == end {
            return;
        }
        let at_line_start = start == 0 || self.source.as_bytes()[start - 1] == b'\n';
        self.spans.push(SourceSpan {
            kind,
            text: &self.source[start..end],
            at_line_start,
        });
    }
}

/// Split `source` into code and comment spans.
///
/// Concatenating the `text` of every returned span reproduces `source`
/// exactly. An unterminated block comment runs to the end of the input.
pub fn split_spans(source: &str) -> Vec<SourceSpan<'_>> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut sink = SpanSink {
        source,
        spans: Vec::new(),
    };
    let mut state = State::Code;
    let mut start = 0;
    let mut pos = 0;

    while pos < len {
        let next = bytes.get(pos + 1).copied();
        match state {
            State::Code => match bytes[pos] {
                b'/' if next == Some(b'/') => {
                    sink.push(SpanKind::Code, start, pos);
                    start = pos;
                    state = State::LineComment;
                    pos += 2;
                }
                b'/' if next == Some(b'*') => {
                    sink.push(SpanKind::Code, start, pos);
                    start = pos;
                    state = State::BlockComment;
                    pos += 2;
                }
                quote @ (b'"' | b'\'') => {
                    state = State::Str(quote);
                    pos += 1;
                }
                _ => pos += 1,
            },
            State::Str(quote) => match bytes[pos] {
                b'\\' => pos += 2,
                // Unterminated literals end with the line.
                b'\n' => {
                    state = State::Code;
                    pos += 1;
                }
                b if b == quote => {
                    state = State::Code;
                    pos += 1;
                }
                _ => pos += 1,
            },
            State::LineComment => {
                if bytes[pos] == b'\n' {
                    sink.push(SpanKind::Comment, start, pos);
                    start = pos;
                    state = State::Code;
                } else {
                    pos += 1;
                }
            }
            State::BlockComment => {
                if bytes[pos] == b'*' && next == Some(b'/') {
                    pos += 2;
                    sink.push(SpanKind::Comment, start, pos);
                    start = pos;
                    state = State::Code;
                } else {
                    pos += 1;
                }
            }
        }
    }

    sink.push(state.span_kind(), start, len);
    sink.spans
}

#[cfg(test)]
mod tests;
