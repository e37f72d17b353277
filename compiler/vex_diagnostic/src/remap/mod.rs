//! Mapping wrapper positions back to the snippet.
//!
//! Rows shift by the wrapper header. Columns shift wherever a binding was
//! rewritten: `v@foo` in the snippet is `_bound_foo` in the wrapper. Both
//! lines are cut at the snippet's binding boundaries into chunks of the
//! same shape,
//!
//! ```text
//! generated:  "  " | "_bound_" | "foo = 4.2;"
//! snippet:    "  " | "v@"      | "foo = 4.2;"
//! ```
//!
//! and a column is carried across by walking the two chunk lists side by
//! side.

use vex_snippet::{BindingScanner, HEADER_LINES, MARKER, SIGIL};

use crate::Columns;

/// Map a row of the wrapper to a row of the snippet.
///
/// Header rows fold onto the first line and the closing brace onto the
/// last, so the result is always a real snippet row.
pub fn remap_row(generated_row: usize, source_lines: usize) -> usize {
    generated_row
        .saturating_sub(HEADER_LINES)
        .clamp(1, source_lines.max(1))
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum ChunkKind {
    Text,
    Boundary,
}

/// Length in characters of one piece of a line.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct Chunk {
    kind: ChunkKind,
    len: usize,
}

/// Alternating text/boundary chunks; always starts and ends with text.
#[derive(Default)]
struct Chunks(Vec<Chunk>);

impl Chunks {
    fn push(&mut self, kind: ChunkKind, text: &str) {
        self.0.push(Chunk {
            kind,
            len: text.chars().count(),
        });
    }

    /// Cut `line` at each byte range in `boundaries` (ascending, disjoint).
    fn split(line: &str, boundaries: impl Iterator<Item = std::ops::Range<usize>>) -> Self {
        let mut chunks = Chunks::default();
        let mut last = 0;
        for boundary in boundaries {
            chunks.push(ChunkKind::Text, &line[last..boundary.start]);
            chunks.push(ChunkKind::Boundary, &line[boundary.clone()]);
            last = boundary.end;
        }
        chunks.push(ChunkKind::Text, &line[last..]);
        chunks
    }
}

/// Cut both lines at their matching binding boundaries.
///
/// Every binding in the snippet became a marker in the wrapper, with the
/// text in between copied unchanged. Code bindings lose their tag; sigils
/// inside strings and comments are replaced alone. A boundary is only taken
/// when the generated line really has a marker at the predicted offset, so
/// identifiers like `upper_bound_x` stay plain text.
fn aligned_chunks(generated_line: &str, source_line: &str) -> (Chunks, Chunks) {
    let mut generated = Vec::new();
    let mut source = Vec::new();
    let (mut gen_at, mut src_at) = (0, 0);

    for token in BindingScanner::raw(source_line) {
        let heads = [token.head(), token.sigil..token.sigil + SIGIL.len_utf8()];
        let Some((head, marker)) = heads.into_iter().find_map(|head| {
            let marker = gen_at + (head.start - src_at);
            generated_line
                .get(marker..)
                .is_some_and(|rest| rest.starts_with(MARKER))
                .then_some((head, marker))
        }) else {
            break;
        };
        generated.push(marker..marker + MARKER.len());
        gen_at = marker + MARKER.len();
        src_at = head.end;
        source.push(head);
    }

    (
        Chunks::split(generated_line, generated.into_iter()),
        Chunks::split(source_line, source.into_iter()),
    )
}

/// Carry the 1-based `column` of the generated line over to the snippet.
fn map_column(column: usize, generated: &Chunks, source: &Chunks) -> Option<usize> {
    let target = column.checked_sub(1)?;
    let (mut gen_offset, mut src_offset) = (0, 0);

    for (gen, src) in generated.0.iter().zip(&source.0) {
        if target < gen_offset + gen.len {
            let mapped = match gen.kind {
                ChunkKind::Text => src_offset + (target - gen_offset),
                ChunkKind::Boundary => src_offset,
            };
            return Some(mapped + 1);
        }
        gen_offset += gen.len;
        src_offset += src.len;
    }
    None
}

/// Translate `columns` reported against `generated_line` into columns of
/// `source_line`.
///
/// A column inside a marker lands on the start of the binding it replaced.
/// A range keeps its width. Columns that cannot be resolved (column 0, or
/// past the end of the line) are returned unchanged.
pub fn match_columns(columns: Columns, generated_line: &str, source_line: &str) -> Columns {
    let (generated, source) = aligned_chunks(generated_line, source_line);

    match map_column(columns.start(), &generated, &source) {
        Some(start) => {
            let width = columns.end().saturating_sub(columns.start());
            Columns::from_bounds(start, start + width)
        }
        None => columns,
    }
}
