//! Snippet wrapping for VEX wrangle code.
//!
//! Wrangle snippets reference attributes through bindings like `v@P` or
//! `@ptnum` without ever declaring them. `vcc` only accepts whole functions,
//! so before a snippet can be checked it is wrapped into one:
//!
//! ```text
//! v@up = {0, 1, 0};             void __vex_snippet(vector _bound_up; float _bound_mass)
//! @mass *= 2;           ──►     {
//!                               _bound_up = {0, 1, 0};
//!                               _bound_mass *= 2;
//!                               }
//! ```
//!
//! Every binding becomes an argument whose type comes from the explicit type
//! tag, a prototype declaration, or the name heuristics in [`types`]. The body
//! keeps the snippet's line structure so that diagnostics against the wrapper
//! can be mapped back with [`HEADER_LINES`] and the boundaries reported by
//! [`BindingScanner`].
//!
//! # Pipeline
//!
//! ```text
//! source ──► split_spans() ──► code/comment spans
//!                                   │
//!                                   ▼
//!              prototypes ──► BindingTable ◄── BindingScanner
//!                                   │
//!                                   ▼
//!                            wrap() ──► Wrapped
//! ```

pub mod binding;
pub mod prototype;
pub mod scanner;
pub mod types;
mod wrap;

pub use binding::{BindingError, BindingErrorKind, BindingScanner, BindingToken};
pub use prototype::{parse_prototype, Prototype};
pub use scanner::{split_spans, SourceSpan, SpanKind};
pub use types::{infer_type, VexType};
pub use wrap::{wrap, Argument, BindingTable, Wrapped};

/// The character introducing an attribute binding.
pub const SIGIL: char = '@';

/// Identifier text every sigil is replaced with in generated code.
pub const MARKER: &str = "_bound_";

/// Name of the synthesized wrapper function.
pub const WRAPPER_NAME: &str = "__vex_snippet";

/// Lines emitted before the snippet body: the signature and the opening brace.
pub const HEADER_LINES: usize = 2;

/// Returns `true` for characters that may appear in an attribute name.
#[inline]
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
