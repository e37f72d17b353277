//! Attribute prototype declarations.
//!
//! A prototype states an attribute's type up front instead of tagging each
//! use:
//!
//! ```text
//! vector @rest;
//! int @ids[] = {};
//! ```
//!
//! Recognized only at the start of a line (after indentation) and only when
//! the rest of the line contains a statement terminator.

use crate::binding::is_identifier;
use crate::is_word_char;
use crate::types::VexType;

/// A prototype declaration line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Prototype<'a> {
    pub ty: VexType,
    pub name: &'a str,
    pub is_array: bool,
    /// Leading whitespace of the declaration line.
    pub indent: &'a str,
}

impl Prototype<'_> {
    /// The inert comment that replaces the declaration in generated code.
    ///
    /// Keeps the indentation and stays on one line so the body keeps the
    /// snippet's line structure.
    pub fn placeholder(&self) -> String {
        format!("{}/* prototype for {} elided */", self.indent, self.name)
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let len: usize = text
        .chars()
        .take_while(|&c| is_word_char(c))
        .map(char::len_utf8)
        .sum();
    text.split_at(len)
}

fn skip_blanks(text: &str) -> &str {
    text.trim_start_matches([' ', '\t'])
}

/// Parse a prototype declaration occupying `line`.
///
/// Returns `None` for anything else, including declarations whose name is
/// not a legal identifier; those fall through to binding validation.
pub fn parse_prototype(line: &str) -> Option<Prototype<'_>> {
    let rest = skip_blanks(line);
    let indent = &line[..line.len() - rest.len()];

    let (keyword, rest) = split_word(rest);
    let ty = VexType::from_keyword(keyword)?;

    let after_keyword = skip_blanks(rest);
    if after_keyword.len() == rest.len() {
        // The keyword must be followed by whitespace.
        return None;
    }

    let (name, rest) = split_word(after_keyword.strip_prefix('@')?);
    if !is_identifier(name) {
        return None;
    }

    let (is_array, rest) = match skip_blanks(rest).strip_prefix('[') {
        Some(inner) => (true, skip_blanks(inner).strip_prefix(']')?),
        None => (false, rest),
    };

    if !rest.contains(';') {
        return None;
    }

    Some(Prototype {
        ty,
        name,
        is_array,
        indent,
    })
}

#[cfg(test)]
mod tests;
