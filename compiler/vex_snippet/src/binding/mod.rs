//! Attribute binding tokens.
//!
//! A binding is an optional type tag, the sigil, and a name:
//!
//! ```text
//! v@up    i[]@ids    @ptnum
//! ^ ^^    ^^^^^^^    ^^^^^^
//! tag     tag+array  untagged
//! ```
//!
//! The tag is a single word character standing at a word boundary, so in
//! `foo@bar` the `o` is not a tag and the token is just `@bar`.

use std::fmt;
use std::ops::Range;

use crate::types::{infer_type, VexType};
use crate::{is_word_char, SIGIL};

/// Why a binding was rejected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindingErrorKind {
    /// The name is not a legal VEX identifier.
    InvalidName,
    /// The type tag letter has no VEX type.
    UnknownTypeTag(char),
}

impl fmt::Display for BindingErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingErrorKind::InvalidName => write!(f, "not a valid identifier"),
            BindingErrorKind::UnknownTypeTag(tag) => write!(f, "unknown type tag `{tag}`"),
        }
    }
}

/// A binding the wrapper cannot declare as an argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("line {line}: invalid attribute binding `@{name}`: {kind}")]
pub struct BindingError {
    pub name: String,
    pub kind: BindingErrorKind,
    /// 1-based line of the offending binding.
    pub line: usize,
}

impl BindingError {
    pub fn new(name: impl Into<String>, kind: BindingErrorKind, line: usize) -> Self {
        BindingError {
            name: name.into(),
            kind,
            line,
        }
    }
}

/// One binding occurrence found by [`BindingScanner`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BindingToken<'a> {
    /// Byte range of the whole token, tag through name.
    pub range: Range<usize>,
    /// Byte offset of the sigil.
    pub sigil: usize,
    pub tag: Option<char>,
    pub is_array: bool,
    pub name: &'a str,
}

impl BindingToken<'_> {
    /// Byte range of the tag and sigil, without the name.
    pub fn head(&self) -> Range<usize> {
        self.range.start..self.sigil + SIGIL.len_utf8()
    }

    /// Check that the name is a legal identifier, ignoring the tag.
    pub fn validate_name(&self) -> Result<(), BindingErrorKind> {
        if is_identifier(self.name) {
            Ok(())
        } else {
            Err(BindingErrorKind::InvalidName)
        }
    }

    /// Validate the token and resolve its type.
    ///
    /// The explicit tag wins; untagged names go through [`infer_type`].
    pub fn resolve(&self) -> Result<VexType, BindingErrorKind> {
        self.validate_name()?;
        match self.tag {
            Some(tag) => VexType::from_tag(tag).ok_or(BindingErrorKind::UnknownTypeTag(tag)),
            None => Ok(infer_type(self.name)),
        }
    }
}

/// Whether `name` is a legal VEX identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Iterator over the bindings in a piece of text, left to right.
///
/// A sigil not followed by a word character is not a binding and is
/// skipped.
pub struct BindingScanner<'a> {
    text: &'a str,
    pos: usize,
    /// End of the previous token; a tag can never reach back past it.
    floor: usize,
    skip_strings: bool,
    quote: Option<u8>,
}

impl<'a> BindingScanner<'a> {
    /// Scan code, ignoring sigils inside string literals.
    pub fn code(text: &'a str) -> Self {
        Self::with_strings(text, true)
    }

    /// Scan every sigil, string literals included.
    ///
    /// Generated code has every sigil replaced, so remapping columns has to
    /// see the same set of boundaries.
    pub fn raw(text: &'a str) -> Self {
        Self::with_strings(text, false)
    }

    fn with_strings(text: &'a str, skip_strings: bool) -> Self {
        BindingScanner {
            text,
            pos: 0,
            floor: 0,
            skip_strings,
            quote: None,
        }
    }

    fn token_at(&self, sigil: usize) -> Option<BindingToken<'a>> {
        let after = sigil + SIGIL.len_utf8();
        let rest = &self.text[after..];
        let name_len: usize = rest
            .chars()
            .take_while(|&c| is_word_char(c))
            .map(char::len_utf8)
            .sum();
        if name_len == 0 {
            return None;
        }

        let (start, tag, is_array) = self.tag_before(sigil);
        Some(BindingToken {
            range: start..after + name_len,
            sigil,
            tag,
            is_array,
            name: &rest[..name_len],
        })
    }

    /// Find a type tag (and array marker) directly before the sigil.
    fn tag_before(&self, sigil: usize) -> (usize, Option<char>, bool) {
        let head = &self.text[self.floor..sigil];
        let (body, is_array) = match head.strip_suffix("[]") {
            Some(body) => (body, true),
            None => (head, false),
        };

        let mut chars = body.chars().rev();
        match chars.next() {
            Some(tag) if is_word_char(tag) && !chars.next().is_some_and(is_word_char) => {
                (self.floor + body.len() - tag.len_utf8(), Some(tag), is_array)
            }
            _ => (sigil, None, false),
        }
    }
}

impl<'a> Iterator for BindingScanner<'a> {
    type Item = BindingToken<'a>;

    fn next(&mut self) -> Option<BindingToken<'a>> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let byte = bytes[self.pos];
            if let Some(quote) = self.quote {
                match byte {
                    b'\\' => self.pos += 2,
                    b'\n' => {
                        self.quote = None;
                        self.pos += 1;
                    }
                    b if b == quote => {
                        self.quote = None;
                        self.pos += 1;
                    }
                    _ => self.pos += 1,
                }
                continue;
            }

            match byte {
                b'"' | b'\'' if self.skip_strings => {
                    self.quote = Some(byte);
                    self.pos += 1;
                }
                b'@' => {
                    if let Some(token) = self.token_at(self.pos) {
                        self.pos = token.range.end;
                        self.floor = token.range.end;
                        return Some(token);
                    }
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }
        None
    }
}
