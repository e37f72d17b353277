//! Lexical path normalization.
//!
//! `vcc` echoes paths the way it received them, sometimes with mixed
//! separators. Paths are compared and displayed in normalized form: both `/`
//! and `\` count as separators, `.` segments vanish, `..` folds into its
//! parent where one exists, and the platform separator is used on output.
//! The filesystem is never consulted.

use std::path::MAIN_SEPARATOR_STR;

/// Split a leading drive prefix (`C:`) off `path`.
fn split_drive(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        path.split_at(2)
    } else {
        ("", path)
    }
}

/// Normalize `path` lexically.
pub fn normalize_path(path: &str) -> String {
    let (drive, rest) = split_drive(path);
    let absolute = rest.starts_with(['/', '\\']);

    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            _ => parts.push(part),
        }
    }

    let mut out = String::with_capacity(path.len());
    out.push_str(drive);
    if absolute {
        out.push_str(MAIN_SEPARATOR_STR);
    }
    out.push_str(&parts.join(MAIN_SEPARATOR_STR));
    if out.is_empty() {
        out.push('.');
    }
    out
}
