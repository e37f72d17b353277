//! VEX types and attribute type inference.
//!
//! Two static tables drive inference: single-letter type tags (`v@`, `i@`,
//! ...) and a curated list of well-known attribute names that Houdini binds
//! with a non-float type. Both are plain read-only data.

use std::fmt;

/// The VEX types an attribute argument can have.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VexType {
    Float,
    Vector2,
    Vector,
    Vector4,
    Matrix2,
    Matrix3,
    Matrix,
    Int,
    String,
    /// Only reachable through a prototype; there is no tag letter for it.
    Dict,
}

impl VexType {
    /// Resolve a binding type tag (`f`, `u`, `v`, `p`, `2`, `3`, `4`, `i`, `s`).
    pub fn from_tag(tag: char) -> Option<VexType> {
        match tag {
            'f' => Some(VexType::Float),
            'u' => Some(VexType::Vector2),
            'v' => Some(VexType::Vector),
            'p' => Some(VexType::Vector4),
            '2' => Some(VexType::Matrix2),
            '3' => Some(VexType::Matrix3),
            '4' => Some(VexType::Matrix),
            'i' => Some(VexType::Int),
            's' => Some(VexType::String),
            _ => None,
        }
    }

    /// Resolve a type keyword as written in a prototype declaration.
    pub fn from_keyword(keyword: &str) -> Option<VexType> {
        match keyword {
            "float" => Some(VexType::Float),
            "vector2" => Some(VexType::Vector2),
            "vector" => Some(VexType::Vector),
            "vector4" => Some(VexType::Vector4),
            "matrix2" => Some(VexType::Matrix2),
            "matrix3" => Some(VexType::Matrix3),
            "matrix" => Some(VexType::Matrix),
            "int" => Some(VexType::Int),
            "string" => Some(VexType::String),
            "dict" => Some(VexType::Dict),
            _ => None,
        }
    }

    /// The VEX keyword for this type.
    pub fn keyword(self) -> &'static str {
        match self {
            VexType::Float => "float",
            VexType::Vector2 => "vector2",
            VexType::Vector => "vector",
            VexType::Vector4 => "vector4",
            VexType::Matrix2 => "matrix2",
            VexType::Matrix3 => "matrix3",
            VexType::Matrix => "matrix",
            VexType::Int => "int",
            VexType::String => "string",
            VexType::Dict => "dict",
        }
    }
}

impl fmt::Display for VexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Attributes Houdini binds with a known non-float type.
///
/// Sorted by byte order for binary search.
const KNOWN_ATTRIBUTES: &[(&str, VexType)] = &[
    ("Cd", VexType::Vector),
    ("N", VexType::Vector),
    ("P", VexType::Vector),
    ("accel", VexType::Vector),
    ("backtrack", VexType::Vector4),
    ("center", VexType::Vector),
    ("dPdx", VexType::Vector),
    ("dPdy", VexType::Vector),
    ("dPdz", VexType::Vector),
    ("force", VexType::Vector),
    ("id", VexType::Int),
    ("instance", VexType::String),
    ("ix", VexType::Int),
    ("iy", VexType::Int),
    ("iz", VexType::Int),
    ("name", VexType::String),
    ("nextid", VexType::Int),
    ("numprim", VexType::Int),
    ("numpt", VexType::Int),
    ("numvtx", VexType::Int),
    ("orient", VexType::Vector4),
    ("primnum", VexType::Int),
    ("pstate", VexType::Int),
    ("ptnum", VexType::Int),
    ("rest", VexType::Vector),
    ("resx", VexType::Int),
    ("resy", VexType::Int),
    ("resz", VexType::Int),
    ("rot", VexType::Vector4),
    ("scale", VexType::Vector),
    ("torque", VexType::Vector),
    ("up", VexType::Vector),
    ("uv", VexType::Vector),
    ("v", VexType::Vector),
    ("vtxnum", VexType::Int),
];

/// Names starting with this prefix are group membership tests.
pub const GROUP_PREFIX: &str = "group_";

/// Leading word of an input marker like `opinput1_`.
pub const INPUT_MARKER: &str = "opinput";

/// Look up a name in the curated attribute table.
pub fn known_attribute(name: &str) -> Option<VexType> {
    KNOWN_ATTRIBUTES
        .binary_search_by(|(known, _)| known.cmp(&name))
        .ok()
        .map(|index| KNOWN_ATTRIBUTES[index].1)
}

/// Strip a leading `opinput<digits>_` marker, returning the attribute name
/// it refers to on the other input.
pub fn strip_input_marker(name: &str) -> Option<&str> {
    let rest = name.strip_prefix(INPUT_MARKER)?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    rest[digits..].strip_prefix('_')
}

/// Infer the type of an untagged binding from its name.
///
/// Precedence: curated table (looked up without any input marker), then the
/// group prefix (`int`), then the input marker (`string`), then `float`.
pub fn infer_type(name: &str) -> VexType {
    let local = strip_input_marker(name);
    if let Some(ty) = known_attribute(local.unwrap_or(name)) {
        return ty;
    }
    if name.starts_with(GROUP_PREFIX) {
        return VexType::Int;
    }
    if local.is_some() {
        return VexType::String;
    }
    VexType::Float
}
