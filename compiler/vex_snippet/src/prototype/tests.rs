use super::*;

#[test]
fn test_simple_prototype() {
    let proto = parse_prototype("vector @rest;").unwrap();
    assert_eq!(proto.ty, VexType::Vector);
    assert_eq!(proto.name, "rest");
    assert!(!proto.is_array);
    assert_eq!(proto.indent, "");
}

#[test]
fn test_array_prototype() {
    let proto = parse_prototype("int @ids [ ] = {};").unwrap();
    assert_eq!(proto.ty, VexType::Int);
    assert_eq!(proto.name, "ids");
    assert!(proto.is_array);
}

#[test]
fn test_indented_prototype() {
    let proto = parse_prototype("\t  string @label;").unwrap();
    assert_eq!(proto.indent, "\t  ");
    assert_eq!(proto.placeholder(), "\t  /* prototype for label elided */");
}

#[test]
fn test_initializer_is_allowed() {
    let proto = parse_prototype("float @mass = 1.0; // default").unwrap();
    assert_eq!(proto.ty, VexType::Float);
    assert_eq!(proto.name, "mass");
}

#[test]
fn test_requires_terminator() {
    assert_eq!(parse_prototype("vector @rest"), None);
}

#[test]
fn test_requires_type_keyword() {
    assert_eq!(parse_prototype("return @x;"), None);
    assert_eq!(parse_prototype("vector3 @x;"), None);
}

#[test]
fn test_requires_whitespace_after_keyword() {
    assert_eq!(parse_prototype("int@x;"), None);
}

#[test]
fn test_requires_sigil() {
    assert_eq!(parse_prototype("int x;"), None);
}

#[test]
fn test_rejects_tagged_binding_use() {
    assert_eq!(parse_prototype("v@P = 0;"), None);
}

#[test]
fn test_rejects_invalid_name() {
    assert_eq!(parse_prototype("int @1x;"), None);
}

#[test]
fn test_rejects_unclosed_array_marker() {
    assert_eq!(parse_prototype("int @x[;"), None);
}
