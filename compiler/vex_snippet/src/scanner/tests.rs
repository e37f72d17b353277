use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<(SpanKind, &str)> {
    split_spans(source)
        .into_iter()
        .map(|span| (span.kind, span.text))
        .collect()
}

#[test]
fn test_code_only() {
    assert_eq!(kinds("@P.y += 1;\n"), vec![(SpanKind::Code, "@P.y += 1;\n")]);
}

#[test]
fn test_empty_source() {
    assert!(split_spans("").is_empty());
}

#[test]
fn test_line_comment_excludes_newline() {
    assert_eq!(
        kinds("a = 1; // note\nb = 2;"),
        vec![
            (SpanKind::Code, "a = 1; "),
            (SpanKind::Comment, "// note"),
            (SpanKind::Code, "\nb = 2;"),
        ]
    );
}

#[test]
fn test_line_comment_at_eof() {
    assert_eq!(
        kinds("x = 1;\n// trailing"),
        vec![(SpanKind::Code, "x = 1;\n"), (SpanKind::Comment, "// trailing")]
    );
}

#[test]
fn test_block_comment_spans_lines() {
    assert_eq!(
        kinds("a;/* one\ntwo */b;"),
        vec![
            (SpanKind::Code, "a;"),
            (SpanKind::Comment, "/* one\ntwo */"),
            (SpanKind::Code, "b;"),
        ]
    );
}

#[test]
fn test_block_comment_is_not_greedy() {
    assert_eq!(
        kinds("/* a */ v@x; /* b */"),
        vec![
            (SpanKind::Comment, "/* a */"),
            (SpanKind::Code, " v@x; "),
            (SpanKind::Comment, "/* b */"),
        ]
    );
}

#[test]
fn test_unterminated_block_comment_runs_to_eof() {
    assert_eq!(
        kinds("a;\n/* open\nv@x;"),
        vec![(SpanKind::Code, "a;\n"), (SpanKind::Comment, "/* open\nv@x;")]
    );
}

#[test]
fn test_slash_star_slash_does_not_close() {
    assert_eq!(kinds("/*/ x */"), vec![(SpanKind::Comment, "/*/ x */")]);
}

#[test]
fn test_comment_markers_inside_strings() {
    assert_eq!(
        kinds(r#"s@url = "http://host/*x"; // real"#),
        vec![
            (SpanKind::Code, r#"s@url = "http://host/*x"; "#),
            (SpanKind::Comment, "// real"),
        ]
    );
}

#[test]
fn test_escaped_quote_inside_string() {
    assert_eq!(
        kinds(r#"s@a = "say \"//\""; //c"#),
        vec![
            (SpanKind::Code, r#"s@a = "say \"//\""; "#),
            (SpanKind::Comment, "//c"),
        ]
    );
}

#[test]
fn test_unterminated_string_ends_at_newline() {
    assert_eq!(
        kinds("s@a = \"open\n// comment"),
        vec![
            (SpanKind::Code, "s@a = \"open\n"),
            (SpanKind::Comment, "// comment"),
        ]
    );
}

#[test]
fn test_line_start_flags() {
    let spans = split_spans("a; // x\n/* y */ b;");
    let flags: Vec<bool> = spans.iter().map(|span| span.at_line_start).collect();
    // "a; ", "// x", "\n", "/* y */", " b;"
    assert_eq!(flags, vec![true, false, false, true, false]);
}

#[test]
fn test_newline_count() {
    let spans = split_spans("/* a\nb\nc */");
    assert_eq!(spans[0].newline_count(), 2);
}

#[test]
fn test_multibyte_text_is_preserved() {
    let source = "s@label = \"température\"; // ß\n@x = 1;";
    let joined: String = split_spans(source).iter().map(|span| span.text).collect();
    assert_eq!(joined, source);
}

mod proptest_spans {
    use super::super::split_spans;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn spans_concatenate_to_source(source in "[a-z@/*\"'\\\\\n ;]{0,64}") {
            let joined: String = split_spans(&source).iter().map(|span| span.text).collect();
            prop_assert_eq!(joined, source);
        }

        #[test]
        fn spans_are_never_empty(source in any::<String>()) {
            prop_assert!(split_spans(&source).iter().all(|span| !span.text.is_empty()));
        }
    }
}
