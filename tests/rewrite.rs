use inlay::{rewrite, slot_line, util, PendingEdit, SourceFile, SyntaxDescriptor};
use similar_asserts::assert_eq;
use std::fs::write;
use syn::visit::Visit;
use tempfile::tempdir;

fn parse_fixture(source: &str) -> SourceFile {
    let tempdir = tempdir().unwrap();
    let path = tempdir.path().join("fixture.rs");
    write(&path, source).unwrap();
    SourceFile::parse(&path).unwrap()
}

fn recorded(actual: &str, line: usize, column: usize, offset: usize) -> PendingEdit {
    PendingEdit {
        expected: None,
        actual: actual.to_owned(),
        was_recording: false,
        descriptor: SyntaxDescriptor {
            trailing_closure_offset: offset,
            ..SyntaxDescriptor::default()
        },
        function_name: String::from("assert"),
        line,
        column,
    }
}

/// The string literals of `source`, in source order.
fn literal_values(source: &str) -> Vec<String> {
    struct Literals(Vec<String>);

    impl<'ast> Visit<'ast> for Literals {
        fn visit_lit_str(&mut self, lit_str: &'ast syn::LitStr) {
            self.0.push(lit_str.value());
        }
    }

    let file = syn::parse_file(source).unwrap();
    let mut literals = Literals(Vec::new());
    literals.visit_file(&file);
    literals.0
}

#[test]
fn a_missing_snapshot_is_appended_as_a_bare_closure() {
    let source_file = parse_fixture("fn test() { assert(of(\"hi\")); }\n");

    let rewritten = rewrite(&source_file, vec![recorded("hi", 1, 12, 0)]).unwrap();

    assert_eq!(
        rewritten,
        r#"fn test() { assert(of("hi"), || {
    r"
    hi
    "
}); }
"#
    );
}

#[test]
fn a_matching_snapshot_rewrites_to_the_identical_text() {
    let source_file = parse_fixture(
        r#"fn test() { assert(of("hi"), || {
    r"
    hi
    "
}); }
"#,
    );
    let mut edit = recorded("hi", 1, 12, 0);
    edit.expected = Some(String::from("hi"));

    let rewritten = rewrite(&source_file, vec![edit]).unwrap();

    assert_eq!(rewritten, source_file.contents());
}

#[test]
fn record_mode_replaces_an_existing_closure() {
    let source_file = parse_fixture(
        r#"fn test() {
    assert(of("hi"), || {
        r"
        hello
        "
    });
}
"#,
    );
    let mut edit = recorded("hi", 2, 4, 0);
    edit.expected = Some(String::from("hello"));
    edit.was_recording = true;

    let rewritten = rewrite(&source_file, vec![edit]).unwrap();

    assert_eq!(
        rewritten,
        r#"fn test() {
    assert(of("hi"), || {
        r"
        hi
        "
    });
}
"#
    );
}

#[test]
fn two_edits_at_one_call_fill_slots_in_offset_order() {
    let source_file = parse_fixture("fn test() { check(req()); }\n");

    // Recorded out of order; the rewriter sorts by slot offset.
    let rewritten = rewrite(
        &source_file,
        vec![recorded("200 OK", 1, 12, 1), recorded("GET /", 1, 12, 0)],
    )
    .unwrap();

    assert_eq!(
        rewritten,
        r#"fn test() { check(req(), || {
    r"
    GET /
    "
}, matches(|| {
    r"
    200 OK
    "
})); }
"#
    );
}

#[test]
fn payloads_with_quotes_and_backslashes_round_trip() {
    let payload = "\"\"\"\n\\foo\n\"\"\"";
    let source_file = parse_fixture("fn test() { assert(of(docs())); }\n");

    let rewritten = rewrite(&source_file, vec![recorded(payload, 1, 12, 0)]).unwrap();

    assert_eq!(
        rewritten,
        r###"fn test() { assert(of(docs()), || {
    r#"
    """
    \foo
    """
    "#
}); }
"###
    );

    // The synthesized literal re-parses to exactly the payload.
    let literals = literal_values(&rewritten);
    assert_eq!(literals.len(), 1);
    assert_eq!(util::normalize_inline(&literals[0]), payload);
}

#[test]
fn deep_pound_runs_widen_the_delimiter() {
    let payload = "quote \"## run";
    let source_file = parse_fixture("fn test() { assert(of(docs())); }\n");

    let rewritten = rewrite(&source_file, vec![recorded(payload, 1, 12, 0)]).unwrap();

    assert!(rewritten.contains("r###\""), "{rewritten}");
    let literals = literal_values(&rewritten);
    assert_eq!(util::normalize_inline(&literals[0]), payload);
}

#[test]
fn synthesis_follows_the_file_indent() {
    let source_file = parse_fixture("fn test() {\n  assert(of(\"hi\"));\n}\n");

    let rewritten = rewrite(&source_file, vec![recorded("hi", 2, 2, 0)]).unwrap();

    assert_eq!(
        rewritten,
        "fn test() {\n  assert(of(\"hi\"), || {\n    r\"\n    hi\n    \"\n  });\n}\n"
    );
}

#[test]
fn recording_then_rerunning_is_idempotent() {
    let source_file = parse_fixture("fn test() { assert(of(\"hi\")); }\n");
    let first = rewrite(&source_file, vec![recorded("hi", 1, 12, 0)]).unwrap();

    // On the next run the surface reads the recorded value back out of the
    // literal, so the edit carries `expected == actual` and changes nothing.
    let literals = literal_values(&first);
    let mut edit = recorded("hi", 1, 12, 0);
    edit.expected = Some(util::normalize_inline(literals.last().unwrap()));

    let second_file = parse_fixture(&first);
    let second = rewrite(&second_file, vec![edit]).unwrap();

    assert_eq!(second, first);
}

#[test]
fn the_rewriter_and_the_locator_agree_on_the_slot() {
    let source_file = parse_fixture("fn test() {\n    assert(of(\"hi\"));\n}\n");
    let rewritten = rewrite(&source_file, vec![recorded("hi", 2, 4, 0)]).unwrap();

    let rewritten_file = parse_fixture(&rewritten);
    let line = slot_line(&rewritten_file, 2, 4, &SyntaxDescriptor::default());

    // The closure was appended on the call's own line.
    assert_eq!(line, Some(2));
}

#[test]
fn a_lone_offset_past_the_suffix_pads_and_converges() {
    let source_file = parse_fixture("fn test() { assert(of(\"hi\")); }\n");
    let first = rewrite(&source_file, vec![recorded("hi", 1, 12, 2)]).unwrap();

    assert_eq!(
        first,
        r#"fn test() { assert(of("hi"), matches(|| {}), matches(|| {}), matches(|| {
    r"
    hi
    "
})); }
"#
    );

    // The target now resolves to an existing slot, so the next run locates
    // it and a matching edit changes nothing.
    let descriptor = SyntaxDescriptor {
        trailing_closure_offset: 2,
        ..SyntaxDescriptor::default()
    };
    let second_file = parse_fixture(&first);
    assert_eq!(slot_line(&second_file, 1, 12, &descriptor), Some(1));

    let mut edit = recorded("hi", 1, 12, 2);
    edit.expected = Some(String::from("hi"));
    let second = rewrite(&second_file, vec![edit]).unwrap();
    assert_eq!(second, first);
}

#[test]
fn a_mismatched_label_gains_a_new_slot_before_it() {
    let source_file = parse_fixture("fn test() { assert(of(\"hi\"), other(|| {})); }\n");

    let rewritten = rewrite(&source_file, vec![recorded("hi", 1, 12, 0)]).unwrap();

    assert_eq!(
        rewritten,
        r#"fn test() { assert(of("hi"), matches(|| {
    r"
    hi
    "
}), other(|| {})); }
"#
    );
}

#[test]
fn a_matching_label_is_overwritten_only_in_record_mode() {
    let source = "fn test() { assert(of(\"hi\"), matches(|| {})); }\n";

    let source_file = parse_fixture(source);
    let rewritten = rewrite(&source_file, vec![recorded("hi", 1, 12, 0)]).unwrap();
    assert_eq!(rewritten, source);

    let source_file = parse_fixture(source);
    let mut edit = recorded("hi", 1, 12, 0);
    edit.was_recording = true;
    let rewritten = rewrite(&source_file, vec![edit]).unwrap();
    assert_eq!(
        rewritten,
        r#"fn test() { assert(of("hi"), matches(|| {
    r"
    hi
    "
})); }
"#
    );
}

#[test]
fn empty_payload_lines_stay_empty() {
    let source_file = parse_fixture("fn test() { assert(of(\"hi\")); }\n");

    let rewritten = rewrite(&source_file, vec![recorded("a\n\nb", 1, 12, 0)]).unwrap();

    assert_eq!(
        rewritten,
        r#"fn test() { assert(of("hi"), || {
    r"
    a

    b
    "
}); }
"#
    );
    let literals = literal_values(&rewritten);
    assert_eq!(util::normalize_inline(literals.last().unwrap()), "a\n\nb");
}
