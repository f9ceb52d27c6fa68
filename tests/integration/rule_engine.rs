//! Integration tests for the rule language against manifests

use culler::error::{ApiError, RuleError, ScriptError};
use culler::manifest::Manifest;
use culler::rules::{apply_script, apply_script_text, parse_script, Pattern};

const MANIFEST: &str = "keep\th111\tfoo\nkeep\th111\tbar\nkeep\th111\tbaz\n";

#[test]
fn test_only_aliased_term_is_moved() {
    let out = apply_script_text(MANIFEST, "if \"foo\" and \"bar\" as x then move x").unwrap();
    assert_eq!(out, "keep\th111\tfoo\nmove\th111\tbar\nkeep\th111\tbaz\n");
}

#[test]
fn test_unmatched_literal_leaves_manifest_unchanged() {
    let out = apply_script_text(MANIFEST, "if \"quux\" as x then move x").unwrap();
    assert_eq!(out, MANIFEST);
}

#[test]
fn test_trailing_quote_is_a_syntax_error() {
    let err = apply_script_text(MANIFEST, "if \"quux\" as x then move x\"").unwrap_err();
    assert!(matches!(err, ApiError::Script(ScriptError::Syntax { line: 1, .. })));
}

#[test]
fn test_other_gets_the_remainder() {
    let out = apply_script_text(MANIFEST, "if \"foo\" then move other").unwrap();
    assert_eq!(out, "keep\th111\tfoo\nmove\th111\tbar\nmove\th111\tbaz\n");
}

#[test]
fn test_contradicting_instructions_produce_no_output() {
    let err = apply_script_text(
        MANIFEST,
        "if \"foo\" as x then move x\nif \"foo\" as y then keep y\n",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Rule(RuleError::ContradictoryInstructions { .. })
    ));
}

#[test]
fn test_script_with_comments_and_escapes() {
    let script = parse_script(
        "# prefer the archive copy\n\
         if \"/archive/\" as a and other then keep a and move other\n\
         \n\
         \"tab\\there\" then move\n",
    )
    .unwrap();
    assert_eq!(script.len(), 2);
    assert_eq!(
        script.instructions[1].matches[0].pattern,
        Pattern::Literal("tab\there".to_string())
    );
}

#[test]
fn test_rules_apply_per_hash_group() {
    let manifest = Manifest::parse(
        "# 2 dirs\n\
         keep\taaa\t/archive/2019/\n\
         keep\taaa\t/desktop/2019/\n\
         #\n\
         keep\tbbb\t/desktop/music/\n\
         keep\tbbb\t/phone/music/\n",
    )
    .unwrap();
    let script = parse_script("if \"/archive/\" as a and other then keep a and move other").unwrap();
    let out = apply_script(&manifest, &script).unwrap();

    // the second group has no /archive/ member, so the instruction skips it
    assert_eq!(
        out.serialize(),
        "# 2 dirs\n\
         keep\taaa\t/archive/2019/\n\
         move\taaa\t/desktop/2019/\n\
         #\n\
         keep\tbbb\t/desktop/music/\n\
         keep\tbbb\t/phone/music/\n"
    );
    assert!(out.verify_keeps().is_ok());
}

#[test]
fn test_syntax_errors_point_at_the_line() {
    let err = parse_script("\"a\" then keep\nif \"b\" as then move\n").unwrap_err();
    let ScriptError::Syntax { line, .. } = err;
    assert_eq!(line, 2);

    assert!(parse_script("if \"x\" as if then move if").is_err());
    assert!(parse_script("\"x\" then delete").is_err());
}
