//! HTML rendering fixtures.
//!
//! The canonical dispatch-correctness table: escapes, whitespace
//! normalization, tag nesting, and paragraph synthesis, all against the
//! HTML renderer with no document wrapping.

use bracken_babel::convert;
use bracken_babel::formats::Html;

fn check(source: &str, expected: &str) {
    let mut html = Html;
    assert_eq!(
        convert(&mut html, source, false).as_deref(),
        Ok(expected),
        "source: {:?}",
        source
    );
}

#[test]
fn test_plain_text() {
    check("plain text", "plain text");
}

#[test]
fn test_double_space_collapses() {
    check("plain  text", "plain text");
}

#[test]
fn test_spaces_around_text() {
    check("  plain  text  ", " plain text ");
}

#[test]
fn test_tag() {
    check("\\b{bold}", "<b>bold</b>");
}

#[test]
fn test_tag_with_space() {
    check("\\b {bold}", "<b>bold</b>");
}

#[test]
fn test_tag_with_two_spaces() {
    check("\\b  {bold}", "<b>bold</b>");
}

#[test]
fn test_tag_with_spaces_inside_parameter() {
    check("\\b {  bold  }", "<b> bold </b>");
}

#[test]
fn test_tag_with_text() {
    check("\\b {bold}text", "<b>bold</b>text");
}

#[test]
fn test_code_tag() {
    check("\\code {code}", "<pre><tt>code</tt></pre>");
}

#[test]
fn test_escaped_tag() {
    check("\\\\b \\{\\}", "\\b {}");
}

#[test]
fn test_escaped_brace_in_parameter() {
    check("\\b {\\}}", "<b>}</b>");
}

#[test]
fn test_escaped_symbols() {
    check("<&>", "&lt;&amp;&gt;");
}

#[test]
fn test_entity_is_escaped() {
    check("&nbsp;", "&amp;nbsp;");
}

#[test]
fn test_text_around_tag() {
    check("text\\b {bold}text", "text<b>bold</b>text");
}

#[test]
fn test_two_tags() {
    check("\\b{bold}\\i{italic}", "<b>bold</b><i>italic</i>");
}

#[test]
fn test_escaped_in_code() {
    check("\\code {<&>&nbsp;}", "<pre><tt>&lt;&amp;&gt;&amp;nbsp;</tt></pre>");
}

#[test]
fn test_tag_then_text_with_space() {
    check("\\b {bold} text", "<b>bold</b> text");
}

#[test]
fn test_text_around_tag_with_spaces() {
    check("text \\b {bold} text", "text <b>bold</b> text");
}

#[test]
fn test_paragraph_synthesis() {
    check(
        "\\block {a\n\nt \\m {tt} t\n\na}",
        "<p>a</p><p>t <code>tt</code> t</p><p>a</p>",
    );
}

#[test]
fn test_table_cells_are_blocks() {
    check(
        "\\table{{td}{td}}",
        "<table><tr><td><p>td</p></td><td><p>td</p></td></tr></table>",
    );
}

#[test]
fn test_inline_snapshot_sample() {
    let mut html = Html;
    let result = convert(&mut html, "\\2 {Birds} {birds}", false).expect("conversion failed");
    insta::assert_snapshot!(result, @r#"<h2 id="birds">Birds</h2>"#);
}
