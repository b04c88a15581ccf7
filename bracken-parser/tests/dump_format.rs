//! The JSON shape of lexemes and elements is part of the tooling contract:
//! the CLI dumps pipeline stages for inspection, and downstream tools parse
//! that output.

use bracken_parser::{lex, parse_document};

#[test]
fn test_lexeme_json_shape() {
    let lexemes = lex("\\b {x}");
    let json = serde_json::to_string(&lexemes).expect("serialization failed");
    assert_eq!(
        json,
        "[{\"kind\":{\"kind\":\"tag_name\",\"content\":\"b\"},\"position\":3},\
         {\"kind\":{\"kind\":\"param_begin\"},\"position\":3},\
         {\"kind\":{\"kind\":\"text\",\"content\":\"x\"},\"position\":5},\
         {\"kind\":{\"kind\":\"param_end\"},\"position\":5}]"
    );
}

#[test]
fn test_element_json_shape() {
    let elements = parse_document("\\b {x}").expect("parse failed");
    let json = serde_json::to_string(&elements).expect("serialization failed");
    assert_eq!(
        json,
        "[{\"Tag\":{\"id\":\"b\",\"parameters\":[[{\"Text\":\"x\"}]]}}]"
    );
}
