//! Engine-level behavior: pass protocol, unknown tags, engine defaults,
//! macro definitions, and error propagation.

use bracken_babel::formats::{Html, PlainText};
use bracken_babel::{
    convert, convert_file, Arguments, Pass, RenderContext, RenderError, Renderer, Scope, TagKind,
};
use bracken_parser::{parse_document, Outline, ParseError};

/// A renderer that records the order of prime and render calls.
#[derive(Default)]
struct Recorder {
    calls: Vec<(&'static str, String)>,
}

impl Renderer for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn prime_tag(
        &mut self,
        kind: &TagKind,
        _args: &Arguments,
        _scope: &mut Scope,
    ) -> Result<Option<String>, RenderError> {
        self.calls.push(("prime", kind.name().to_string()));
        Ok(Some(String::new()))
    }

    fn render_tag(
        &mut self,
        kind: &TagKind,
        _args: &Arguments,
        _scope: &mut Scope,
    ) -> Result<Option<String>, RenderError> {
        self.calls.push(("render", kind.name().to_string()));
        Ok(Some(format!("[{}]", kind.name())))
    }
}

#[test]
fn test_priming_completes_before_rendering() {
    let mut recorder = Recorder::default();
    let result =
        convert(&mut recorder, "\\alpha {1} \\beta {2}", false).expect("conversion failed");
    assert_eq!(result, "[alpha] [beta]");
    assert_eq!(
        recorder.calls,
        vec![
            ("prime", "alpha".to_string()),
            ("prime", "beta".to_string()),
            ("render", "alpha".to_string()),
            ("render", "beta".to_string()),
        ]
    );
}

#[test]
fn test_unknown_tag_is_fatal_during_render() {
    let mut html = Html;
    assert_eq!(
        convert(&mut html, "\\nonexistentTag {x}", false),
        Err(RenderError::UnknownTag {
            tag: "nonexistentTag".to_string(),
            file: None,
        })
    );
}

#[test]
fn test_unknown_tag_names_the_file() {
    let mut html = Html;
    let result = convert_file(&mut html, "\\nonexistentTag {x}", false, Some("birds.brk"));
    assert_eq!(
        result,
        Err(RenderError::UnknownTag {
            tag: "nonexistentTag".to_string(),
            file: Some("birds.brk".to_string()),
        })
    );
}

#[test]
fn test_unknown_tag_is_quiet_during_priming() {
    let elements = parse_document("\\nonexistentTag {x}").expect("parse failed");
    let mut ctx = RenderContext::new(Outline::build(&elements));
    let mut scope = Scope::new(&mut ctx, Pass::Priming);
    let mut html = Html;
    assert_eq!(scope.parse(&mut html, &elements), Ok(String::new()));
}

#[test]
fn test_unbalanced_braces_abort_conversion() {
    let mut html = Html;
    assert_eq!(
        convert(&mut html, "before } after", false),
        Err(RenderError::Parse(ParseError::UnbalancedBraces {
            position: 7
        }))
    );
}

#[test]
fn test_missing_argument() {
    let mut html = Html;
    assert_eq!(
        convert(&mut html, "\\s", false),
        Err(RenderError::MissingArgument {
            tag: "s".to_string(),
            index: 0,
        })
    );
}

#[test]
fn test_engine_default_formal() {
    // PlainText has no formal behavior of its own; the engine supplies it.
    let mut text = PlainText;
    assert_eq!(
        convert(&mut text, "run \\formal {host}", false).as_deref(),
        Ok("run <host>")
    );
}

#[test]
fn test_engine_default_nospell() {
    let mut html = Html;
    assert_eq!(
        convert(&mut html, "\\nospell {Kraa}", false).as_deref(),
        Ok("Kraa")
    );
}

#[test]
fn test_engine_default_ignore_flattens() {
    let mut html = Html;
    assert_eq!(
        convert(&mut html, "\\ignore {a \\b {x} z}", false).as_deref(),
        Ok("a  z")
    );
}

#[test]
fn test_define_and_expand() {
    let mut html = Html;
    assert_eq!(
        convert(
            &mut html,
            "\\define {wing} {\\e {\\arg {0}}} \\wing {feather}",
            false,
        )
        .as_deref(),
        Ok(" <i>feather</i>")
    );
}

#[test]
fn test_macro_arguments_are_positional() {
    let mut html = Html;
    assert_eq!(
        convert(
            &mut html,
            "\\define {pair} {\\arg {1} / \\arg {0}} \\pair {a} {b}",
            false,
        )
        .as_deref(),
        Ok(" b / a")
    );
}

#[test]
fn test_self_referential_macro_hits_depth_limit() {
    let mut html = Html;
    assert_eq!(
        convert(&mut html, "\\define {loop} {\\loop {}} \\loop {}", false),
        Err(RenderError::TooDeep)
    );
}

#[test]
fn test_empty_block_renders_nothing() {
    let mut html = Html;
    assert_eq!(convert(&mut html, "\\block {}", false).as_deref(), Ok(""));
}
