//! The dispatch engine.
//!
//! Three-way polymorphism over elements: text leaves are normalized and
//! escaped, tags dispatch into the renderer keyed by [`TagKind`], and
//! element sequences are either concatenated directly or, in block context,
//! run through paragraph synthesis. The whole engine is a set of free
//! functions threaded with a [`Scope`], so renderer methods can re-enter it
//! for their sub-content without any shared mutable state.
//!
//! Macro definitions are an engine concern, not a renderer one: `\define`
//! registers a pattern, an occurrence of a defined tag captures its rendered
//! parameters and re-renders the pattern with `\arg {i}` resolving into the
//! capture list. No attempt is made to detect self-referential definitions;
//! the recursion depth limit is the backstop, and a definition that expands
//! to itself fails with [`RenderError::TooDeep`].

use bracken_parser::syntax::{collapse_spaces, PARAGRAPH_DELIMITER};
use bracken_parser::{parse_document, plain_text, serialize, Element, Outline, Tag};

use crate::context::{Pass, RenderContext};
use crate::error::RenderError;
use crate::renderer::{Arguments, Renderer, Spec};
use crate::tags::TagKind;

/// Maximum render recursion depth. Bounds tag-in-tag nesting and runaway
/// macro expansion.
pub const MAX_RENDER_DEPTH: usize = 128;

/// Handle into one traversal of one conversion.
///
/// Bundles the conversion's [`RenderContext`] with the active pass and the
/// recursion depth. Renderer methods receive a `&mut Scope` and use it to
/// recursively render their own parameters.
pub struct Scope<'a> {
    ctx: &'a mut RenderContext,
    pass: Pass,
    depth: usize,
}

impl<'a> Scope<'a> {
    pub fn new(ctx: &'a mut RenderContext, pass: Pass) -> Scope<'a> {
        Scope {
            ctx,
            pass,
            depth: 0,
        }
    }

    /// The traversal this scope belongs to.
    pub fn pass(&self) -> Pass {
        self.pass
    }

    pub fn context(&self) -> &RenderContext {
        self.ctx
    }

    pub fn context_mut(&mut self) -> &mut RenderContext {
        self.ctx
    }

    /// Render an element sequence inline, with default text handling.
    pub fn parse<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        elements: &[Element],
    ) -> Result<String, RenderError> {
        render_sequence(renderer, self, elements, false, Spec::default())
    }

    /// Render an element sequence inline with an explicit [`Spec`].
    pub fn parse_with<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        elements: &[Element],
        spec: Spec,
    ) -> Result<String, RenderError> {
        render_sequence(renderer, self, elements, false, spec)
    }

    /// Render an element sequence as block content: block tags render
    /// directly, everything between them goes through paragraph synthesis.
    pub fn parse_block<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        elements: &[Element],
    ) -> Result<String, RenderError> {
        render_sequence(renderer, self, elements, true, Spec::default())
    }

    /// Flatten a sequence to its raw text and escape it, without rendering
    /// any tags. Used for opaque values: identifiers, link targets, sizes.
    pub fn clear<R: Renderer + ?Sized>(&self, renderer: &R, elements: &[Element]) -> String {
        renderer.escape(&plain_text(elements))
    }
}

/// Convert Bracken source to the renderer's format.
///
/// With `wrap`, the document is enclosed in a synthetic `body` tag so the
/// format can emit its preamble and postamble; without it, the element
/// sequence renders bare, which is what the test fixtures use.
pub fn convert<R: Renderer + ?Sized>(
    renderer: &mut R,
    input: &str,
    wrap: bool,
) -> Result<String, RenderError> {
    convert_file(renderer, input, wrap, None)
}

/// [`convert`], with a file name to blame in error messages.
pub fn convert_file<R: Renderer + ?Sized>(
    renderer: &mut R,
    input: &str,
    wrap: bool,
    file_name: Option<&str>,
) -> Result<String, RenderError> {
    let elements = parse_document(input)?;
    let outline = Outline::build(&elements);
    let mut ctx = RenderContext::new(outline);
    ctx.file_name = file_name.map(str::to_string);

    let document = if wrap {
        vec![Element::Tag(Tag::with_parameters("body", vec![elements]))]
    } else {
        elements
    };

    renderer.init();

    // Priming pass: same tree, document order, output discarded. Guaranteed
    // to complete before rendering begins.
    let mut priming = Scope::new(&mut ctx, Pass::Priming);
    render_sequence(renderer, &mut priming, &document, false, Spec::default())?;

    let mut rendering = Scope::new(&mut ctx, Pass::Render);
    let result = render_sequence(renderer, &mut rendering, &document, false, Spec::default())?;

    renderer.finish();
    Ok(result)
}

/// Render a sequence of elements.
pub(crate) fn render_sequence<R: Renderer + ?Sized>(
    renderer: &mut R,
    scope: &mut Scope<'_>,
    elements: &[Element],
    in_block: bool,
    spec: Spec,
) -> Result<String, RenderError> {
    if scope.depth >= MAX_RENDER_DEPTH {
        return Err(RenderError::TooDeep);
    }
    scope.depth += 1;
    let result = render_sequence_inner(renderer, scope, elements, in_block, spec);
    scope.depth -= 1;
    result
}

fn render_sequence_inner<R: Renderer + ?Sized>(
    renderer: &mut R,
    scope: &mut Scope<'_>,
    elements: &[Element],
    in_block: bool,
    spec: Spec,
) -> Result<String, RenderError> {
    let mut result = String::new();

    if !in_block {
        for element in elements {
            result.push_str(&render_element(renderer, scope, element, spec)?);
        }
        return Ok(result);
    }

    // Block context: declared block tags render directly, and every run of
    // inline elements between them becomes one or more paragraphs.
    let mut inline_run: Vec<&Element> = Vec::new();
    for element in elements {
        let is_block = match element {
            Element::Tag(tag) => renderer.block_tags().contains(&tag.id.as_str()),
            _ => false,
        };
        if is_block {
            if !inline_run.is_empty() {
                result.push_str(&render_paragraphs(renderer, scope, &inline_run)?);
                inline_run.clear();
            }
            result.push_str(&render_element(renderer, scope, element, spec)?);
        } else {
            inline_run.push(element);
        }
    }
    if !inline_run.is_empty() {
        result.push_str(&render_paragraphs(renderer, scope, &inline_run)?);
    }
    Ok(result)
}

/// Paragraph synthesis: split a buffered inline run on the paragraph
/// delimiter, trim the text edges of each paragraph, and render each one as
/// a synthetic `text` tag so every format supplies its own paragraph shape.
fn render_paragraphs<R: Renderer + ?Sized>(
    renderer: &mut R,
    scope: &mut Scope<'_>,
    inline_run: &[&Element],
) -> Result<String, RenderError> {
    if inline_run.len() == 1 {
        if let Element::Text(text) = inline_run[0] {
            if text.is_empty() {
                return Ok(String::new());
            }
        }
    }

    let mut paragraphs: Vec<Vec<Element>> = Vec::new();
    let mut paragraph: Vec<Element> = Vec::new();
    for element in inline_run {
        match element {
            Element::Text(text) => {
                let mut previous = 0;
                let mut search_from = 0;
                while let Some(found) = text[search_from..].find(PARAGRAPH_DELIMITER) {
                    let delimiter = search_from + found;
                    let content = &text[previous..delimiter];
                    // Content before the first delimiter closes the open
                    // paragraph even when empty; later empty cuts are noise
                    // from a run of blank lines.
                    if !content.is_empty() || previous == 0 {
                        paragraph.push(Element::Text(content.to_string()));
                        paragraphs.push(std::mem::take(&mut paragraph));
                    }
                    previous = delimiter + PARAGRAPH_DELIMITER.len();
                    search_from = delimiter + 1;
                }
                paragraph.push(Element::Text(text[previous..].to_string()));
            }
            other => paragraph.push((*other).clone()),
        }
    }
    paragraphs.push(paragraph);

    let mut result = String::new();
    for mut paragraph in paragraphs {
        if let Some(Element::Text(first)) = paragraph.first_mut() {
            *first = first.trim_start().to_string();
        }
        if let Some(Element::Text(last)) = paragraph.last_mut() {
            *last = last.trim_end().to_string();
        }
        let text_tag = Element::Tag(Tag::with_parameters("text", vec![paragraph]));
        result.push_str(&render_element(renderer, scope, &text_tag, Spec::default())?);
    }
    Ok(result)
}

fn render_element<R: Renderer + ?Sized>(
    renderer: &mut R,
    scope: &mut Scope<'_>,
    element: &Element,
    spec: Spec,
) -> Result<String, RenderError> {
    match element {
        Element::Text(text) => Ok(render_text(renderer, text, spec)),
        Element::Symbol(symbol) => Ok(render_text(renderer, &symbol.to_string(), spec)),
        Element::Group(children) => render_sequence(renderer, scope, children, false, spec),
        Element::Tag(tag) => render_tag_element(renderer, scope, tag),
    }
}

fn render_text<R: Renderer + ?Sized>(renderer: &R, text: &str, spec: Spec) -> String {
    if spec.full_escape {
        return renderer.full_escape(&renderer.escape(text));
    }
    if spec.trim {
        renderer.escape(&collapse_spaces(text))
    } else {
        renderer.escape(text)
    }
}

fn render_tag_element<R: Renderer + ?Sized>(
    renderer: &mut R,
    scope: &mut Scope<'_>,
    tag: &Tag,
) -> Result<String, RenderError> {
    // Engine-level tags first: definitions shadow everything.
    if tag.id == "define" {
        return register_definition(scope, tag);
    }
    if tag.id == "arg" {
        return resolve_macro_argument(scope, tag);
    }
    if let Some(pattern) = scope.ctx.definition(&tag.id).map(str::to_string) {
        return expand_definition(renderer, scope, tag, &pattern);
    }

    let kind = TagKind::from_id(&tag.id);
    let args = Arguments::new(&tag.id, &tag.parameters);

    let rendered = match scope.pass {
        Pass::Priming => renderer.prime_tag(&kind, &args, scope)?,
        Pass::Render => renderer.render_tag(&kind, &args, scope)?,
    };
    if let Some(output) = rendered {
        return Ok(output);
    }

    match scope.pass {
        // Priming is optional per tag.
        Pass::Priming => Ok(String::new()),
        Pass::Render => {
            if let Some(output) = render_default(renderer, scope, &kind, &args)? {
                return Ok(output);
            }
            scope.ctx.missing_tags.insert(kind.name().to_string());
            Err(RenderError::UnknownTag {
                tag: kind.name().to_string(),
                file: scope.ctx.file_name.clone(),
            })
        }
    }
}

/// Engine-supplied defaults for the optional capabilities, used when the
/// renderer itself has no behavior for them.
fn render_default<R: Renderer + ?Sized>(
    renderer: &mut R,
    scope: &mut Scope<'_>,
    kind: &TagKind,
    args: &Arguments,
) -> Result<Option<String>, RenderError> {
    match kind {
        TagKind::Formal => {
            let content = scope.parse(renderer, args.required(0)?)?;
            Ok(Some(format!("<{}>", content)))
        }
        TagKind::Nospell => Ok(Some(scope.parse(renderer, args.required(0)?)?)),
        TagKind::Ignore => Ok(Some(scope.clear(renderer, args.required(0)?))),
        _ => Ok(None),
    }
}

fn register_definition(scope: &mut Scope<'_>, tag: &Tag) -> Result<String, RenderError> {
    let name_parameter = tag.parameters.first().ok_or(RenderError::MissingArgument {
        tag: "define".to_string(),
        index: 0,
    })?;
    let pattern_parameter = tag.parameters.get(1).ok_or(RenderError::MissingArgument {
        tag: "define".to_string(),
        index: 1,
    })?;
    let name = plain_text(name_parameter).trim().to_string();
    // The pattern is stored as source text and re-parsed at expansion time.
    let pattern = serialize(pattern_parameter);
    scope.ctx.define(name, pattern);
    Ok(String::new())
}

fn resolve_macro_argument(scope: &mut Scope<'_>, tag: &Tag) -> Result<String, RenderError> {
    let index_parameter = tag.parameters.first().ok_or(RenderError::MissingArgument {
        tag: "arg".to_string(),
        index: 0,
    })?;
    let index_text = plain_text(index_parameter).trim().to_string();
    let index: usize = index_text.parse().map_err(|_| RenderError::BadArgument {
        tag: "arg".to_string(),
        detail: format!("`{}` is not an argument index", index_text),
    })?;
    scope
        .ctx
        .frame_argument(index)
        .map(str::to_string)
        .ok_or_else(|| RenderError::BadArgument {
            tag: "arg".to_string(),
            detail: format!("no captured argument {}", index),
        })
}

fn expand_definition<R: Renderer + ?Sized>(
    renderer: &mut R,
    scope: &mut Scope<'_>,
    tag: &Tag,
    pattern: &str,
) -> Result<String, RenderError> {
    let mut captured = Vec::with_capacity(tag.parameters.len());
    for parameter in &tag.parameters {
        captured.push(render_sequence(
            renderer,
            scope,
            parameter,
            false,
            Spec::default(),
        )?);
    }
    let pattern_elements = parse_document(pattern)?;
    scope.ctx.push_frame(captured);
    let result = render_sequence(renderer, scope, &pattern_elements, false, Spec::default());
    scope.ctx.pop_frame();
    result
}
