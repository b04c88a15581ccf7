//! Outline tree builder
//!
//! Scans the top-level element sequence for header tags (`\1`..`\6`) and
//! assembles the nesting tree used for tables of contents and section
//! numbering. Nesting is derived purely from the level numbers: a header
//! attaches as a child of the lowest open ancestor whose level is smaller,
//! so skipped levels (a `\3` directly after a `\1`) still nest correctly.
//!
//! The tree is stored as an arena: child links are owning vectors of node
//! indices and the parent link is a plain non-owning index, which sidesteps
//! ownership cycles. Index 0 is a synthetic level-0 root with no tag; it is
//! never a real header and exists only to own the forest. The tree is
//! written once during construction and read-only afterwards.

use serde::Serialize;

use crate::ast::{plain_text, Element, Tag};

/// Handle to a node inside an [`Outline`].
pub type NodeId = usize;

/// The header nesting tree of one document.
#[derive(Debug, Clone, Serialize)]
pub struct Outline {
    nodes: Vec<OutlineNode>,
}

/// One outline node. The root (id 0) carries no tag.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineNode {
    /// The header tag, `None` for the synthetic root.
    pub tag: Option<Tag>,
    /// Header level; 0 for the root.
    pub level: u8,
    /// Parent node index; `None` for the root.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Position among the parent's children.
    pub sibling_index: usize,
}

impl Outline {
    /// Build the outline from a top-level element sequence.
    ///
    /// Does not recurse into tag parameters: only top-level headers shape
    /// the outline.
    pub fn build(elements: &[Element]) -> Outline {
        let mut nodes = vec![OutlineNode {
            tag: None,
            level: 0,
            parent: None,
            children: Vec::new(),
            sibling_index: 0,
        }];
        let mut cursor: NodeId = 0;

        for element in elements {
            let Element::Tag(tag) = element else { continue };
            let Some(level) = tag.header_level() else {
                continue;
            };
            // Ascend until the cursor is a strict ancestor level.
            while nodes[cursor].level >= level {
                match nodes[cursor].parent {
                    Some(parent) => cursor = parent,
                    None => break,
                }
            }
            let id = nodes.len();
            let sibling_index = nodes[cursor].children.len();
            nodes.push(OutlineNode {
                tag: Some(tag.clone()),
                level,
                parent: Some(cursor),
                children: Vec::new(),
                sibling_index,
            });
            nodes[cursor].children.push(id);
            cursor = id;
        }

        Outline { nodes }
    }

    /// The synthetic root node.
    pub fn root(&self) -> &OutlineNode {
        &self.nodes[0]
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> &OutlineNode {
        &self.nodes[id]
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document has no headers.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Children of a node, in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &OutlineNode> + '_ {
        self.nodes[id].children.iter().map(|child| &self.nodes[*child])
    }

    /// Find the header whose identifier parameter matches `identifier`.
    ///
    /// Headers declare an identifier as their second parameter:
    /// `\2 {Header} {id}`. Used to resolve `#id` reference targets.
    pub fn find_by_identifier(&self, identifier: &str) -> Option<NodeId> {
        (0..self.nodes.len()).find(|id| {
            self.nodes[*id]
                .tag
                .as_ref()
                .and_then(|tag| tag.parameters.get(1))
                .is_some_and(|parameter| plain_text(parameter) == identifier)
        })
    }
}

/// Collect the identifiers of all top-level headers, in document order.
///
/// Headers without an identifier parameter are skipped.
pub fn header_ids(elements: &[Element]) -> Vec<String> {
    let mut ids = Vec::new();
    for element in elements {
        if let Element::Tag(tag) = element {
            if tag.is_header() {
                if let Some(parameter) = tag.parameters.get(1) {
                    ids.push(plain_text(parameter));
                }
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;

    fn outline_of(source: &str) -> Outline {
        Outline::build(&parse_document(source).expect("parse failed"))
    }

    fn levels(outline: &Outline, id: NodeId) -> Vec<u8> {
        outline.children(id).map(|node| node.level).collect()
    }

    #[test]
    fn test_flat_sequence() {
        let outline = outline_of("\\1 {A} {a} \\1 {B} {b}");
        assert_eq!(outline.len(), 3);
        assert_eq!(levels(&outline, 0), vec![1, 1]);
    }

    #[test]
    fn test_document_order_nesting() {
        // Levels [1, 2, 1, 2, 2]: first chapter has one section, second
        // chapter has two.
        let outline =
            outline_of("\\1 {A} {a} \\2 {Aa} {aa} \\1 {B} {b} \\2 {Ba} {ba} \\2 {Bb} {bb}");
        let chapters: Vec<NodeId> = outline.root().children.clone();
        assert_eq!(chapters.len(), 2);
        assert_eq!(outline.node(chapters[0]).children.len(), 1);
        assert_eq!(outline.node(chapters[1]).children.len(), 2);
        let second_children: Vec<usize> = outline
            .children(chapters[1])
            .map(|node| node.sibling_index)
            .collect();
        assert_eq!(second_children, vec![0, 1]);
    }

    #[test]
    fn test_skipped_levels_nest_under_nearest_ancestor() {
        let outline = outline_of("\\1 {A} {a} \\3 {deep} {d}");
        let chapter = outline.root().children[0];
        assert_eq!(levels(&outline, chapter), vec![3]);
    }

    #[test]
    fn test_level_pop_to_sibling() {
        let outline = outline_of("\\1 {A} {a} \\2 {Aa} {aa} \\3 {Aaa} {aaa} \\2 {Ab} {ab}");
        let chapter = outline.root().children[0];
        assert_eq!(levels(&outline, chapter), vec![2, 2]);
    }

    #[test]
    fn test_headers_inside_parameters_are_ignored() {
        let outline = outline_of("\\quote {\\1 {hidden} {h}}");
        assert!(outline.is_empty());
    }

    #[test]
    fn test_find_by_identifier() {
        let outline = outline_of("\\1 {A} {a} \\2 {Aa} {target}");
        let id = outline.find_by_identifier("target").expect("not found");
        assert_eq!(outline.node(id).level, 2);
        assert!(outline.find_by_identifier("missing").is_none());
    }

    #[test]
    fn test_header_ids() {
        let elements = parse_document("\\1 {A} {a} text \\2 {B} \\3 {C} {c}")
            .expect("parse failed");
        assert_eq!(header_ids(&elements), vec!["a".to_string(), "c".to_string()]);
    }
}
