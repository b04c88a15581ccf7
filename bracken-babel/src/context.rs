//! Per-conversion state.
//!
//! One [`RenderContext`] is constructed per `convert` call and threaded
//! through every recursive render call. Nothing here is shared between
//! conversions; concurrent callers each build their own.

use std::collections::{BTreeMap, BTreeSet};

use bracken_parser::Outline;

/// Which traversal is running.
///
/// The priming pass sees the identical tree, fully and in document order,
/// before the rendering pass begins. Its output is discarded; it exists so
/// renderers can accumulate state (numbering, citation tables) ahead of the
/// real render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Priming,
    Render,
}

/// Mutable state of one conversion.
#[derive(Debug)]
pub struct RenderContext {
    /// The header outline of the document being converted.
    pub outline: Outline,
    /// Tag names that reached dispatch without any renderer behavior.
    /// Populated just before the resulting hard error, for diagnostics.
    pub missing_tags: BTreeSet<String>,
    /// Source file name, if known; used in error messages.
    pub file_name: Option<String>,
    definitions: BTreeMap<String, String>,
    frames: Vec<Vec<String>>,
}

impl RenderContext {
    pub fn new(outline: Outline) -> RenderContext {
        RenderContext {
            outline,
            missing_tags: BTreeSet::new(),
            file_name: None,
            definitions: BTreeMap::new(),
            frames: Vec::new(),
        }
    }

    /// Register a macro pattern under a name. Definitions are global to the
    /// conversion; a later definition replaces an earlier one.
    pub fn define(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.definitions.insert(name.into(), pattern.into());
    }

    /// Look up a macro pattern.
    pub fn definition(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).map(String::as_str)
    }

    /// Enter a macro expansion with its captured positional arguments.
    pub(crate) fn push_frame(&mut self, arguments: Vec<String>) {
        self.frames.push(arguments);
    }

    pub(crate) fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Positional argument of the innermost macro expansion.
    pub fn frame_argument(&self, index: usize) -> Option<&str> {
        self.frames
            .last()
            .and_then(|frame| frame.get(index))
            .map(String::as_str)
    }
}
