//! Multi-format rendering for Bracken documents
//!
//!     This crate turns the element tree produced by `bracken-parser` into
//!     output text for one of several target formats. The engine itself is
//!     format-independent: it owns tag dispatch, the block/inline
//!     distinction, paragraph synthesis, macro definitions, and the
//!     two-phase (priming + rendering) traversal. Everything a format
//!     actually looks like lives behind the [`Renderer`] trait.
//!
//! Architecture
//!
//!     - Renderer trait: the per-format capability set. One method renders a
//!       tag, one primes it; the rest configures escaping and block tags.
//!     - Dispatch engine: walks the tree, resolves each tag id to a
//!       [`TagKind`], and calls into the renderer. See [`engine`].
//!     - RendererRegistry: discovery and selection of formats by id.
//!     - Format implementations: concrete renderers under [`formats`].
//!
//!     The file structure:
//!     .
//!     ├── error.rs                # RenderError
//!     ├── tags.rs                 # TagKind, the closed dispatch key set
//!     ├── renderer.rs             # Renderer trait, Arguments, Spec
//!     ├── context.rs              # Pass, RenderContext
//!     ├── engine.rs               # convert, Scope, paragraph synthesis
//!     ├── registry.rs             # RendererRegistry
//!     ├── formats
//!     │   ├── html.rs
//!     │   ├── markdown.rs
//!     │   ├── rtf.rs
//!     │   ├── tex.rs
//!     │   ├── text.rs
//!     │   └── wiki.rs
//!     └── lib.rs
//!
//! Dispatch
//!
//!     Tag ids are parsed once into the closed [`TagKind`] enum and
//!     renderers pattern-match on it, returning `Ok(None)` for kinds they do
//!     not handle. During the rendering pass an unhandled tag is a hard
//!     error; during the priming pass it simply contributes nothing, which
//!     is what lets renderers opt into priming per tag. State a renderer
//!     accumulates between the passes (section numbering, citation tables)
//!     lives in the renderer struct itself and is reset by `init`.

pub mod context;
pub mod engine;
pub mod error;
pub mod formats;
pub mod registry;
pub mod renderer;
pub mod tags;

pub use context::{Pass, RenderContext};
pub use engine::{convert, convert_file, Scope};
pub use error::RenderError;
pub use registry::RendererRegistry;
pub use renderer::{Arguments, Renderer, Spec};
pub use tags::TagKind;
