/// Render subsystem - Turns the document tree into styled terminal lines
///
/// Rendering is read-only over the tree: each node kind has a renderer picked
/// by an explicit dispatch on the `type` discriminator, with a default arm so
/// unknown kinds degrade instead of erroring. Output spans carry their
/// styling class verbatim; classes only become colors in the view layer.

pub mod rendered;
pub mod renderer;
pub mod theme;

// Re-export public interface
pub use rendered::{CodeRegion, ReferenceHit, RenderedDocument, RenderedLine, RenderedSpan, NODE_ID_ATTR};
pub use renderer::{render_document, REFERENCE_CLASS};
pub use theme::{parse_color, Theme};
