/// Controller subsystem - Handles user input and the viewer event loop
///
/// This module owns the interactive loop: key handling, code-block focus,
/// copy activation, and reference cycling, kept separate from the data and
/// view layers.

pub mod viewer;

// Re-export public interface
pub use viewer::ViewerController;
