/// View subsystem - Independent rendering and display management
///
/// This module provides a clean abstraction layer for all terminal painting,
/// completely independent of renderer internals through the ViewModel trait.

pub mod view_model;
pub mod screen;

// Re-export public interface
pub use view_model::{DocumentViewModel, ViewModel};
pub use screen::{PaintParams, Screen};
