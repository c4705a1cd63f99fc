/// Configuration subsystem - Viewer settings and preferences
///
/// This module handles loading and applying configuration from .flowdocrc
/// files, providing centralized settings management for the whole application.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};
