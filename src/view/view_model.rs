/// View Model - Abstracts rendered output for the screen layer
/// This ensures the screen has no direct dependencies on renderer internals

use crate::render::{CodeRegion, RenderedDocument, RenderedLine};

/// The ViewModel trait provides everything the screen needs to paint
/// without depending on how the lines were produced
pub trait ViewModel {
    /// Get total rendered line count
    fn line_count(&self) -> usize;

    /// Get a specific rendered line by index
    fn line(&self, index: usize) -> Option<&RenderedLine>;

    /// Get the code block regions discovered during rendering
    fn code_regions(&self) -> &[CodeRegion];
}

/// Concrete implementation that adapts RenderedDocument to ViewModel
pub struct DocumentViewModel<'a> {
    rendered: &'a RenderedDocument,
}

impl<'a> DocumentViewModel<'a> {
    pub fn new(rendered: &'a RenderedDocument) -> Self {
        Self { rendered }
    }
}

impl<'a> ViewModel for DocumentViewModel<'a> {
    fn line_count(&self) -> usize {
        self.rendered.line_count()
    }

    fn line(&self, index: usize) -> Option<&RenderedLine> {
        self.rendered.lines.get(index)
    }

    fn code_regions(&self) -> &[CodeRegion] {
        &self.rendered.code_regions
    }
}
