use std::collections::BTreeMap;
use unicode_width::UnicodeWidthStr;

/// Attribute carrying the workflow-node id on rendered reference chips.
/// External code locates chips through this attribute and nothing else.
pub const NODE_ID_ATTR: &str = "data-node-id";

/// The smallest unit of rendered output: a text run, its opaque styling
/// class, and any inspectable attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSpan {
    pub text: String,
    pub class: Option<String>,
    pub attrs: BTreeMap<String, String>,
}

impl RenderedSpan {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
            attrs: BTreeMap::new(),
        }
    }

    pub fn classed(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: Some(class.into()),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// One output row: ordered spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedLine {
    pub spans: Vec<RenderedSpan>,
}

impl RenderedLine {
    pub fn push(&mut self, span: RenderedSpan) {
        self.spans.push(span);
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(RenderedSpan::width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Where a code block landed in the output, plus the path back to its
/// element so the copy control can re-read the tree at activation time.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeRegion {
    pub first_line: usize,
    pub line_count: usize,
    pub path: Vec<usize>,
    pub language: Option<String>,
}

impl CodeRegion {
    pub fn last_line(&self) -> usize {
        self.first_line + self.line_count.saturating_sub(1)
    }

    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.first_line && line < self.first_line + self.line_count
    }
}

/// Location of a rendered reference chip in the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceHit {
    pub line: usize,
    pub span: usize,
}

/// The fully rendered document: styled lines plus the code regions found
/// while rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    pub lines: Vec<RenderedLine>,
    pub code_regions: Vec<CodeRegion>,
}

impl RenderedDocument {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Locate the first rendered reference chip bound to `node_id`, scanning
    /// span attributes in output order.
    pub fn find_reference(&self, node_id: &str) -> Option<ReferenceHit> {
        for (line_index, line) in self.lines.iter().enumerate() {
            for (span_index, span) in line.spans.iter().enumerate() {
                if span.attr(NODE_ID_ATTR) == Some(node_id) {
                    return Some(ReferenceHit {
                        line: line_index,
                        span: span_index,
                    });
                }
            }
        }
        None
    }

    /// Every referenced workflow-node id, in output order.
    pub fn reference_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for line in &self.lines {
            for span in &line.spans {
                if let Some(id) = span.attr(NODE_ID_ATTR) {
                    ids.push(id);
                }
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_concatenates_spans() {
        let mut line = RenderedLine::default();
        line.push(RenderedSpan::raw("fn "));
        line.push(RenderedSpan::classed("main", "ident"));
        assert_eq!(line.text(), "fn main");
        assert_eq!(line.width(), 7);
    }

    #[test]
    fn test_find_reference_scans_attributes() {
        let mut doc = RenderedDocument::default();
        let mut line = RenderedLine::default();
        line.push(RenderedSpan::raw("see "));
        line.push(RenderedSpan::raw("chip").with_attr(NODE_ID_ATTR, "n-42"));
        doc.lines.push(RenderedLine::default());
        doc.lines.push(line);

        let hit = doc.find_reference("n-42").unwrap();
        assert_eq!(hit.line, 1);
        assert_eq!(hit.span, 1);
        assert!(doc.find_reference("n-43").is_none());
        assert_eq!(doc.reference_ids(), vec!["n-42"]);
    }

    #[test]
    fn test_code_region_line_ranges() {
        let region = CodeRegion {
            first_line: 3,
            line_count: 2,
            path: vec![1],
            language: None,
        };
        assert!(region.contains_line(3));
        assert!(region.contains_line(4));
        assert!(!region.contains_line(5));
        assert_eq!(region.last_line(), 4);
    }
}
