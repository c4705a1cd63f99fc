use super::rendered::{CodeRegion, RenderedDocument, RenderedLine, RenderedSpan, NODE_ID_ATTR};
use crate::document::{CodeBlock, Document, Element, Node, ReferenceNode, CODE_BLOCK_TYPE, REFERENCE_TYPE};

/// Styling class applied to rendered reference chips.
pub const REFERENCE_CLASS: &str = "reference";

const REFERENCE_ICON: char = '\u{2b22}'; // ⬢

struct Output {
    lines: Vec<RenderedLine>,
    current: RenderedLine,
    regions: Vec<CodeRegion>,
}

impl Output {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: RenderedLine::default(),
            regions: Vec::new(),
        }
    }

    fn push_span(&mut self, span: RenderedSpan) {
        self.current.push(span);
    }

    /// End the current paragraph row. Empty paragraphs still produce a row.
    fn end_paragraph(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
    }

    /// Flush pending inline content before block-level output.
    fn break_line_if_dirty(&mut self) {
        if !self.current.is_empty() {
            self.end_paragraph();
        }
    }
}

/// Render a document tree to styled lines.
///
/// Dispatch is an explicit match on the element `type`: reference chips and
/// code blocks have dedicated renderers, everything else falls through to the
/// default arm which renders children as plain inline flow. A node that fails
/// its contract renders as nothing; its siblings are unaffected.
pub fn render_document(document: &Document) -> RenderedDocument {
    let mut out = Output::new();
    let mut path = Vec::new();

    for (index, node) in document.nodes.iter().enumerate() {
        path.push(index);
        match node {
            Node::Element(element) if element.kind == CODE_BLOCK_TYPE => {
                render_code_block(element, &path, &mut out);
            }
            other => {
                render_inline(other, &mut path, &mut out);
                out.end_paragraph();
            }
        }
        path.pop();
    }

    out.break_line_if_dirty();
    RenderedDocument {
        lines: out.lines,
        code_regions: out.regions,
    }
}

fn render_inline(node: &Node, path: &mut Vec<usize>, out: &mut Output) {
    match node {
        Node::Leaf(leaf) => {
            let span = match &leaf.class {
                Some(class) => RenderedSpan::classed(leaf.text.clone(), class.clone()),
                None => RenderedSpan::raw(leaf.text.clone()),
            };
            out.push_span(span);
        }
        Node::Element(element) => match element.kind.as_str() {
            REFERENCE_TYPE => render_reference(element, out),
            CODE_BLOCK_TYPE => {
                out.break_line_if_dirty();
                render_code_block(element, path, out);
            }
            _ => {
                for (index, child) in element.children.iter().enumerate() {
                    path.push(index);
                    render_inline(child, path, out);
                    path.pop();
                }
            }
        },
    }
}

/// Inline chip for a workflow-node reference: icon plus label, carrying the
/// node id as an inspectable attribute. A single span, so the chip stays
/// atomic in the output. Invalid reference elements render nothing.
fn render_reference(element: &Element, out: &mut Output) {
    let Ok(reference) = ReferenceNode::from_element(element) else {
        return;
    };

    let label = match reference.node_name() {
        "" => reference.node_id(),
        name => name,
    };

    out.push_span(
        RenderedSpan::classed(format!("{REFERENCE_ICON} {label}"), REFERENCE_CLASS)
            .with_attr(NODE_ID_ATTR, reference.node_id()),
    );
}

/// Code block: one output row per line node, in document order. Each line is
/// handed to the pass-through line renderer. The block's extent and element
/// path are recorded so a copy control can re-extract the text lazily.
fn render_code_block(element: &Element, path: &[usize], out: &mut Output) {
    let Some(block) = CodeBlock::from_element(element) else {
        return;
    };

    let first_line = out.lines.len();
    for line in block.lines() {
        let mut rendered = RenderedLine::default();
        render_line_content(line, &mut rendered);
        out.lines.push(rendered);
    }

    if block.line_count() > 0 {
        out.regions.push(CodeRegion {
            first_line,
            line_count: block.line_count(),
            path: path.to_vec(),
            language: block.language().map(str::to_string),
        });
    }
}

/// Structural pass-through for one code line: token leaves become spans in
/// order, class carried verbatim. No state, no added semantics.
fn render_line_content(node: &Node, line: &mut RenderedLine) {
    match node {
        Node::Leaf(leaf) => {
            let span = match &leaf.class {
                Some(class) => RenderedSpan::classed(leaf.text.clone(), class.clone()),
                None => RenderedSpan::raw(leaf.text.clone()),
            };
            line.push(span);
        }
        Node::Element(element) => {
            for child in &element.children {
                render_line_content(child, line);
            }
        }
    }
}
