use super::node::{Element, Leaf, Node};

/// Element kind for multi-line code regions.
pub const CODE_BLOCK_TYPE: &str = "code_block";
/// Element kind for one line inside a code block.
pub const CODE_LINE_TYPE: &str = "code_line";

/// Typed view over a `code_block` element.
///
/// Children are line elements in rendering order; each line's children are
/// token leaves carrying an opaque styling class. The view only reads the
/// tree, it never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct CodeBlock<'a> {
    element: &'a Element,
}

impl<'a> CodeBlock<'a> {
    pub fn from_element(element: &'a Element) -> Option<Self> {
        if element.kind == CODE_BLOCK_TYPE {
            Some(Self { element })
        } else {
            None
        }
    }

    pub fn language(&self) -> Option<&'a str> {
        self.element.attr_str("language")
    }

    /// The line nodes in document order.
    pub fn lines(&self) -> &'a [Node] {
        &self.element.children
    }

    pub fn line_count(&self) -> usize {
        self.element.children.len()
    }

    /// Flatten the block to plain text: every leaf within a line concatenated
    /// depth-first left-to-right, lines joined with a single newline, no
    /// trailing newline. A block with zero lines yields the empty string.
    ///
    /// Recomputed from the tree on every call so the result always reflects
    /// current content.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (index, line) in self.element.children.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            line.collect_text(&mut out);
        }
        out
    }
}

/// Build a code block element from per-line token runs.
pub fn code_block(language: Option<&str>, lines: Vec<Vec<Leaf>>) -> Element {
    let children = lines
        .into_iter()
        .map(|tokens| {
            Node::Element(Element::new(
                CODE_LINE_TYPE,
                tokens.into_iter().map(Node::Leaf).collect(),
            ))
        })
        .collect();

    let element = Element::new(CODE_BLOCK_TYPE, children);
    match language {
        Some(language) => element.with_attr("language", language),
        None => element,
    }
}
