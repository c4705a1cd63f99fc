use super::node::{Element, Leaf, Node};
use std::fmt;

/// Element kind for inline workflow-node references.
pub const REFERENCE_TYPE: &str = "focus_node";

/// Why an element failed the reference contract.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidReference {
    WrongKind,
    MissingNodeId,
    EmptyNodeId,
    MissingPlaceholderChild,
}

impl fmt::Display for InvalidReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReference::WrongKind => write!(f, "element is not a focus_node"),
            InvalidReference::MissingNodeId => write!(f, "focus_node has no nodeId attribute"),
            InvalidReference::EmptyNodeId => write!(f, "focus_node has an empty nodeId"),
            InvalidReference::MissingPlaceholderChild => {
                write!(f, "focus_node must carry a single empty text child")
            }
        }
    }
}

impl std::error::Error for InvalidReference {}

/// Typed view over a `focus_node` element.
///
/// A reference binds a document position to an external workflow node by
/// opaque identifier. It is atomic: the host never edits inside it, and a
/// change of target means replacing the whole element. The single empty text
/// child is a structural requirement of the editing substrate; its content is
/// meaningless and ignored beyond construction.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceNode<'a> {
    element: &'a Element,
}

impl<'a> ReferenceNode<'a> {
    pub fn from_element(element: &'a Element) -> Result<Self, InvalidReference> {
        if element.kind != REFERENCE_TYPE {
            return Err(InvalidReference::WrongKind);
        }
        let node_id = element
            .attr_str("nodeId")
            .ok_or(InvalidReference::MissingNodeId)?;
        if node_id.is_empty() {
            return Err(InvalidReference::EmptyNodeId);
        }
        match element.children.as_slice() {
            [Node::Leaf(leaf)] if leaf.text.is_empty() => {}
            _ => return Err(InvalidReference::MissingPlaceholderChild),
        }
        Ok(Self { element })
    }

    pub fn node_id(&self) -> &'a str {
        self.element.attr_str("nodeId").unwrap_or_default()
    }

    /// The display label. May be empty; how to present that is a rendering
    /// decision, not a data error.
    pub fn node_name(&self) -> &'a str {
        self.element.attr_str("nodeName").unwrap_or_default()
    }
}

/// Build a reference element for the given workflow node, including the
/// empty text child the substrate requires.
pub fn reference(node_id: &str, node_name: &str) -> Element {
    Element::new(REFERENCE_TYPE, vec![Node::Leaf(Leaf::new(""))])
        .with_attr("nodeId", node_id)
        .with_attr("nodeName", node_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructed_reference_is_valid() {
        let element = reference("n-42", "Fetch Data");
        let view = ReferenceNode::from_element(&element).unwrap();
        assert_eq!(view.node_id(), "n-42");
        assert_eq!(view.node_name(), "Fetch Data");
    }

    #[test]
    fn test_empty_name_is_allowed() {
        let element = reference("n-42", "");
        let view = ReferenceNode::from_element(&element).unwrap();
        assert_eq!(view.node_name(), "");
    }

    #[test]
    fn test_rejects_wrong_kind() {
        let element = Element::new("paragraph", vec![Node::Leaf(Leaf::new(""))]);
        assert_eq!(
            ReferenceNode::from_element(&element).unwrap_err(),
            InvalidReference::WrongKind
        );
    }

    #[test]
    fn test_rejects_missing_or_empty_node_id() {
        let element = Element::new(REFERENCE_TYPE, vec![Node::Leaf(Leaf::new(""))]);
        assert_eq!(
            ReferenceNode::from_element(&element).unwrap_err(),
            InvalidReference::MissingNodeId
        );

        let element = element.with_attr("nodeId", "");
        assert_eq!(
            ReferenceNode::from_element(&element).unwrap_err(),
            InvalidReference::EmptyNodeId
        );
    }

    #[test]
    fn test_rejects_missing_placeholder_child() {
        let element = Element::new(REFERENCE_TYPE, vec![]).with_attr("nodeId", "n-1");
        assert_eq!(
            ReferenceNode::from_element(&element).unwrap_err(),
            InvalidReference::MissingPlaceholderChild
        );

        let element =
            Element::new(REFERENCE_TYPE, vec![Node::Leaf(Leaf::new("text"))]).with_attr("nodeId", "n-1");
        assert_eq!(
            ReferenceNode::from_element(&element).unwrap_err(),
            InvalidReference::MissingPlaceholderChild
        );
    }
}
