/// Document model subsystem - Structured document tree and typed node views
///
/// This module contains the generic element/leaf tree that documents are made
/// of, plus the typed views over the two special element kinds: workflow-node
/// references and code blocks.

pub mod node;
pub mod reference;
pub mod code;

// Re-export main types for convenience
pub use node::{Document, Element, Leaf, Node};
pub use reference::{reference, InvalidReference, ReferenceNode, REFERENCE_TYPE};
pub use code::{code_block, CodeBlock, CODE_BLOCK_TYPE, CODE_LINE_TYPE};
