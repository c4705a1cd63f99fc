use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// A single node in the document tree.
///
/// The serialized form mirrors the editor wire format: an element object
/// carries `"type"` and `"children"`, a leaf object carries `"text"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Leaf(Leaf),
}

impl Node {
    /// Append every leaf text run below this node, depth-first and
    /// left-to-right, with no separator.
    pub fn collect_text(&self, out: &mut String) {
        match self {
            Node::Leaf(leaf) => out.push_str(&leaf.text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }
}

/// An element node: a `type` discriminator, ordered children, and any number
/// of extra attributes that are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    pub children: Vec<Node>,
    #[serde(flatten)]
    pub attrs: BTreeMap<String, serde_json::Value>,
}

impl Element {
    pub fn new(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: kind.into(),
            children,
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    /// Look up a string-valued attribute. Non-string values return None.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(|value| value.as_str())
    }
}

/// A leaf text run. `class` is an opaque styling class produced upstream;
/// nothing in this crate interprets its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    #[serde(
        rename = "className",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub class: Option<String>,
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    pub fn classed(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: Some(class.into()),
        }
    }
}

/// A whole document: the ordered top-level nodes of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Parse a document from JSON. Accepts either a bare array of nodes or a
    /// root object with a `children` array.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let nodes_value = match value {
            serde_json::Value::Object(mut map) => match map.remove("children") {
                Some(children) => children,
                None => serde_json::Value::Object(map),
            },
            other => other,
        };
        let nodes: Vec<Node> = serde_json::from_value(nodes_value)?;
        Ok(Self { nodes })
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Walk to a node by child indices from the document root. Returns None
    /// if the path leads out of the tree.
    pub fn node_at_path(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.nodes.get(*first)?;
        for index in rest {
            match node {
                Node::Element(element) => node = element.children.get(*index)?,
                Node::Leaf(_) => return None,
            }
        }
        Some(node)
    }
}
