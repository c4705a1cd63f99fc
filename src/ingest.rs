use crate::document::{code_block, reference, Document, Element, Leaf, Node};
use crate::highlight::Highlighter;
use regex::Regex;

/// Resolves a workflow-node id to its display name. Returning None leaves
/// the reference name empty; the renderer then shows the raw id.
pub type NameResolver<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Convert raw copilot transcript text into a document tree.
///
/// Assistant responses reference workflow nodes inline as
/// `<focus_node>NODE_ID</focus_node>` and carry code inside fenced blocks
/// with an optional language hint. Everything else becomes paragraphs; a
/// fence left open at end of input is closed implicitly.
pub fn ingest_transcript(text: &str, resolve: &NameResolver) -> Document {
    let focus_re = Regex::new(r"<focus_node>\s*([A-Za-z0-9_-]+)\s*</focus_node>")
        .expect("focus tag pattern compiles");

    let mut nodes = Vec::new();
    let mut fence: Option<(Option<String>, Vec<String>)> = None;

    for line in text.lines() {
        let trimmed = line.trim_end();
        if let Some(rest) = trimmed.strip_prefix("```") {
            match fence.take() {
                Some((language, lines)) => {
                    nodes.push(Node::Element(build_code_block(language.as_deref(), &lines)));
                }
                None => {
                    let language = rest.trim();
                    let language = (!language.is_empty()).then(|| language.to_string());
                    fence = Some((language, Vec::new()));
                }
            }
            continue;
        }

        if let Some((_, lines)) = fence.as_mut() {
            lines.push(line.to_string());
            continue;
        }

        nodes.push(Node::Element(Element::new(
            "paragraph",
            parse_inline(line, &focus_re, resolve),
        )));
    }

    if let Some((language, lines)) = fence {
        nodes.push(Node::Element(build_code_block(language.as_deref(), &lines)));
    }

    Document::new(nodes)
}

fn build_code_block(language: Option<&str>, lines: &[String]) -> Element {
    let highlighter = Highlighter::for_language(language);
    let token_lines = lines
        .iter()
        .map(|line| match &highlighter {
            Some(highlighter) => highlighter.tokenize_line(line),
            None if line.is_empty() => Vec::new(),
            None => vec![Leaf::new(line.as_str())],
        })
        .collect();
    code_block(language, token_lines)
}

fn parse_inline(line: &str, focus_re: &Regex, resolve: &NameResolver) -> Vec<Node> {
    let mut children = Vec::new();
    let mut last = 0;

    for caps in focus_re.captures_iter(line) {
        let whole = caps.get(0).unwrap();
        if whole.start() > last {
            children.push(Node::Leaf(Leaf::new(&line[last..whole.start()])));
        }
        let node_id = caps.get(1).unwrap().as_str();
        let name = resolve(node_id).unwrap_or_default();
        children.push(Node::Element(reference(node_id, &name)));
        last = whole.end();
    }

    if last < line.len() {
        children.push(Node::Leaf(Leaf::new(&line[last..])));
    }
    if children.is_empty() {
        // Paragraphs carry at least one text child, like the editor's own.
        children.push(Node::Leaf(Leaf::new("")));
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CodeBlock, ReferenceNode};

    fn no_names(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_focus_tags_become_references() {
        let doc = ingest_transcript(
            "The <focus_node>tz4a98xxat96ipl6cg5e</focus_node> node loads the file.",
            &|id| (id == "tz4a98xxat96ipl6cg5e").then(|| "Load File".to_string()),
        );

        let Node::Element(paragraph) = &doc.nodes[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(paragraph.children.len(), 3);

        let Node::Element(chip) = &paragraph.children[1] else {
            panic!("expected reference element");
        };
        let reference = ReferenceNode::from_element(chip).unwrap();
        assert_eq!(reference.node_id(), "tz4a98xxat96ipl6cg5e");
        assert_eq!(reference.node_name(), "Load File");
    }

    #[test]
    fn test_unresolved_reference_keeps_empty_name() {
        let doc = ingest_transcript("see <focus_node>n-1</focus_node>", &no_names);
        let Node::Element(paragraph) = &doc.nodes[0] else {
            panic!("expected paragraph");
        };
        let Node::Element(chip) = &paragraph.children[1] else {
            panic!("expected reference element");
        };
        let reference = ReferenceNode::from_element(chip).unwrap();
        assert_eq!(reference.node_name(), "");
    }

    #[test]
    fn test_two_tags_in_one_line() {
        let doc = ingest_transcript(
            "<focus_node>a-1</focus_node> feeds <focus_node>b-2</focus_node>",
            &no_names,
        );
        let Node::Element(paragraph) = &doc.nodes[0] else {
            panic!("expected paragraph");
        };
        let kinds: Vec<_> = paragraph
            .children
            .iter()
            .map(|node| match node {
                Node::Element(el) => el.kind.as_str(),
                Node::Leaf(_) => "text",
            })
            .collect();
        assert_eq!(kinds, vec!["focus_node", "text", "focus_node"]);
    }

    #[test]
    fn test_fenced_block_round_trips_through_extraction() {
        let transcript = "Run this:\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```\nDone.";
        let doc = ingest_transcript(transcript, &no_names);

        let Node::Element(block) = &doc.nodes[1] else {
            panic!("expected code block");
        };
        let block = CodeBlock::from_element(block).unwrap();
        assert_eq!(block.language(), Some("rust"));
        assert_eq!(block.plain_text(), "fn main() {\n    println!(\"hi\");\n}");
    }

    #[test]
    fn test_fence_without_language_keeps_lines_unclassed() {
        let doc = ingest_transcript("```\nsome output\n```", &no_names);
        let Node::Element(block) = &doc.nodes[0] else {
            panic!("expected code block");
        };
        let block = CodeBlock::from_element(block).unwrap();
        assert_eq!(block.language(), None);
        assert_eq!(block.plain_text(), "some output");
    }

    #[test]
    fn test_unterminated_fence_is_closed_at_end_of_input() {
        let doc = ingest_transcript("```sh\necho hi", &no_names);
        let Node::Element(block) = &doc.nodes[0] else {
            panic!("expected code block");
        };
        let block = CodeBlock::from_element(block).unwrap();
        assert_eq!(block.plain_text(), "echo hi");
    }

    #[test]
    fn test_blank_lines_become_empty_paragraphs() {
        let doc = ingest_transcript("one\n\ntwo", &no_names);
        assert_eq!(doc.nodes.len(), 3);
        let Node::Element(blank) = &doc.nodes[1] else {
            panic!("expected paragraph");
        };
        assert_eq!(blank.children, vec![Node::Leaf(Leaf::new(""))]);
    }
}
