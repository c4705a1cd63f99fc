use crate::document::Leaf;
use regex::Regex;

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "self", "Self", "static", "struct", "trait", "true", "type", "use", "where", "while",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "async", "await", "break", "class", "continue", "def", "elif", "else", "except",
    "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "None", "not", "or",
    "pass", "raise", "return", "True", "False", "try", "while", "with", "yield",
];

const JS_KEYWORDS: &[&str] = &[
    "async", "await", "catch", "class", "const", "else", "export", "finally", "for", "from",
    "function", "if", "import", "instanceof", "let", "new", "null", "return", "this", "throw",
    "true", "false", "try", "typeof", "undefined", "var", "while",
];

const SHELL_KEYWORDS: &[&str] = &[
    "case", "do", "done", "echo", "elif", "else", "esac", "exit", "export", "fi", "for",
    "function", "if", "in", "local", "return", "then", "while",
];

/// Line tokenizer for one language.
///
/// Emits token leaves whose classes (`comment`, `string`, `number`,
/// `keyword`) are opaque to everything downstream. Tokens always cover the
/// whole line: concatenating their texts reproduces the input exactly.
pub struct Highlighter {
    token_re: Regex,
    keywords: &'static [&'static str],
}

impl Highlighter {
    /// Returns None for unknown or missing languages; callers then keep the
    /// line as a single unclassed leaf.
    pub fn for_language(language: Option<&str>) -> Option<Self> {
        let (comment, single_quotes, keywords): (Option<&str>, bool, &'static [&'static str]) =
            match language?.to_ascii_lowercase().as_str() {
                "rust" | "rs" => (Some("//.*"), false, RUST_KEYWORDS),
                "python" | "py" => (Some("#.*"), true, PYTHON_KEYWORDS),
                "javascript" | "js" | "typescript" | "ts" => (Some("//.*"), true, JS_KEYWORDS),
                "shell" | "bash" | "sh" => (Some("#.*"), true, SHELL_KEYWORDS),
                _ => return None,
            };

        Some(Self {
            token_re: build_token_regex(comment, single_quotes),
            keywords,
        })
    }

    pub fn tokenize_line(&self, line: &str) -> Vec<Leaf> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in self.token_re.captures_iter(line) {
            let matched = caps.get(0).unwrap();
            if matched.start() > last {
                tokens.push(Leaf::new(&line[last..matched.start()]));
            }

            let text = matched.as_str();
            let class = if caps.name("comment").is_some() {
                Some("comment")
            } else if caps.name("string").is_some() {
                Some("string")
            } else if caps.name("number").is_some() {
                Some("number")
            } else if self.keywords.contains(&text) {
                Some("keyword")
            } else {
                None
            };

            tokens.push(match class {
                Some(class) => Leaf::classed(text, class),
                None => Leaf::new(text),
            });
            last = matched.end();
        }

        if last < line.len() {
            tokens.push(Leaf::new(&line[last..]));
        }
        tokens
    }
}

fn build_token_regex(comment: Option<&str>, single_quotes: bool) -> Regex {
    let mut alternatives: Vec<String> = Vec::new();
    if let Some(comment) = comment {
        alternatives.push(format!("(?P<comment>{comment})"));
    }

    let mut strings = String::from(r#""(?:[^"\\]|\\.)*"?"#);
    if single_quotes {
        strings.push_str(r#"|'(?:[^'\\]|\\.)*'?"#);
    }
    alternatives.push(format!("(?P<string>{strings})"));
    alternatives.push(r"(?P<number>\b\d[0-9_a-zA-Z.]*)".to_string());
    alternatives.push(r"(?P<word>[A-Za-z_][A-Za-z0-9_]*)".to_string());

    Regex::new(&alternatives.join("|")).expect("token pattern compiles")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(tokens: &[Leaf]) -> Vec<(String, Option<String>)> {
        tokens
            .iter()
            .map(|leaf| (leaf.text.clone(), leaf.class.clone()))
            .collect()
    }

    #[test]
    fn test_rust_line_classing() {
        let highlighter = Highlighter::for_language(Some("rust")).unwrap();
        let tokens = highlighter.tokenize_line("let x = 42; // answer");
        assert_eq!(
            classes(&tokens),
            vec![
                ("let".to_string(), Some("keyword".to_string())),
                (" ".to_string(), None),
                ("x".to_string(), None),
                (" = ".to_string(), None),
                ("42".to_string(), Some("number".to_string())),
                ("; ".to_string(), None),
                ("// answer".to_string(), Some("comment".to_string())),
            ]
        );
    }

    #[test]
    fn test_strings_swallow_embedded_markers() {
        let highlighter = Highlighter::for_language(Some("rust")).unwrap();
        let tokens = highlighter.tokenize_line(r#"print("// not a comment")"#);
        let string_token = tokens
            .iter()
            .find(|leaf| leaf.class.as_deref() == Some("string"))
            .unwrap();
        assert_eq!(string_token.text, r#""// not a comment""#);
        assert!(!tokens.iter().any(|l| l.class.as_deref() == Some("comment")));
    }

    #[test]
    fn test_python_hash_comment() {
        let highlighter = Highlighter::for_language(Some("py")).unwrap();
        let tokens = highlighter.tokenize_line("def f():  # docs");
        assert_eq!(tokens[0], Leaf::classed("def", "keyword"));
        assert_eq!(tokens.last().unwrap(), &Leaf::classed("# docs", "comment"));
    }

    #[test]
    fn test_tokens_cover_the_whole_line() {
        let highlighter = Highlighter::for_language(Some("rust")).unwrap();
        let line = r#"  let msg = "hi \"there\""; // trailing"#;
        let tokens = highlighter.tokenize_line(line);
        let reassembled: String = tokens.iter().map(|leaf| leaf.text.as_str()).collect();
        assert_eq!(reassembled, line);
    }

    #[test]
    fn test_unknown_language_has_no_highlighter() {
        assert!(Highlighter::for_language(Some("cobol")).is_none());
        assert!(Highlighter::for_language(None).is_none());
    }

    #[test]
    fn test_empty_line_yields_no_tokens() {
        let highlighter = Highlighter::for_language(Some("rust")).unwrap();
        assert!(highlighter.tokenize_line("").is_empty());
    }
}
