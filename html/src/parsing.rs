use tracing::{debug, span, trace, Level};

use crate::attributes::parse_attributes;
use crate::dom::{Node, COMMENT_CLOSE, COMMENT_MARKER};
use crate::error::ScanError;
use crate::tag::{extract_tag_name, split_tag};
use crate::void::is_void_tag;

/// Scan `input` into its top-level nodes.
///
/// Elements keep everything between their open and close tags as raw
/// `inner_content`; call [`parse`] again on it (or [`Node::children`]) to go
/// one level deeper. Nested tags are only counted, never matched by name, so
/// mismatched markup inside an element is accepted as-is.
pub fn parse(input: &str) -> Result<Vec<Node>, ScanError> {
    let span = span!(Level::DEBUG, "Scanning markup", len = input.len());
    let _enter = span.enter();

    let mut scanner = Scanner::new(input);
    for (position, ch) in input.char_indices() {
        if let Err(e) = scanner.step(position, ch) {
            debug!("Scan failed: {}", e);
            return Err(e);
        }
    }
    scanner.finish().map_err(|e| {
        debug!("Scan failed: {}", e);
        e
    })
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum State {
    /// Between tags; text since `text_start` is pending
    Outside { text_start: usize },
    /// Reading a tag token that began with the `<` at `start`
    InTag { start: usize },
}

/// The opening tag of the element currently open at depth 0
#[derive(Debug)]
struct OpenElement<'a> {
    token: &'a str,
    start: usize,
    content_start: usize,
}

struct Scanner<'a> {
    input: &'a str,
    state: State,
    depth: usize,
    open: Option<OpenElement<'a>>,
    nodes: Vec<Node>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            state: State::Outside { text_start: 0 },
            depth: 0,
            open: None,
            nodes: vec![],
        }
    }

    fn step(&mut self, position: usize, ch: char) -> Result<(), ScanError> {
        match (ch, self.state) {
            ('<', State::InTag { .. }) => Err(ScanError::UnexpectedOpen { position }),
            ('<', State::Outside { text_start }) => {
                // Text inside an element is already part of its inner content
                if self.depth == 0 && text_start < position {
                    let input = self.input;
                    self.emit(Node::text(&input[text_start..position]));
                }
                self.state = State::InTag { start: position };
                Ok(())
            }
            ('>', State::Outside { .. }) => Err(ScanError::UnexpectedClose { position }),
            ('>', State::InTag { start }) => {
                self.close_token(start, position)?;
                self.state = State::Outside {
                    text_start: position + 1,
                };
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Handle the complete token `input[start..=end]`
    fn close_token(&mut self, start: usize, end: usize) -> Result<(), ScanError> {
        let input = self.input;
        let token = &input[start..=end];
        if token.starts_with("</") {
            return self.close_element(token, start, end);
        }

        let (name, rest) = split_tag(token);
        if name == COMMENT_MARKER {
            if self.depth == 0 {
                self.emit(Node::comment(comment_body(rest)));
            }
            return Ok(());
        }
        if is_void_tag(&name) {
            if self.depth == 0 {
                let attributes = parse_attributes(attribute_text(rest));
                self.emit(Node::element(name, attributes, ""));
            }
            return Ok(());
        }

        if self.depth == 0 {
            self.open = Some(OpenElement {
                token,
                start,
                content_start: end + 1,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn close_element(&mut self, token: &str, start: usize, end: usize) -> Result<(), ScanError> {
        let open = match (self.depth, self.open.take()) {
            (1, Some(open)) => open,
            (0, _) | (_, None) => {
                return Err(ScanError::TagMismatch {
                    expected: String::new(),
                    found: token.to_string(),
                    position: end,
                })
            }
            (_, Some(open)) => {
                // Closes something nested; it stays in the inner content
                self.open = Some(open);
                self.depth -= 1;
                return Ok(());
            }
        };
        self.depth = 0;

        let (name, rest) = split_tag(open.token);
        if name != extract_tag_name(token) {
            return Err(ScanError::TagMismatch {
                expected: name,
                found: token.to_string(),
                position: end,
            });
        }
        let attributes = parse_attributes(attribute_text(rest));
        let input = self.input;
        let inner = &input[open.content_start..start];
        self.emit(Node::element(name, attributes, inner));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, ScanError> {
        match self.state {
            State::InTag { start } => Err(ScanError::UnclosedTag { position: start }),
            State::Outside { .. } if self.depth > 0 => Err(ScanError::UnclosedTag {
                position: self.open.as_ref().map_or(0, |open| open.start),
            }),
            State::Outside { text_start } => {
                let input = self.input;
                if text_start < input.len() {
                    self.emit(Node::text(&input[text_start..]));
                }
                Ok(self.nodes)
            }
        }
    }

    fn emit(&mut self, node: Node) {
        trace!("Emitting {:?} node <{}>", node.kind(), node.tag);
        self.nodes.push(node);
    }
}

/// Text of an opening tag after its name, without the closing `>` or a
/// self-closing `/`
fn attribute_text(rest: &str) -> &str {
    let rest = rest.strip_suffix('>').unwrap_or(rest).trim();
    match rest.strip_suffix('/') {
        Some(before)
            if before.is_empty()
                || before.ends_with(|c: char| c.is_ascii_whitespace() || c == '\'' || c == '"') =>
        {
            before.trim_end()
        }
        _ => rest,
    }
}

/// `rest` is a comment token with the `<!--` already removed
fn comment_body(rest: &str) -> &str {
    rest.strip_suffix(COMMENT_CLOSE)
        .or_else(|| rest.strip_suffix('>'))
        .unwrap_or(rest)
}

#[cfg(test)]
use crate::{attributes, dom::Attributes};

#[cfg(test)]
#[test]
fn test_parse_siblings() {
    let data = r#"<p class=intro>Hello</p> and <img src="a.png"><!-- end -->tail"#;
    let target = vec![
        Node::element("p", attributes!("class" => "intro"), "Hello"),
        Node::text(" and "),
        Node::element("img", attributes!("src" => "a.png"), ""),
        Node::comment(" end "),
        Node::text("tail"),
    ];
    assert_eq!(parse(data), Ok(target));
    assert_eq!(parse(""), Ok(vec![]));
}

#[cfg(test)]
#[test]
fn test_parse_shallow() {
    let data = r#"<html><div class=nothing><h1></h1></div></html>"#;
    let target = Node::element(
        "html",
        Attributes::empty(),
        "<div class=nothing><h1></h1></div>",
    );
    assert_eq!(parse(data), Ok(vec![target]));

    // Inner tags are counted, not matched
    let data = "<div><b><i>x</b></i></div>";
    let target = Node::element("div", Attributes::empty(), "<b><i>x</b></i>");
    assert_eq!(parse(data), Ok(vec![target]));
}

#[cfg(test)]
#[test]
fn test_parse_nested_void_and_comment() {
    let data = "<p>one<br>two<!-- x --></p><hr>";
    let target = vec![
        Node::element("p", Attributes::empty(), "one<br>two<!-- x -->"),
        Node::element("hr", Attributes::empty(), ""),
    ];
    assert_eq!(parse(data), Ok(target));
}

#[cfg(test)]
#[test]
fn test_parse_open_tag_forms() {
    let data = "<DIV Id='Main'>x</div>";
    assert_eq!(
        parse(data),
        Ok(vec![Node::element("div", attributes!("Id" => "Main"), "x")])
    );
    assert_eq!(
        parse("<br/>"),
        Ok(vec![Node::element("br", Attributes::empty(), "")])
    );
    assert_eq!(
        parse("<input type='checkbox' checked />"),
        Ok(vec![Node::element(
            "input",
            attributes!("type" => "checkbox", "checked" => ""),
            ""
        )])
    );
    assert_eq!(
        parse("<a href=/docs/>x</a>"),
        Ok(vec![Node::element("a", attributes!("href" => "/docs/"), "x")])
    );
}

#[cfg(test)]
#[test]
fn test_parse_malformed() {
    assert_eq!(
        parse("<html></closing><opening></html>"),
        Err(ScanError::TagMismatch {
            expected: "html".to_string(),
            found: "</closing>".to_string(),
            position: 15,
        })
    );
    assert_eq!(
        parse("<a<b>"),
        Err(ScanError::UnexpectedOpen { position: 2 })
    );
    assert_eq!(
        parse("a > b"),
        Err(ScanError::UnexpectedClose { position: 2 })
    );
    assert_eq!(
        parse("text</p>"),
        Err(ScanError::TagMismatch {
            expected: String::new(),
            found: "</p>".to_string(),
            position: 7,
        })
    );
    assert_eq!(parse("ok <p"), Err(ScanError::UnclosedTag { position: 3 }));
    assert_eq!(
        parse("<p>a</p><div>b"),
        Err(ScanError::UnclosedTag { position: 8 })
    );
}

#[cfg(test)]
#[test]
fn test_comment_body() {
    assert_eq!(comment_body("hello-->"), "hello");
    assert_eq!(comment_body("-->"), "");
    assert_eq!(comment_body(">"), "");
    assert_eq!(comment_body("x>"), "x");
}

#[cfg(test)]
#[test]
fn test_attribute_text() {
    assert_eq!(attribute_text(" src='a' >"), "src='a'");
    assert_eq!(attribute_text("/>"), "");
    assert_eq!(attribute_text(" a='1'/>"), "a='1'");
    assert_eq!(attribute_text(" checked />"), "checked");
    assert_eq!(attribute_text(" href=x/>"), "href=x/");
    assert_eq!(attribute_text(">"), "");
}
