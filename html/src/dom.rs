use std::collections::hash_map::Iter;
use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::error::ScanError;
use crate::parsing::parse;
use crate::void::is_void_tag;

/// Tag name given to comment nodes. Not a real element name, so it can never
/// collide with one produced by [`extract_tag_name`](crate::extract_tag_name)
pub const COMMENT_MARKER: &str = "!--";

pub(crate) const COMMENT_OPEN: &str = "<!--";
pub(crate) const COMMENT_CLOSE: &str = "-->";

/// A single top-level construct found by one scan
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Node {
    pub tag: String,
    pub attributes: Attributes,
    /// Raw markup between the open and close tags, never parsed further
    pub inner_content: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NodeKind {
    Text,
    Comment,
    Void,
    Element,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Attributes(pub HashMap<String, String>);

impl Attributes {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.0.get(name)
    }

    /// Insert an attribute, replacing any earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.0.iter()
    }

    /// Attributes ordered by name
    fn sorted(&self) -> Vec<(&String, &String)> {
        let mut pairs: Vec<_> = self.0.iter().collect();
        pairs.sort();
        pairs
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Build an [`Attributes`] map from `name => value` pairs.
/// Bare identifiers are stringified, so `attributes!(lang => en)` works too.
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::Attributes::empty()
    };
    ($($k:ident => $v:ident),+ $(,)?) => {
        $crate::Attributes::from_iter([$((stringify!($k), stringify!($v))),+])
    };
    ($($k:literal => $v:literal),+ $(,)?) => {
        $crate::Attributes::from_iter([$(($k, $v)),+])
    };
}

impl Node {
    /// An empty element with a lowercased tag
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self::element(tag.as_ref().to_lowercase(), Attributes::empty(), "")
    }

    pub fn text(data: impl Into<String>) -> Self {
        Self::element("", Attributes::empty(), data)
    }

    pub fn comment(body: impl Into<String>) -> Self {
        Self::element(COMMENT_MARKER, Attributes::empty(), body)
    }

    pub fn element(
        tag: impl Into<String>,
        attributes: Attributes,
        inner_content: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            inner_content: inner_content.into(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.tag.as_str() {
            "" => NodeKind::Text,
            COMMENT_MARKER => NodeKind::Comment,
            tag if is_void_tag(tag) => NodeKind::Void,
            _ => NodeKind::Element,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind() == NodeKind::Text
    }

    pub fn is_comment(&self) -> bool {
        self.kind() == NodeKind::Comment
    }

    pub fn is_void(&self) -> bool {
        self.kind() == NodeKind::Void
    }

    pub fn get_attribute(&self, name: &str) -> Option<&String> {
        self.attributes.get(name)
    }

    /// Scan one level into this node's inner content.
    /// Text, comment and void nodes have no children.
    pub fn children(&self) -> Result<Vec<Node>, ScanError> {
        match self.kind() {
            NodeKind::Element => parse(&self.inner_content),
            _ => Ok(vec![]),
        }
    }

    /// Markup for this node, the inverse of a single scan step
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// `<tag` followed by the attributes, without the closing bracket
    pub fn open_tag(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in self.attributes.sorted() {
            out.push(' ');
            out.push_str(name);
            if value.contains('\'') {
                out.push_str(&format!("=\"{}\"", value));
            } else if !value.is_empty() {
                out.push_str(&format!("='{}'", value));
            }
        }
        out
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Text => f.write_str(&self.inner_content),
            NodeKind::Comment => {
                write!(f, "{}{}{}", COMMENT_OPEN, self.inner_content, COMMENT_CLOSE)
            }
            NodeKind::Void => write!(f, "{}/>", self.open_tag()),
            NodeKind::Element => write!(
                f,
                "{}>{}</{}>",
                self.open_tag(),
                self.inner_content,
                self.tag
            ),
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::text(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::text(s)
    }
}

#[cfg(test)]
#[test]
fn test_new_node() {
    let node = Node::new("DIV");
    assert_eq!(node.tag, "div");
    assert!(node.attributes.is_empty());
    assert_eq!(node.inner_content, "");
    assert_eq!(node.kind(), NodeKind::Element);
}

#[cfg(test)]
#[test]
fn test_node_kind() {
    assert_eq!(Node::text("hi").kind(), NodeKind::Text);
    assert_eq!(Node::comment("hi").kind(), NodeKind::Comment);
    assert_eq!(Node::new("br").kind(), NodeKind::Void);
    assert_eq!(Node::new("p").kind(), NodeKind::Element);
    assert_eq!(Node::from("plain"), Node::text("plain"));
}

#[cfg(test)]
#[test]
fn test_serialize() {
    assert_eq!(Node::text("hello world").serialize(), "hello world");
    assert_eq!(Node::comment(" note ").serialize(), "<!-- note -->");

    let img = Node::element("img", attributes!("src" => "a.png", "alt" => ""), "");
    assert_eq!(img.serialize(), "<img alt src='a.png'/>");
    assert_eq!(Node::new("br").serialize(), "<br/>");

    let div = Node::element(
        "div",
        attributes!("id" => "main", "class" => "wide"),
        "<p>raw <b>text</b></p>",
    );
    assert_eq!(
        div.serialize(),
        "<div class='wide' id='main'><p>raw <b>text</b></p></div>"
    );
    assert_eq!(Node::new("span").serialize(), "<span></span>");

    let quoted = Node::element("a", attributes!("title" => "it's"), "x");
    assert_eq!(quoted.serialize(), r#"<a title="it's">x</a>"#);
}

#[cfg(test)]
#[test]
fn test_children() {
    let node = Node::element("ul", Attributes::empty(), "<li>a</li><li>b</li>");
    let children = node.children().unwrap();
    assert_eq!(
        children,
        vec![
            Node::element("li", Attributes::empty(), "a"),
            Node::element("li", Attributes::empty(), "b"),
        ]
    );
    assert_eq!(Node::text("<li>a</li>").children(), Ok(vec![]));
    assert_eq!(Node::comment("<li>a</li>").children(), Ok(vec![]));
}

#[cfg(test)]
#[test]
fn test_attributes_macro() {
    let target = Attributes(HashMap::from([
        ("lang".to_string(), "en".to_string()),
        ("dir".to_string(), "ltr".to_string()),
    ]));
    assert_eq!(attributes!(lang => en, dir => ltr), target);
    assert_eq!(attributes!("lang" => "en", "dir" => "ltr"), target);
    assert_eq!(attributes!(), Attributes::empty());
}
