use super::*;
use crate::attributes;

#[test]
fn test_single_element() {
    let nodes = parse("<Section data='v'>text</Section>").unwrap();
    assert_eq!(
        nodes,
        vec![Node::element("section", attributes!("data" => "v"), "text")]
    );
}

#[test]
fn test_round_trip() {
    for input in [
        "<div attr='v'>text</div>",
        r#"<span title="a b">x</span>"#,
        r#"<a title="it's">x</a>"#,
        "<p hidden>inner <b>bold</b></p>",
        "<img src=a.png>",
        "<!--note-->",
        "plain text",
    ] {
        let first = parse(input).unwrap();
        assert_eq!(first.len(), 1, "{}", input);
        let again = parse(&first[0].serialize()).unwrap();
        assert_eq!(again, first, "{}", input);
    }
}

#[test]
fn test_void_ignores_following_content() {
    let nodes = parse("<img src='cat.png'>caption").unwrap();
    assert_eq!(
        nodes,
        vec![
            Node::element("img", attributes!("src" => "cat.png"), ""),
            Node::text("caption"),
        ]
    );
    assert!(nodes[0].is_void());
    assert_eq!(nodes[0].inner_content, "");
}

#[test]
fn test_comment() {
    let nodes = parse("<!--hello-->").unwrap();
    assert_eq!(nodes, vec![Node::comment("hello")]);
    assert_eq!(nodes[0].tag, COMMENT_MARKER);
    assert!(nodes[0].attributes.is_empty());
}

#[test]
fn test_mismatch() {
    let err = parse("<div>text</span>").unwrap_err();
    assert_eq!(
        err,
        ScanError::TagMismatch {
            expected: "div".to_string(),
            found: "</span>".to_string(),
            position: 15,
        }
    );
    assert_eq!(err.position(), 15);
}

#[test]
fn test_unclosed() {
    assert!(matches!(
        parse("<div>text"),
        Err(ScanError::UnclosedTag { .. })
    ));
    assert!(matches!(
        parse("<div"),
        Err(ScanError::UnclosedTag { position: 0 })
    ));
}

#[test]
fn test_attributes() {
    assert_eq!(
        parse_attributes(r#" a b='x' c="y" d=z "#),
        attributes!("a" => "", "b" => "x", "c" => "y", "d" => "z")
    );
}

#[test]
fn test_nested_same_name() {
    let nodes = parse("<div><div>inner</div></div>").unwrap();
    assert_eq!(
        nodes,
        vec![Node::element("div", Attributes::empty(), "<div>inner</div>")]
    );
    let children = nodes[0].children().unwrap();
    assert_eq!(
        children,
        vec![Node::element("div", Attributes::empty(), "inner")]
    );
    assert_eq!(children[0].children().unwrap(), vec![Node::text("inner")]);
}

#[test]
fn test_plain_text() {
    let nodes = parse("hello world").unwrap();
    assert_eq!(nodes, vec![Node::text("hello world")]);
    assert!(nodes[0].is_text());
    assert_eq!(nodes[0].tag, "");
}

#[test]
fn test_document() {
    let i = r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8"/>
        <title>The minimal, valid HTML5 document</title>
    </head>
    <body>
        <!-- User-visible content goes in the body -->
        <p>Some paragraph</p>
        Some untagged text
    </body>
</html>"#;
    // The doctype is an ordinary opening tag here, so it swallows the rest
    assert!(matches!(parse(i), Err(ScanError::UnclosedTag { position: 0 })));

    let body = &i[i.find("<html").unwrap()..];
    let nodes = parse(body).unwrap();
    assert_eq!(nodes.len(), 1);
    let html = &nodes[0];
    assert_eq!(html.tag, "html");
    assert_eq!(html.get_attribute("lang"), Some(&"en".to_string()));

    let children: Vec<Node> = html
        .children()
        .unwrap()
        .into_iter()
        .filter(|n| !(n.is_text() && n.inner_content.trim().is_empty()))
        .collect();
    assert_eq!(
        children.iter().map(|n| n.tag.as_str()).collect::<Vec<_>>(),
        vec!["head", "body"]
    );

    let head = children[0].children().unwrap();
    let meta = head.iter().find(|n| n.tag == "meta").unwrap();
    assert_eq!(meta.attributes, attributes!("charset" => "utf-8"));
    let title = head.iter().find(|n| n.tag == "title").unwrap();
    assert_eq!(title.inner_content, "The minimal, valid HTML5 document");

    let body = children[1].children().unwrap();
    assert!(body
        .iter()
        .any(|n| n.is_comment() && n.inner_content == " User-visible content goes in the body "));
    assert!(body
        .iter()
        .any(|n| n.is_text() && n.inner_content.trim() == "Some untagged text"));
}

#[test]
fn test_extract_tag_name() {
    assert_eq!(extract_tag_name("<TABLE border=1>"), "table");
    assert_eq!(extract_tag_name("<!--x-->"), COMMENT_MARKER);
    assert!(is_void_tag(&extract_tag_name("<BR>")));
}

#[test]
fn test_multibyte_text() {
    let nodes = parse("<p title='é'>ü<br>ß</p>é").unwrap();
    assert_eq!(
        nodes,
        vec![
            Node::element("p", attributes!("title" => "é"), "ü<br>ß"),
            Node::text("é"),
        ]
    );
    // Positions are byte offsets: 'é' takes two bytes
    assert_eq!(
        parse("é>"),
        Err(ScanError::UnexpectedClose { position: 2 })
    );
    assert_eq!(
        parse("<p>ü</q>"),
        Err(ScanError::TagMismatch {
            expected: "p".to_string(),
            found: "</q>".to_string(),
            position: 8,
        })
    );
}
