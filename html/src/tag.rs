use nom::bytes::complete::{tag, take_till};
use nom::character::complete::alpha1;
use nom::sequence::preceded;
use nom::IResult;

use crate::dom::{COMMENT_MARKER, COMMENT_OPEN};

fn parse_comment_open(input: &str) -> IResult<&str, &str> {
    tag(COMMENT_OPEN)(input)
}

/// Skip anything that isn't an ASCII letter, then take the first run of letters
fn parse_tag_name(input: &str) -> IResult<&str, &str> {
    preceded(take_till(|c: char| c.is_ascii_alphabetic()), alpha1)(input)
}

/// Split a raw tag token into its lowercase name and the text following the name.
/// Comments yield [`COMMENT_MARKER`] and the text after the comment opener.
pub(crate) fn split_tag(token: &str) -> (String, &str) {
    if let Ok((rest, _)) = parse_comment_open(token) {
        return (COMMENT_MARKER.to_string(), rest);
    }
    match parse_tag_name(token) {
        Ok((rest, name)) => (name.to_ascii_lowercase(), rest),
        Err(_) => (String::new(), ""),
    }
}

/// Lowercase name of a raw tag token such as `<DIV class=x>` or `</div>`.
///
/// Returns [`COMMENT_MARKER`] for tokens starting with `<!--` and an empty
/// string when the token contains no letters.
pub fn extract_tag_name(token: &str) -> String {
    split_tag(token).0
}

#[cfg(test)]
#[test]
fn test_extract_tag_name() {
    assert_eq!(extract_tag_name("<div>"), "div");
    assert_eq!(extract_tag_name("<DIV class='x'>"), "div");
    assert_eq!(extract_tag_name("</Span>"), "span");
    assert_eq!(extract_tag_name("<  p>"), "p");
    assert_eq!(extract_tag_name("<br/>"), "br");
    // Only letters count towards the name
    assert_eq!(extract_tag_name("<h1>"), "h");
    assert_eq!(extract_tag_name("<my-widget>"), "my");
    assert_eq!(extract_tag_name("<123>"), "");
    assert_eq!(extract_tag_name("<>"), "");
    assert_eq!(extract_tag_name(""), "");
}

#[cfg(test)]
#[test]
fn test_extract_comment_marker() {
    assert_eq!(extract_tag_name("<!--hello-->"), COMMENT_MARKER);
    assert_eq!(extract_tag_name("<!-- div -->"), COMMENT_MARKER);
    assert_eq!(extract_tag_name("<!DOCTYPE html>"), "doctype");
}

#[cfg(test)]
#[test]
fn test_split_tag() {
    assert_eq!(
        split_tag("<img src='a.png'>"),
        ("img".to_string(), " src='a.png'>")
    );
    assert_eq!(split_tag("</p>"), ("p".to_string(), ">"));
    assert_eq!(split_tag("<!--x-->"), (COMMENT_MARKER.to_string(), "x-->"));
}
