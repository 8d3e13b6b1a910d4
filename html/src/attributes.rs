use crate::dom::Attributes;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum State {
    Skip,
    Name,
    Value,
}

/// What ends the value currently being read
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Delimiter {
    Whitespace,
    Quote(char),
}

impl Delimiter {
    fn matches(self, ch: char) -> bool {
        match self {
            Delimiter::Whitespace => ch.is_ascii_whitespace(),
            Delimiter::Quote(q) => ch == q,
        }
    }
}

/// Parse the attribute list of an opening tag, i.e. the text between the tag
/// name and the closing `>`.
///
/// Never fails: anything that doesn't look like an attribute degrades to a
/// best-effort name or value. Valueless attributes map to `""`, an
/// unterminated value keeps whatever was read, and later duplicates win.
pub fn parse_attributes(input: &str) -> Attributes {
    let mut attributes = Attributes::empty();
    let mut state = State::Skip;
    let mut name = String::new();
    let mut value = String::new();
    // Undecided until the first character of a value has been seen
    let mut delimiter: Option<Delimiter> = None;

    for ch in input.chars() {
        match state {
            State::Skip => {
                if !ch.is_ascii_whitespace() {
                    name.clear();
                    name.push(ch);
                    state = State::Name;
                }
            }
            State::Name => {
                if ch == '=' {
                    value.clear();
                    delimiter = None;
                    state = State::Value;
                } else if ch.is_ascii_whitespace() {
                    attributes.insert(name.as_str(), "");
                    state = State::Skip;
                } else {
                    name.push(ch);
                }
            }
            State::Value => match delimiter {
                None if ch == '\'' || ch == '"' => delimiter = Some(Delimiter::Quote(ch)),
                None => {
                    value.push(ch);
                    delimiter = Some(Delimiter::Whitespace);
                }
                Some(d) if d.matches(ch) => {
                    attributes.insert(name.as_str(), value.as_str());
                    state = State::Skip;
                }
                Some(_) => value.push(ch),
            },
        }
    }

    match state {
        State::Name => attributes.insert(name, ""),
        State::Value => attributes.insert(name, value),
        State::Skip => {}
    }
    attributes
}

#[cfg(test)]
use crate::attributes;

#[cfg(test)]
#[test]
fn test_parse_attributes() {
    let target = attributes!("a" => "", "b" => "x", "c" => "y", "d" => "z");
    assert_eq!(parse_attributes(r#" a b='x' c="y" d=z "#), target);

    let target = attributes!(
        "attr1" => "",
        "attr2" => "two",
        "attr3" => "three",
        "attr4" => "number four"
    );
    assert_eq!(
        parse_attributes(r#"attr1 attr2=two attr3='three' attr4="number four""#),
        target
    );
    assert_eq!(parse_attributes(""), attributes!());
    assert_eq!(parse_attributes("   "), attributes!());
}

#[cfg(test)]
#[test]
fn test_parse_attributes_quotes() {
    // The other quote kind is ordinary text inside a quoted value
    assert_eq!(
        parse_attributes(r#"title="it's" alt='say "hi"'"#),
        attributes!("title" => "it's", "alt" => r#"say "hi""#)
    );
    // Quotes only open a value when they come first
    assert_eq!(parse_attributes("a=b'c"), attributes!("a" => "b'c"));
    assert_eq!(parse_attributes("a='' b"), attributes!("a" => "", "b" => ""));
    assert_eq!(parse_attributes(r#"a="""#), attributes!("a" => ""));
}

#[cfg(test)]
#[test]
fn test_parse_attributes_end_of_input() {
    assert_eq!(parse_attributes("a="), attributes!("a" => ""));
    assert_eq!(parse_attributes("a='open"), attributes!("a" => "open"));
    assert_eq!(parse_attributes("a=bare"), attributes!("a" => "bare"));
    assert_eq!(parse_attributes("disabled"), attributes!("disabled" => ""));
    // A non-quote first character always starts an unquoted value, whitespace included
    assert_eq!(parse_attributes("a= b"), attributes!("a" => " b"));
    assert_eq!(parse_attributes("a= b c"), attributes!("a" => " b", "c" => ""));
}

#[cfg(test)]
#[test]
fn test_parse_attributes_case_and_duplicates() {
    assert_eq!(
        parse_attributes("Class=Big ID='Main'"),
        attributes!("Class" => "Big", "ID" => "Main")
    );
    assert_eq!(parse_attributes("a=1 a=2"), attributes!("a" => "2"));
    assert_eq!(
        parse_attributes("a=1\n\tb='2'"),
        attributes!("a" => "1", "b" => "2")
    );
}
