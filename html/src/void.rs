use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Elements that never have content and close themselves
    static ref VOID_TAGS: HashSet<&'static str> = HashSet::from([
        "img", "input", "hr", "area", "link", "br", "meta", "base", "col", "embed", "keygen",
        "param", "source", "track", "wbr",
    ]);
}

/// `name` must already be lowercase, as returned by [`extract_tag_name`](crate::extract_tag_name)
pub fn is_void_tag(name: &str) -> bool {
    VOID_TAGS.contains(name)
}

#[cfg(test)]
#[test]
fn test_void_tags() {
    for tag in ["img", "br", "meta", "wbr", "keygen"] {
        assert!(is_void_tag(tag), "{} should be void", tag);
    }
    for tag in ["div", "p", "", "!--", "IMG"] {
        assert!(!is_void_tag(tag), "{} should not be void", tag);
    }
}
