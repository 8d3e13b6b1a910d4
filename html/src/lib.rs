//! A shallow markup scanner.
//!
//! [`parse`] turns a string of HTML-like markup into its top-level [`Node`]s
//! without descending into elements: nested markup is kept verbatim in
//! [`Node::inner_content`]. Re-scan that content to go one level deeper.

mod attributes;
mod dom;
mod error;
mod parsing;
mod tag;
mod void;

pub use attributes::parse_attributes;
pub use dom::{Attributes, Node, NodeKind, COMMENT_MARKER};
pub use error::ScanError;
pub use parsing::parse;
pub use tag::extract_tag_name;
pub use void::is_void_tag;

#[cfg(test)]
mod tests;
