use thiserror::Error;

/// Reasons a scan can fail. Positions are byte offsets into the scanned input.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ScanError {
    /// A `<` inside a tag that is still open
    #[error("unexpected '<' at position {position}")]
    UnexpectedOpen { position: usize },

    /// A `>` with no tag open
    #[error("unexpected '>' at position {position}")]
    UnexpectedClose { position: usize },

    /// A closing tag that does not match the top-level opening tag
    #[error("mismatched end tag '{found}' (expected '{expected}') at position {position}")]
    TagMismatch {
        expected: String,
        found: String,
        position: usize,
    },

    /// Input ended inside a tag, or before the top-level element was closed
    #[error("unclosed tag at position {position}")]
    UnclosedTag { position: usize },
}

impl ScanError {
    pub fn position(&self) -> usize {
        match self {
            ScanError::UnexpectedOpen { position }
            | ScanError::UnexpectedClose { position }
            | ScanError::TagMismatch { position, .. }
            | ScanError::UnclosedTag { position } => *position,
        }
    }
}

#[cfg(test)]
#[test]
fn test_error_message() {
    let err = ScanError::TagMismatch {
        expected: "div".to_string(),
        found: "</span>".to_string(),
        position: 15,
    };
    assert_eq!(
        err.to_string(),
        "mismatched end tag '</span>' (expected 'div') at position 15"
    );
    assert_eq!(err.position(), 15);
    assert_eq!(ScanError::UnclosedTag { position: 3 }.position(), 3);
}
