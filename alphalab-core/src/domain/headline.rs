//! Headline — a news item as plain text with an optional source label.

use serde::{Deserialize, Serialize};

/// One news headline. No ordering guarantee beyond the order supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub text: String,
    pub source: Option<String>,
}

impl Headline {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    pub fn with_source(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: Some(source.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let h = Headline::new("Acme beats earnings estimates");
        assert_eq!(h.source, None);
        let h = Headline::with_source("Acme beats earnings estimates", "wire");
        assert_eq!(h.source.as_deref(), Some("wire"));
    }
}
