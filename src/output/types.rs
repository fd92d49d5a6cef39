// src/output/types.rs
//! Type definitions for output operations.

/// A page fully rendered in memory, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub title: String,
    pub body: String,
}

impl RenderedDocument {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Serializes as a top-level heading followed by the body.
    pub fn to_markdown(&self) -> String {
        let mut out = String::with_capacity(self.title.len() + self.body.len() + 4);
        out.push_str("# ");
        out.push_str(&self.title);
        out.push_str("\n\n");
        out.push_str(&self.body);
        out
    }
}
