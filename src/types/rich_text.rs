use serde::{Deserialize, Serialize};

/// One run of rich text.
///
/// Styling and mention payloads are dropped during conversion; an exported
/// document only ever needs the run's plain text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichTextItem {
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item. Used by builders, tests and
    /// adapters:
    /// ```ignore
    /// RichTextItem::plain_text("hello")
    /// ```
    pub fn plain_text(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            href: None,
        }
    }
}
