//! Response frame value object

use serde::Serialize;

/// Text received between two prompts, prompt stripped (Value Object)
///
/// Frames keep the adapter's line endings and padding untouched; consumers
/// that care about the payload trim it themselves. An empty frame is valid
/// and occurs when two prompts arrive back to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frame {
    text: String,
}

impl Frame {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
