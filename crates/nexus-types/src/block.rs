use serde::{Deserialize, Serialize};

/// Language tag used when a fence declares none
pub const DEFAULT_CODE_LANGUAGE: &str = "text";

/// One structured unit of parsed assistant markup, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayBlock {
    Paragraph { text: String },
    Spacer,
    Header { text: String },
    Subheader { text: String },
    BulletItem { text: String },
    CodeBlock { language: String, code: String },
}

impl DisplayBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        DisplayBlock::Paragraph { text: text.into() }
    }

    pub fn header(text: impl Into<String>) -> Self {
        DisplayBlock::Header { text: text.into() }
    }

    pub fn subheader(text: impl Into<String>) -> Self {
        DisplayBlock::Subheader { text: text.into() }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        DisplayBlock::BulletItem { text: text.into() }
    }

    pub fn code(language: impl Into<String>, code: impl Into<String>) -> Self {
        DisplayBlock::CodeBlock {
            language: language.into(),
            code: code.into(),
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, DisplayBlock::CodeBlock { .. })
    }
}
