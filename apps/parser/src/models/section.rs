use serde::{Deserialize, Serialize};

/// The four résumé sections the extractor segments into entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Experience,
    Education,
    Skills,
    Projects,
}

impl SectionType {
    /// Detection order. When two headers start at the same offset, the
    /// earlier type in this list keeps the span.
    pub const DETECTION_ORDER: [SectionType; 4] = [
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
        SectionType::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Experience => "experience",
            SectionType::Education => "education",
            SectionType::Skills => "skills",
            SectionType::Projects => "projects",
        }
    }

    pub fn detection_rank(&self) -> usize {
        Self::DETECTION_ORDER
            .iter()
            .position(|t| t == self)
            .unwrap_or(Self::DETECTION_ORDER.len())
    }
}

/// Byte range of one detected section.
///
/// `start_offset` is the start of the header line, `body_offset` the first
/// byte after it, `end_offset` the start of the next section (or the
/// document length).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpan {
    pub section_type: SectionType,
    pub start_offset: usize,
    pub body_offset: usize,
    pub end_offset: usize,
}

impl SectionSpan {
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.body_offset..self.end_offset).unwrap_or("")
    }
}

/// The decoded résumé text handed over by the file-decoding collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    text: String,
    source_len: usize,
}

impl RawDocument {
    /// Wraps decoded text, folding `\r\n` and lone `\r` line endings to `\n`.
    /// `source_len` keeps the byte length of the text as received.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let source_len = text.len();
        let text = if text.contains('\r') {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text
        };
        Self { text, source_len }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
