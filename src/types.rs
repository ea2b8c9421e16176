use serde::{Deserialize, Serialize};

/// A budget in lakhs (blocks of 100,000). The canonical unit for every price
/// in the catalog and every normalized user budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(pub u32);

impl Budget {
    pub fn lakhs(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An Indian mobile number in canonical form: `+91` followed by exactly ten
/// digits, the first of which is 6-9.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Build from a bare ten-digit national number. Returns `None` unless the
    /// input is exactly ten ASCII digits starting with 6-9.
    pub fn from_national(digits: &str) -> Option<Self> {
        if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !matches!(digits.chars().next(), Some('6'..='9')) {
            return None;
        }
        Some(Self(format!("+91{digits}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A conversation transcript as supplied by the orchestration layer.
///
/// Collaborators send histories in loose shapes: role/content turns, bare
/// strings, or whatever else ended up in the array. Entries that carry no
/// text are treated as empty text, never as failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(pub Vec<TranscriptEntry>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_turn(&mut self, role: impl Into<String>, content: impl Into<String>) {
        self.0.push(TranscriptEntry::Turn(ChatTurn {
            role: Some(role.into()),
            content: Some(content.into()),
            text: None,
        }));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.0.push(TranscriptEntry::Text(text.into()));
    }

    /// Flatten all entries into one blob, joined by newlines. The separator
    /// cannot be mistaken for part of a digit run.
    pub fn flatten(&self) -> String {
        self.0
            .iter()
            .map(|e| e.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One transcript entry in any of the tolerated shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranscriptEntry {
    Turn(ChatTurn),
    Text(String),
    Other(serde_json::Value),
}

impl TranscriptEntry {
    /// The entry's text content, or empty for non-text-bearing entries.
    pub fn text(&self) -> &str {
        match self {
            TranscriptEntry::Turn(turn) => turn
                .content
                .as_deref()
                .or(turn.text.as_deref())
                .unwrap_or(""),
            TranscriptEntry::Text(s) => s,
            TranscriptEntry::Other(_) => "",
        }
    }
}

/// A role/text turn. Some producers put the text under `content`, others
/// under `text`; both are accepted, `content` wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatTurn {
    pub role: Option<String>,
    pub content: Option<String>,
    pub text: Option<String>,
}
