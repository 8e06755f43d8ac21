//! Education levels and the schedule columns keyed by them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Degree level of a salary schedule column.
///
/// Values outside B/M/D are kept verbatim so that unrecognized backend data
/// survives a round trip. Ordering follows display order: B, M, D, then any
/// other level lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Education {
    Bachelor,
    Master,
    Doctorate,
    Other(String),
}

impl Education {
    /// Short code used in column keys and API payloads.
    pub fn code(&self) -> &str {
        match self {
            Self::Bachelor => "B",
            Self::Master => "M",
            Self::Doctorate => "D",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Education {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "B" => Self::Bachelor,
            "M" => Self::Master,
            "D" => Self::Doctorate,
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for Education {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Education> for String {
    fn from(value: Education) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Builds the display key of a column: `B`, `M+30`, `D`.
pub fn column_key(education: &Education, credits: u32) -> String {
    if credits > 0 {
        format!("{education}+{credits}")
    } else {
        education.to_string()
    }
}

/// Semantic identity of a column within a schedule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnId {
    pub education: Education,
    #[serde(default)]
    pub credits: u32,
}

impl ColumnId {
    pub fn new(education: Education, credits: u32) -> Self {
        Self { education, credits }
    }

    pub fn key(&self) -> String {
        column_key(&self.education, self.credits)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// A parsed schedule column.
///
/// `key` is normally derived from `education` and `credits`, but may carry a
/// `_N` suffix when two headers resolve to the same column, or be a `ColN`
/// placeholder when a header could not be recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub education: Education,
    pub credits: u32,
    pub key: String,
}

impl Column {
    pub fn new(education: Education, credits: u32) -> Self {
        let key = column_key(&education, credits);
        Self {
            education,
            credits,
            key,
        }
    }

    /// Placeholder for the 1-based column `position` whose header was not understood.
    pub fn placeholder(position: usize) -> Self {
        Self {
            education: Education::Bachelor,
            credits: 0,
            key: format!("Col{position}"),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn id(&self) -> ColumnId {
        ColumnId::new(self.education.clone(), self.credits)
    }

    pub fn is_placeholder(&self) -> bool {
        self.key
            .strip_prefix("Col")
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|ch| ch.is_ascii_digit()))
    }
}
