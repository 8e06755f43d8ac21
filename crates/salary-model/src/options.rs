//! Configuration options for parsing, resolving and editing.

use serde::{Deserialize, Serialize};

use crate::vocabulary::EducationVocabulary;

/// Number of data lines inspected when inferring the column count.
pub const DEFAULT_PROBE_LINES: usize = 10;

/// Options for the clipboard table parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Header words recognized as education levels.
    #[serde(default)]
    pub vocabulary: EducationVocabulary,

    /// Data lines scanned to infer how many salary columns the table has.
    #[serde(default = "default_probe_lines")]
    pub probe_lines: usize,
}

fn default_probe_lines() -> usize {
    DEFAULT_PROBE_LINES
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            vocabulary: EducationVocabulary::default(),
            probe_lines: DEFAULT_PROBE_LINES,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(mut self, vocabulary: EducationVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_probe_lines(mut self, probe_lines: usize) -> Self {
        self.probe_lines = probe_lines.max(1);
        self
    }
}

/// How a missing or calculated cell is resolved to an authoritative one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveStrategy {
    /// Follow the cell's `calculated_from` pointer only.
    Provenance,
    /// Search leftward through columns and downward through steps.
    Search,
    /// Follow the pointer when present and usable, otherwise search.
    #[default]
    ProvenanceThenSearch,
}

impl ResolveStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provenance => "provenance",
            Self::Search => "search",
            Self::ProvenanceThenSearch => "provenance-then-search",
        }
    }

    pub fn uses_provenance(&self) -> bool {
        matches!(self, Self::Provenance | Self::ProvenanceThenSearch)
    }

    pub fn uses_search(&self) -> bool {
        matches!(self, Self::Search | Self::ProvenanceThenSearch)
    }
}

/// Options for the cell resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolveOptions {
    pub strategy: ResolveStrategy,
}

impl ResolveOptions {
    pub fn new(strategy: ResolveStrategy) -> Self {
        Self { strategy }
    }

    pub fn provenance_only() -> Self {
        Self::new(ResolveStrategy::Provenance)
    }

    pub fn search_only() -> Self {
        Self::new(ResolveStrategy::Search)
    }
}

/// Options for building edit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditOptions {
    /// Stop at the first invalid cell instead of collecting every error.
    pub fail_fast: bool,
}

impl EditOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_fast() -> Self {
        Self { fail_fast: true }
    }
}
