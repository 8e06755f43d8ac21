//! Education synonym vocabulary used to recognize column headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::education::Education;

const BACHELOR_SYNONYMS: &[&str] = &[
    "B",
    "BA",
    "BACHELOR",
    "BACHELOR'S",
    "BACHELORS",
    "BACCALAUREATE",
];
const MASTER_SYNONYMS: &[&str] = &["M", "MA", "MASTER", "MASTER'S", "MASTERS", "2M", "CAGS"];
const DOCTORATE_SYNONYMS: &[&str] = &[
    "D",
    "DOC",
    "DOCTOR",
    "DOCTOR'S",
    "DOCTORATE",
    "PHD",
    "EDD",
    "PROV",
];

/// Case-insensitive mapping from header words to education levels.
///
/// Keys are stored upper-cased. Serialized as a plain JSON object
/// (`{"BA": "B", "MASTERS": "M"}`) so alternate tables can be loaded from
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Education>", into = "BTreeMap<String, Education>")]
pub struct EducationVocabulary {
    map: BTreeMap<String, Education>,
}

impl EducationVocabulary {
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Education)>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::empty();
        for (word, education) in entries {
            vocabulary.insert(word, education);
        }
        vocabulary
    }

    /// Adds a synonym; the first mapping for a word wins.
    pub fn insert(&mut self, word: impl AsRef<str>, education: Education) {
        let key = word.as_ref().trim().to_uppercase();
        if key.is_empty() {
            return;
        }
        self.map.entry(key).or_insert(education);
    }

    pub fn get(&self, word: &str) -> Option<&Education> {
        self.map.get(&word.trim().to_uppercase())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Education)> {
        self.map.iter().map(|(word, education)| (word.as_str(), education))
    }
}

impl Default for EducationVocabulary {
    fn default() -> Self {
        let mut vocabulary = Self::empty();
        for word in BACHELOR_SYNONYMS {
            vocabulary.insert(word, Education::Bachelor);
        }
        for word in MASTER_SYNONYMS {
            vocabulary.insert(word, Education::Master);
        }
        for word in DOCTORATE_SYNONYMS {
            vocabulary.insert(word, Education::Doctorate);
        }
        vocabulary
    }
}

impl From<BTreeMap<String, Education>> for EducationVocabulary {
    fn from(map: BTreeMap<String, Education>) -> Self {
        Self::new(map)
    }
}

impl From<EducationVocabulary> for BTreeMap<String, Education> {
    fn from(vocabulary: EducationVocabulary) -> Self {
        vocabulary.map
    }
}
