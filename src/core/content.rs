//! # Content Store
//!
//! Read-only learning material: one `ContentRecord` per topic plus a single
//! glossary reachable through the reserved [`GLOSSARY_KEY`].
//!
//! The store is parsed from TOML once at startup and validated before the UI
//! ever sees it. After that it is never mutated, so every lookup that starts
//! from one of the store's own keys is guaranteed to resolve.
//!
//! ```text
//! ContentStore
//! ├── initial_topic: String
//! ├── channels: Channels              // display names for video slots
//! ├── glossary: GlossaryRecord        // key "glossary"
//! └── topics: Vec<ContentRecord>      // sidebar order
//!     ├── explanation / code_sample / diagram
//!     └── tips? comparison? quiz? videos? review_question?
//! ```

use log::{debug, info};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::quiz::MAX_OPTIONS;

/// Reserved key under which the glossary is selectable.
pub const GLOSSARY_KEY: &str = "glossary";

/// Content shipped with the binary.
pub const BUNDLED_CONTENT: &str = include_str!("../../content/oop.toml");

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentRecord {
    pub key: String,
    pub title: String,
    pub explanation: String,
    pub code_sample: String,
    pub diagram: String,
    #[serde(default)]
    pub tips: Option<String>,
    #[serde(default)]
    pub comparison: Option<ComparisonTable>,
    #[serde(default)]
    pub quiz: Option<QuizSpec>,
    #[serde(default)]
    pub videos: Option<VideoRefs>,
    #[serde(default)]
    pub review_question: Option<String>,
}

impl ContentRecord {
    /// Short sidebar label: the title up to its first `:`.
    pub fn nav_label(&self) -> &str {
        self.title
            .split(':')
            .next()
            .map(str::trim)
            .unwrap_or(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizSpec {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoRefs {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
}

impl VideoRefs {
    /// Blank identifiers count as missing.
    fn normalize(&mut self) {
        for slot in [&mut self.primary, &mut self.secondary] {
            if slot.as_deref().is_some_and(|id| id.trim().is_empty()) {
                *slot = None;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Channels {
    #[serde(default = "default_primary_channel")]
    pub primary: String,
    #[serde(default = "default_secondary_channel")]
    pub secondary: String,
}

impl Default for Channels {
    fn default() -> Self {
        Self {
            primary: default_primary_channel(),
            secondary: default_secondary_channel(),
        }
    }
}

fn default_primary_channel() -> String {
    "Primary".to_string()
}

fn default_secondary_channel() -> String {
    "Secondary".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlossaryRecord {
    pub title: String,
    #[serde(default)]
    pub terms: Vec<GlossaryTerm>,
}

// ============================================================================
// Store
// ============================================================================

/// Raw file layout. Only `ContentStore::parse` turns this into a store.
#[derive(Deserialize)]
struct ContentFile {
    initial_topic: Option<String>,
    #[serde(default)]
    channels: Channels,
    glossary: GlossaryRecord,
    #[serde(default)]
    topics: Vec<ContentRecord>,
}

/// A resolved position in the store. Only produced by [`ContentStore::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Topic(usize),
    Glossary,
}

/// What a selection points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    Topic(&'a ContentRecord),
    Glossary(&'a GlossaryRecord),
}

#[derive(Debug, Clone)]
pub struct ContentStore {
    topics: Vec<ContentRecord>,
    glossary: GlossaryRecord,
    initial_topic: String,
    channels: Channels,
}

impl ContentStore {
    /// The store compiled into the binary.
    pub fn bundled() -> Result<Self, ContentError> {
        Self::parse(BUNDLED_CONTENT)
    }

    /// Load and validate a content file from disk.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let contents = fs::read_to_string(path).map_err(ContentError::Io)?;
        let store = Self::parse(&contents)?;
        info!(
            "Loaded {} topics from {}",
            store.topics.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parse and validate a TOML content document.
    pub fn parse(source: &str) -> Result<Self, ContentError> {
        let file: ContentFile = toml::from_str(source).map_err(ContentError::Parse)?;
        let mut topics = file.topics;
        for topic in &mut topics {
            if let Some(videos) = topic.videos.as_mut() {
                videos.normalize();
            }
        }

        let initial_topic = match file.initial_topic {
            Some(key) => key,
            None => topics
                .first()
                .map(|t| t.key.clone())
                .ok_or(ContentError::NoTopics)?,
        };

        let store = Self {
            topics,
            glossary: file.glossary,
            initial_topic,
            channels: file.channels,
        };
        store.validate()?;
        debug!(
            "Content store ready: {} topics, {} glossary terms",
            store.topics.len(),
            store.glossary.terms.len()
        );
        Ok(store)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.topics.is_empty() {
            return Err(ContentError::NoTopics);
        }

        for (index, topic) in self.topics.iter().enumerate() {
            if topic.key.trim().is_empty() {
                return Err(ContentError::EmptyKey { index });
            }
            if topic.key == GLOSSARY_KEY {
                return Err(ContentError::ReservedKey(topic.key.clone()));
            }
            if self.topics[..index].iter().any(|t| t.key == topic.key) {
                return Err(ContentError::DuplicateKey(topic.key.clone()));
            }

            if let Some(table) = &topic.comparison {
                for (row, cells) in table.rows.iter().enumerate() {
                    if cells.len() != table.headers.len() {
                        return Err(ContentError::RaggedRow {
                            key: topic.key.clone(),
                            row,
                            expected: table.headers.len(),
                            found: cells.len(),
                        });
                    }
                }
            }

            if let Some(quiz) = &topic.quiz {
                if quiz.options.is_empty() {
                    return Err(ContentError::EmptyQuiz(topic.key.clone()));
                }
                if quiz.options.len() > MAX_OPTIONS {
                    return Err(ContentError::TooManyOptions {
                        key: topic.key.clone(),
                        count: quiz.options.len(),
                    });
                }
                if !quiz.options.iter().any(|o| o == &quiz.answer) {
                    return Err(ContentError::AnswerNotInOptions {
                        key: topic.key.clone(),
                        answer: quiz.answer.clone(),
                    });
                }
            }
        }

        if self.resolve(&self.initial_topic).is_none() {
            return Err(ContentError::UnknownInitialTopic(self.initial_topic.clone()));
        }
        Ok(())
    }

    /// Look up a key, returning the topic or the glossary.
    pub fn get(&self, key: &str) -> Option<Entry<'_>> {
        self.resolve(key).map(|selection| self.entry(selection))
    }

    /// Turn a key into a selection. `None` for keys the store doesn't know.
    pub fn resolve(&self, key: &str) -> Option<Selection> {
        if key == GLOSSARY_KEY {
            return Some(Selection::Glossary);
        }
        self.topics
            .iter()
            .position(|t| t.key == key)
            .map(Selection::Topic)
    }

    pub fn entry(&self, selection: Selection) -> Entry<'_> {
        match selection {
            Selection::Topic(index) => Entry::Topic(&self.topics[index]),
            Selection::Glossary => Entry::Glossary(&self.glossary),
        }
    }

    /// Key of a selection.
    pub fn key_of(&self, selection: Selection) -> &str {
        match selection {
            Selection::Topic(index) => &self.topics[index].key,
            Selection::Glossary => GLOSSARY_KEY,
        }
    }

    /// Every selectable key in navigation order (topics, then the glossary).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.topics
            .iter()
            .map(|t| t.key.as_str())
            .chain(std::iter::once(GLOSSARY_KEY))
    }

    /// Every selection in navigation order.
    pub fn selections(&self) -> impl Iterator<Item = Selection> + '_ {
        (0..self.topics.len())
            .map(Selection::Topic)
            .chain(std::iter::once(Selection::Glossary))
    }

    /// Position of a selection in navigation order.
    pub fn position(&self, selection: Selection) -> usize {
        match selection {
            Selection::Topic(index) => index,
            Selection::Glossary => self.topics.len(),
        }
    }

    /// Selection at a navigation position, wrapping around.
    pub fn at_position(&self, position: usize) -> Selection {
        let position = position % self.entry_count();
        if position < self.topics.len() {
            Selection::Topic(position)
        } else {
            Selection::Glossary
        }
    }

    /// Number of selectable entries, glossary included.
    pub fn entry_count(&self) -> usize {
        self.topics.len() + 1
    }

    pub fn topics(&self) -> &[ContentRecord] {
        &self.topics
    }

    pub fn glossary(&self) -> &GlossaryRecord {
        &self.glossary
    }

    pub fn initial_topic(&self) -> &str {
        &self.initial_topic
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// Sidebar label for a selection.
    pub fn label(&self, selection: Selection) -> &str {
        match self.entry(selection) {
            Entry::Topic(record) => record.nav_label(),
            Entry::Glossary(glossary) => &glossary.title,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ContentError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    NoTopics,
    EmptyKey { index: usize },
    ReservedKey(String),
    DuplicateKey(String),
    RaggedRow {
        key: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    EmptyQuiz(String),
    TooManyOptions { key: String, count: usize },
    AnswerNotInOptions { key: String, answer: String },
    UnknownInitialTopic(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Io(e) => write!(f, "content I/O error: {e}"),
            ContentError::Parse(e) => write!(f, "content parse error: {e}"),
            ContentError::NoTopics => write!(f, "content defines no topics"),
            ContentError::EmptyKey { index } => write!(f, "topic #{index} has an empty key"),
            ContentError::ReservedKey(key) => {
                write!(f, "topic key '{key}' is reserved for the glossary")
            }
            ContentError::DuplicateKey(key) => write!(f, "duplicate topic key '{key}'"),
            ContentError::RaggedRow {
                key,
                row,
                expected,
                found,
            } => write!(
                f,
                "topic '{key}': comparison row {row} has {found} cells, expected {expected}"
            ),
            ContentError::EmptyQuiz(key) => write!(f, "topic '{key}': quiz has no options"),
            ContentError::TooManyOptions { key, count } => write!(
                f,
                "topic '{key}': quiz has {count} options, at most {MAX_OPTIONS} are supported"
            ),
            ContentError::AnswerNotInOptions { key, answer } => write!(
                f,
                "topic '{key}': quiz answer '{answer}' is not one of the options"
            ),
            ContentError::UnknownInitialTopic(key) => {
                write!(f, "initial topic '{key}' does not exist")
            }
        }
    }
}

impl std::error::Error for ContentError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MINIMAL_CONTENT;

    #[test]
    fn bundled_content_is_valid() {
        let store = ContentStore::bundled().unwrap();
        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(
            keys,
            vec![
                "intro",
                "encapsulation",
                "inheritance",
                "polymorphism",
                "abstraction",
                GLOSSARY_KEY
            ]
        );
        assert_eq!(store.initial_topic(), "intro");
        assert_eq!(store.glossary().title, "OOP Glossary");
        assert_eq!(store.glossary().terms.len(), 12);
        assert_eq!(store.channels().primary, "Kunal Kushwaha");
    }

    #[test]
    fn every_key_resolves_to_its_own_record() {
        let store = ContentStore::bundled().unwrap();
        for key in store.keys() {
            match store.get(key) {
                Some(Entry::Topic(record)) => assert_eq!(record.key, key),
                Some(Entry::Glossary(_)) => assert_eq!(key, GLOSSARY_KEY),
                None => panic!("key {key} did not resolve"),
            }
        }
    }

    #[test]
    fn unknown_key_does_not_resolve() {
        let store = ContentStore::bundled().unwrap();
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn nav_label_stops_at_colon() {
        let store = ContentStore::bundled().unwrap();
        assert_eq!(store.topics()[0].nav_label(), "Introduction to OOP");
        assert_eq!(store.topics()[1].nav_label(), "Encapsulation");
        assert_eq!(store.label(Selection::Glossary), "OOP Glossary");
    }

    #[test]
    fn position_wraps_around() {
        let store = ContentStore::parse(MINIMAL_CONTENT).unwrap();
        assert_eq!(store.entry_count(), 3);
        assert_eq!(store.at_position(2), Selection::Glossary);
        assert_eq!(store.at_position(3), Selection::Topic(0));
        assert_eq!(store.position(Selection::Glossary), 2);
    }

    #[test]
    fn initial_topic_defaults_to_first() {
        let source = MINIMAL_CONTENT.replace("initial_topic = \"alpha\"\n", "");
        let store = ContentStore::parse(&source).unwrap();
        assert_eq!(store.initial_topic(), "alpha");
    }

    #[test]
    fn blank_video_ids_are_absent() {
        let source = MINIMAL_CONTENT.replace("primary = \"AAA\"", "primary = \"  \"");
        let store = ContentStore::parse(&source).unwrap();
        let videos = store.topics()[0].videos.as_ref().unwrap();
        assert_eq!(videos.primary, None);
        assert_eq!(videos.secondary.as_deref(), Some("BBB"));
    }

    #[test]
    fn rejects_answer_outside_options() {
        let source = MINIMAL_CONTENT.replace("answer = \"yes\"", "answer = \"maybe\"");
        let err = ContentStore::parse(&source).unwrap_err();
        assert!(matches!(err, ContentError::AnswerNotInOptions { .. }));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn rejects_quiz_with_more_options_than_keys() {
        // Ten options with the answer last: the tenth has no digit key
        let options: Vec<String> = (1..=9).map(|i| format!("\"no{i}\"")).collect();
        let source = MINIMAL_CONTENT.replace(
            "options = [\"yes\", \"no\"]",
            &format!("options = [{}, \"yes\"]", options.join(", ")),
        );
        let err = ContentStore::parse(&source).unwrap_err();
        assert!(matches!(
            err,
            ContentError::TooManyOptions { ref key, count: 10 } if key == "alpha"
        ));
        assert!(err.to_string().contains("at most 9"));
    }

    #[test]
    fn accepts_quiz_with_nine_options() {
        let options: Vec<String> = (1..=8).map(|i| format!("\"no{i}\"")).collect();
        let source = MINIMAL_CONTENT.replace(
            "options = [\"yes\", \"no\"]",
            &format!("options = [{}, \"yes\"]", options.join(", ")),
        );
        assert!(ContentStore::parse(&source).is_ok());
    }

    #[test]
    fn rejects_ragged_rows() {
        let source = MINIMAL_CONTENT.replace("[\"1\", \"2\"]", "[\"1\"]");
        let err = ContentStore::parse(&source).unwrap_err();
        match err {
            ContentError::RaggedRow {
                row,
                expected,
                found,
                ..
            } => {
                assert_eq!(row, 0);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_reserved_key() {
        let source = MINIMAL_CONTENT.replace("key = \"beta\"", "key = \"glossary\"");
        assert!(matches!(
            ContentStore::parse(&source),
            Err(ContentError::ReservedKey(_))
        ));
    }

    #[test]
    fn rejects_duplicate_key() {
        let source = MINIMAL_CONTENT.replace("key = \"beta\"", "key = \"alpha\"");
        assert!(matches!(
            ContentStore::parse(&source),
            Err(ContentError::DuplicateKey(_))
        ));
    }

    #[test]
    fn rejects_unknown_initial_topic() {
        let source = MINIMAL_CONTENT.replace("initial_topic = \"alpha\"", "initial_topic = \"zeta\"");
        assert!(matches!(
            ContentStore::parse(&source),
            Err(ContentError::UnknownInitialTopic(_))
        ));
    }

    #[test]
    fn glossary_is_a_valid_initial_topic() {
        let source =
            MINIMAL_CONTENT.replace("initial_topic = \"alpha\"", "initial_topic = \"glossary\"");
        let store = ContentStore::parse(&source).unwrap();
        assert_eq!(store.resolve(store.initial_topic()), Some(Selection::Glossary));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            ContentStore::parse("topics = ["),
            Err(ContentError::Parse(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ContentStore::load(Path::new("/nonexistent/oophub/content.toml")).unwrap_err();
        assert!(matches!(err, ContentError::Io(_)));
    }
}
