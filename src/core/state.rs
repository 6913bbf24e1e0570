//! # Application State
//!
//! Core state for the learning hub. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: Arc<ContentStore>      // read-only lesson content
//! ├── selection: Selection          // the one "which topic" variable
//! ├── quiz: Option<QuizState>       // fresh per topic
//! ├── videos: Option<VideoChooser>  // fresh per topic
//! ├── diagram_error: Option<DiagramError> // checked once per topic
//! └── capabilities: Capabilities    // markdown / diagram readiness
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Child renderers get read-only slices of this struct as props.

use std::sync::Arc;

use log::{debug, warn};

use crate::core::capability::{Capabilities, CapabilityKind};
use crate::core::content::{ContentStore, Entry, QuizSpec, Selection};
use crate::core::diagram::{self, DiagramError};
use crate::core::quiz::QuizState;
use crate::core::video::VideoChooser;

pub struct App {
    pub store: Arc<ContentStore>,
    pub selection: Selection,
    pub quiz: Option<QuizState>,
    pub videos: Option<VideoChooser>,
    /// Parse failure of the active topic's diagram, if any.
    pub diagram_error: Option<DiagramError>,
    pub capabilities: Capabilities,
}

impl App {
    /// Open on the content's own initial topic.
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self::with_start_topic(store, None)
    }

    /// Open on `start_topic` if it names a known entry, else the content default.
    pub fn with_start_topic(store: Arc<ContentStore>, start_topic: Option<&str>) -> Self {
        let requested = start_topic.and_then(|key| {
            let resolved = store.resolve(key);
            if resolved.is_none() {
                warn!("Unknown start topic '{key}', using '{}'", store.initial_topic());
            }
            resolved
        });
        let selection = requested
            .or_else(|| store.resolve(store.initial_topic()))
            .unwrap_or(Selection::Topic(0));

        let mut app = Self {
            store,
            selection,
            quiz: None,
            videos: None,
            diagram_error: None,
            capabilities: Capabilities::default(),
        };
        app.enter(selection);
        app
    }

    /// Switch to `selection`, rebuilding all per-topic interaction state.
    pub(crate) fn enter(&mut self, selection: Selection) {
        self.selection = selection;
        let (quiz, videos, diagram_error) = match self.store.entry(selection) {
            Entry::Topic(record) => (
                record.quiz.as_ref().map(|_| QuizState::new()),
                record.videos.as_ref().map(VideoChooser::new),
                diagram::parse(&record.diagram).err(),
            ),
            Entry::Glossary(_) => (None, None, None),
        };
        if let Some(e) = &diagram_error {
            warn!(
                "Diagram for '{}' failed to parse: {e}",
                self.store.key_of(selection)
            );
        }
        self.quiz = quiz;
        self.videos = videos;
        self.diagram_error = diagram_error;
        debug!("Entered topic '{}'", self.current_key());
    }

    pub fn current_entry(&self) -> Entry<'_> {
        self.store.entry(self.selection)
    }

    pub fn current_key(&self) -> &str {
        self.store.key_of(self.selection)
    }

    /// The active topic's quiz spec together with its interaction state.
    pub fn current_quiz(&self) -> Option<(&QuizSpec, &QuizState)> {
        match self.current_entry() {
            Entry::Topic(record) => record.quiz.as_ref().zip(self.quiz.as_ref()),
            Entry::Glossary(_) => None,
        }
    }

    /// Engines the current view needs before it can render fully.
    pub fn required_capabilities(&self) -> Vec<CapabilityKind> {
        match self.current_entry() {
            Entry::Topic(_) => vec![CapabilityKind::Markdown, CapabilityKind::Diagram],
            Entry::Glossary(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MINIMAL_CONTENT, minimal_store, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.current_key(), "alpha");
        assert!(app.quiz.is_some());
        assert!(app.videos.is_some());
        assert_eq!(app.capabilities, Capabilities::default());
    }

    #[test]
    fn start_topic_overrides_initial() {
        let app = App::with_start_topic(minimal_store(), Some("beta"));
        assert_eq!(app.current_key(), "beta");
        assert!(app.quiz.is_none());
        assert!(app.videos.is_none());
    }

    #[test]
    fn unknown_start_topic_falls_back() {
        let app = App::with_start_topic(minimal_store(), Some("nope"));
        assert_eq!(app.current_key(), "alpha");
    }

    #[test]
    fn diagram_is_checked_when_entering_a_topic() {
        let source =
            MINIMAL_CONTENT.replace("diagram = \"classDiagram\"", "diagram = \"flowchart\"");
        let store = Arc::new(ContentStore::parse(&source).unwrap());
        let mut app = App::new(store);
        assert_eq!(app.diagram_error, None);

        app.enter(Selection::Topic(1));
        let error = app.diagram_error.clone().unwrap();
        assert_eq!(error.line, 1);

        app.enter(Selection::Topic(0));
        assert_eq!(app.diagram_error, None);
        app.enter(Selection::Glossary);
        assert_eq!(app.diagram_error, None);
    }

    #[test]
    fn glossary_needs_no_capabilities() {
        let app = App::with_start_topic(minimal_store(), Some("glossary"));
        assert!(matches!(app.current_entry(), Entry::Glossary(_)));
        assert!(app.required_capabilities().is_empty());
        assert!(app.current_quiz().is_none());
    }
}
