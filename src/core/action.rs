//! # Actions
//!
//! Everything that can happen in the hub becomes an `Action`.
//! User picks a topic? That's `Action::Select(key)`.
//! Markdown engine finished loading? That's `Action::CapabilityResolved { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing any I/O the caller must
//! start. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::capability::CapabilityKind;
use crate::core::content::{Entry, Selection};
use crate::core::state::App;
use crate::core::video::VideoSlot;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The view was put on screen.
    Mount,
    /// Navigate to a topic key (or the glossary key).
    Select(String),
    NextTopic,
    PrevTopic,
    ShowGlossary,
    ChooseOption(usize),
    SubmitQuiz,
    ResetQuiz,
    SelectVideo(VideoSlot),
    ToggleVideo,
    CapabilityResolved {
        kind: CapabilityKind,
        outcome: Result<(), String>,
    },
    Quit,
}

/// Work the caller has to perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start acquiring these capabilities (each requested exactly once).
    Acquire(Vec<CapabilityKind>),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Mount => request_capabilities(app),
        Action::Select(key) => match app.store.resolve(&key) {
            Some(selection) => navigate(app, selection),
            None => {
                warn!("Ignoring selection of unknown topic '{key}'");
                Effect::None
            }
        },
        Action::NextTopic => {
            let next = app.store.position(app.selection) + 1;
            let selection = app.store.at_position(next);
            navigate(app, selection)
        }
        Action::PrevTopic => {
            let count = app.store.entry_count();
            let prev = app.store.position(app.selection) + count - 1;
            let selection = app.store.at_position(prev);
            navigate(app, selection)
        }
        Action::ShowGlossary => navigate(app, Selection::Glossary),
        Action::ChooseOption(index) => {
            let store = app.store.clone();
            if let (Entry::Topic(record), Some(quiz)) = (store.entry(app.selection), &mut app.quiz)
                && let Some(spec) = &record.quiz
            {
                quiz.choose(spec, index);
            }
            Effect::None
        }
        Action::SubmitQuiz => {
            let store = app.store.clone();
            if let (Entry::Topic(record), Some(quiz)) = (store.entry(app.selection), &mut app.quiz)
                && let Some(spec) = &record.quiz
            {
                let feedback = quiz.submit(spec);
                debug!("Quiz on '{}' submitted: {:?}", record.key, feedback);
            }
            Effect::None
        }
        Action::ResetQuiz => {
            if let Some(quiz) = app.quiz.as_mut() {
                quiz.reset();
            }
            Effect::None
        }
        Action::SelectVideo(slot) => {
            if let Some(videos) = app.videos.as_mut()
                && !videos.select(slot)
            {
                debug!("No {slot:?} video for '{}'", app.store.key_of(app.selection));
            }
            Effect::None
        }
        Action::ToggleVideo => {
            if let Some(videos) = app.videos.as_mut() {
                videos.toggle();
            }
            Effect::None
        }
        Action::CapabilityResolved { kind, outcome } => {
            match &outcome {
                Ok(()) => info!("{} capability resolved", kind.label()),
                Err(reason) => warn!("{} capability failed: {reason}", kind.label()),
            }
            app.capabilities.resolve(kind, outcome);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Move to `selection`. Re-selecting the active entry keeps its state.
fn navigate(app: &mut App, selection: Selection) -> Effect {
    if selection == app.selection {
        return Effect::None;
    }
    app.enter(selection);
    request_capabilities(app)
}

fn request_capabilities(app: &mut App) -> Effect {
    let needed: Vec<CapabilityKind> = app
        .required_capabilities()
        .into_iter()
        .filter(|kind| app.capabilities.request(*kind))
        .collect();
    if needed.is_empty() {
        Effect::None
    } else {
        Effect::Acquire(needed)
    }
}
