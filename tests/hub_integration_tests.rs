use std::sync::{Arc, mpsc};

use oophub::core::action::{Action, Effect, update};
use oophub::core::capability::{CapabilityKind, Readiness};
use oophub::core::config::DEFAULT_SYNTAX_THEME;
use oophub::core::content::{ContentStore, Entry, Selection};
use oophub::core::quiz::{Feedback, QuizPhase};
use oophub::core::state::App;
use oophub::tui::event::TuiEvent;
use oophub::tui::{EngineSettings, Engines, TuiState, apply, draw_ui, route_event, spawn_acquisition};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

// ============================================================================
// Helper Functions
// ============================================================================

fn bundled_app() -> App {
    App::new(Arc::new(ContentStore::bundled().unwrap()))
}

fn settings() -> EngineSettings {
    EngineSettings {
        syntax_theme: DEFAULT_SYNTAX_THEME.to_string(),
        diagram_charset: "unicode".to_string(),
    }
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

/// Run every acquisition in `effect` to completion and feed the results back.
async fn settle(app: &mut App, engines: &'static Engines, effect: Effect) {
    let Effect::Acquire(kinds) = effect else {
        return;
    };
    let (tx, rx) = mpsc::channel();
    for kind in kinds {
        spawn_acquisition(engines, kind, &settings(), tx.clone())
            .await
            .unwrap();
    }
    while let Ok(action) = rx.try_recv() {
        update(app, action);
    }
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn every_bundled_key_selects_its_record() {
    let mut app = bundled_app();
    let keys: Vec<String> = app.store.keys().map(str::to_string).collect();
    for key in keys {
        update(&mut app, Action::Select(key.clone()));
        assert_eq!(app.current_key(), key);
        match app.current_entry() {
            Entry::Topic(record) => assert_eq!(record.key, key),
            Entry::Glossary(_) => assert_eq!(app.selection, Selection::Glossary),
        }
    }
}

#[test]
fn leaving_a_topic_resets_its_quiz() {
    let mut app = bundled_app();
    update(&mut app, Action::Select("encapsulation".into()));
    update(&mut app, Action::ChooseOption(0));
    update(&mut app, Action::SubmitQuiz);
    assert_eq!(app.quiz.as_ref().unwrap().phase(), QuizPhase::Answered);

    update(&mut app, Action::Select("inheritance".into()));
    update(&mut app, Action::Select("encapsulation".into()));
    let quiz = app.quiz.as_ref().unwrap();
    assert_eq!(quiz.phase(), QuizPhase::Unanswered);
    assert_eq!(quiz.selected(), None);
}

#[test]
fn wrong_answer_names_the_right_one() {
    let mut app = bundled_app();
    update(&mut app, Action::Select("inheritance".into()));
    let (spec, _) = app.current_quiz().unwrap();
    let answer = spec.answer.clone();
    let wrong = spec.options.iter().position(|o| *o != answer).unwrap();

    update(&mut app, Action::ChooseOption(wrong));
    update(&mut app, Action::SubmitQuiz);
    match app.quiz.as_ref().unwrap().feedback() {
        Some(feedback @ Feedback::Incorrect { .. }) => {
            assert!(feedback.message().contains(&answer));
        }
        other => panic!("expected incorrect feedback, got {other:?}"),
    }
}

#[test]
fn keyboard_walks_the_sidebar() {
    let mut app = bundled_app();
    let mut tui = TuiState::new(&app);
    for _ in 0..app.store.entry_count() {
        route_event(&app, &mut tui, &TuiEvent::CursorDown);
    }
    if let Some(action) = route_event(&app, &mut tui, &TuiEvent::Submit) {
        apply(&mut app, &mut tui, action);
    }
    assert_eq!(app.selection, Selection::Glossary);
}

// ============================================================================
// Rendering with capabilities
// ============================================================================

#[tokio::test]
async fn sections_switch_from_placeholders_once_engines_load() {
    static ENGINES: Engines = Engines::new();
    let mut app = bundled_app();
    let mut tui = TuiState::new(&app);
    let mut terminal = Terminal::new(TestBackend::new(120, 60)).unwrap();

    let effect = apply(&mut app, &mut tui, Action::Mount);
    assert_eq!(
        effect,
        Effect::Acquire(vec![CapabilityKind::Markdown, CapabilityKind::Diagram])
    );

    terminal
        .draw(|f| draw_ui(f, &app, &mut tui, &ENGINES))
        .unwrap();
    assert!(screen(&terminal).contains("Loading content..."));

    settle(&mut app, &ENGINES, effect).await;
    assert_eq!(app.capabilities.markdown, Readiness::Ready);
    assert_eq!(app.capabilities.diagram, Readiness::Ready);

    terminal
        .draw(|f| draw_ui(f, &app, &mut tui, &ENGINES))
        .unwrap();
    let text = screen(&terminal);
    assert!(!text.contains("Loading content..."));
    assert!(!text.contains("Loading diagram..."));
    assert!(text.contains("Java OOP Learning Hub"));
}

#[tokio::test]
async fn capabilities_are_requested_once_across_topics() {
    let mut app = bundled_app();
    let first = update(&mut app, Action::Mount);
    assert!(matches!(first, Effect::Acquire(_)));

    // Still pending: switching topics must not start another acquisition
    assert_eq!(
        update(&mut app, Action::Select("polymorphism".into())),
        Effect::None
    );
    assert_eq!(update(&mut app, Action::ShowGlossary), Effect::None);
}

#[tokio::test]
async fn glossary_renders_without_engines() {
    static ENGINES: Engines = Engines::new();
    let mut app = bundled_app();
    let mut tui = TuiState::new(&app);
    apply(&mut app, &mut tui, Action::ShowGlossary);

    let mut terminal = Terminal::new(TestBackend::new(120, 60)).unwrap();
    terminal
        .draw(|f| draw_ui(f, &app, &mut tui, &ENGINES))
        .unwrap();
    let text = screen(&terminal);
    assert!(text.contains("Key Terms & Definitions"));
    let first_term = &app.store.glossary().terms[0].term;
    assert!(text.contains(first_term.as_str()));
}
