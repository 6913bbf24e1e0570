//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms and only redraws on
//! input, terminal resize, or an action arriving from a background task
//! (a capability becoming ready).
//!
//! ## Focus
//!
//! `Tab` moves focus between the sidebar and the content column. Arrow keys
//! and `Enter` go to whichever has focus; every other binding is global.

mod capabilities;
mod component;
pub mod components;
pub mod event;
pub mod markdown;
mod ui;

pub use capabilities::{ENGINES, EngineSettings, Engines, spawn_acquisition};

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::content::ContentStore;
use crate::core::quiz::MAX_OPTIONS;
use crate::core::state::App;
use crate::core::video::VideoSlot;
use crate::tui::component::EventHandler;
use crate::tui::components::{ContentViewState, SidebarEvent, SidebarState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

pub use ui::draw_ui;

const IDLE_POLL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    // Persistent component states
    pub sidebar: SidebarState,
    pub content: ContentViewState,
    /// Where the sidebar was last drawn, for mouse hit testing.
    pub sidebar_area: Rect,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            focus: Focus::Sidebar,
            sidebar: SidebarState::new(
                app.store.entry_count(),
                app.store.position(app.selection),
            ),
            content: ContentViewState::new(),
            sidebar_area: Rect::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Translate a terminal event into an action, updating presentation-only
/// state (focus, cursor, scroll) along the way.
pub fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit | TuiEvent::Quit | TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::Resize => None,
        TuiEvent::FocusNext => {
            tui.focus = match tui.focus {
                Focus::Sidebar => Focus::Content,
                Focus::Content => Focus::Sidebar,
            };
            None
        }
        TuiEvent::InputChar(c) => char_action(*c),
        TuiEvent::MouseClick(column, row) => {
            let position = tui.sidebar.entry_at(tui.sidebar_area, *column, *row)?;
            tui.focus = Focus::Sidebar;
            let selection = app.store.at_position(position);
            Some(Action::Select(app.store.key_of(selection).to_string()))
        }
        // Wheel and paging always scroll the content
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.content.handle_event(event);
            None
        }
        TuiEvent::Submit
        | TuiEvent::CursorUp
        | TuiEvent::CursorDown
        | TuiEvent::ScrollToTop
        | TuiEvent::ScrollToBottom => match tui.focus {
            Focus::Sidebar => match tui.sidebar.handle_event(event)? {
                SidebarEvent::Open(position) => {
                    let selection = app.store.at_position(position);
                    Some(Action::Select(app.store.key_of(selection).to_string()))
                }
            },
            Focus::Content if *event == TuiEvent::Submit => Some(Action::SubmitQuiz),
            Focus::Content => {
                tui.content.handle_event(event);
                None
            }
        },
    }
}

fn char_action(c: char) -> Option<Action> {
    match c {
        '[' => Some(Action::PrevTopic),
        ']' => Some(Action::NextTopic),
        'g' => Some(Action::ShowGlossary),
        'r' => Some(Action::ResetQuiz),
        'v' => Some(Action::ToggleVideo),
        'p' => Some(Action::SelectVideo(VideoSlot::Primary)),
        's' => Some(Action::SelectVideo(VideoSlot::Secondary)),
        _ => {
            let digit = c.to_digit(10)? as usize;
            (1..=MAX_OPTIONS)
                .contains(&digit)
                .then(|| Action::ChooseOption(digit - 1))
        }
    }
}

/// Run `action` through `update`, keeping presentation state in step with
/// the selection.
pub fn apply(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let before = app.selection;
    let effect = update(app, action);
    if app.selection != before {
        tui.content.reset();
        tui.sidebar.follow(app.store.position(app.selection));
    }
    effect
}

fn perform(effect: Effect, settings: &EngineSettings, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Acquire(kinds) => {
            for kind in kinds {
                spawn_acquisition(&ENGINES, kind, settings, tx.clone());
            }
            false
        }
        Effect::Quit => true,
    }
}

pub fn run(config: ResolvedConfig, store: Arc<ContentStore>) -> std::io::Result<()> {
    let settings = EngineSettings::from(&config);
    let mut app = App::with_start_topic(store, config.start_topic.as_deref());
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut should_quit = perform(apply(&mut app, &mut tui, Action::Mount), &settings, &tx);
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| draw_ui(f, &app, &mut tui, &ENGINES))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, &event) {
                let effect = apply(&mut app, &mut tui, action);
                if perform(effect, &settings, &tx) {
                    should_quit = true;
                    break;
                }
            }
        }

        // Handle background task actions (capability resolutions)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = apply(&mut app, &mut tui, action);
            should_quit |= perform(effect, &settings, &tx);
        }
    }

    info!("Leaving the hub");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::Selection;
    use crate::core::quiz::Feedback;
    use crate::test_support::test_app;

    fn press(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Option<Effect> {
        route_event(app, tui, &event).map(|action| apply(app, tui, action))
    }

    #[test]
    fn tab_toggles_focus() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        assert_eq!(tui.focus, Focus::Sidebar);
        route_event(&app, &mut tui, &TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Content);
        route_event(&app, &mut tui, &TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Sidebar);
    }

    #[test]
    fn sidebar_enter_opens_highlighted_entry() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        press(&mut app, &mut tui, TuiEvent::CursorDown);
        // Moving the cursor alone doesn't navigate
        assert_eq!(app.selection, Selection::Topic(0));
        let effect = press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.current_key(), "beta");
        assert!(matches!(effect, Some(Effect::Acquire(_))));
    }

    #[test]
    fn content_keys_drive_the_quiz() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        route_event(&app, &mut tui, &TuiEvent::FocusNext);

        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.quiz.as_ref().unwrap().feedback(), Some(&Feedback::NeedSelection));

        press(&mut app, &mut tui, TuiEvent::InputChar('1'));
        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.quiz.as_ref().unwrap().feedback(), Some(&Feedback::Correct));

        press(&mut app, &mut tui, TuiEvent::InputChar('r'));
        assert_eq!(app.quiz.as_ref().unwrap().feedback(), None);
        assert_eq!(app.quiz.as_ref().unwrap().selected(), None);
    }

    #[test]
    fn digit_keys_map_to_zero_based_options() {
        assert_eq!(char_action('1'), Some(Action::ChooseOption(0)));
        assert_eq!(char_action('9'), Some(Action::ChooseOption(8)));
        assert_eq!(char_action('0'), None);
        assert_eq!(char_action('x'), None);
    }

    #[test]
    fn every_allowed_option_has_a_key() {
        let reachable: Vec<usize> = ('0'..='9')
            .filter_map(char_action)
            .filter_map(|action| match action {
                Action::ChooseOption(index) => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(reachable, (0..MAX_OPTIONS).collect::<Vec<_>>());
    }

    #[test]
    fn global_navigation_keeps_sidebar_in_step() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        press(&mut app, &mut tui, TuiEvent::InputChar('g'));
        assert_eq!(app.selection, Selection::Glossary);
        assert_eq!(tui.sidebar.cursor, 2);

        press(&mut app, &mut tui, TuiEvent::InputChar(']'));
        assert_eq!(app.selection, Selection::Topic(0));
        assert_eq!(tui.sidebar.cursor, 0);

        press(&mut app, &mut tui, TuiEvent::InputChar('['));
        assert_eq!(app.selection, Selection::Glossary);
    }

    #[test]
    fn navigation_resets_scroll() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        tui.content.viewport_height = 10;
        tui.content.content_height = 50;
        press(&mut app, &mut tui, TuiEvent::ScrollPageDown);
        press(&mut app, &mut tui, TuiEvent::ScrollDown);
        assert!(tui.content.scroll_state.offset().y > 0);

        press(&mut app, &mut tui, TuiEvent::InputChar(']'));
        assert_eq!(tui.content.scroll_state.offset().y, 0);
    }

    #[test]
    fn click_on_sidebar_selects_entry() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        tui.focus = Focus::Content;
        tui.sidebar_area = Rect::new(0, 2, 26, 20);
        // Border + padding put the first entry on row 4
        press(&mut app, &mut tui, TuiEvent::MouseClick(3, 5));
        assert_eq!(app.current_key(), "beta");
        assert_eq!(tui.focus, Focus::Sidebar);

        // Outside the sidebar: nothing
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::MouseClick(40, 5)), None);
    }

    #[test]
    fn quit_keys() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        for event in [TuiEvent::Quit, TuiEvent::Escape, TuiEvent::ForceQuit] {
            assert_eq!(route_event(&app, &mut tui, &event), Some(Action::Quit));
        }
    }
}
