//! # Sidebar Component
//!
//! Topic navigation: one entry per topic (short label) plus the glossary.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` and tracks the keyboard cursor
//! - `Sidebar` is created each frame with borrowed state and the store as props
//!
//! The cursor is separate from the active selection: moving it with ↑/↓
//! only highlights, `Enter` (or a click) opens the entry.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::content::{ContentStore, Selection};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub struct SidebarState {
    /// Keyboard cursor, as a navigation position.
    pub cursor: usize,
    pub entry_count: usize,
    pub list_state: ListState,
}

impl SidebarState {
    pub fn new(entry_count: usize, cursor: usize) -> Self {
        let cursor = cursor.min(entry_count.saturating_sub(1));
        let mut list_state = ListState::default();
        list_state.select(Some(cursor));
        Self {
            cursor,
            entry_count,
            list_state,
        }
    }

    /// Move the cursor onto `position` (e.g. after navigation by other keys).
    pub fn follow(&mut self, position: usize) {
        if position < self.entry_count {
            self.cursor = position;
            self.list_state.select(Some(position));
        }
    }

    /// Entry under a screen row, given the area the sidebar was drawn in.
    pub fn entry_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        // Border + top padding
        let top = area.y + 2;
        if column < area.x || column >= area.x + area.width || row < top {
            return None;
        }
        let index = (row - top) as usize + self.list_state.offset();
        (index < self.entry_count).then_some(index)
    }
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEvent {
    /// Open the entry at this navigation position.
    Open(usize),
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.follow(self.cursor.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.follow((self.cursor + 1).min(self.entry_count.saturating_sub(1)));
                None
            }
            TuiEvent::ScrollToTop => {
                self.follow(0);
                None
            }
            TuiEvent::ScrollToBottom => {
                self.follow(self.entry_count.saturating_sub(1));
                None
            }
            TuiEvent::Submit => Some(SidebarEvent::Open(self.cursor)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    store: &'a ContentStore,
    active: Selection,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(
        state: &'a mut SidebarState,
        store: &'a ContentStore,
        active: Selection,
        focused: bool,
    ) -> Self {
        Self {
            state,
            store,
            active,
            focused,
        }
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                " Topics ",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::new(1, 1, 1, 0));

        let items: Vec<ListItem> = self
            .store
            .selections()
            .map(|selection| {
                let label = self.store.label(selection).to_string();
                let style = if selection == self.active {
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Blue)
                };
                ListItem::new(Line::from(Span::styled(format!(" {label} "), style)))
            })
            .collect();

        let highlight = if self.focused { "▸ " } else { "  " };
        let list = List::new(items)
            .block(block)
            .highlight_symbol(highlight)
            .highlight_spacing(ratatui::widgets::HighlightSpacing::Always);

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
