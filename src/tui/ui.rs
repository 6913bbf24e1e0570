use chrono::{Datelike, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::capabilities::Engines;
use crate::tui::component::Component;
use crate::tui::components::{Footer, HUB_SUBTITLE, Sidebar, TitleBar, TopicView};
use crate::tui::{Focus, TuiState};

const SIDEBAR_WIDTH: u16 = 26;

const SIDEBAR_HINTS: &str =
    "↑/↓ move · Enter open · [/] prev/next · g glossary · Tab content · q quit";
const CONTENT_HINTS: &str =
    "↑/↓ scroll · 1-9 answer · Enter submit · r reset · v video · Tab topics · q quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, engines: &Engines) {
    use Constraint::{Length, Min};
    let [header_area, body_area, footer_area] =
        Layout::vertical([Length(2), Min(0), Length(2)]).areas(frame.area());
    let [sidebar_area, content_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body_area);

    TitleBar::new(HUB_SUBTITLE).render(frame, header_area);

    // Remember where the sidebar went for mouse hit testing
    tui.sidebar_area = sidebar_area;
    Sidebar::new(
        &mut tui.sidebar,
        &app.store,
        app.selection,
        tui.focus == Focus::Sidebar,
    )
    .render(frame, sidebar_area);

    let (markdown, diagram) = engines.loaded(&app.capabilities);
    TopicView::new(
        &mut tui.content,
        app,
        markdown.as_deref(),
        diagram.as_deref(),
        tui.focus == Focus::Content,
    )
    .render(frame, content_area);

    let hints = match tui.focus {
        Focus::Sidebar => SIDEBAR_HINTS,
        Focus::Content => CONTENT_HINTS,
    };
    Footer::new(Local::now().year(), hints).render(frame, footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn draws_every_region() {
        static NOTHING_LOADED: Engines = Engines::new();
        let app = test_app();
        let mut tui = TuiState::new(&app);
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, &NOTHING_LOADED))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Java OOP Learning Hub"));
        assert!(text.contains("Topics"));
        assert!(text.contains("Alpha: The First"));
        assert!(text.contains("Loading content..."));
        assert!(text.contains("Java OOP Learner. All rights reserved."));
        assert!(text.contains("Enter open"));
        assert_eq!(tui.sidebar_area.width, SIDEBAR_WIDTH);
        assert_eq!(tui.sidebar_area.y, 2);
    }
}
