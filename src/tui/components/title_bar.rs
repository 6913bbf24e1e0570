//! # TitleBar and Footer Components
//!
//! Stateless header and footer of the hub. Both receive everything they
//! show as props:
//!
//! ```rust,ignore
//! TitleBar::new(HUB_SUBTITLE).render(frame, header_area);
//! Footer::new(Local::now().year(), hints).render(frame, footer_area);
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const HUB_TITLE: &str = "Java OOP Learning Hub";
pub const HUB_SUBTITLE: &str = "Explore the core concepts of Object-Oriented Programming in Java.";

/// Two-line centered header: title and subtitle.
pub struct TitleBar {
    pub subtitle: String,
}

impl TitleBar {
    pub fn new(subtitle: impl Into<String>) -> Self {
        Self {
            subtitle: subtitle.into(),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                HUB_TITLE,
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.subtitle.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

/// Key hints on the first line, copyright on the second.
pub struct Footer {
    pub year: i32,
    pub hints: String,
}

impl Footer {
    pub fn new(year: i32, hints: impl Into<String>) -> Self {
        Self {
            year,
            hints: hints.into(),
        }
    }

    pub fn copyright(&self) -> String {
        format!("© {} Java OOP Learner. All rights reserved.", self.year)
    }
}

impl Component for Footer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.hints.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                self.copyright(),
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}
