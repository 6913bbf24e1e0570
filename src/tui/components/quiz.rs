//! # Quiz Component
//!
//! Stateless view of a topic's quick-check quiz. The interaction state
//! (`QuizState`) lives in core and is passed in as a prop; keys are handled
//! by the event loop and turned into quiz actions.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::core::content::QuizSpec;
use crate::core::quiz::{Feedback, QuizState};
use crate::tui::component::SectionBody;

#[derive(Clone, Copy)]
pub struct QuizView<'a> {
    pub spec: &'a QuizSpec,
    pub state: &'a QuizState,
}

impl<'a> QuizView<'a> {
    pub fn new(spec: &'a QuizSpec, state: &'a QuizState) -> Self {
        Self { spec, state }
    }

    fn feedback_line(feedback: &Feedback) -> Line<'static> {
        let color = match feedback {
            Feedback::Correct => Color::Green,
            Feedback::Incorrect { .. } => Color::Red,
            Feedback::NeedSelection => Color::Yellow,
        };
        Line::from(Span::styled(
            feedback.message(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    }
}

impl SectionBody for QuizView<'_> {
    fn text(&self, _width: u16) -> Text<'static> {
        let mut lines = vec![
            Line::from(Span::styled(
                self.spec.prompt.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        for (index, option) in self.spec.options.iter().enumerate() {
            let chosen = self.state.selected() == Some(index);
            let marker = if chosen { "(•)" } else { "( )" };
            let style = if chosen {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", index + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{marker} {option}"), style),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "1-9 choose · Enter submit · r reset",
            Style::default().fg(Color::DarkGray),
        )));

        if let Some(feedback) = self.state.feedback() {
            lines.push(Line::default());
            lines.push(Self::feedback_line(feedback));
        }
        Text::from(lines)
    }
}
