use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::core::content::GlossaryRecord;
use crate::tui::component::SectionBody;

/// Term list for the glossary view: each term in bold, its definition
/// indented underneath, in store order.
#[derive(Clone, Copy)]
pub struct GlossaryView<'a> {
    pub record: &'a GlossaryRecord,
}

impl<'a> GlossaryView<'a> {
    pub fn new(record: &'a GlossaryRecord) -> Self {
        Self { record }
    }
}

impl SectionBody for GlossaryView<'_> {
    fn text(&self, _width: u16) -> Text<'static> {
        let mut lines = Vec::new();
        for (i, term) in self.record.terms.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(
                term.term.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(term.definition.clone(), Style::default().fg(Color::Gray)),
            ]));
        }
        Text::from(lines)
    }
}
