//! # Diagram Component
//!
//! Draws a parsed [`Diagram`] as text: one box per class laid out in rows
//! that fit the available width, followed by a legend of relationships.
//!
//! ```text
//! ┌────────────────┐  ┌─────────────┐
//! │     Animal     │  │     Dog     │
//! ├────────────────┤  ├─────────────┤
//! │ +String name   │  │ +bark()     │
//! ├────────────────┤  └─────────────┘
//! │ +makeSound()   │
//! └────────────────┘
//!
//! Dog ──▷ Animal  (inherits)
//! ```
//!
//! The [`DiagramEngine`] is the capability: until it is acquired the section
//! shows a placeholder. Parse failures stay inside this section.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

use crate::core::capability::CapabilityError;
use crate::core::diagram::{self, ClassNode, Classifier, Diagram, Member, Relation, RelationKind};
use crate::tui::component::SectionBody;

pub const LOADING_DIAGRAM: &str = "Loading diagram...";
pub const DIAGRAM_ERROR: &str = "Error rendering diagram. Check diagram syntax.";

/// Horizontal gap between boxes in a row.
const BOX_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Unicode,
    Ascii,
}

impl Charset {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "unicode" => Some(Charset::Unicode),
            "ascii" => Some(Charset::Ascii),
            _ => None,
        }
    }

    fn corners(&self) -> [char; 4] {
        match self {
            Charset::Unicode => ['┌', '┐', '└', '┘'],
            Charset::Ascii => ['+', '+', '+', '+'],
        }
    }

    fn tees(&self) -> [char; 2] {
        match self {
            Charset::Unicode => ['├', '┤'],
            Charset::Ascii => ['+', '+'],
        }
    }

    fn horizontal(&self) -> char {
        match self {
            Charset::Unicode => '─',
            Charset::Ascii => '-',
        }
    }

    fn vertical(&self) -> char {
        match self {
            Charset::Unicode => '│',
            Charset::Ascii => '|',
        }
    }

    /// Connector drawn from `source` towards `target` in the legend.
    fn arrow(&self, kind: &RelationKind) -> &'static str {
        match (self, kind) {
            (Charset::Unicode, RelationKind::Inheritance) => "──▷",
            (Charset::Unicode, RelationKind::Realization) => "┄┄▷",
            (Charset::Unicode, RelationKind::Composition) => "──◆",
            (Charset::Unicode, RelationKind::Aggregation) => "──◇",
            (Charset::Unicode, RelationKind::Association) => "──>",
            (Charset::Unicode, RelationKind::Dependency) => "┄┄>",
            (Charset::Unicode, RelationKind::Link) => "───",
            (Charset::Unicode, RelationKind::DashedLink) => "┄┄┄",
            (Charset::Unicode, RelationKind::Entity { identifying, .. }) => {
                if *identifying { "────" } else { "┄┄┄┄" }
            }
            (Charset::Ascii, RelationKind::Inheritance) => "--|>",
            (Charset::Ascii, RelationKind::Realization) => "..|>",
            (Charset::Ascii, RelationKind::Composition) => "--*",
            (Charset::Ascii, RelationKind::Aggregation) => "--o",
            (Charset::Ascii, RelationKind::Association) => "-->",
            (Charset::Ascii, RelationKind::Dependency) => "..>",
            (Charset::Ascii, RelationKind::Link) => "---",
            (Charset::Ascii, RelationKind::DashedLink) => "...",
            (Charset::Ascii, RelationKind::Entity { identifying, .. }) => {
                if *identifying { "----" } else { "...." }
            }
        }
    }
}

/// Renders diagrams with a fixed charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEngine {
    charset: Charset,
}

impl DiagramEngine {
    pub fn new(charset: &str) -> Result<Self, CapabilityError> {
        Charset::parse(charset)
            .map(|charset| Self { charset })
            .ok_or_else(|| CapabilityError::UnsupportedCharset(charset.to_string()))
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn render(&self, diagram: &Diagram, width: u16) -> Text<'static> {
        let boxes: Vec<ClassBox> = diagram
            .classes
            .iter()
            .map(|class| ClassBox::build(class, self.charset))
            .collect();

        let mut lines = Vec::new();
        for row in pack_rows(&boxes, width as usize) {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            let height = row.iter().map(|b| b.lines.len()).max().unwrap_or(0);
            for line_no in 0..height {
                let mut spans = Vec::new();
                for (i, class_box) in row.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::raw(" ".repeat(BOX_GAP)));
                    }
                    match class_box.lines.get(line_no) {
                        Some(line) => spans.extend(line.iter().cloned()),
                        None => spans.push(Span::raw(" ".repeat(class_box.width))),
                    }
                }
                lines.push(Line::from(spans));
            }
        }

        if !diagram.relations.is_empty() {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            for relation in &diagram.relations {
                lines.push(self.legend_line(relation));
            }
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "(empty diagram)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        Text::from(lines)
    }

    fn legend_line(&self, relation: &Relation) -> Line<'static> {
        let name = Style::default().fg(Color::Cyan);
        let arrow = Style::default().fg(Color::Yellow);
        let note = Style::default().fg(Color::DarkGray);

        let mut spans = vec![Span::styled(relation.source.clone(), name), Span::raw(" ")];
        match relation.kind {
            RelationKind::Entity { source, target, .. } => {
                spans.push(Span::styled(
                    format!(
                        "{} {} {}",
                        source.label(),
                        self.charset.arrow(&relation.kind),
                        target.label()
                    ),
                    arrow,
                ));
            }
            kind => spans.push(Span::styled(self.charset.arrow(&kind), arrow)),
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled(relation.target.clone(), name));

        let description = match &relation.label {
            Some(label) => format!("  ({}: {label})", relation.kind.describe()),
            None => format!("  ({})", relation.kind.describe()),
        };
        spans.push(Span::styled(description, note));
        Line::from(spans)
    }
}

/// One class drawn as a box of styled lines, all `width` columns wide.
struct ClassBox {
    width: usize,
    lines: Vec<Vec<Span<'static>>>,
}

impl ClassBox {
    fn build(class: &ClassNode, charset: Charset) -> Self {
        let annotation = class.annotation.as_ref().map(|a| format!("«{a}»"));
        let fields: Vec<(String, Style)> = class.fields.iter().map(member_cell).collect();
        let methods: Vec<(String, Style)> = class.methods.iter().map(member_cell).collect();

        let inner = std::iter::once(class.name.width())
            .chain(annotation.iter().map(|a| a.width()))
            .chain(fields.iter().chain(&methods).map(|(t, _)| t.width()))
            .max()
            .unwrap_or(0)
            + 2;
        let width = inner + 2;

        let border = Style::default().fg(Color::DarkGray);
        let [tl, tr, bl, br] = charset.corners();
        let [lt, rt] = charset.tees();
        let h = charset.horizontal().to_string().repeat(inner);
        let v = charset.vertical().to_string();

        let rule = |l: char, r: char| vec![Span::styled(format!("{l}{h}{r}"), border)];
        let row = |content: String, style: Style, centered: bool| {
            let pad = inner.saturating_sub(content.width() + 2);
            let (left, right) = if centered {
                (pad / 2, pad - pad / 2)
            } else {
                (0, pad)
            };
            vec![
                Span::styled(v.clone(), border),
                Span::styled(
                    format!(" {}{content}{} ", " ".repeat(left), " ".repeat(right)),
                    style,
                ),
                Span::styled(v.clone(), border),
            ]
        };

        let mut lines = vec![rule(tl, tr)];
        if let Some(annotation) = annotation {
            lines.push(row(
                annotation,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::ITALIC),
                true,
            ));
        }
        lines.push(row(
            class.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            true,
        ));
        for group in [&fields, &methods] {
            if group.is_empty() {
                continue;
            }
            lines.push(rule(lt, rt));
            for (text, style) in group {
                lines.push(row(text.clone(), *style, false));
            }
        }
        lines.push(rule(bl, br));
        Self { width, lines }
    }
}

fn member_cell(member: &Member) -> (String, Style) {
    let mut text = String::new();
    if let Some(visibility) = member.visibility {
        text.push(visibility.symbol());
    }
    text.push_str(&member.text);
    let style = match member.classifier {
        Some(Classifier::Abstract) => Style::default().add_modifier(Modifier::ITALIC),
        Some(Classifier::Static) => Style::default().add_modifier(Modifier::UNDERLINED),
        None => Style::default(),
    };
    (text, style)
}

/// Greedy row packing. A box wider than `width` gets a row to itself.
fn pack_rows(boxes: &[ClassBox], width: usize) -> Vec<Vec<&ClassBox>> {
    let mut rows: Vec<Vec<&ClassBox>> = Vec::new();
    let mut used = 0;
    for class_box in boxes {
        match rows.last_mut() {
            Some(row) if used + BOX_GAP + class_box.width <= width => {
                row.push(class_box);
                used += BOX_GAP + class_box.width;
            }
            _ => {
                rows.push(vec![class_box]);
                used = class_box.width;
            }
        }
    }
    rows
}

/// The diagram section body: placeholder, rendered diagram, or inline error.
#[derive(Clone, Copy)]
pub struct DiagramView<'a> {
    pub source: &'a str,
    /// `None` until the diagram capability is ready.
    pub engine: Option<&'a DiagramEngine>,
}

impl<'a> DiagramView<'a> {
    pub fn new(source: &'a str, engine: Option<&'a DiagramEngine>) -> Self {
        Self { source, engine }
    }
}

impl SectionBody for DiagramView<'_> {
    fn text(&self, width: u16) -> Text<'static> {
        let Some(engine) = self.engine else {
            return Text::from(Line::from(Span::styled(
                LOADING_DIAGRAM,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        };
        match diagram::parse(self.source) {
            Ok(parsed) => engine.render(&parsed, width),
            // Reported once by `App` when the topic is entered
            Err(e) => {
                Text::from(vec![
                    Line::from(Span::styled(
                        DIAGRAM_ERROR,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(e.to_string(), Style::default().fg(Color::Red))),
                ])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::ContentStore;

    const ANIMALS: &str = "classDiagram
    Animal <|-- Dog
    class Animal {
        +String name
        +makeSound()
    }
    class Dog {
        +bark()
    }
";

    fn flatten(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn unknown_charset_is_rejected() {
        assert_eq!(
            DiagramEngine::new("ebcdic"),
            Err(CapabilityError::UnsupportedCharset("ebcdic".to_string()))
        );
        assert_eq!(DiagramEngine::new("ASCII").unwrap().charset(), Charset::Ascii);
    }

    #[test]
    fn placeholder_until_engine_ready() {
        let lines = flatten(&DiagramView::new(ANIMALS, None).text(80));
        assert_eq!(lines, vec![LOADING_DIAGRAM.to_string()]);
    }

    #[test]
    fn boxes_share_a_row_when_they_fit() {
        let engine = DiagramEngine::new("unicode").unwrap();
        let lines = flatten(&DiagramView::new(ANIMALS, Some(&engine)).text(80));
        assert!(lines[0].starts_with('┌'));
        assert_eq!(lines[0].matches('┌').count(), 2);
        assert!(lines.iter().any(|l| l.contains("│ +makeSound() │")));
        assert!(lines.contains(&"Dog ──▷ Animal  (inherits)".to_string()));
    }

    #[test]
    fn narrow_width_stacks_boxes() {
        let engine = DiagramEngine::new("unicode").unwrap();
        let lines = flatten(&DiagramView::new(ANIMALS, Some(&engine)).text(20));
        assert!(lines.iter().all(|l| l.matches('┌').count() <= 1));
        assert_eq!(lines.iter().filter(|l| l.starts_with('┌')).count(), 2);
    }

    #[test]
    fn rows_in_a_line_have_equal_width() {
        let engine = DiagramEngine::new("unicode").unwrap();
        let text = DiagramView::new(ANIMALS, Some(&engine)).text(80);
        let first_box_row: Vec<usize> = text
            .lines
            .iter()
            .take_while(|l| l.width() > 0)
            .map(|l| l.width())
            .collect();
        assert!(first_box_row.windows(2).all(|w| w[0] == w[1]), "{first_box_row:?}");
    }

    #[test]
    fn ascii_charset_uses_plain_characters() {
        let engine = DiagramEngine::new("ascii").unwrap();
        let lines = flatten(&DiagramView::new(ANIMALS, Some(&engine)).text(80));
        assert!(lines.iter().all(|l| l.is_ascii()));
        assert!(lines.contains(&"Dog --|> Animal  (inherits)".to_string()));
    }

    #[test]
    fn annotation_is_shown() {
        let engine = DiagramEngine::new("unicode").unwrap();
        let source = "classDiagram\n    class Shape {\n        <<interface>>\n        +area() double\n    }\n";
        let lines = flatten(&DiagramView::new(source, Some(&engine)).text(80));
        assert!(lines.iter().any(|l| l.contains("«interface»")));
    }

    #[test]
    fn er_legend_shows_cardinality() {
        let engine = DiagramEngine::new("unicode").unwrap();
        let source = "erDiagram\n    CUSTOMER ||--o{ ORDER : places\n";
        let lines = flatten(&DiagramView::new(source, Some(&engine)).text(80));
        assert!(
            lines.contains(&"CUSTOMER 1 ──── 0..* ORDER  (identifying: places)".to_string()),
            "{lines:?}"
        );
    }

    #[test]
    fn parse_error_stays_inline() {
        let engine = DiagramEngine::new("unicode").unwrap();
        let source = "classDiagram\n    Animal <|-~ Dog\n";
        let lines = flatten(&DiagramView::new(source, Some(&engine)).text(80));
        assert_eq!(lines[0], DIAGRAM_ERROR);
        assert!(lines[1].starts_with("line 2:"), "{lines:?}");
    }

    #[test]
    fn bundled_diagrams_render() {
        let engine = DiagramEngine::new("unicode").unwrap();
        let store = ContentStore::bundled().unwrap();
        for topic in store.topics() {
            let lines = flatten(&DiagramView::new(&topic.diagram, Some(&engine)).text(100));
            assert_ne!(lines[0], DIAGRAM_ERROR, "{}: {lines:?}", topic.key);
        }
    }
}
