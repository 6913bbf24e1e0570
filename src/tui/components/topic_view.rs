//! # TopicView Component
//!
//! Scrollable content area for the active entry.
//!
//! ## Responsibilities
//!
//! - Dispatch on the current entry: a topic gets its fixed section sequence,
//!   the glossary gets its term list
//! - Skip optional sections the record doesn't have
//! - Stack sections into one `ScrollView` and keep the scroll offset in bounds
//!
//! ## Architecture
//!
//! `TopicView` is a transient component (created each frame) that wraps
//! `&'a mut ContentViewState` (persistent scroll state) and the `App` plus
//! the loaded engines (props). Section bodies are pure functions of those
//! props, so a topic change or a capability becoming ready simply shows up
//! on the next frame.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::content::{ContentRecord, Entry, GlossaryRecord};
use crate::core::state::App;
use crate::tui::component::{Component, EventHandler, SectionBody};
use crate::tui::components::comparison_table::ComparisonTable;
use crate::tui::components::diagram::{DiagramEngine, DiagramView};
use crate::tui::components::glossary::GlossaryView;
use crate::tui::components::quiz::QuizView;
use crate::tui::components::video_chooser::VideoPanel;
use crate::tui::event::TuiEvent;
use crate::tui::markdown::{self, MarkdownEngine};

pub const LOADING_CONTENT: &str = "Loading content...";

const FURTHER_READING: &str = "To deepen your understanding, consider exploring official Java \
documentation, online tutorials, and practice coding challenges. Consistent practice is key!";

/// Rows between stacked sections.
const SECTION_GAP: u16 = 1;
/// Borders (1 + 1) plus horizontal padding (1 + 1).
const SECTION_CHROME: u16 = 4;

/// Scroll state for the content area. Persisted in `TuiState`.
#[derive(Default)]
pub struct ContentViewState {
    pub scroll_state: ScrollViewState,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Total height of the stacked sections at the last render
    pub content_height: u16,
}

impl ContentViewState {
    pub fn new() -> Self {
        Self::default()
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Back to the top, e.g. after switching topics.
    pub fn reset(&mut self) {
        self.scroll_state.set_offset(Position { x: 0, y: 0 });
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for ContentViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollToTop => self.reset(),
            TuiEvent::ScrollToBottom => {
                let y = self.max_offset();
                self.scroll_state.set_offset(Position { x: 0, y });
            }
            _ => {}
        }
        None
    }
}

/// One titled block in the content column.
pub struct Section {
    /// `None` for the page heading (underlined, no box).
    pub title: Option<&'static str>,
    pub accent: Color,
    pub body: Text<'static>,
    /// Prose wraps; code, diagrams and tables keep their layout.
    pub wrap: bool,
}

impl Section {
    fn boxed(title: &'static str, accent: Color, body: Text<'static>, wrap: bool) -> Self {
        Self {
            title: Some(title),
            accent,
            body,
            wrap,
        }
    }

    fn heading(text: &str) -> Self {
        Self {
            title: None,
            accent: Color::Blue,
            body: Text::from(Line::from(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ))),
            wrap: true,
        }
    }

    fn paragraph(&self) -> Paragraph<'static> {
        let block = match self.title {
            Some(title) => Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.accent).add_modifier(Modifier::DIM))
                .title(Span::styled(
                    format!(" {title} "),
                    Style::default()
                        .fg(self.accent)
                        .add_modifier(Modifier::BOLD),
                ))
                .padding(Padding::horizontal(1)),
            None => Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(self.accent)),
        };
        let paragraph = Paragraph::new(self.body.clone()).block(block);
        if self.wrap {
            paragraph.wrap(Wrap { trim: false })
        } else {
            paragraph
        }
    }

    /// Rendered height (borders included) at `width` columns.
    pub fn height(&self, width: u16) -> u16 {
        let inner = match self.title {
            Some(_) => width.saturating_sub(SECTION_CHROME),
            None => width,
        };
        u16::try_from(self.paragraph().line_count(inner.max(1))).unwrap_or(u16::MAX)
    }
}

/// Height of the scroll canvas holding sections of `heights`, gaps included.
/// Saturates at `u16::MAX`.
fn canvas_height(heights: &[u16]) -> u16 {
    heights
        .iter()
        .enumerate()
        .fold(0u16, |total, (i, height)| {
            let gap = if i == 0 { 0 } else { SECTION_GAP };
            total.saturating_add(gap).saturating_add(*height)
        })
}

/// Section bodies for the active entry, in display order.
pub fn build_sections(
    app: &App,
    markdown: Option<&MarkdownEngine>,
    diagram: Option<&DiagramEngine>,
    width: u16,
) -> Vec<Section> {
    let inner = width.saturating_sub(SECTION_CHROME);
    match app.current_entry() {
        Entry::Topic(record) => topic_sections(app, record, markdown, diagram, inner),
        Entry::Glossary(glossary) => glossary_sections(glossary, inner),
    }
}

fn topic_sections(
    app: &App,
    record: &ContentRecord,
    markdown: Option<&MarkdownEngine>,
    diagram: Option<&DiagramEngine>,
    inner: u16,
) -> Vec<Section> {
    let prose = |source: &str| match markdown {
        Some(engine) => markdown::render(source, Color::White, engine),
        None => loading(LOADING_CONTENT),
    };

    let mut sections = vec![
        Section::heading(&record.title),
        Section::boxed("Explanation", Color::Blue, prose(&record.explanation), true),
    ];

    let code = match markdown {
        Some(engine) => markdown::highlight(&record.code_sample, "java", engine),
        None => markdown::plain_code(&record.code_sample),
    };
    sections.push(Section::boxed("Simple Java Example", Color::Green, code, false));
    sections.push(Section::boxed(
        "Class Diagram",
        Color::LightBlue,
        DiagramView::new(&record.diagram, diagram).text(inner),
        false,
    ));

    if let Some(tips) = &record.tips {
        sections.push(Section::boxed(
            "Tricks & Tips to Remember",
            Color::Cyan,
            prose(tips),
            true,
        ));
    }
    if let Some(table) = record
        .comparison
        .as_ref()
        .and_then(|t| ComparisonTable::new(&t.headers, &t.rows))
    {
        sections.push(Section::boxed(
            "Key Differences",
            Color::Yellow,
            table.text(inner),
            false,
        ));
    }
    if let Some((spec, state)) = app.current_quiz() {
        sections.push(Section::boxed(
            "Quick Check Quiz",
            Color::Magenta,
            QuizView::new(spec, state).text(inner),
            true,
        ));
    }
    if record.videos.is_some() {
        let panel = VideoPanel::new(app.videos.as_ref(), app.store.channels());
        sections.push(Section::boxed(
            "Relevant YouTube Videos",
            Color::Red,
            panel.text(inner),
            true,
        ));
    }
    if let Some(question) = &record.review_question {
        sections.push(Section::boxed(
            "PYQ (Previous Year Question)",
            Color::LightMagenta,
            prose(question),
            true,
        ));
    }
    sections.push(Section::boxed(
        "Further Reading & Resources",
        Color::Gray,
        Text::from(FURTHER_READING),
        true,
    ));
    sections
}

fn glossary_sections(glossary: &GlossaryRecord, inner: u16) -> Vec<Section> {
    vec![
        Section::heading(&glossary.title),
        Section::boxed(
            "Key Terms & Definitions",
            Color::Gray,
            GlossaryView::new(glossary).text(inner),
            true,
        ),
    ]
}

fn loading(message: &'static str) -> Text<'static> {
    Text::from(Line::from(Span::styled(
        message,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
}

/// Scrollable content view. Created fresh each frame.
pub struct TopicView<'a> {
    pub state: &'a mut ContentViewState,
    pub app: &'a App,
    pub markdown: Option<&'a MarkdownEngine>,
    pub diagram: Option<&'a DiagramEngine>,
    pub focused: bool,
}

impl<'a> TopicView<'a> {
    pub fn new(
        state: &'a mut ContentViewState,
        app: &'a App,
        markdown: Option<&'a MarkdownEngine>,
        diagram: Option<&'a DiagramEngine>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            app,
            markdown,
            diagram,
            focused,
        }
    }
}

impl Component for TopicView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let view_area = outer.inner(area);
        frame.render_widget(outer, area);

        let content_width = view_area.width.saturating_sub(1); // -1 for scrollbar
        let sections = build_sections(self.app, self.markdown, self.diagram, content_width);
        let heights: Vec<u16> = sections.iter().map(|s| s.height(content_width)).collect();
        let total_height = canvas_height(&heights);

        self.state.viewport_height = view_area.height;
        self.state.content_height = total_height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (section, height) in sections.iter().zip(&heights) {
            if y_offset >= total_height {
                break;
            }
            let rect = Rect::new(0, y_offset, content_width, *height);
            scroll_view.render_widget(section.paragraph(), rect);
            y_offset = y_offset.saturating_add(*height).saturating_add(SECTION_GAP);
        }

        frame.render_stateful_widget(scroll_view, view_area, &mut self.state.scroll_state);
    }
}
