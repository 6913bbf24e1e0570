//! # ComparisonTable Component
//!
//! Grid rendering of a topic's "Key Differences" table. Column widths start
//! at each column's natural width and shrink (widest first) until the grid
//! fits; cells then wrap inside their column with `textwrap`.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::SectionBody;

/// Per cell: one space of padding either side.
const CELL_PAD: usize = 2;

/// One data row, each cell already wrapped to its column width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedRow {
    pub cells: Vec<Vec<String>>,
}

impl WrappedRow {
    fn wrap(cells: &[String], widths: &[usize]) -> Self {
        let cells = cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| {
                let wrapped: Vec<String> = textwrap::wrap(cell, width.max(1))
                    .into_iter()
                    .map(|line| line.into_owned())
                    .collect();
                if wrapped.is_empty() {
                    vec![String::new()]
                } else {
                    wrapped
                }
            })
            .collect();
        Self { cells }
    }

    pub fn height(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Content width of each column (padding and borders excluded).
    pub widths: Vec<usize>,
    pub header: WrappedRow,
    pub rows: Vec<WrappedRow>,
}

#[derive(Debug, Clone, Copy)]
pub struct ComparisonTable<'a> {
    headers: &'a [String],
    rows: &'a [Vec<String>],
}

impl<'a> ComparisonTable<'a> {
    /// `None` when there is nothing to tabulate.
    pub fn new(headers: &'a [String], rows: &'a [Vec<String>]) -> Option<Self> {
        if headers.is_empty() || rows.is_empty() {
            return None;
        }
        Some(Self { headers, rows })
    }

    pub fn layout(&self, width: u16) -> TableLayout {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = (0..columns)
            .map(|col| {
                std::iter::once(&self.headers[col])
                    .chain(self.rows.iter().filter_map(|row| row.get(col)))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0)
                    .max(1)
            })
            .collect();

        // Borders: one per column plus the closing one
        let chrome = columns * CELL_PAD + columns + 1;
        let available = (width as usize).saturating_sub(chrome).max(columns);
        while widths.iter().sum::<usize>() > available {
            let Some((widest, _)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
                break;
            };
            if widths[widest] <= 1 {
                break;
            }
            widths[widest] -= 1;
        }

        TableLayout {
            header: WrappedRow::wrap(self.headers, &widths),
            rows: self
                .rows
                .iter()
                .map(|row| WrappedRow::wrap(row, &widths))
                .collect(),
            widths,
        }
    }
}

impl SectionBody for ComparisonTable<'_> {
    fn text(&self, width: u16) -> Text<'static> {
        let layout = self.layout(width);
        let border = Style::default().fg(Color::DarkGray);
        let header_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![rule(&layout.widths, ('┌', '┬', '┐'), border)];
        push_row(&mut lines, &layout.header, &layout.widths, header_style, border);
        lines.push(rule(&layout.widths, ('├', '┼', '┤'), border));
        for row in &layout.rows {
            push_row(&mut lines, row, &layout.widths, Style::default(), border);
        }
        lines.push(rule(&layout.widths, ('└', '┴', '┘'), border));
        Text::from(lines)
    }
}

fn rule(widths: &[usize], (left, mid, right): (char, char, char), style: Style) -> Line<'static> {
    let mut s = String::new();
    s.push(left);
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            s.push(mid);
        }
        s.push_str(&"─".repeat(w + CELL_PAD));
    }
    s.push(right);
    Line::from(Span::styled(s, style))
}

fn push_row(
    lines: &mut Vec<Line<'static>>,
    row: &WrappedRow,
    widths: &[usize],
    cell_style: Style,
    border: Style,
) {
    for line_no in 0..row.height() {
        let mut spans = vec![Span::styled("│", border)];
        for (cell, &width) in row.cells.iter().zip(widths) {
            let content = cell.get(line_no).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(content.width());
            spans.push(Span::styled(
                format!(" {content}{} ", " ".repeat(pad)),
                cell_style,
            ));
            spans.push(Span::styled("│", border));
        }
        lines.push(Line::from(spans));
    }
}
