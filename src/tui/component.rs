use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Text;

/// A reusable UI component.
///
/// Components receive data via props (struct fields), may hold a
/// `&mut State` borrowed from `TuiState`, and render into a `Rect`.
///
/// `render` takes `&mut self` so components can update presentation state
/// (scroll offsets, cached heights) during the render pass, like ratatui's
/// `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}

/// A content section body that lays itself out for a given width.
///
/// Bodies are stacked inside the scrollable topic view, which needs every
/// section's text before it can size the canvas.
pub trait SectionBody {
    fn text(&self, width: u16) -> Text<'static>;
}
