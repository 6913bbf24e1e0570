//! # VideoChooser Component
//!
//! Shows one toggle control per available video slot (labelled with the
//! channel name) and the links for the active one. A terminal can't host
//! the embedded player, so both the embed and the watch URL are printed.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::core::content::Channels;
use crate::core::video::{VideoChooser, VideoSlot, embed_url, watch_url};
use crate::tui::component::SectionBody;

pub const NO_VIDEOS: &str = "No relevant videos found for this topic.";

#[derive(Clone, Copy)]
pub struct VideoPanel<'a> {
    pub chooser: Option<&'a VideoChooser>,
    pub channels: &'a Channels,
}

impl<'a> VideoPanel<'a> {
    pub fn new(chooser: Option<&'a VideoChooser>, channels: &'a Channels) -> Self {
        Self { chooser, channels }
    }

    fn channel(&self, slot: VideoSlot) -> &str {
        match slot {
            VideoSlot::Primary => &self.channels.primary,
            VideoSlot::Secondary => &self.channels.secondary,
        }
    }
}

impl SectionBody for VideoPanel<'_> {
    fn text(&self, _width: u16) -> Text<'static> {
        let Some(chooser) = self.chooser.filter(|c| c.has_videos()) else {
            return Text::from(Line::from(Span::styled(
                NO_VIDEOS,
                Style::default().fg(Color::DarkGray),
            )));
        };

        let controls = chooser.controls();
        let mut buttons = Vec::new();
        for (i, slot) in controls.iter().enumerate() {
            if i > 0 {
                buttons.push(Span::raw("  "));
            }
            let style = if chooser.active() == Some(*slot) {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Red)
            };
            buttons.push(Span::styled(format!(" {} ", self.channel(*slot)), style));
        }

        let mut lines = vec![Line::from(buttons), Line::default()];
        if let Some(id) = chooser.active_id() {
            let link = Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED);
            lines.push(Line::from(vec![
                Span::styled("Embed: ", Style::default().fg(Color::DarkGray)),
                Span::styled(embed_url(id), link),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Watch: ", Style::default().fg(Color::DarkGray)),
                Span::styled(watch_url(id), link),
            ]));
        }
        if controls.len() > 1 {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "v switch video",
                Style::default().fg(Color::DarkGray),
            )));
        }
        Text::from(lines)
    }
}
