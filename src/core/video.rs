//! # Video Chooser
//!
//! Two-slot selection between a topic's primary and secondary video.
//! The active slot always points at an identifier that exists; a slot with
//! no identifier never gets a control.

use crate::core::content::VideoRefs;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";
const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSlot {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoChooser {
    primary: Option<String>,
    secondary: Option<String>,
    active: Option<VideoSlot>,
}

impl VideoChooser {
    /// Start on the primary video if there is one, else the secondary.
    pub fn new(refs: &VideoRefs) -> Self {
        let primary = non_blank(refs.primary.as_deref());
        let secondary = non_blank(refs.secondary.as_deref());
        let active = if primary.is_some() {
            Some(VideoSlot::Primary)
        } else if secondary.is_some() {
            Some(VideoSlot::Secondary)
        } else {
            None
        };
        Self {
            primary,
            secondary,
            active,
        }
    }

    pub fn active(&self) -> Option<VideoSlot> {
        self.active
    }

    pub fn id(&self, slot: VideoSlot) -> Option<&str> {
        match slot {
            VideoSlot::Primary => self.primary.as_deref(),
            VideoSlot::Secondary => self.secondary.as_deref(),
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.and_then(|slot| self.id(slot))
    }

    /// Slots that get a toggle control, in display order.
    pub fn controls(&self) -> Vec<VideoSlot> {
        [VideoSlot::Primary, VideoSlot::Secondary]
            .into_iter()
            .filter(|slot| self.id(*slot).is_some())
            .collect()
    }

    pub fn has_videos(&self) -> bool {
        self.active.is_some()
    }

    /// Switch to `slot`. Returns `false` (and changes nothing) if it has no video.
    pub fn select(&mut self, slot: VideoSlot) -> bool {
        if self.id(slot).is_none() {
            return false;
        }
        self.active = Some(slot);
        true
    }

    /// Flip to the other slot when both have videos.
    pub fn toggle(&mut self) -> bool {
        match self.active {
            Some(VideoSlot::Primary) => self.select(VideoSlot::Secondary),
            Some(VideoSlot::Secondary) => self.select(VideoSlot::Primary),
            None => false,
        }
    }
}

fn non_blank(id: Option<&str>) -> Option<String> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Embeddable player URL for a video identifier.
pub fn embed_url(id: &str) -> String {
    format!("{EMBED_BASE}{id}")
}

/// Regular watch-page URL (terminals can't host the embedded player).
pub fn watch_url(id: &str) -> String {
    format!("{WATCH_BASE}{id}")
}
