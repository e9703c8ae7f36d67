use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A text bubble bound to a map position.
///
/// Content is kept verbatim; markup such as `<b>A</b>` is interpreted by the
/// viewer ([`Popup::plain_text`] strips it for plain renderers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Popup {
    pub position: LatLng,
    pub content: String,
    pub visible: bool,
    /// Pixel offset of the bubble tip from `position`
    pub offset: (i32, i32),
    #[serde(skip)]
    opened_at: Option<Instant>,
    pub auto_close_duration: Option<Duration>,
}

impl Popup {
    pub fn new(position: LatLng, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            visible: false,
            offset: (0, 0),
            opened_at: None,
            auto_close_duration: None,
        }
    }

    pub fn with_offset(mut self, offset: (i32, i32)) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_auto_close(mut self, duration: Duration) -> Self {
        self.auto_close_duration = Some(duration);
        self
    }

    pub fn open(&mut self) {
        self.visible = true;
        self.opened_at = Some(Instant::now());
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.opened_at = None;
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    /// Whether the popup should be drawn right now
    pub fn is_open(&self) -> bool {
        if !self.visible {
            return false;
        }
        match (self.auto_close_duration, self.opened_at) {
            (Some(limit), Some(opened_at)) => opened_at.elapsed() < limit,
            _ => true,
        }
    }

    /// Content with markup tags removed
    pub fn plain_text(&self) -> String {
        let mut text = String::with_capacity(self.content.len());
        let mut in_tag = false;
        for ch in self.content.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => text.push(ch),
                _ => {}
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close() {
        let mut popup = Popup::new(LatLng::new(1.0, 2.0), "<b>A</b>");
        assert!(!popup.is_open());
        popup.open();
        assert!(popup.is_open());
        popup.close();
        assert!(!popup.is_open());
    }

    #[test]
    fn test_auto_close() {
        let mut popup =
            Popup::new(LatLng::new(1.0, 2.0), "bye").with_auto_close(Duration::from_millis(0));
        popup.open();
        assert!(!popup.is_open());
    }

    #[test]
    fn test_plain_text() {
        let popup = Popup::new(LatLng::default(), "<b>A</b> to <i>B</i>");
        assert_eq!(popup.plain_text(), "A to B");
    }
}
