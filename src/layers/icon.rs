//! Marker icons
//!
//! An [`Icon`] is pure metadata: where the image lives, how large it is and
//! which pixel sits on the marker's coordinate. Rotating an icon produces a
//! new icon, the same way a div icon is rebuilt with a new transform.

use crate::core::constants::{
    ARROW_ICON_ANCHOR, MARKER_ICON_SIZE, POINT_ICON_ANCHOR, POINT_POPUP_ANCHOR,
};
use serde::{Deserialize, Serialize};

/// What the viewer should draw when the image itself is not loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconShape {
    /// Drop pin whose tip is the anchor
    Pin,
    /// Arrow pointing east at zero rotation, anchored at its centre
    Arrow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub url: String,
    /// Width and height in pixels
    pub size: (u32, u32),
    /// Pixel of the image placed on the marker coordinate
    pub anchor: (i32, i32),
    /// Popup tip offset relative to the anchor
    pub popup_anchor: (i32, i32),
    pub class_name: Option<String>,
    pub shape: IconShape,
    /// Clockwise rotation in degrees
    pub rotation_deg: f64,
}

impl Icon {
    /// A 32×32 pin-style icon anchored at its bottom centre
    pub fn point(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            size: MARKER_ICON_SIZE,
            anchor: POINT_ICON_ANCHOR,
            popup_anchor: POINT_POPUP_ANCHOR,
            class_name: None,
            shape: IconShape::Pin,
            rotation_deg: 0.0,
        }
    }

    /// A 32×32 arrow anchored at its centre, so rotation keeps it in place
    pub fn arrow(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            size: MARKER_ICON_SIZE,
            anchor: ARROW_ICON_ANCHOR,
            popup_anchor: (0, 0),
            class_name: Some("rotated-arrow".to_string()),
            shape: IconShape::Arrow,
            rotation_deg: 0.0,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_anchor(mut self, x: i32, y: i32) -> Self {
        self.anchor = (x, y);
        self
    }

    /// Copy of this icon turned to `rotation_deg`
    pub fn rotated(&self, rotation_deg: f64) -> Self {
        Self {
            rotation_deg,
            ..self.clone()
        }
    }

    /// Markup of the equivalent div icon
    pub fn to_html(&self) -> String {
        let (width, height) = self.size;
        if self.rotation_deg == 0.0 {
            format!(
                r#"<img src="{}" style="width: {width}px; height: {height}px;" />"#,
                self.url
            )
        } else {
            format!(
                r#"<img src="{}" style="transform: rotate({}deg); width: {width}px; height: {height}px;" />"#,
                self.url, self.rotation_deg
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_icon_defaults() {
        let icon = Icon::point("pointa.jpg");
        assert_eq!(icon.size, (32, 32));
        assert_eq!(icon.anchor, (16, 32));
        assert_eq!(icon.popup_anchor, (0, -32));
        assert_eq!(icon.shape, IconShape::Pin);
    }

    #[test]
    fn test_rotation_keeps_everything_else() {
        let arrow = Icon::arrow("arrow.png");
        let turned = arrow.rotated(-23.5);
        assert_eq!(turned.rotation_deg, -23.5);
        assert_eq!(turned.anchor, (16, 16));
        assert_eq!(turned.url, arrow.url);
        assert_eq!(arrow.rotation_deg, 0.0);
    }

    #[test]
    fn test_html() {
        let arrow = Icon::arrow("arrow.png");
        assert_eq!(
            arrow.to_html(),
            r#"<img src="arrow.png" style="width: 32px; height: 32px;" />"#
        );
        assert!(arrow
            .rotated(45.0)
            .to_html()
            .contains("transform: rotate(45deg)"));
    }
}
