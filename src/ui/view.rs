//! egui rendering of a glide scene
//!
//! [`GlideView`] paints a [`Map`] with plain shapes: tile outlines stand in
//! for imagery, pins and the arrow stand in for the icon images, and open
//! popups are drawn as labelled bubbles. Nothing here mutates the map.

use crate::{
    core::{
        constants::TILE_SIZE,
        geo::{LatLng, Point},
        map::Map,
        viewport::Viewport,
    },
    layers::{
        base::LayerTrait,
        icon::{Icon, IconShape},
        marker::Marker,
        tile::TileLayer,
    },
    ui::{info::InfoPanel, popup::Popup},
};
use egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2,
    Widget,
};

/// Colours and sizes used by [`GlideView`]
#[derive(Debug, Clone)]
pub struct GlideViewStyle {
    pub background_color: Color32,
    pub tile_stroke: Stroke,
    pub tile_label_color: Color32,
    /// Dashed line between the start and end markers
    pub path_stroke: Stroke,
    pub pin_color: Color32,
    pub arrow_color: Color32,
    pub outline: Stroke,
    pub popup_background: Color32,
    pub popup_text_color: Color32,
    pub panel_background: Color32,
    pub panel_text_color: Color32,
    pub font_id: FontId,
    pub attribution_font_id: FontId,
}

impl Default for GlideViewStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(230, 230, 230),
            tile_stroke: Stroke::new(1.0, Color32::from_gray(200)),
            tile_label_color: Color32::from_gray(170),
            path_stroke: Stroke::new(2.0, Color32::from_rgba_unmultiplied(40, 90, 200, 160)),
            pin_color: Color32::from_rgb(220, 60, 50),
            arrow_color: Color32::from_rgb(30, 110, 220),
            outline: Stroke::new(1.0, Color32::from_gray(60)),
            popup_background: Color32::WHITE,
            popup_text_color: Color32::BLACK,
            panel_background: Color32::from_rgba_unmultiplied(255, 255, 255, 230),
            panel_text_color: Color32::from_gray(30),
            font_id: FontId::proportional(14.0),
            attribution_font_id: FontId::proportional(10.0),
        }
    }
}

pub struct GlideView<'a> {
    map: &'a Map,
    info: Option<&'a InfoPanel>,
    style: GlideViewStyle,
}

impl<'a> GlideView<'a> {
    pub fn new(map: &'a Map) -> Self {
        Self {
            map,
            info: None,
            style: GlideViewStyle::default(),
        }
    }

    /// Show the configuration overlay at the top of the view
    pub fn with_info(mut self, info: &'a InfoPanel) -> Self {
        self.info = Some(info);
        self
    }

    pub fn with_style(mut self, style: GlideViewStyle) -> Self {
        self.style = style;
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());

        // Lay the map out for the space egui actually gave us
        let mut viewport = self.map.viewport().clone();
        viewport.set_size(Point::new(rect.width() as f64, rect.height() as f64));
        let projection = ScreenProjection {
            viewport: &viewport,
            origin: rect.min,
        };

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.style.background_color);

        for layer in self.map.layers().layers() {
            if !layer.is_visible() {
                continue;
            }
            if let Some(tiles) = layer.as_any().downcast_ref::<TileLayer>() {
                self.paint_tiles(&painter, &projection, tiles);
            }
        }

        self.paint_path(&painter, &projection);

        let markers = self.map.markers();
        for marker in markers.iter().filter(|marker| marker.is_visible()) {
            self.paint_marker(&painter, projection.to_screen(marker.lat_lng()), marker);
        }
        for marker in &markers {
            if let Some(popup) = marker.popup().filter(|popup| popup.is_open()) {
                self.paint_popup(&painter, projection.to_screen(popup.position), popup);
            }
        }

        if let Some(info) = self.info {
            self.paint_info(&painter, rect, info);
        }
        self.paint_attribution(&painter, rect);

        response
    }

    fn paint_tiles(&self, painter: &Painter, projection: &ScreenProjection, layer: &TileLayer) {
        let tile_zoom = layer.tile_zoom(projection.viewport.zoom);
        let scale = 2_f64.powf(projection.viewport.zoom - tile_zoom as f64);
        let side = (TILE_SIZE as f64 * scale) as f32;

        for coord in layer.visible_tiles(projection.viewport) {
            let min = projection.to_screen(coord.to_lat_lng());
            let tile_rect = Rect::from_min_size(min, Vec2::splat(side));
            painter.rect_stroke(tile_rect, 0.0, self.style.tile_stroke);
            painter.text(
                tile_rect.min + Vec2::new(4.0, 4.0),
                Align2::LEFT_TOP,
                format!("{}/{}/{}", coord.z, coord.x, coord.y),
                self.style.attribution_font_id.clone(),
                self.style.tile_label_color,
            );
        }
    }

    fn paint_path(&self, painter: &Painter, projection: &ScreenProjection) {
        use crate::core::builder::{END_MARKER_ID, START_MARKER_ID};

        let (Some(start), Some(end)) = (
            self.map.marker(START_MARKER_ID),
            self.map.marker(END_MARKER_ID),
        ) else {
            return;
        };
        let points = [
            projection.to_screen(start.lat_lng()),
            projection.to_screen(end.lat_lng()),
        ];
        painter.extend(Shape::dashed_line(&points, self.style.path_stroke, 8.0, 6.0));
    }

    fn paint_marker(&self, painter: &Painter, anchor: Pos2, marker: &Marker) {
        match marker.icon() {
            Some(icon) if icon.shape == IconShape::Arrow => {
                let center = anchor + icon_center_offset(icon);
                let length = icon.size.0.max(icon.size.1) as f32 * 0.8;
                let points = arrow_points(center, icon.rotation_deg as f32, length);
                painter.add(Shape::convex_polygon(
                    points.to_vec(),
                    self.style.arrow_color,
                    self.style.outline,
                ));
            }
            Some(icon) => {
                let height = icon.size.1 as f32;
                let head = Pos2::new(anchor.x, anchor.y - height * 0.65);
                let radius = height * 0.3;
                painter.add(Shape::convex_polygon(
                    vec![
                        anchor,
                        head + Vec2::new(-radius * 0.8, radius * 0.5),
                        head + Vec2::new(radius * 0.8, radius * 0.5),
                    ],
                    self.style.pin_color,
                    Stroke::NONE,
                ));
                painter.circle(head, radius, self.style.pin_color, self.style.outline);
                painter.circle_filled(head, radius * 0.35, Color32::WHITE);
            }
            None => {
                painter.circle(anchor, 6.0, self.style.pin_color, self.style.outline);
            }
        }
    }

    fn paint_popup(&self, painter: &Painter, anchor: Pos2, popup: &Popup) {
        let tip = anchor + Vec2::new(popup.offset.0 as f32, popup.offset.1 as f32 - 6.0);
        painter.add(Shape::convex_polygon(
            vec![
                tip + Vec2::new(0.0, 6.0),
                tip + Vec2::new(-6.0, -1.0),
                tip + Vec2::new(6.0, -1.0),
            ],
            self.style.popup_background,
            Stroke::NONE,
        ));

        // Reserve the bubble slot so it sits under the text measured below
        let bubble = painter.add(Shape::Noop);
        let text_rect = painter.text(
            tip - Vec2::new(0.0, 6.0),
            Align2::CENTER_BOTTOM,
            popup.plain_text(),
            self.style.font_id.clone(),
            self.style.popup_text_color,
        );
        painter.set(
            bubble,
            Shape::rect_filled(text_rect.expand(6.0), 4.0, self.style.popup_background),
        );
    }

    fn paint_info(&self, painter: &Painter, rect: Rect, info: &InfoPanel) {
        let background = painter.add(Shape::Noop);
        let mut cursor = Pos2::new(rect.center().x, rect.min.y + 16.0);
        let mut panel_rect = Rect::NOTHING;
        for line in info.lines() {
            let line_rect = painter.text(
                cursor,
                Align2::CENTER_TOP,
                line,
                self.style.font_id.clone(),
                self.style.panel_text_color,
            );
            panel_rect = panel_rect.union(line_rect);
            cursor.y = line_rect.max.y + 4.0;
        }
        let panel_rect = panel_rect.expand(10.0);
        painter.set(
            background,
            Shape::rect_filled(panel_rect, 5.0, self.style.panel_background),
        );
        painter.rect_stroke(panel_rect, 5.0, self.style.outline);
    }

    fn paint_attribution(&self, painter: &Painter, rect: Rect) {
        if !self.map.options().attribution_control {
            return;
        }
        let attribution = self
            .map
            .layers()
            .get_layer_as::<TileLayer>(crate::core::builder::TILE_LAYER_ID)
            .map(|layer| layer.tile_options().attribution.clone())
            .unwrap_or_default();
        if attribution.is_empty() {
            return;
        }
        painter.text(
            rect.left_bottom() + Vec2::new(5.0, -5.0),
            Align2::LEFT_BOTTOM,
            attribution,
            self.style.attribution_font_id.clone(),
            Color32::from_gray(80),
        );
    }
}

impl Widget for GlideView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui)
    }
}

struct ScreenProjection<'v> {
    viewport: &'v Viewport,
    origin: Pos2,
}

impl ScreenProjection<'_> {
    fn to_screen(&self, lat_lng: LatLng) -> Pos2 {
        let pixel = self.viewport.lat_lng_to_pixel(&lat_lng);
        self.origin + Vec2::new(pixel.x as f32, pixel.y as f32)
    }
}

/// Offset from an icon's anchor to the middle of its image
fn icon_center_offset(icon: &Icon) -> Vec2 {
    Vec2::new(
        icon.size.0 as f32 / 2.0 - icon.anchor.0 as f32,
        icon.size.1 as f32 / 2.0 - icon.anchor.1 as f32,
    )
}

/// Triangle for an arrow that points east at zero rotation.
///
/// Rotation is clockwise on screen, matching a CSS `rotate()`.
pub fn arrow_points(center: Pos2, rotation_deg: f32, length: f32) -> [Pos2; 3] {
    let angle = rotation_deg.to_radians();
    let dir = Vec2::new(angle.cos(), angle.sin());
    let normal = Vec2::new(-dir.y, dir.x);
    let half = length / 2.0;
    [
        center + dir * half,
        center - dir * half + normal * (length / 3.0),
        center - dir * half - normal * (length / 3.0),
    ]
}
