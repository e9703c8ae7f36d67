//! Scene builder for the glide demo
//!
//! [`SceneBuilder`] turns a [`SceneConfig`] into a ready [`Map`]: an OSM
//! base layer, the two endpoint markers with their popups open, and the
//! arrow marker parked on the start point waiting for a player.

use crate::{
    core::{
        config::{AnimationConfig, MapViewConfig, SceneConfig},
        geo::{LatLng, Point},
        map::{Map, MapOptions},
    },
    layers::{
        icon::Icon,
        marker::Marker,
        tile::{TileLayer, TileLayerOptions},
    },
    Result,
};

pub const TILE_LAYER_ID: &str = "osm";
pub const START_MARKER_ID: &str = "start";
pub const END_MARKER_ID: &str = "end";
pub const MOVING_MARKER_ID: &str = "moving";

/// Builder for the demo scene
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    config: SceneConfig,
    size: Point,
    start_icon_url: String,
    end_icon_url: String,
    arrow_icon_url: String,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::from_config(SceneConfig::default())
    }

    pub fn from_config(config: SceneConfig) -> Self {
        Self {
            config,
            size: Point::new(800.0, 600.0),
            start_icon_url: "pointa.jpg".to_string(),
            end_icon_url: "pointb.jpg".to_string(),
            arrow_icon_url: "arrow.png".to_string(),
        }
    }

    /// Set the initial viewport size in pixels
    pub fn with_size(mut self, size: Point) -> Self {
        self.size = size;
        self
    }

    pub fn with_map_view(mut self, map: MapViewConfig) -> Self {
        self.config.map = map;
        self
    }

    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.config.animation = animation;
        self
    }

    /// Override the image URLs for the start, end and moving markers
    pub fn with_icon_urls(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
        arrow: impl Into<String>,
    ) -> Self {
        self.start_icon_url = start.into();
        self.end_icon_url = end.into();
        self.arrow_icon_url = arrow.into();
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn animation_config(&self) -> &AnimationConfig {
        &self.config.animation
    }

    /// Unrotated icon handed to the player for the moving marker
    pub fn arrow_icon(&self) -> Icon {
        Icon::arrow(self.arrow_icon_url.clone())
    }

    fn tile_layer(&self) -> TileLayer {
        let options = TileLayerOptions {
            url_template: self.config.map.tile_url_template.clone(),
            attribution: self.config.map.attribution.clone(),
            max_zoom: self.config.map.max_zoom,
            ..TileLayerOptions::default()
        };
        TileLayer::with_options(
            TILE_LAYER_ID.to_string(),
            "OpenStreetMap".to_string(),
            options,
        )
    }

    fn endpoint_marker(id: &str, position: LatLng, icon_url: &str, popup: &str) -> Marker {
        let mut marker = Marker::new(id.to_string(), position)
            .with_icon(Icon::point(icon_url))
            .with_popup(popup);
        marker.open_popup();
        marker
    }

    /// Validates the configuration and assembles the map
    pub fn build(&self) -> Result<Map> {
        self.config.validate()?;

        let view = &self.config.map;
        let animation = &self.config.animation;
        let options = MapOptions {
            max_zoom: Some(view.max_zoom as f64),
            ..MapOptions::default()
        };
        let mut map = Map::with_options(animation.start, view.zoom, self.size, options);

        map.add_layer(Box::new(self.tile_layer()))?;
        map.add_layer(Box::new(Self::endpoint_marker(
            START_MARKER_ID,
            animation.start,
            &self.start_icon_url,
            &view.start_popup,
        )))?;
        map.add_layer(Box::new(Self::endpoint_marker(
            END_MARKER_ID,
            animation.end,
            &self.end_icon_url,
            &view.end_popup,
        )))?;
        map.add_layer(Box::new(
            Marker::new(MOVING_MARKER_ID.to_string(), animation.start)
                .with_icon(self.arrow_icon()),
        ))?;

        log::info!(
            "Built scene centred on ({}, {}) at zoom {}",
            animation.start.lat,
            animation.start.lng,
            view.zoom
        );
        Ok(map)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::constants::{END_COORDS, START_COORDS},
        layers::icon::IconShape,
        MapError,
    };

    #[test]
    fn test_default_scene() {
        let map = SceneBuilder::new().build().unwrap();

        assert_eq!(map.viewport().center, START_COORDS);
        assert_eq!(map.viewport().zoom, 11.0);
        assert_eq!(map.list_layers().len(), 4);
        assert!(map.get_layer(TILE_LAYER_ID).is_some());

        let start = map.marker(START_MARKER_ID).unwrap();
        assert_eq!(start.lat_lng(), START_COORDS);
        assert_eq!(start.icon().unwrap().url, "pointa.jpg");
        let popup = start.popup().unwrap();
        assert!(popup.is_open());
        assert_eq!(popup.content, "<b>A</b>");
        assert_eq!(popup.offset, (0, -32));

        let end = map.marker(END_MARKER_ID).unwrap();
        assert_eq!(end.lat_lng(), END_COORDS);
        assert_eq!(end.popup().unwrap().plain_text(), "B");

        let moving = map.marker(MOVING_MARKER_ID).unwrap();
        assert_eq!(moving.lat_lng(), START_COORDS);
        assert_eq!(moving.icon().unwrap().shape, IconShape::Arrow);
        assert!(moving.popup().is_none());
    }

    #[test]
    fn test_markers_draw_above_tiles() {
        let map = SceneBuilder::new().build().unwrap();
        assert_eq!(map.list_layers()[0], TILE_LAYER_ID);
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let builder = SceneBuilder::new()
            .with_animation(AnimationConfig::default().with_refresh_interval_ms(0));
        assert!(matches!(builder.build(), Err(MapError::InvalidConfig(_))));
    }

    #[test]
    fn test_custom_icons() {
        let builder = SceneBuilder::new().with_icon_urls("a.png", "b.png", "plane.png");
        let map = builder.build().unwrap();
        assert_eq!(map.marker(END_MARKER_ID).unwrap().icon().unwrap().url, "b.png");
        assert_eq!(builder.arrow_icon().url, "plane.png");
    }
}
