//! Configuration for a glide run and for the map view around it
//!
//! Every value the demo used to hard-code lives here as a default, so a run
//! is fully described by one [`SceneConfig`] that can also be loaded from
//! JSON.

use crate::{
    core::{
        constants::{
            ARROW_HEADING_OFFSET_DEG, DEFAULT_ZOOM, END_COORDS, OSM_MAX_ZOOM, REFRESH_RATE_MS,
            SPEED_KMPH, START_COORDS,
        },
        geo::{DistanceFormula, LatLng},
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Parameters of one animation run. Immutable once the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub start: LatLng,
    pub end: LatLng,
    /// Marker speed in km/h
    pub speed_kmph: f64,
    /// Timer period in milliseconds
    pub refresh_interval_ms: u64,
    pub distance: DistanceFormula,
    /// Added to the raw heading before it reaches the icon
    pub heading_offset_deg: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start: START_COORDS,
            end: END_COORDS,
            speed_kmph: SPEED_KMPH,
            refresh_interval_ms: REFRESH_RATE_MS,
            distance: DistanceFormula::default(),
            heading_offset_deg: ARROW_HEADING_OFFSET_DEG,
        }
    }
}

impl AnimationConfig {
    pub fn new(start: LatLng, end: LatLng) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    pub fn with_speed_kmph(mut self, speed_kmph: f64) -> Self {
        self.speed_kmph = speed_kmph;
        self
    }

    pub fn with_refresh_interval_ms(mut self, refresh_interval_ms: u64) -> Self {
        self.refresh_interval_ms = refresh_interval_ms;
        self
    }

    pub fn with_distance(mut self, distance: DistanceFormula) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_heading_offset(mut self, heading_offset_deg: f64) -> Self {
        self.heading_offset_deg = heading_offset_deg;
        self
    }

    /// Speed converted to metres per second
    pub fn speed_mps(&self) -> f64 {
        self.speed_kmph * 1000.0 / 3600.0
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Metres covered between two ticks
    pub fn step_distance(&self) -> f64 {
        self.speed_mps() * (self.refresh_interval_ms as f64 / 1000.0)
    }

    /// Rejects configurations that cannot produce a finite run
    pub fn validate(&self) -> Result<()> {
        for (name, point) in [("start", &self.start), ("end", &self.end)] {
            if !point.is_valid() {
                return Err(MapError::InvalidCoordinates(format!(
                    "{name} point ({}, {}) is out of range",
                    point.lat, point.lng
                )));
            }
        }
        if !self.speed_kmph.is_finite() || self.speed_kmph <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "speed must be positive, got {} km/h",
                self.speed_kmph
            )));
        }
        if self.refresh_interval_ms == 0 {
            return Err(MapError::InvalidConfig(
                "refresh interval must be at least 1 ms".to_string(),
            ));
        }
        if !self.heading_offset_deg.is_finite() {
            return Err(MapError::InvalidConfig(
                "heading offset must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the map is framed when the scene opens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    pub zoom: f64,
    pub max_zoom: u8,
    pub tile_url_template: String,
    pub attribution: String,
    pub start_popup: String,
    pub end_popup: String,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            max_zoom: OSM_MAX_ZOOM,
            tile_url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            start_popup: "<b>A</b>".to_string(),
            end_popup: "<b>B</b>".to_string(),
        }
    }
}

/// Everything needed to build and play a scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub map: MapViewConfig,
    pub animation: AnimationConfig,
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded scene config from {}", path.as_ref().display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=self.map.max_zoom as f64).contains(&self.map.zoom) {
            return Err(MapError::InvalidConfig(format!(
                "zoom {} outside 0..={}",
                self.map.zoom, self.map.max_zoom
            )));
        }
        self.animation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo() {
        let config = AnimationConfig::default();
        assert_eq!(config.start, START_COORDS);
        assert_eq!(config.end, END_COORDS);
        assert_eq!(config.refresh_interval(), Duration::from_millis(50));
        assert!((config.step_distance() - 13.8889).abs() < 1e-3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_degenerate_configs_are_rejected() {
        let zero_speed = AnimationConfig::default().with_speed_kmph(0.0);
        assert!(matches!(
            zero_speed.validate(),
            Err(MapError::InvalidConfig(_))
        ));

        let negative_speed = AnimationConfig::default().with_speed_kmph(-5.0);
        assert!(negative_speed.validate().is_err());

        let zero_interval = AnimationConfig::default().with_refresh_interval_ms(0);
        assert!(matches!(
            zero_interval.validate(),
            Err(MapError::InvalidConfig(_))
        ));

        let bad_point = AnimationConfig::new(LatLng::new(95.0, 0.0), END_COORDS);
        assert!(matches!(
            bad_point.validate(),
            Err(MapError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_identical_points_are_allowed() {
        let config = AnimationConfig::new(START_COORDS, START_COORDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scene_config_from_partial_json() {
        let json = r#"{
            "animation": { "speed_kmph": 500.0, "distance": "geodesic" },
            "map": { "zoom": 12.0 }
        }"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        assert_eq!(config.animation.speed_kmph, 500.0);
        assert_eq!(config.animation.distance, DistanceFormula::Geodesic);
        assert_eq!(config.animation.start, START_COORDS);
        assert_eq!(config.map.zoom, 12.0);
        assert_eq!(config.map.max_zoom, OSM_MAX_ZOOM);
    }

    #[test]
    fn test_scene_config_rejects_bad_values() {
        let json = r#"{ "animation": { "refresh_interval_ms": 0 } }"#;
        assert!(matches!(
            SceneConfig::from_json_str(json),
            Err(MapError::InvalidConfig(_))
        ));
        assert!(matches!(
            SceneConfig::from_json_str("{ not json"),
            Err(MapError::Serialization(_))
        ));
    }
}
