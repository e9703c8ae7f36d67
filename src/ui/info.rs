//! Configuration overlay shown above the map

use crate::core::{config::AnimationConfig, geo::LatLng};

/// The four read-only lines describing the current run
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub start: LatLng,
    pub end: LatLng,
    pub speed_kmph: f64,
    pub refresh_interval_ms: u64,
}

impl InfoPanel {
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            start: config.start,
            end: config.end,
            speed_kmph: config.speed_kmph,
            refresh_interval_ms: config.refresh_interval_ms,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!(
                "Start Coordinates: [{}, {}]",
                self.start.lat, self.start.lng
            ),
            format!("End Coordinates: [{}, {}]", self.end.lat, self.end.lng),
            format!("Speed: {} km/h", self.speed_kmph),
            format!("Refresh Rate: {} ms", self.refresh_interval_ms),
        ]
    }
}

impl From<&AnimationConfig> for InfoPanel {
    fn from(config: &AnimationConfig) -> Self {
        Self::from_config(config)
    }
}

impl std::fmt::Display for InfoPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
