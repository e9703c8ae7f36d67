//! # marker-glide
//!
//! A small Leaflet-style map scene with a marker that glides at constant
//! speed between two geographic coordinates.
//!
//! The map side (viewport, tile addressing, markers, icons, popups) is kept
//! deliberately thin. The interesting part lives in [`animation`]: a
//! [`MotionPlan`] fixes the number of steps for a run, the
//! [`MovingMarkerAnimator`] walks those steps one tick at a time, and the
//! [`MotionPlayer`] drives the animator from a cancellable timer task.

pub mod animation;
pub mod core;
pub mod layers;
pub mod prelude;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::SceneBuilder,
    config::{AnimationConfig, MapViewConfig, SceneConfig},
    geo::{DistanceFormula, GeoPoint, LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use layers::{
    base::LayerTrait,
    icon::{Icon, IconShape},
    manager::LayerManager,
    marker::Marker,
    tile::TileLayer,
};

pub use animation::{
    motion::{AnimationState, MotionPlan, MotionSample, MovingMarkerAnimator},
    sink::MarkerSink,
};

#[cfg(feature = "tokio-runtime")]
pub use animation::player::MotionPlayer;

pub use ui::{info::InfoPanel, popup::Popup};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Animation error: {0}")]
    Animation(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_debug_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(cfg!(test))
        .try_init();
}
