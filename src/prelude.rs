//! Prelude module for common marker-glide types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use marker_glide::prelude::*;`

pub use crate::core::{
    builder::{SceneBuilder, END_MARKER_ID, MOVING_MARKER_ID, START_MARKER_ID, TILE_LAYER_ID},
    config::{AnimationConfig, MapViewConfig, SceneConfig},
    geo::{DistanceFormula, GeoPoint, LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use crate::layers::{
    base::{LayerTrait, LayerType},
    icon::{Icon, IconShape},
    manager::LayerManager,
    marker::Marker,
    tile::{TileLayer, TileLayerOptions},
};

pub use crate::animation::{
    motion::{AnimationState, MotionPlan, MotionSample, MovingMarkerAnimator},
    sink::{apply_sample, ChannelSink, MarkerSink, MarkerUpdate},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::animation::player::MotionPlayer;

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::ui::{info::InfoPanel, popup::Popup};

#[cfg(feature = "egui")]
pub use crate::ui::view::{GlideView, GlideViewStyle};

pub use crate::traits::Lerp;

pub use crate::{Error as MapError, Result};

pub use std::{
    pin::Pin,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::Future;
