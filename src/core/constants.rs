//! Core constants derived from Leaflet defaults and the demo scene.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

use crate::core::geo::LatLng;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Earth radius used by Leaflet's `CRS.Earth.distance` (metres).
pub const LEAFLET_EARTH_RADIUS: f64 = 6_371_000.0;

/// Spherical Web Mercator radius (EPSG:3857, metres).
pub const MERCATOR_EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.0511287798;

/// Where the glide starts.
pub const START_COORDS: LatLng = LatLng {
    lat: 22.1696,
    lng: 91.4996,
};

/// Where the glide ends.
pub const END_COORDS: LatLng = LatLng {
    lat: 22.2637,
    lng: 91.7159,
};

/// Default marker speed in km/h.
pub const SPEED_KMPH: f64 = 1000.0;

/// Default timer period in milliseconds.
pub const REFRESH_RATE_MS: u64 = 50;

/// Rotation added to the raw heading so the arrow glyph (drawn pointing east)
/// points along the direction of travel.
pub const ARROW_HEADING_OFFSET_DEG: f64 = -90.0;

/// Initial zoom of the demo view.
pub const DEFAULT_ZOOM: f64 = 11.0;

/// OpenStreetMap serves tiles up to this zoom.
pub const OSM_MAX_ZOOM: u8 = 19;

/// Marker icon size for the start, end and arrow icons.
pub const MARKER_ICON_SIZE: (u32, u32) = (32, 32);

/// Hot-spot of the point icons: bottom centre.
pub const POINT_ICON_ANCHOR: (i32, i32) = (16, 32);

/// Popups open this far above a point icon's anchor.
pub const POINT_POPUP_ANCHOR: (i32, i32) = (0, -32);

/// Hot-spot of the arrow icon: its centre, so it rotates in place.
pub const ARROW_ICON_ANCHOR: (i32, i32) = (16, 16);
