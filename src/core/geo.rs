use crate::core::constants::{LEAFLET_EARTH_RADIUS, MAX_MERCATOR_LATITUDE, MERCATOR_EARTH_RADIUS};
use geo::GeodesicDistance;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A latitude/longitude pair in decimal degrees.
pub type GeoPoint = LatLng;

impl LatLng {
    /// Creates a new LatLng coordinate
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }

    /// Calculates the distance to another LatLng using the Haversine formula.
    ///
    /// Uses Leaflet's earth radius so distances agree with `L.LatLng.distanceTo`.
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        LEAFLET_EARTH_RADIUS * c
    }

    /// Equirectangular approximation: treats the short hop as planar,
    /// scaling longitude by the cosine of the mean latitude.
    pub fn planar_distance_to(&self, other: &LatLng) -> f64 {
        let mean_lat = ((self.lat + other.lat) / 2.0).to_radians();
        let dx = (other.lng - self.lng).to_radians() * mean_lat.cos();
        let dy = (other.lat - self.lat).to_radians();
        LEAFLET_EARTH_RADIUS * (dx * dx + dy * dy).sqrt()
    }

    /// Distance on the WGS84 ellipsoid (Karney's algorithm, via `geo`).
    pub fn geodesic_distance_to(&self, other: &LatLng) -> f64 {
        let a: geo_types::Point<f64> = (*self).into();
        let b: geo_types::Point<f64> = (*other).into();
        a.geodesic_distance(&b)
    }

    /// Component-wise difference `other - self`, as a displacement in degrees.
    pub fn delta_to(&self, other: &LatLng) -> LatLng {
        LatLng::new(other.lat - self.lat, other.lng - self.lng)
    }

    /// Compass-style heading of the displacement towards `other`, in degrees.
    ///
    /// Computed on raw degree deltas as `atan2(Δlng, Δlat)`: 0 is north,
    /// 90 is east. Identical points give 0.
    pub fn heading_to(&self, other: &LatLng) -> f64 {
        let delta = self.delta_to(other);
        delta.lng.atan2(delta.lat).to_degrees()
    }

    /// Clamps latitude to the range the Mercator projection can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let lat = Self::clamp_lat(self.lat);
        let x = self.lng.to_radians() * MERCATOR_EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * MERCATOR_EARTH_RADIUS;
        Point::new(x, y)
    }

    /// Creates LatLng from Web Mercator coordinates
    pub fn from_mercator(point: Point) -> Self {
        let lng = (point.x / MERCATOR_EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / MERCATOR_EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(value: LatLng) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

impl From<geo_types::Point<f64>> for LatLng {
    fn from(value: geo_types::Point<f64>) -> Self {
        LatLng::new(value.y(), value.x())
    }
}

impl From<[f64; 2]> for LatLng {
    /// `[lat, lng]`, the array order Leaflet accepts.
    fn from(value: [f64; 2]) -> Self {
        LatLng::new(value[0], value[1])
    }
}

/// How the length of the glide is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceFormula {
    /// Great-circle distance on Leaflet's sphere
    #[default]
    Haversine,
    /// Ellipsoidal WGS84 distance
    Geodesic,
    /// Equirectangular approximation
    Planar,
}

impl DistanceFormula {
    /// Distance in metres between two points
    pub fn distance(&self, from: &LatLng, to: &LatLng) -> f64 {
        match self {
            Self::Haversine => from.distance_to(to),
            Self::Geodesic => from.geodesic_distance_to(to),
            Self::Planar => from.planar_distance_to(to),
        }
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Smallest bounds containing every point, or `None` for an empty slice
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for point in rest {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Creates a tile coordinate from a LatLng and zoom level
    pub fn from_lat_lng(lat_lng: &LatLng, zoom: u8) -> Self {
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();
        let n = 2_f64.powi(zoom as i32);
        let max = (n as u32).saturating_sub(1);

        let x = ((lat_lng.lng + 180.0) / 360.0 * n).floor().max(0.0) as u32;
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor().max(0.0) as u32;

        Self::new(x.min(max), y.min(max), zoom)
    }

    /// Converts tile coordinate to LatLng (northwest corner)
    pub fn to_lat_lng(&self) -> LatLng {
        let n = 2_f64.powi(self.z as i32);
        let lng = self.x as f64 / n * 360.0 - 180.0;
        let lat_rad = (PI * (1.0 - 2.0 * self.y as f64 / n)).sinh().atan();
        let lat = lat_rad.to_degrees();

        LatLng::new(lat, lng)
    }

    /// Gets the bounds of the tile
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.to_lat_lng();
        let se_tile = TileCoord::new(self.x + 1, self.y + 1, self.z);
        let se = se_tile.to_lat_lng();

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = 2_u64.pow(self.z as u32);
        (self.x as u64) < max_coord && (self.y as u64) < max_coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{END_COORDS, START_COORDS};
    use geo::HaversineDistance;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(22.1696, 91.4996);
        assert_eq!(coord.lat, 22.1696);
        assert_eq!(coord.lng, 91.4996);
        assert!(coord.is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn test_demo_leg_distance() {
        let distance = START_COORDS.distance_to(&END_COORDS);
        assert!((distance - 24_602.0).abs() < 5.0, "got {distance}");
    }

    #[test]
    fn test_haversine_matches_geo_crate() {
        let ours = START_COORDS.distance_to(&END_COORDS);
        let a: geo_types::Point<f64> = START_COORDS.into();
        let b: geo_types::Point<f64> = END_COORDS.into();
        let theirs = a.haversine_distance(&b);
        // geo uses the mean radius 6371008.8 m, Leaflet 6371000 m
        assert!((ours - theirs).abs() / theirs < 1e-5);
    }

    #[test]
    fn test_distance_formulas_agree_on_short_leg() {
        let haversine = DistanceFormula::Haversine.distance(&START_COORDS, &END_COORDS);
        let geodesic = DistanceFormula::Geodesic.distance(&START_COORDS, &END_COORDS);
        let planar = DistanceFormula::Planar.distance(&START_COORDS, &END_COORDS);

        assert!((haversine - planar).abs() < 5.0);
        // Ellipsoid vs sphere differ by well under one percent here
        assert!((haversine - geodesic).abs() / haversine < 0.01);
    }

    #[test]
    fn test_zero_distance() {
        for formula in [
            DistanceFormula::Haversine,
            DistanceFormula::Geodesic,
            DistanceFormula::Planar,
        ] {
            assert_eq!(formula.distance(&START_COORDS, &START_COORDS), 0.0);
        }
    }

    #[test]
    fn test_heading() {
        let origin = LatLng::new(0.0, 0.0);
        assert!((origin.heading_to(&LatLng::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((origin.heading_to(&LatLng::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((origin.heading_to(&LatLng::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert_eq!(origin.heading_to(&origin), 0.0);

        let demo = START_COORDS.heading_to(&END_COORDS);
        assert!((demo - 66.4888).abs() < 1e-3, "got {demo}");
    }

    #[test]
    fn test_geo_types_round_trip_keeps_axis_order() {
        let point: geo_types::Point<f64> = START_COORDS.into();
        assert_eq!(point.x(), START_COORDS.lng);
        assert_eq!(point.y(), START_COORDS.lat);
        assert_eq!(LatLng::from(point), START_COORDS);
        assert_eq!(LatLng::from([22.1696, 91.4996]), START_COORDS);
    }

    #[test]
    fn test_tile_coord_conversion() {
        let tile = TileCoord::from_lat_lng(&START_COORDS, 11);
        assert!(tile.is_valid());
        assert!(tile.bounds().contains(&START_COORDS));
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = LatLngBounds::from_points(&[START_COORDS, END_COORDS]).unwrap();
        assert_eq!(bounds.south_west, START_COORDS);
        assert_eq!(bounds.north_east, END_COORDS);
        assert!(bounds.contains(&bounds.center()));
        assert!(LatLngBounds::from_points(&[]).is_none());
    }
}
