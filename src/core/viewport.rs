use crate::core::{
    constants::{MERCATOR_EARTH_RADIUS, TILE_SIZE},
    geo::{LatLng, LatLngBounds, Point},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Pixel origin for coordinate transformations (to avoid precision issues)
    pixel_origin: Option<Point>,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            center,
            zoom: zoom.clamp(0.0, 19.0),
            size,
            min_zoom: 0.0,
            max_zoom: 19.0,
            pixel_origin: None,
        };
        viewport.update_pixel_origin();
        viewport
    }

    /// Sets the center of the viewport, clamped to the projectable world
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        );
        self.update_pixel_origin();
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.update_pixel_origin();
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
        self.update_pixel_origin();
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE as f64 * 2_f64.powf(z);
        let half_world = PI * MERCATOR_EARTH_RADIUS;

        let mercator = lat_lng.to_mercator();
        Point::new(
            (mercator.x + half_world) / (2.0 * half_world) * scale,
            (half_world - mercator.y) / (2.0 * half_world) * scale,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE as f64 * 2_f64.powf(z);
        let half_world = PI * MERCATOR_EARTH_RADIUS;

        LatLng::from_mercator(Point::new(
            pixel.x / scale * 2.0 * half_world - half_world,
            half_world - pixel.y / scale * 2.0 * half_world,
        ))
    }

    /// Gets or calculates the pixel origin for this viewport
    pub fn get_pixel_origin(&self) -> Point {
        self.pixel_origin
            .unwrap_or_else(|| self.project(&self.center, None).floor())
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = Some(self.project(&self.center, None).floor());
    }

    /// Converts a geographical coordinate to screen pixel coordinates (container relative)
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let layer_point = self.project(lat_lng, None).subtract(&self.get_pixel_origin());
        Point::new(
            layer_point.x + self.size.x / 2.0,
            layer_point.y + self.size.y / 2.0,
        )
    }

    /// Converts screen pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let layer_point = Point::new(pixel.x - self.size.x / 2.0, pixel.y - self.size.y / 2.0);
        self.unproject(&layer_point.add(&self.get_pixel_origin()), None)
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_lat_lng(&Point::new(self.size.x, self.size.y));

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    /// Fits the viewport to contain the given bounds at the largest integer zoom
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: Option<f64>) {
        let padding = padding.unwrap_or(20.0);
        let available = Point::new(self.size.x - 2.0 * padding, self.size.y - 2.0 * padding);

        let mut best_zoom = self.min_zoom;
        for test_zoom in (self.min_zoom.ceil() as i32)..=(self.max_zoom.floor() as i32) {
            let zoom = test_zoom as f64;
            let nw = self.project(
                &LatLng::new(bounds.north_east.lat, bounds.south_west.lng),
                Some(zoom),
            );
            let se = self.project(
                &LatLng::new(bounds.south_west.lat, bounds.north_east.lng),
                Some(zoom),
            );

            if (se.x - nw.x).abs() <= available.x && (se.y - nw.y).abs() <= available.y {
                best_zoom = zoom;
            } else {
                break;
            }
        }

        log::debug!("fit_bounds: zoom {:.1} -> {:.1}", self.zoom, best_zoom);
        self.center = bounds.center();
        self.set_zoom(best_zoom);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{END_COORDS, START_COORDS};

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(START_COORDS, 11.0, Point::new(800.0, 600.0));

        assert_eq!(viewport.zoom, 11.0);
        assert_eq!(viewport.center, START_COORDS);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_coordinate_conversion() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let center_lat_lng = viewport.pixel_to_lat_lng(&Point::new(256.0, 256.0));
        assert!(center_lat_lng.lat.abs() < 0.01);
        assert!(center_lat_lng.lng.abs() < 0.01);
    }

    #[test]
    fn test_pixel_round_trip() {
        let viewport = Viewport::new(START_COORDS, 11.0, Point::new(1024.0, 768.0));
        let pixel = viewport.lat_lng_to_pixel(&END_COORDS);
        let back = viewport.pixel_to_lat_lng(&pixel);

        assert!((back.lat - END_COORDS.lat).abs() < 1e-9);
        assert!((back.lng - END_COORDS.lng).abs() < 1e-9);
        // End lies north-east of start: right of and above the centre
        assert!(pixel.x > 512.0);
        assert!(pixel.y < 384.0);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_fit_bounds_contains_both_points() {
        let mut viewport = Viewport::new(START_COORDS, 3.0, Point::new(800.0, 600.0));
        let bounds = LatLngBounds::from_points(&[START_COORDS, END_COORDS]).unwrap();
        viewport.fit_bounds(&bounds, None);

        let view = viewport.bounds();
        assert!(view.contains(&START_COORDS));
        assert!(view.contains(&END_COORDS));
        assert!(viewport.zoom >= 10.0);
    }
}
