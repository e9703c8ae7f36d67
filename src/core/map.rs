use crate::{
    animation::sink::MarkerUpdate,
    core::{
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    layers::{base::LayerTrait, manager::LayerManager, marker::Marker},
    MapError, Result,
};

#[derive(Debug, Clone)]
pub struct MapOptions {
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    pub attribution_control: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            min_zoom: None,
            max_zoom: None,
            attribution_control: true,
        }
    }
}

/// A passive map: a viewport plus the layers drawn in it.
///
/// After [`Map::remove`] the map is torn down; layer operations fail with
/// [`MapError::Layer`] so late updates cannot touch a disposed view.
pub struct Map {
    viewport: Viewport,
    layers: LayerManager,
    options: MapOptions,
    removed: bool,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::with_options(center, zoom, size, MapOptions::default())
    }

    pub fn with_options(center: LatLng, zoom: f64, size: Point, options: MapOptions) -> Self {
        let mut viewport = Viewport::new(center, zoom, size);
        viewport.set_zoom_limits(
            options.min_zoom.unwrap_or(viewport.min_zoom),
            options.max_zoom.unwrap_or(viewport.max_zoom),
        );
        Self {
            viewport,
            layers: LayerManager::new(),
            options,
            removed: false,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Re-centres the view (Leaflet's `setView`)
    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "cannot centre on ({}, {})",
                center.lat, center.lng
            )));
        }
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        Ok(())
    }

    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
    }

    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: Option<f64>) {
        self.viewport.fit_bounds(bounds, padding);
    }

    fn ensure_live(&self) -> Result<()> {
        if self.removed {
            Err(MapError::Layer("map has been removed".to_string()))
        } else {
            Ok(())
        }
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.ensure_live()?;
        log::debug!("Adding {} layer '{}'", layer.layer_type(), layer.id());
        self.layers.add_layer(layer)
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Result<Option<Box<dyn LayerTrait>>> {
        self.ensure_live()?;
        Ok(self.layers.remove_layer(layer_id))
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get_layer(layer_id)
    }

    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Result<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.ensure_live()?;
        self.layers
            .with_layer_mut(layer_id, f)
            .ok_or_else(|| MapError::Layer(format!("no layer '{layer_id}'")))
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layers.list_layers()
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn marker(&self, marker_id: &str) -> Option<&Marker> {
        self.layers.get_layer_as::<Marker>(marker_id)
    }

    /// Markers in render order
    pub fn markers(&self) -> Vec<&Marker> {
        self.layers
            .layers()
            .into_iter()
            .filter_map(|layer| layer.as_any().downcast_ref::<Marker>())
            .collect()
    }

    pub fn with_marker_mut<F, R>(&mut self, marker_id: &str, f: F) -> Result<R>
    where
        F: FnOnce(&mut Marker) -> R,
    {
        self.ensure_live()?;
        self.layers
            .with_layer_as_mut::<Marker, _, _>(marker_id, f)
            .ok_or_else(|| MapError::Layer(format!("no marker '{marker_id}'")))
    }

    /// Applies an update received from an animation channel
    pub fn apply_update(&mut self, marker_id: &str, update: MarkerUpdate) -> Result<()> {
        self.with_marker_mut(marker_id, |marker| update.apply_to(marker))?
    }

    /// Tears the map down, dropping every layer
    pub fn remove(&mut self) {
        if !self.removed {
            log::debug!("Removing map with {} layers", self.layers.len());
        }
        self.layers.clear();
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::constants::START_COORDS, layers::tile::TileLayer};

    fn demo_map() -> Map {
        Map::new(START_COORDS, 11.0, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_set_view() {
        let mut map = demo_map();
        map.set_view(LatLng::new(10.0, 20.0), 5.0).unwrap();
        assert_eq!(map.viewport().center, LatLng::new(10.0, 20.0));
        assert_eq!(map.viewport().zoom, 5.0);

        assert!(map.set_view(LatLng::new(f64::NAN, 0.0), 5.0).is_err());
    }

    #[test]
    fn test_markers_and_updates() {
        let mut map = demo_map();
        map.add_layer(Box::new(TileLayer::openstreetmap(
            "osm".to_string(),
            "OpenStreetMap".to_string(),
        )))
        .unwrap();
        map.add_layer(Box::new(Marker::new("moving".to_string(), START_COORDS)))
            .unwrap();

        assert_eq!(map.markers().len(), 1);
        map.apply_update("moving", MarkerUpdate::Position(LatLng::new(1.0, 2.0)))
            .unwrap();
        assert_eq!(map.marker("moving").unwrap().lat_lng(), LatLng::new(1.0, 2.0));

        let missing = map.apply_update("ghost", MarkerUpdate::Position(LatLng::default()));
        assert!(matches!(missing, Err(MapError::Layer(_))));
    }

    #[test]
    fn test_with_layer_mut() {
        let mut map = demo_map();
        map.add_layer(Box::new(Marker::new("moving".to_string(), START_COORDS)))
            .unwrap();
        map.with_layer_mut("moving", |layer| layer.set_visible(false))
            .unwrap();
        assert!(!map.get_layer("moving").unwrap().is_visible());
        assert!(map.with_layer_mut("ghost", |_| ()).is_err());
    }

    #[test]
    fn test_remove_tears_down() {
        let mut map = demo_map();
        map.add_layer(Box::new(Marker::new("moving".to_string(), START_COORDS)))
            .unwrap();
        map.remove();

        assert!(map.is_removed());
        assert!(map.list_layers().is_empty());
        assert!(map
            .add_layer(Box::new(Marker::new("late".to_string(), START_COORDS)))
            .is_err());
        assert!(map
            .apply_update("moving", MarkerUpdate::Position(LatLng::default()))
            .is_err());
    }

    #[test]
    fn test_zoom_options() {
        let options = MapOptions {
            max_zoom: Some(15.0),
            ..MapOptions::default()
        };
        let mut map = Map::with_options(START_COORDS, 11.0, Point::new(800.0, 600.0), options);
        map.set_view(START_COORDS, 18.0).unwrap();
        assert_eq!(map.viewport().zoom, 15.0);
    }
}
