use crate::{
    core::{
        constants::{OSM_MAX_ZOOM, TILE_SIZE},
        geo::{LatLng, TileCoord},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    Result,
};

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    /// URL template for tiles (e.g., "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
    pub url_template: String,
    /// Available subdomains for load balancing
    pub subdomains: Vec<String>,
    /// Attribution text
    pub attribution: String,
    /// Tile size in pixels
    pub tile_size: u32,
    /// Maximum zoom level for this tile source
    pub max_zoom: u8,
    /// Minimum zoom level for this tile source
    pub min_zoom: u8,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: "© OpenStreetMap contributors".to_string(),
            tile_size: TILE_SIZE,
            max_zoom: OSM_MAX_ZOOM,
            min_zoom: 0,
        }
    }
}

/// A tile-based base layer.
///
/// Only addresses tiles; fetching and caching image data is left to whoever
/// draws the map.
pub struct TileLayer {
    properties: LayerProperties,
    options: TileLayerOptions,
}

impl TileLayer {
    pub fn with_options(id: String, name: String, options: TileLayerOptions) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Tile),
            options,
        }
    }

    /// Standard OpenStreetMap layer
    pub fn openstreetmap(id: String, name: String) -> Self {
        Self::with_options(id, name, TileLayerOptions::default())
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// Zoom level tiles are requested at for a (possibly fractional) view zoom
    pub fn tile_zoom(&self, zoom: f64) -> u8 {
        (zoom.round().max(0.0) as u8).clamp(self.options.min_zoom, self.options.max_zoom)
    }

    /// Expands the URL template for one tile, rotating subdomains by position
    pub fn tile_url(&self, coord: TileCoord) -> String {
        let subdomain = if self.options.subdomains.is_empty() {
            ""
        } else {
            let index = (coord.x as usize + coord.y as usize) % self.options.subdomains.len();
            self.options.subdomains[index].as_str()
        };

        self.options
            .url_template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }

    /// Tiles covering the viewport, row by row from the north-west corner
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<TileCoord> {
        let zoom = self.tile_zoom(viewport.zoom);
        let bounds = viewport.bounds();

        let nw = TileCoord::from_lat_lng(
            &LatLng::new(bounds.north_east.lat, bounds.south_west.lng),
            zoom,
        );
        let se = TileCoord::from_lat_lng(
            &LatLng::new(bounds.south_west.lat, bounds.north_east.lng),
            zoom,
        );

        let mut tiles = Vec::with_capacity(
            ((se.x - nw.x + 1) as usize) * ((se.y - nw.y + 1) as usize),
        );
        for y in nw.y..=se.y {
            for x in nw.x..=se.x {
                tiles.push(TileCoord::new(x, y, zoom));
            }
        }
        tiles
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::to_value(&self.options).unwrap_or(serde_json::Value::Null)
    }

    fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        self.options = serde_json::from_value(options)?;
        Ok(())
    }
}
