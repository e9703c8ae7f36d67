// LayerTrait is unified with LayerOperations in shared traits
pub use crate::traits::LayerOperations as LayerTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Marker,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Marker => write!(f, "marker"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        // Markers stack above tiles unless told otherwise
        let z_index = match layer_type {
            LayerType::Tile => 0,
            LayerType::Marker => 600,
        };
        Self {
            id,
            name,
            layer_type,
            z_index,
            opacity: 1.0,
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(
            "osm".to_string(),
            "OpenStreetMap".to_string(),
            LayerType::Tile,
        );

        assert_eq!(props.id, "osm");
        assert_eq!(props.name, "OpenStreetMap");
        assert_eq!(props.layer_type, LayerType::Tile);
        assert_eq!(props.z_index, 0);
        assert_eq!(props.opacity, 1.0);
        assert!(props.visible);
    }

    #[test]
    fn test_markers_stack_above_tiles() {
        let tile = LayerProperties::new("t".into(), "t".into(), LayerType::Tile);
        let marker = LayerProperties::new("m".into(), "m".into(), LayerType::Marker);
        assert!(marker.z_index > tile.z_index);
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Tile.to_string(), "tile");
        assert_eq!(LayerType::Marker.to_string(), "marker");
    }
}
