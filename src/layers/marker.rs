use crate::{
    core::geo::LatLng,
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        icon::Icon,
    },
    ui::popup::Popup,
    MapError, Result,
};

pub struct Marker {
    properties: LayerProperties,
    position: LatLng,
    icon: Option<Icon>,
    popup: Option<Popup>,
}

impl Marker {
    pub fn new(id: String, position: LatLng) -> Self {
        let properties = LayerProperties::new(id, "Marker".to_string(), LayerType::Marker);
        Self {
            properties,
            position,
            icon: None,
            popup: None,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_popup(mut self, content: impl Into<String>) -> Self {
        self.bind_popup(content);
        self
    }

    pub fn lat_lng(&self) -> LatLng {
        self.position
    }

    /// Moves the marker; a bound popup follows it
    pub fn set_lat_lng(&mut self, position: LatLng) {
        self.position = position;
        if let Some(popup) = &mut self.popup {
            popup.set_position(position);
        }
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn set_icon(&mut self, icon: Icon) {
        self.icon = Some(icon);
    }

    /// Current icon rotation, 0 without an icon
    pub fn rotation(&self) -> f64 {
        self.icon.as_ref().map(|icon| icon.rotation_deg).unwrap_or(0.0)
    }

    /// Binds a closed popup, anchored at the icon's popup anchor
    pub fn bind_popup(&mut self, content: impl Into<String>) {
        let offset = self
            .icon
            .as_ref()
            .map(|icon| icon.popup_anchor)
            .unwrap_or((0, 0));
        self.popup = Some(Popup::new(self.position, content).with_offset(offset));
    }

    /// Opens the bound popup; no-op without one
    pub fn open_popup(&mut self) {
        if let Some(popup) = &mut self.popup {
            popup.open();
        }
    }

    pub fn close_popup(&mut self) {
        if let Some(popup) = &mut self.popup {
            popup.close();
        }
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }
}

impl LayerTrait for Marker {
    crate::impl_layer_trait!(Marker, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "z_index": self.properties.z_index,
            "icon": self.icon,
            "popup": self.popup.as_ref().map(|popup| popup.content.clone())
        })
    }

    fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        if let Some(position) = options.get("position") {
            let position: LatLng = serde_json::from_value(position.clone())?;
            if !position.is_valid() {
                return Err(MapError::InvalidCoordinates(format!(
                    "marker '{}' cannot move to ({}, {})",
                    self.properties.id, position.lat, position.lng
                )));
            }
            self.set_lat_lng(position);
        }
        if let Some(z_index) = options.get("z_index").and_then(|z| z.as_i64()) {
            self.properties.z_index = z_index as i32;
        }
        if let Some(icon) = options.get("icon").filter(|icon| !icon.is_null()) {
            self.icon = Some(serde_json::from_value(icon.clone())?);
        }
        if let Some(content) = options.get("popup").and_then(|popup| popup.as_str()) {
            self.bind_popup(content);
        }
        Ok(())
    }
}
