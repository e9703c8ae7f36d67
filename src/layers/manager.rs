use crate::{layers::base::LayerTrait, prelude::HashMap, MapError, Result};

/// Manages layers for the map, handling ordering and lookup
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs for drawing (sorted by z-index)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer to the manager. Ids must be unique.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("layer '{layer_id}' already exists")));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        // Insert in sorted order by z-index; equal z-indices keep insertion order
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Gets a layer downcast to its concrete type
    pub fn get_layer_as<T: 'static>(&self, layer_id: &str) -> Option<&T> {
        self.get_layer(layer_id)
            .and_then(|layer| layer.as_any().downcast_ref::<T>())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Applies a function to a layer of a known concrete type
    pub fn with_layer_as_mut<T: 'static, F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.layers
            .get_mut(layer_id)
            .and_then(|layer| layer.as_any_mut().downcast_mut::<T>())
            .map(f)
    }

    /// Lists all layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Applies a function to each layer immutably in render order.
    pub fn for_each_layer<F>(&self, mut f: F)
    where
        F: FnMut(&dyn LayerTrait),
    {
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                f(layer.as_ref());
            }
        }
    }

    /// Updates the render order based on current z-indices
    pub fn update_render_order(&mut self) {
        let layers = &self.layers;
        self.render_order.sort_by_key(|id| {
            layers.get(id).map(|l| l.z_index()).unwrap_or(0)
        });
    }

    /// Drops every layer
    pub fn clear(&mut self) {
        self.layers.clear();
        self.render_order.clear();
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
