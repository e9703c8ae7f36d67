//! Shared trait abstractions for common patterns
//!
//! Layers implement [`LayerOperations`] so the manager can store them behind
//! one trait object; [`Lerp`] is the single interpolation primitive the
//! animation and viewport code share.

use crate::{
    core::geo::{LatLng, Point},
    layers::base::LayerType,
    Result,
};

/// Trait for layer-like objects
/// Unifies common layer operations across tile and marker layers
pub trait LayerOperations: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer name
    fn name(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Get layer options
    fn options(&self) -> serde_json::Value;

    /// Set layer options
    fn set_options(&mut self, options: serde_json::Value) -> Result<()>;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Unified interpolation trait that consolidates all Lerp implementations
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

impl Lerp for LatLng {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        LatLng::new(self.lat.lerp(&other.lat, t), self.lng.lerp(&other.lng, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = LatLng::new(10.0, 20.0);
        let b = LatLng::new(12.0, 24.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 0.5), LatLng::new(11.0, 22.0));
        assert_eq!(2.0_f64.lerp(&4.0, 0.25), 2.5);
    }
}
