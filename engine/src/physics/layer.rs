//! Collision Layers
//!
//! Bit masks selecting which collision layers a ray query considers.

use serde::{Deserialize, Serialize};

/// Layer index conventionally used for static level geometry.
pub const LEVEL_GEOMETRY_LAYER: u8 = 8;

/// A set of collision layers, one bit per layer (32 layers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Mask that matches nothing.
    pub const NONE: LayerMask = LayerMask(0);
    /// Mask that matches every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing exactly one layer. Layers above 31 yield an empty mask.
    pub fn from_layer(layer: u8) -> Self {
        if layer < 32 {
            LayerMask(1 << layer)
        } else {
            LayerMask::NONE
        }
    }

    /// Whether `layer` is part of this mask.
    #[inline]
    pub fn contains(self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }

    /// Union of two masks.
    pub fn with(self, other: LayerMask) -> Self {
        LayerMask(self.0 | other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_layer() {
        let mask = LayerMask::from_layer(8);
        assert_eq!(mask.0, 256);
        assert!(mask.contains(8));
        assert!(!mask.contains(0));
    }

    #[test]
    fn test_out_of_range_layer_is_empty() {
        assert_eq!(LayerMask::from_layer(40), LayerMask::NONE);
        assert!(!LayerMask::ALL.contains(40));
    }

    #[test]
    fn test_union() {
        let mask = LayerMask::from_layer(1).with(LayerMask::from_layer(3));
        assert!(mask.contains(1));
        assert!(mask.contains(3));
        assert!(!mask.contains(2));
    }
}
