//! Mesher configuration.

use serde::{Deserialize, Serialize};

/// Configuration for ambient-occlusion shading.
///
/// The defaults reproduce the reference look: each occluder darkens a corner
/// by 18%, never below 35% brightness.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    /// Bake ambient occlusion into vertex colors. When off every shade is 1.0.
    pub ambient_occlusion: bool,
    /// Brightness removed per occluding neighbour.
    pub ao_step: f32,
    /// Lower bound of the shade factor.
    pub min_shade: f32,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            ambient_occlusion: true,
            ao_step: 0.18,
            min_shade: 0.35,
        }
    }
}

impl MesherConfig {
    /// Config with ambient occlusion disabled (flat palette colors).
    #[must_use]
    pub fn flat() -> Self {
        Self {
            ambient_occlusion: false,
            ..Self::default()
        }
    }
}
