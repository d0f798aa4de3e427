use crate::display::DEFAULT_MAX_FOOTPRINT;
use crate::enums::Interpolation;
use crate::window::WindowLevel;

use serde::{Deserialize, Serialize};

/// Rendering settings of an [`MprEngine`](crate::engine::MprEngine).
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound for each side of a rendered view
    pub max_footprint: u32,
    /// Window applied by [`ViewParameters::centered`](crate::engine::ViewParameters::centered)
    pub default_window: WindowLevel,
    pub interpolation: Interpolation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_footprint: DEFAULT_MAX_FOOTPRINT,
            default_window: WindowLevel::default(),
            interpolation: Interpolation::default(),
        }
    }
}
