use serde::{Deserialize, Serialize};

/// The three principal viewing axes of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Depth fixed, looking down the Z-axis
    Axial,
    /// Row fixed, looking down the Y-axis
    Coronal,
    /// Column fixed, looking down the X-axis
    Sagittal,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [
        Orientation::Axial,
        Orientation::Coronal,
        Orientation::Sagittal,
    ];
}

/// Resampling kernel used when fitting a plane to its display size.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    Nearest,
    #[default]
    Bilinear,
    Lanczos3,
}
