use serde::{Deserialize, Serialize};

/// Cross-hair position on a rendered view, normalized to `[0, 1]`.
///
/// A coordinate is `None` when the plane is a single pixel along that
/// direction, in which case no line should be drawn for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Crosshair {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

pub struct CursorMapper;

impl CursorMapper {
    /// Map `index` along an axis with `dimension` samples onto `[0, 1]`.
    pub fn normalize(index: usize, dimension: usize) -> Option<f32> {
        if dimension <= 1 {
            return None;
        }
        let last = (dimension - 1) as f32;
        Some((index as f32 / last).clamp(0.0, 1.0))
    }

    /// Cross-hair for a plane of `width` x `height` (native, before fitting),
    /// given the slice indices of the two other axes along each direction.
    pub fn map(
        horizontal_index: usize,
        vertical_index: usize,
        width: usize,
        height: usize,
    ) -> Crosshair {
        Crosshair {
            x: Self::normalize(horizontal_index, width),
            y: Self::normalize(vertical_index, height),
        }
    }
}
