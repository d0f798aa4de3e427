use crate::enums::Interpolation;
use crate::interpolator::Interpolator;

use image::GrayImage;

/// Default upper bound for each side of a rendered view, in pixels.
pub const DEFAULT_MAX_FOOTPRINT: u32 = 800;

pub struct DisplayFitter;

impl DisplayFitter {
    /// Compute the on-screen size of a `width` x `height` plane.
    ///
    /// The height is stretched by `pixel_aspect` so anisotropic voxels look
    /// physically correct, then both sides shrink uniformly until they fit
    /// into `max_footprint`. Each side is at least 1 and at most `max_footprint`.
    pub fn fit_dimensions(
        width: u32,
        height: u32,
        pixel_aspect: f32,
        max_footprint: u32,
    ) -> (u32, u32) {
        let max_footprint = max_footprint.max(1);
        let pixel_aspect = if pixel_aspect.is_finite() && pixel_aspect > 0.0 {
            f64::from(pixel_aspect)
        } else {
            1.0
        };

        let mut target_width = f64::from(width);
        let mut target_height = f64::from(height) * pixel_aspect;

        let cap = f64::from(max_footprint);
        if target_width > cap || target_height > cap {
            let scale = (cap / target_width).min(cap / target_height);
            target_width *= scale;
            target_height *= scale;
        }

        // absorb rounding error of the scale so 799.999.. floors to 800
        let clamp = |value: f64| ((value + 1e-9).floor() as u32).clamp(1, max_footprint);
        (clamp(target_width), clamp(target_height))
    }

    /// Resample a windowed plane to its display size.
    pub fn fit(
        image: &GrayImage,
        pixel_aspect: f32,
        max_footprint: u32,
        interpolation: Interpolation,
    ) -> GrayImage {
        let (width, height) = image.dimensions();
        let (fit_width, fit_height) =
            Self::fit_dimensions(width, height, pixel_aspect, max_footprint);
        Interpolator::resize(image, fit_width, fit_height, interpolation)
    }
}
