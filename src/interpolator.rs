use crate::enums::Interpolation;

use image::{GrayImage, ImageBuffer, imageops};
use rayon::prelude::*;

pub(crate) struct Interpolator;

impl Interpolator {
    /// Resample `image` to exactly `width` x `height`.
    pub(crate) fn resize(
        image: &GrayImage,
        width: u32,
        height: u32,
        interpolation: Interpolation,
    ) -> GrayImage {
        if image.dimensions() == (width, height) {
            return image.clone();
        }
        match interpolation {
            Interpolation::Nearest => {
                imageops::resize(image, width, height, imageops::FilterType::Nearest)
            }
            Interpolation::Lanczos3 => {
                imageops::resize(image, width, height, imageops::FilterType::Lanczos3)
            }
            Interpolation::Bilinear => Self::resize_bilinear(image, width, height),
        }
    }

    fn resize_bilinear(image: &GrayImage, width: u32, height: u32) -> GrayImage {
        let (src_width, src_height) = image.dimensions();

        let pixel_data: Vec<u8> = (0..height)
            .into_par_iter()
            .flat_map(|y| {
                (0..width)
                    .map(|x| {
                        // normalized coordinates with half-pixel offset
                        let norm_x = (x as f32 + 0.5) / width as f32;
                        let norm_y = (y as f32 + 0.5) / height as f32;

                        let src_x = norm_x * src_width as f32 - 0.5;
                        let src_y = norm_y * src_height as f32 - 0.5;

                        let src_x = src_x.clamp(0.0, (src_width - 1) as f32);
                        let src_y = src_y.clamp(0.0, (src_height - 1) as f32);

                        Self::bilinear_interpolate(image, src_y, src_x)
                            .round()
                            .clamp(0.0, 255.0) as u8
                    })
                    .collect::<Vec<u8>>()
            })
            .collect();

        ImageBuffer::from_raw(width, height, pixel_data)
            .unwrap_or_else(|| GrayImage::new(width, height))
    }

    #[inline]
    pub(crate) fn bilinear_interpolate(image: &GrayImage, y: f32, x: f32) -> f32 {
        let (width, height) = image.dimensions();

        let y0 = y.floor() as u32;
        let x0 = x.floor() as u32;
        let y1 = (y0 + 1).min(height - 1);
        let x1 = (x0 + 1).min(width - 1);

        let dy = y - y0 as f32;
        let dx = x - x0 as f32;
        let one_minus_dx = 1.0 - dx;
        let one_minus_dy = 1.0 - dy;

        let sample = |x: u32, y: u32| f32::from(image.get_pixel(x, y).0[0]);
        let v00 = sample(x0, y0);
        let v01 = sample(x1, y0);
        let v10 = sample(x0, y1);
        let v11 = sample(x1, y1);

        let v0 = v00.mul_add(one_minus_dx, v01 * dx);
        let v1 = v10.mul_add(one_minus_dx, v11 * dx);

        v0.mul_add(one_minus_dy, v1 * dy)
    }
}
