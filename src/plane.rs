use ndarray::Array2;

/// A 2D sample plane cut out of a volume.
///
/// `data` is indexed `[row, column]`, so its shape is `(height, width)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPlane {
    pub data: Array2<i16>,
    /// Physical height of one pixel relative to its width
    pub pixel_aspect: f32,
}

impl ExtractedPlane {
    pub fn zeros(width: usize, height: usize, pixel_aspect: f32) -> Self {
        Self {
            data: Array2::zeros((height, width)),
            pixel_aspect,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Row-major copy of the samples.
    pub fn to_vec(&self) -> Vec<i16> {
        self.data.iter().copied().collect()
    }
}
