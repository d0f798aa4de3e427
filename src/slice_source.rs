/// Name used for subject fields a slice does not carry.
pub const UNKNOWN_SUBJECT: &str = "Unknown";

/// One decoded scan slice as handed over by the decoding collaborator.
///
/// `pixels` is row-major and holds `width * height` signed samples. Spacing
/// values default to 1.0 and subject fields to [`UNKNOWN_SUBJECT`].
#[derive(Debug, Clone, PartialEq)]
pub struct SliceSource {
    pub series_uid: String,
    /// Acquisition index (InstanceNumber), used for through-plane ordering
    pub instance_number: i32,
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<i16>,
    /// (row spacing, column spacing)
    pub pixel_spacing: (f32, f32),
    pub slice_thickness: f32,
    pub patient_name: String,
    pub patient_id: String,
}

impl SliceSource {
    pub fn new(
        series_uid: impl Into<String>,
        instance_number: i32,
        width: usize,
        height: usize,
        pixels: Vec<i16>,
    ) -> Self {
        Self {
            series_uid: series_uid.into(),
            instance_number,
            width,
            height,
            pixels,
            pixel_spacing: (1.0, 1.0),
            slice_thickness: 1.0,
            patient_name: UNKNOWN_SUBJECT.to_owned(),
            patient_id: UNKNOWN_SUBJECT.to_owned(),
        }
    }

    pub fn with_pixel_spacing(mut self, row_spacing: f32, column_spacing: f32) -> Self {
        self.pixel_spacing = (row_spacing, column_spacing);
        self
    }

    pub fn with_slice_thickness(mut self, slice_thickness: f32) -> Self {
        self.slice_thickness = slice_thickness;
        self
    }

    pub fn with_patient(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.patient_name = name.into();
        self.patient_id = id.into();
        self
    }

    /// Whether the pixel buffer matches the declared dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.width > 0 && self.height > 0 && self.pixels.len() == self.width * self.height
    }
}
