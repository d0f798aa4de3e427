use crate::enums::Orientation;
use crate::plane::ExtractedPlane;
use crate::slice_source::UNKNOWN_SUBJECT;

use ndarray::{Array3, s};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stack of equally sized slices, stored as one contiguous `(depth, height, width)`
/// array so that sample `(x, y, z)` sits at offset `z * W * H + y * W + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub data: Array3<i16>,
    /// Voxel spacing as (x, y, z): column spacing, row spacing, slice thickness
    pub spacing: (f32, f32, f32),
    pub patient_name: String,
    pub patient_id: String,
}

/// Descriptive information about the loaded volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub patient_name: String,
    pub patient_id: String,
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub slice_thickness: f32,
}

impl fmt::Display for VolumeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.depth == 0 {
            return write!(f, "No Data");
        }
        writeln!(f, "Name: {}", self.patient_name)?;
        writeln!(f, "ID: {}", self.patient_id)?;
        writeln!(f, "Size: {} x {}", self.width, self.height)?;
        writeln!(f, "Slices: {}", self.depth)?;
        write!(f, "Thickness: {} mm", self.slice_thickness)
    }
}

impl Volume {
    /// Wrap `data` with its voxel spacing. Non-positive spacings become 1.0.
    pub fn new(data: Array3<i16>, spacing: (f32, f32, f32)) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        Self {
            data,
            spacing: (sanitize(spacing.0), sanitize(spacing.1), sanitize(spacing.2)),
            patient_name: UNKNOWN_SUBJECT.to_owned(),
            patient_id: UNKNOWN_SUBJECT.to_owned(),
        }
    }

    pub fn with_patient(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.patient_name = name.into();
        self.patient_id = id.into();
        self
    }

    /// Get the dimensions of the volume (depth, height, width)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Number of slices along `orientation`
    pub fn extent(&self, orientation: Orientation) -> usize {
        let (depth, height, width) = self.dim();
        match orientation {
            Orientation::Axial => depth,
            Orientation::Coronal => height,
            Orientation::Sagittal => width,
        }
    }

    pub fn summary(&self) -> VolumeSummary {
        let (depth, height, width) = self.dim();
        VolumeSummary {
            patient_name: self.patient_name.clone(),
            patient_id: self.patient_id.clone(),
            width,
            height,
            depth,
            slice_thickness: self.spacing.2,
        }
    }

    /// Ratio of the physical pixel height to width for a plane of `orientation`.
    pub fn pixel_aspect(&self, orientation: Orientation) -> f32 {
        let (sx, sy, sz) = self.spacing;
        match orientation {
            Orientation::Axial => sy / sx,
            Orientation::Coronal => sz / sx,
            Orientation::Sagittal => sz / sy,
        }
    }

    /// Native (width, height) of a plane of `orientation`.
    pub fn plane_dimensions(&self, orientation: Orientation) -> (usize, usize) {
        let (depth, height, width) = self.dim();
        match orientation {
            // Looking down Z-axis: X is width, Y is height
            Orientation::Axial => (width, height),
            // Looking down Y-axis: X is width, Z is height
            Orientation::Coronal => (width, depth),
            // Looking down X-axis: Y is width, Z is height
            Orientation::Sagittal => (height, depth),
        }
    }

    /// Cut the plane at `index` along `orientation`.
    ///
    /// An index outside the volume yields an all-zero plane of the regular size.
    pub fn get_slice_from_axis(&self, index: usize, orientation: Orientation) -> ExtractedPlane {
        let (width, height) = self.plane_dimensions(orientation);
        let mut plane = ExtractedPlane::zeros(width, height, self.pixel_aspect(orientation));

        if index >= self.extent(orientation) {
            tracing::debug!(index, ?orientation, "Slice index out of range, rendering black");
            return plane;
        }

        let slice = match orientation {
            Orientation::Axial => self.data.slice(s![index, .., ..]),
            Orientation::Coronal => self.data.slice(s![.., index, ..]),
            Orientation::Sagittal => self.data.slice(s![.., .., index]),
        };
        plane.data.assign(&slice);
        plane
    }
}
