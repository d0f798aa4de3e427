use crate::config::EngineConfig;
use crate::cursor::{Crosshair, CursorMapper};
use crate::display::DisplayFitter;
use crate::enums::Orientation;
use crate::series::SeriesSelector;
use crate::slice_source::SliceSource;
use crate::volume::{Volume, VolumeSummary};
use crate::volume_loader::{VolumeLoader, VolumeLoaderError};
use crate::window::WindowLevel;

use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Caller-owned view state: one slice index per axis plus the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewParameters {
    /// Column index, selects the sagittal plane
    pub x: usize,
    /// Row index, selects the coronal plane
    pub y: usize,
    /// Depth index, selects the axial plane
    pub z: usize,
    pub window: WindowLevel,
}

impl ViewParameters {
    /// Every axis at its middle slice.
    pub fn centered(volume: &Volume, window: WindowLevel) -> Self {
        let middle = |orientation| volume.extent(orientation).saturating_sub(1) / 2;
        Self {
            x: middle(Orientation::Sagittal),
            y: middle(Orientation::Coronal),
            z: middle(Orientation::Axial),
            window,
        }
    }

    /// Slice index of the plane shown for `orientation`.
    pub fn index(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Axial => self.z,
            Orientation::Coronal => self.y,
            Orientation::Sagittal => self.x,
        }
    }

    fn index_mut(&mut self, orientation: Orientation) -> &mut usize {
        match orientation {
            Orientation::Axial => &mut self.z,
            Orientation::Coronal => &mut self.y,
            Orientation::Sagittal => &mut self.x,
        }
    }

    /// Indices of the two other axes along the (horizontal, vertical)
    /// directions of the plane shown for `orientation`.
    pub fn crosshair_indices(&self, orientation: Orientation) -> (usize, usize) {
        match orientation {
            Orientation::Axial => (self.x, self.y),
            Orientation::Coronal => (self.x, self.z),
            Orientation::Sagittal => (self.y, self.z),
        }
    }

    /// Move the index of `orientation` by `delta`, staying within `0..extent`.
    pub fn step(mut self, orientation: Orientation, delta: isize, extent: usize) -> Self {
        let last = extent.saturating_sub(1);
        let index = self.index_mut(orientation);
        *index = index.saturating_add_signed(delta).min(last);
        self
    }

    /// Clamp every index into the extents of `volume`.
    pub fn clamped(mut self, volume: &Volume) -> Self {
        for orientation in Orientation::ALL {
            let last = volume.extent(orientation).saturating_sub(1);
            let index = self.index_mut(orientation);
            *index = (*index).min(last);
        }
        self
    }
}

/// A rendered view, ready to be blitted.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayImage {
    /// Grayscale replicated over three channels
    pub image: RgbImage,
    pub crosshair: Crosshair,
}

impl DisplayImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MprViews {
    pub axial: DisplayImage,
    pub coronal: DisplayImage,
    pub sagittal: DisplayImage,
}

/// Holds at most one volume and renders orthogonal views of it.
///
/// The engine is either empty or loaded. A successful build replaces the
/// volume wholesale; a failed one leaves the previous volume in place.
#[derive(Debug, Default)]
pub struct MprEngine {
    volume: Option<Arc<Volume>>,
    config: EngineConfig,
}

impl MprEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            volume: None,
            config,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.volume.is_some()
    }

    /// Shared handle to the current volume. Stays valid across reloads.
    pub fn volume(&self) -> Option<Arc<Volume>> {
        self.volume.clone()
    }

    pub fn select_series(
        &self,
        sources: Vec<SliceSource>,
    ) -> Result<Vec<SliceSource>, VolumeLoaderError> {
        SeriesSelector::select_series(sources)
    }

    pub fn build_volume(&mut self, series: Vec<SliceSource>) -> Result<(), VolumeLoaderError> {
        let volume = VolumeLoader::build_volume(series)?;
        self.volume = Some(Arc::new(volume));
        Ok(())
    }

    /// Select the largest series among `sources` and build it.
    pub fn load(&mut self, sources: Vec<SliceSource>) -> Result<(), VolumeLoaderError> {
        let series = self.select_series(sources)?;
        self.build_volume(series)
    }

    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<(), VolumeLoaderError> {
        let volume = VolumeLoader::load_from_directory(path)?;
        self.volume = Some(Arc::new(volume));
        Ok(())
    }

    /// Number of slices along `orientation`, 0 when empty.
    pub fn volume_extent(&self, orientation: Orientation) -> usize {
        self.volume
            .as_deref()
            .map_or(0, |volume| volume.extent(orientation))
    }

    pub fn volume_summary(&self) -> VolumeSummary {
        self.volume
            .as_deref()
            .map(Volume::summary)
            .unwrap_or_default()
    }

    /// Centered view with the configured default window.
    pub fn default_view(&self) -> ViewParameters {
        match self.volume.as_deref() {
            Some(volume) => ViewParameters::centered(volume, self.config.default_window),
            None => ViewParameters {
                window: self.config.default_window,
                ..Default::default()
            },
        }
    }

    pub fn render_view(
        &self,
        orientation: Orientation,
        params: &ViewParameters,
    ) -> Option<DisplayImage> {
        self.render_view_with_footprint(orientation, params, self.config.max_footprint)
    }

    /// Render the plane of `orientation` selected by `params`.
    ///
    /// Returns `None` when no volume is loaded.
    pub fn render_view_with_footprint(
        &self,
        orientation: Orientation,
        params: &ViewParameters,
        max_footprint: u32,
    ) -> Option<DisplayImage> {
        let volume = self.volume.as_deref()?;

        let plane = volume.get_slice_from_axis(params.index(orientation), orientation);
        let (horizontal, vertical) = params.crosshair_indices(orientation);
        let crosshair = CursorMapper::map(horizontal, vertical, plane.width(), plane.height());

        let windowed = params.window.apply_plane(&plane)?;
        let fitted = DisplayFitter::fit(
            &windowed,
            plane.pixel_aspect,
            max_footprint,
            self.config.interpolation,
        );

        Some(DisplayImage {
            image: DynamicImage::ImageLuma8(fitted).to_rgb8(),
            crosshair,
        })
    }

    /// Render all three views. They share no state, so they run in parallel.
    pub fn render_all(&self, params: &ViewParameters) -> Option<MprViews> {
        let (axial, (coronal, sagittal)) = rayon::join(
            || self.render_view(Orientation::Axial, params),
            || {
                rayon::join(
                    || self.render_view(Orientation::Coronal, params),
                    || self.render_view(Orientation::Sagittal, params),
                )
            },
        );
        Some(MprViews {
            axial: axial?,
            coronal: coronal?,
            sagittal: sagittal?,
        })
    }
}
