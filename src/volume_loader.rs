use crate::{series::SeriesSelector, slice_source::SliceSource, volume::Volume};

use dicom::{
    object::{FileDicomObject, InMemDicomObject, open_file},
    pixeldata::{ConvertOptions, PixelDecoder, VoiLutOption},
};
use dicom_dictionary_std::tags;
use ndarray::{Array3, s};
use std::{fs, path::Path};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use web_time::Instant;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("No series found among the given slices")]
    NoSeriesFound,

    #[error("No slice survived the dimension check")]
    EmptyVolume,

    #[error("Volume shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DICOM error: {0}")]
    Dicom(#[from] dicom::object::ReadError),
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// Build a volume from the slices of one series
    ///
    /// The first well-formed slice fixes the in-plane dimensions, the voxel
    /// spacing and the patient fields. Slices with other dimensions are dropped.
    /// The rest is stably sorted by instance number and stacked along depth.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeLoaderError::EmptyVolume`] if no slice is left to stack
    pub fn build_volume(sources: Vec<SliceSource>) -> Result<Volume, VolumeLoaderError> {
        let start = Instant::now();
        let input_count = sources.len();

        let Some(canonical) = sources.iter().position(SliceSource::is_well_formed) else {
            return Err(VolumeLoaderError::EmptyVolume);
        };
        let reference = &sources[canonical];
        let (width, height) = (reference.width, reference.height);
        let (row_spacing, column_spacing) = reference.pixel_spacing;
        let spacing = (column_spacing, row_spacing, reference.slice_thickness);
        let patient = (reference.patient_name.clone(), reference.patient_id.clone());

        let mut slices: Vec<SliceSource> = sources
            .into_iter()
            .filter(|source| {
                let keep = source.is_well_formed()
                    && source.width == width
                    && source.height == height;
                if !keep {
                    warn!(
                        instance_number = source.instance_number,
                        width = source.width,
                        height = source.height,
                        expected_width = width,
                        expected_height = height,
                        "Dropping slice with mismatched dimensions"
                    );
                }
                keep
            })
            .collect();

        Self::report_inconsistent_metadata(&slices, spacing);
        Self::sort_slices(&mut slices);

        let volume_array = Self::build_volume_array(&slices, width, height)?;
        let volume = Volume::new(volume_array, spacing).with_patient(patient.0, patient.1);

        info!(
            width,
            height,
            depth = slices.len(),
            dropped = input_count - slices.len(),
            spacing = ?volume.spacing,
            elapsed = ?start.elapsed(),
            "Built volume"
        );
        Ok(volume)
    }

    /// Load the largest series among `sources` into a volume
    pub fn load_from_slice_sources(sources: Vec<SliceSource>) -> Result<Volume, VolumeLoaderError> {
        let series = SeriesSelector::select_series(sources)?;
        Self::build_volume(series)
    }

    /// Load a volume from DICOM objects
    pub fn load_from_dicom_objects(
        dicom_objects: &[FileDicomObject<InMemDicomObject>],
    ) -> Result<Volume, VolumeLoaderError> {
        let sources = dicom_objects
            .iter()
            .filter_map(Self::slice_source_from_dicom)
            .collect();
        Self::load_from_slice_sources(sources)
    }

    /// Load a volume from file paths. Unreadable files are skipped.
    pub fn load_from_file_paths(paths: &[impl AsRef<Path>]) -> Result<Volume, VolumeLoaderError> {
        Self::load_from_slice_sources(Self::decode_paths(paths))
    }

    /// Load a volume from a directory containing .dcm files
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_from_directory(path: impl AsRef<Path>) -> Result<Volume, VolumeLoaderError> {
        let paths: Vec<_> = fs::read_dir(path.as_ref())?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm"))
            })
            .collect();
        debug!(files = paths.len(), "Scanned directory");

        if paths.is_empty() {
            return Err(VolumeLoaderError::NoSeriesFound);
        }

        Self::load_from_file_paths(&paths)
    }

    /// Open and decode every path, keeping the ones that yield a slice.
    pub fn decode_paths(paths: &[impl AsRef<Path>]) -> Vec<SliceSource> {
        paths
            .iter()
            .filter_map(|path| {
                let path = path.as_ref();
                match open_file(path) {
                    Ok(dicom_object) => {
                        let source = Self::slice_source_from_dicom(&dicom_object);
                        if source.is_none() {
                            warn!(path = %path.display(), "Skipping file without usable image");
                        }
                        source
                    }
                    Err(error) => {
                        warn!(path = %path.display(), %error, "Skipping unreadable file");
                        None
                    }
                }
            })
            .collect()
    }

    /// Turn one DICOM object into a slice source.
    ///
    /// Objects without a Series Instance UID or without decodable pixel data
    /// are rejected. Only the first frame and sample are used.
    pub fn slice_source_from_dicom(
        dicom_object: &FileDicomObject<InMemDicomObject>,
    ) -> Option<SliceSource> {
        let series_uid = Self::get_string(dicom_object, tags::SERIES_INSTANCE_UID)?;
        let image = Self::decode_image(dicom_object)?;
        let (height, width) = image.dim();
        let pixels = image.iter().copied().collect();

        let instance_number = dicom_object
            .element(tags::INSTANCE_NUMBER)
            .ok()
            .and_then(|e| e.to_int::<i32>().ok())
            .unwrap_or(0);

        let mut source = SliceSource::new(series_uid, instance_number, width, height, pixels);

        if let Some(spacing) = dicom_object
            .element(tags::PIXEL_SPACING)
            .ok()
            .and_then(|e| e.to_multi_float32().ok())
            .filter(|spacing| spacing.len() >= 2)
        {
            source = source.with_pixel_spacing(spacing[0], spacing[1]);
        }

        if let Some(thickness) = dicom_object
            .element(tags::SLICE_THICKNESS)
            .ok()
            .and_then(|e| e.to_float32().ok())
        {
            source = source.with_slice_thickness(thickness);
        }

        let name = Self::get_string(dicom_object, tags::PATIENT_NAME);
        let id = Self::get_string(dicom_object, tags::PATIENT_ID);
        if name.is_some() || id.is_some() {
            let name = name.unwrap_or_else(|| source.patient_name.clone());
            let id = id.unwrap_or_else(|| source.patient_id.clone());
            source = source.with_patient(name, id);
        }

        Some(source)
    }

    fn get_string(
        dicom_object: &FileDicomObject<InMemDicomObject>,
        tag: dicom::core::Tag,
    ) -> Option<String> {
        let value = dicom_object.element(tag).ok()?.to_str().ok()?;
        let value = value.trim_end_matches('\0').trim();
        (!value.is_empty()).then(|| value.to_owned())
    }

    fn decode_image(
        dicom_object: &FileDicomObject<InMemDicomObject>,
    ) -> Option<ndarray::Array2<i16>> {
        let pixel_data = match dicom_object.decode_pixel_data() {
            Ok(pixel_data) => pixel_data,
            Err(error) => {
                warn!(%error, "Failed to decode pixel data");
                return None;
            }
        };
        // f32 keeps the modality LUT output (HU) intact; i16 has no rescale LUT
        let options = ConvertOptions::new().with_voi_lut(VoiLutOption::Identity);
        let values = match pixel_data.to_ndarray_with_options::<f32>(&options) {
            Ok(values) => values,
            Err(error) => {
                warn!(%error, "Failed to convert pixel data");
                return None;
            }
        };
        Some(
            values
                .slice_move(s![0, .., .., 0])
                .mapv(|v| v.round().clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16),
        )
    }

    fn sort_slices(slices: &mut [SliceSource]) {
        // stable: equal instance numbers keep discovery order
        slices.sort_by_key(|slice| slice.instance_number);
    }

    fn report_inconsistent_metadata(slices: &[SliceSource], spacing: (f32, f32, f32)) {
        let inconsistent = slices
            .iter()
            .filter(|slice| {
                let (row, column) = slice.pixel_spacing;
                (column, row, slice.slice_thickness) != spacing
            })
            .count();
        if inconsistent > 0 {
            debug!(
                inconsistent,
                ?spacing,
                "Slices disagree on spacing, using the first slice's values"
            );
        }
    }

    fn build_volume_array(
        slices: &[SliceSource],
        width: usize,
        height: usize,
    ) -> Result<Array3<i16>, VolumeLoaderError> {
        if slices.is_empty() {
            return Err(VolumeLoaderError::EmptyVolume);
        }
        let depth = slices.len();
        let mut buffer = Vec::with_capacity(width * height * depth);
        for slice in slices {
            buffer.extend_from_slice(&slice.pixels);
        }
        Ok(Array3::from_shape_vec((depth, height, width), buffer)?)
    }
}
