//! # DICOM-MPR library
//!
//! This crate assembles a stack of parallel DICOM slices into a volume and
//! renders the three orthogonal views of it (multi-planar reconstruction):
//!  - Axial
//!  - Coronal
//!  - Sagittal
//!
//! Slices are handed in as [`SliceSource`]s, which the caller decodes
//! however it likes. A loader built on dicom-rs is included for the common
//! case of a folder of ".dcm" files. From the given slices the series with
//! the most members is picked, its slices are sorted by InstanceNumber and
//! stacked into one contiguous buffer.
//!
//! Every render is a pure function of the loaded volume and the caller's
//! [`ViewParameters`]: the plane is cut out of the volume, windowed to 8 bit,
//! stretched to its physical aspect ratio and shrunk to fit a maximum
//! footprint. The cross-hair position of the other two planes is returned
//! alongside the image.
//!
//! The following is assumed about the input:
//!   - All slices of a series share rows and columns (others are dropped)
//!   - No multiframe (always the first frame is used)
//!   - Spacing is taken from the first slice and not validated
//!
//! # Examples
//!
//! ## Rendering the center of a folder of DICOM files
//!
//! ```no_run
//! # use dicom_mpr::{MprEngine, Orientation};
//! let mut engine = MprEngine::default();
//! engine
//!     .load_directory("dicom")
//!     .expect("should have loaded files from directory");
//! let params = engine.default_view();
//! let view = engine
//!     .render_view(Orientation::Sagittal, &params)
//!     .expect("should have rendered a loaded volume");
//! view.image.save("sagittal.png").expect("should have saved image");
//! ```
//!
//! ## Building a volume from decoded slices
//!
//! ```
//! # use dicom_mpr::{MprEngine, Orientation, SliceSource};
//! let slices = (0..4)
//!     .map(|i| SliceSource::new("1.2.3", i, 2, 2, vec![i as i16; 4]))
//!     .collect();
//! let mut engine = MprEngine::default();
//! engine.load(slices).unwrap();
//! assert_eq!(engine.volume_extent(Orientation::Axial), 4);
//! ```

pub mod config;
pub mod cursor;
pub mod display;
pub mod engine;
pub mod enums;
mod interpolator;
pub mod plane;
pub mod series;
pub mod slice_source;
pub mod volume;
pub mod volume_loader;
pub mod window;

pub use config::EngineConfig;
pub use cursor::{Crosshair, CursorMapper};
pub use display::DisplayFitter;
pub use engine::{DisplayImage, MprEngine, MprViews, ViewParameters};
pub use enums::{Interpolation, Orientation};
pub use plane::ExtractedPlane;
pub use series::SeriesSelector;
pub use slice_source::SliceSource;
pub use volume::{Volume, VolumeSummary};
pub use volume_loader::{VolumeLoader, VolumeLoaderError};
pub use window::WindowLevel;
