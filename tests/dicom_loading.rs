use std::path::Path;

use dicom::core::{DataElement, PrimitiveValue, Tag, VR};
use dicom::dictionary_std::tags;
use dicom::object::{FileDicomObject, FileMetaTableBuilder, InMemDicomObject};
use dicom::transfer_syntax::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use dicom_mpr::{MprEngine, Orientation, VolumeLoader};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const CT_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.2";

fn put_str(obj: &mut InMemDicomObject, tag: Tag, vr: VR, value: &str) {
    obj.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
}

fn put_u16(obj: &mut InMemDicomObject, tag: Tag, value: u16) {
    obj.put(DataElement::new(tag, VR::US, PrimitiveValue::from(value)));
}

/// 2x2 unsigned 16-bit CT slice with RescaleIntercept -1024.
///
/// Stored values are `[1024 + 10 * instance, 0, 3000, 1024]`, so the
/// rescaled samples are `[10 * instance, -1024, 1976, 0]`.
fn ct_slice(series_uid: Option<&str>, instance: u16) -> FileDicomObject<InMemDicomObject> {
    let sop_instance_uid = format!("9.9.1.{instance}");
    let mut obj = InMemDicomObject::new_empty();

    put_str(&mut obj, tags::SOP_CLASS_UID, VR::UI, CT_IMAGE_STORAGE);
    put_str(&mut obj, tags::SOP_INSTANCE_UID, VR::UI, &sop_instance_uid);
    put_str(&mut obj, tags::PATIENT_NAME, VR::PN, "Test^Patient");
    put_str(&mut obj, tags::PATIENT_ID, VR::LO, "PAT123");
    put_str(&mut obj, tags::MODALITY, VR::CS, "CT");
    if let Some(series_uid) = series_uid {
        put_str(&mut obj, tags::SERIES_INSTANCE_UID, VR::UI, series_uid);
    }
    put_str(&mut obj, tags::INSTANCE_NUMBER, VR::IS, &instance.to_string());
    put_str(&mut obj, tags::SLICE_THICKNESS, VR::DS, "2.5");
    obj.put(DataElement::new(
        tags::PIXEL_SPACING,
        VR::DS,
        PrimitiveValue::Strs(["0.7", "0.6"].into_iter().map(String::from).collect()),
    ));

    put_u16(&mut obj, tags::ROWS, 2);
    put_u16(&mut obj, tags::COLUMNS, 2);
    put_u16(&mut obj, tags::SAMPLES_PER_PIXEL, 1);
    put_u16(&mut obj, tags::BITS_ALLOCATED, 16);
    put_u16(&mut obj, tags::BITS_STORED, 16);
    put_u16(&mut obj, tags::HIGH_BIT, 15);
    put_u16(&mut obj, tags::PIXEL_REPRESENTATION, 0);
    put_str(&mut obj, tags::PHOTOMETRIC_INTERPRETATION, VR::CS, "MONOCHROME2");
    put_str(&mut obj, tags::RESCALE_INTERCEPT, VR::DS, "-1024");
    put_str(&mut obj, tags::RESCALE_SLOPE, VR::DS, "1");

    let stored = [1024 + 10 * instance, 0, 3000, 1024];
    obj.put(DataElement::new(
        tags::PIXEL_DATA,
        VR::OW,
        PrimitiveValue::U16(stored.into_iter().collect()),
    ));

    let meta = FileMetaTableBuilder::new()
        .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN.uid())
        .media_storage_sop_class_uid(CT_IMAGE_STORAGE)
        .media_storage_sop_instance_uid(sop_instance_uid);
    obj.with_meta(meta).expect("meta")
}

fn write_slices(dir: &Path, slices: &[FileDicomObject<InMemDicomObject>]) {
    for (i, slice) in slices.iter().enumerate() {
        slice
            .write_to_file(dir.join(format!("slice{i:03}.dcm")))
            .expect("write test dicom");
    }
}

fn hounsfield(instance: i16) -> Vec<i16> {
    vec![10 * instance, -1024, 1976, 0]
}

#[test]
fn rescaled_slice_decodes_to_hounsfield_units() {
    let source = VolumeLoader::slice_source_from_dicom(&ct_slice(Some("9.9"), 4))
        .expect("slice source");
    assert_eq!(source.series_uid, "9.9");
    assert_eq!(source.instance_number, 4);
    assert_eq!((source.width, source.height), (2, 2));
    assert_eq!(source.pixels, hounsfield(4));
    assert_eq!(source.pixel_spacing, (0.7, 0.6));
    assert_eq!(source.slice_thickness, 2.5);
    assert_eq!(source.patient_name, "Test^Patient");
    assert_eq!(source.patient_id, "PAT123");
}

#[test]
fn directory_load_orders_slices_and_keeps_metadata() {
    let dir = tempdir().expect("tempdir");
    let slices: Vec<_> = [3, 1, 2].into_iter().map(|i| ct_slice(Some("9.9"), i)).collect();
    write_slices(dir.path(), &slices);

    let volume = VolumeLoader::load_from_directory(dir.path()).expect("volume");
    assert_eq!(volume.dim(), (3, 2, 2));
    assert_eq!(volume.spacing, (0.6, 0.7, 2.5));
    assert_eq!(volume.patient_name, "Test^Patient");
    assert_eq!(volume.patient_id, "PAT123");
    for z in 0..3 {
        let plane = volume.get_slice_from_axis(z, Orientation::Axial);
        assert_eq!(plane.to_vec(), hounsfield(z as i16 + 1));
    }

    let mut engine = MprEngine::default();
    engine.load_directory(dir.path()).expect("engine load");
    assert_eq!(engine.volume_extent(Orientation::Axial), 3);
    assert!(engine.render_all(&engine.default_view()).is_some());
}

#[test]
fn files_without_series_uid_are_skipped() {
    let orphan = ct_slice(None, 99);
    assert!(VolumeLoader::slice_source_from_dicom(&orphan).is_none());

    let dir = tempdir().expect("tempdir");
    write_slices(
        dir.path(),
        &[ct_slice(Some("9.9"), 1), orphan, ct_slice(Some("9.9"), 2)],
    );
    let volume = VolumeLoader::load_from_directory(dir.path()).expect("volume");
    assert_eq!(volume.dim().0, 2);
}

#[test]
fn in_memory_objects_form_the_largest_series() {
    let objects = vec![
        ct_slice(Some("9.9"), 2),
        ct_slice(Some("7.7"), 1),
        ct_slice(Some("9.9"), 1),
    ];
    let volume = VolumeLoader::load_from_dicom_objects(&objects).expect("volume");
    assert_eq!(volume.dim(), (2, 2, 2));
    let first = volume.get_slice_from_axis(0, Orientation::Axial);
    assert_eq!(first.to_vec(), hounsfield(1));
}
