use crate::slice_source::SliceSource;
use crate::volume_loader::VolumeLoaderError;

use std::collections::HashMap;

pub struct SeriesSelector;

impl SeriesSelector {
    /// Pick the series with the most slices.
    ///
    /// Slices are grouped by `series_uid`. When two series are equally large the
    /// one encountered first wins. The returned slices keep their input order.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeLoaderError::NoSeriesFound`] if `sources` is empty
    pub fn select_series(sources: Vec<SliceSource>) -> Result<Vec<SliceSource>, VolumeLoaderError> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut partitions: Vec<Vec<SliceSource>> = Vec::new();

        for source in sources {
            let position = *positions
                .entry(source.series_uid.clone())
                .or_insert_with(|| {
                    partitions.push(Vec::new());
                    partitions.len() - 1
                });
            partitions[position].push(source);
        }

        let mut best: Option<Vec<SliceSource>> = None;
        for partition in partitions {
            if best.as_ref().is_none_or(|b| partition.len() > b.len()) {
                best = Some(partition);
            }
        }

        let selected = best.ok_or(VolumeLoaderError::NoSeriesFound)?;
        tracing::debug!(
            series_count = positions.len(),
            series_uid = %selected[0].series_uid,
            slices = selected.len(),
            "Selected series"
        );
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(series: &str, instance: i32) -> SliceSource {
        SliceSource::new(series, instance, 1, 1, vec![instance as i16])
    }

    #[test]
    fn largest_series_wins() {
        let sources = vec![
            source("a", 1),
            source("b", 1),
            source("b", 2),
            source("a", 2),
            source("b", 3),
        ];
        let selected = SeriesSelector::select_series(sources).unwrap();
        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|s| s.series_uid == "b"));
        let order: Vec<_> = selected.iter().map(|s| s.instance_number).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn tie_goes_to_first_encountered_series() {
        let sources = vec![
            source("z", 1),
            source("a", 1),
            source("a", 2),
            source("z", 2),
        ];
        let selected = SeriesSelector::select_series(sources).unwrap();
        assert!(selected.iter().all(|s| s.series_uid == "z"));
    }

    #[test]
    fn empty_input_has_no_series() {
        let result = SeriesSelector::select_series(Vec::new());
        assert!(matches!(result, Err(VolumeLoaderError::NoSeriesFound)));
    }
}
