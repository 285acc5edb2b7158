//! Distance annotation and result-set ordering.

use std::cmp::Ordering;

use nearmap_core::{haversine_distance, AnnotatedRecord, Coordinate, PoiRecord};

/// Attach the great-circle distance from `origin` to each record, in
/// kilometres. Input order is preserved.
pub fn annotate(records: Vec<PoiRecord>, origin: Coordinate) -> Vec<AnnotatedRecord> {
    records
        .into_iter()
        .map(|record| {
            let distance_km = haversine_distance(origin, record.position);
            AnnotatedRecord {
                record,
                distance_km,
            }
        })
        .collect()
}

/// Sort by ascending distance when requested, then truncate to `count`.
///
/// The sort is stable, so records at identical distances keep their store
/// order. `count == 0` means unbounded. Unsorted output keeps the ring
/// traversal order and is never truncated.
pub fn sort_and_truncate(
    mut records: Vec<AnnotatedRecord>,
    sort: bool,
    count: usize,
) -> Vec<AnnotatedRecord> {
    if !sort {
        return records;
    }
    records.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    if count > 0 && records.len() > count {
        records.truncate(count);
    }
    records
}
