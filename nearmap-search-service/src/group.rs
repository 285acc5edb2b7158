//! Wire-shape assembly: records into coordinate groups.

use nearmap_core::AnnotatedRecord;
use nearmap_search_protocol::{MediaRef, PoiEntry, PoiGroup, Position};

use crate::config::SearchConfig;

/// Position of an entry that carries a crowd provider id, recorded while
/// grouping so enrichment can write levels back without re-scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrowdCandidate {
    pub group: usize,
    pub entry: usize,
    pub id: String,
}

/// Groups in traversal order plus the entries eligible for enrichment.
#[derive(Debug, Clone)]
pub struct GroupedResults {
    pub groups: Vec<PoiGroup>,
    pub candidates: Vec<CrowdCandidate>,
}

/// Fold ordered records into groups of coincident entries.
///
/// A record joins the previous group only when its coordinate is
/// bit-identical to the immediately preceding record's; equal coordinates
/// separated by a different one produce distinct groups. Entries carrying
/// a `locoguide_id` start at crowd level 0 and are collected as candidates.
pub fn group_records(
    records: Vec<AnnotatedRecord>,
    poi_type: &str,
    config: &SearchConfig,
) -> GroupedResults {
    let mut groups: Vec<PoiGroup> = Vec::new();
    let mut candidates = Vec::new();

    for annotated in records {
        let position = Position {
            lat: annotated.record.position.lat,
            lng: annotated.record.position.lng,
        };
        let adjacent = groups
            .last()
            .is_some_and(|g| g.position.lat == position.lat && g.position.lng == position.lng);
        if !adjacent {
            groups.push(PoiGroup {
                poi_type: poi_type.to_string(),
                position,
                list: Vec::new(),
            });
        }

        let entry = build_entry(&annotated, config);
        let group_index = groups.len() - 1;
        if let Some(group) = groups.last_mut() {
            if let Some(id) = entry.locoguide_id.clone() {
                candidates.push(CrowdCandidate {
                    group: group_index,
                    entry: group.list.len(),
                    id,
                });
            }
            group.list.push(entry);
        }
    }

    GroupedResults { groups, candidates }
}

fn build_entry(annotated: &AnnotatedRecord, config: &SearchConfig) -> PoiEntry {
    let record = &annotated.record;
    let flags = record.xframe_flags();
    let media_ref = |address: &str, flag: &str| MediaRef {
        address: address.to_string(),
        has_xframe_options: flag.to_string(),
    };

    let crowd_lv = record.locoguide_id.as_ref().map(|_| 0);
    PoiEntry {
        guid: record.cell_fine.to_string(),
        title: record.title.clone(),
        tel: record.tel.clone(),
        address: record.address.clone(),
        distance: Some(annotated.distance_km),
        image: resolve_image(record.image.as_deref(), config),
        facebook: record.facebook.clone(),
        twitter: record.twitter.clone(),
        instagram: record.instagram.clone(),
        homepage: media_ref(&record.homepage, flags[0]),
        media1: media_ref(&record.media[0], flags[1]),
        media2: media_ref(&record.media[1], flags[2]),
        media3: media_ref(&record.media[2], flags[3]),
        media4: media_ref(&record.media[3], flags[4]),
        media5: media_ref(&record.media[4], flags[5]),
        star: record.star.unwrap_or(0),
        locoguide_id: record.locoguide_id.clone(),
        crowd_lv,
    }
}

/// Resolve a stored image path against the configured media base URL.
/// Absolute URLs pass through; a missing image becomes the empty string.
fn resolve_image(image: Option<&str>, config: &SearchConfig) -> String {
    match image {
        None => String::new(),
        Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
            path.to_string()
        }
        Some(path) => match &config.media_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/')),
            None => path.to_string(),
        },
    }
}
