use super::{prelude::*, transform::*};
use crate::{
    repositories,
    util::{sort::sort_by_name, time::backup_suffix},
};
use std::collections::BTreeMap;
use time::PrimitiveDateTime;

/// Values for locations that come without a country or city.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeDefaults {
    pub country: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of locations transformed from the capture
    pub transformed: usize,
    /// Number of locations in the stored collection
    pub total: usize,
    pub backup: Option<String>,
}

/// Transforms the elements and applies the defaults.
pub fn prepare_incoming_locations(
    elements: &[Element],
    defaults: &MergeDefaults,
    policy: &TransformPolicy,
) -> Vec<Location> {
    transform_elements(elements, policy)
        .into_iter()
        .map(|mut location| {
            location.backfill(defaults.country.as_deref(), defaults.city.as_deref());
            location
        })
        .collect()
}

/// Replaces existing locations by incoming locations with the same id.
///
/// There is no field-level merge: the incoming location wins as a whole.
/// The result is ordered by id.
pub fn overlay_by_id(existing: Vec<Location>, incoming: Vec<Location>) -> Vec<Location> {
    let mut by_id: BTreeMap<Id, Location> = existing
        .into_iter()
        .map(|location| (location.id.clone(), location))
        .collect();
    for location in incoming {
        by_id.insert(location.id.clone(), location);
    }
    by_id.into_values().collect()
}

/// Merges freshly harvested elements into the canonical collection.
///
/// The existing collection is backed up before it is replaced.
/// An existing collection that cannot be parsed is treated as empty.
pub fn merge_locations<R: LocationRepo>(
    repo: &R,
    elements: &[Element],
    defaults: &MergeDefaults,
    policy: &TransformPolicy,
    now: PrimitiveDateTime,
) -> Result<MergeReport> {
    let incoming = prepare_incoming_locations(elements, defaults, policy);
    let transformed = incoming.len();
    log::debug!(
        "Transformed {transformed} of {} elements",
        elements.len()
    );

    let existing = match repo.load_locations() {
        Ok(locations) => locations,
        Err(repositories::Error::Corrupt(reason)) => {
            log::warn!("Treating the unreadable location collection as empty: {reason}");
            vec![]
        }
        Err(err) => return Err(err.into()),
    };
    let backup = repo.backup_locations(&backup_suffix(now)?)?;
    if let Some(backup) = &backup {
        log::info!("Backup created: {backup}");
    }

    let mut merged = overlay_by_id(existing, incoming);
    sort_by_name(&mut merged);
    repo.store_locations(&merged)?;

    Ok(MergeReport {
        transformed,
        total: merged.len(),
        backup,
    })
}
