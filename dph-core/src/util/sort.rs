use crate::entities::*;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use std::cmp::Ordering;

/// Orders locations by name, the way a human reader expects it
/// (English collation rules, e.g. `Ö` sorts with `O`).
///
/// Locations with equal names are ordered by id
/// to keep the result deterministic.
pub fn sort_by_name(locations: &mut [Location]) {
    match Collator::try_new(&locale!("en").into(), CollatorOptions::new()) {
        Ok(collator) => {
            locations.sort_by(|a, b| by_name_then_id(collator.compare(&a.name, &b.name), a, b))
        }
        Err(err) => {
            log::warn!("Collation unavailable, sorting by code points: {err}");
            locations.sort_by(|a, b| by_name_then_id(a.name.cmp(&b.name), a, b));
        }
    }
}

fn by_name_then_id(by_name: Ordering, a: &Location, b: &Location) -> Ordering {
    by_name.then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dph_entities::builders::*;

    fn new_location(id: &str, name: &str) -> Location {
        Location::build().id(id).name(name).finish()
    }

    fn names(locations: &[Location]) -> Vec<&str> {
        locations.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn locale_aware_order() {
        let mut locations = vec![
            new_location("node/1", "Zebra"),
            new_location("node/2", "Ördek"),
            new_location("node/3", "Apfel"),
            new_location("node/4", "Pub"),
        ];
        sort_by_name(&mut locations);
        assert_eq!(names(&locations), vec!["Apfel", "Ördek", "Pub", "Zebra"]);
    }

    #[test]
    fn case_does_not_dominate() {
        let mut locations = vec![
            new_location("node/1", "bar"),
            new_location("node/2", "Cafe"),
            new_location("node/3", "Alpha"),
        ];
        sort_by_name(&mut locations);
        assert_eq!(names(&locations), vec!["Alpha", "bar", "Cafe"]);
    }

    #[test]
    fn equal_names_are_ordered_by_id() {
        let mut locations = vec![
            new_location("way/9", "Kino"),
            new_location("node/5", "Kino"),
        ];
        sort_by_name(&mut locations);
        assert_eq!(locations[0].id.to_string(), "node/5");
        assert_eq!(locations[1].id.to_string(), "way/9");
    }
}
