use super::prelude::*;
use std::collections::BTreeSet;

/// Criteria for browsing the canonical collection.
///
/// Every given criterion must match. Blank values and an
/// empty list of categories do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    pub country: Option<String>,
    pub city: Option<String>,
    pub categories: Vec<Category>,
}

impl LocationFilter {
    pub fn matches(&self, location: &Location) -> bool {
        let matches_field = |criterion: &Option<String>, value: &str| {
            criterion
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .is_none_or(|c| c == value)
        };
        matches_field(&self.country, &location.country)
            && matches_field(&self.city, &location.city)
            && (self.categories.is_empty() || self.categories.contains(&location.category))
    }
}

pub fn filter_locations(locations: Vec<Location>, filter: &LocationFilter) -> Vec<Location> {
    locations
        .into_iter()
        .filter(|location| filter.matches(location))
        .collect()
}

/// Loads the matching locations in the order of the collection.
pub fn list_locations<R: LocationRepo>(repo: &R, filter: &LocationFilter) -> Result<Vec<Location>> {
    let locations = repo.load_locations()?;
    Ok(filter_locations(locations, filter))
}

/// The distinct countries of all locations in alphabetical order.
pub fn countries(locations: &[Location]) -> Vec<&str> {
    distinct_non_empty(locations.iter().map(|l| l.country.as_str()))
}

/// The distinct cities in alphabetical order,
/// optionally restricted to a single country.
pub fn cities<'a>(locations: &'a [Location], country: Option<&str>) -> Vec<&'a str> {
    distinct_non_empty(
        locations
            .iter()
            .filter(|l| country.is_none_or(|c| l.country == c))
            .map(|l| l.city.as_str()),
    )
}

fn distinct_non_empty<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
