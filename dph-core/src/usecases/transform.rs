use super::prelude::*;

/// The category of elements that match none of the known
/// amenity or tourism values.
///
/// Every unmatched venue (e.g. a hotel) silently becomes a
/// dining location. Override it with [`TransformPolicy`].
pub const DEFAULT_FALLBACK_CATEGORY: Category = Category::Dining;

const DINING_AMENITIES: &[&str] = &["restaurant", "cafe", "fast_food", "bar", "pub", "biergarten"];
const MOVIE_AMENITIES: &[&str] = &["cinema"];
const EXHIBITION_AMENITIES: &[&str] = &["arts_centre"];
const EXHIBITION_TOURISM: &[&str] = &["museum", "gallery"];

const NAME_KEYS: &[&str] = &["name", "name:en"];
const CITY_KEYS: &[&str] = &["addr:city", "addr:town", "addr:suburb"];
const LINK_KEYS: &[&str] = &["website", "contact:website", "url"];

const OSM_BROWSE_URL: &str = "https://www.openstreetmap.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformPolicy {
    pub fallback_category: Category,
}

impl Default for TransformPolicy {
    fn default() -> Self {
        Self {
            fallback_category: DEFAULT_FALLBACK_CATEGORY,
        }
    }
}

pub fn infer_category(tags: &Tags, fallback: Category) -> Category {
    let amenity = tags.get("amenity");
    let tourism = tags.get("tourism");
    if is_one_of(amenity, DINING_AMENITIES) {
        Category::Dining
    } else if is_one_of(amenity, MOVIE_AMENITIES) {
        Category::Movies
    } else if is_one_of(tourism, EXHIBITION_TOURISM) || is_one_of(amenity, EXHIBITION_AMENITIES) {
        Category::MuseumsExhibitions
    } else {
        fallback
    }
}

fn is_one_of(value: Option<&str>, candidates: &[&str]) -> bool {
    value.is_some_and(|v| candidates.iter().any(|c| *c == v))
}

pub fn address_from_tags(tags: &Tags) -> Address {
    let get = |key: &str| tags.get(key).map(ToOwned::to_owned);
    Address {
        street: get("addr:street"),
        house_number: get("addr:housenumber"),
        zip: get("addr:postcode"),
        city: tags.first_of(CITY_KEYS).map(ToOwned::to_owned),
        country: get("addr:country"),
    }
}

/// The link of a location, falling back to the
/// OpenStreetMap page of the element.
pub fn pick_link(element: &Element) -> String {
    element
        .tags
        .first_of(LINK_KEYS)
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| {
            format!(
                "{OSM_BROWSE_URL}/{kind}/{id}",
                kind = element.kind,
                id = element.id
            )
        })
}

/// Unknown, unparsable and negative ratings count as `0`.
pub fn parse_rating(tags: &Tags) -> f64 {
    tags.get("rating")
        .and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r >= 0.0)
        .unwrap_or(0.0)
}

/// Converts an upstream element into a location.
///
/// Elements without a name are rejected.
pub fn transform_element(element: &Element, policy: &TransformPolicy) -> Option<Location> {
    let tags = &element.tags;
    let name = tags.first_of(NAME_KEYS)?.to_owned();
    let address = address_from_tags(tags);
    Some(Location {
        id: Id::from_element(&element.kind, element.id),
        category: infer_category(tags, policy.fallback_category),
        name,
        address: address.display_line(),
        country: address.country.unwrap_or_default(),
        city: address.city.unwrap_or_default(),
        rating: parse_rating(tags),
        link: pick_link(element),
        images: vec![],
    })
}

pub fn transform_elements<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
    policy: &TransformPolicy,
) -> Vec<Location> {
    elements
        .into_iter()
        .filter_map(|e| transform_element(e, policy))
        .collect()
}
