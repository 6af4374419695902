use crate::{category::Category, id::Id};

/// A location that is suitable for a date.
///
/// This is the unit of the canonical collection. The `id` uniquely
/// identifies a location within the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: Id,
    pub category: Category,
    pub name: String,
    /// Display address, may be empty
    pub address: String,
    /// ISO country code, may be empty
    pub country: String,
    pub city: String,
    /// Non-negative, `0.0` if unknown
    pub rating: f64,
    pub link: String,
    pub images: Vec<String>,
}

impl Location {
    /// Fills in an empty country and city.
    ///
    /// Present values are never overwritten and
    /// blank defaults are ignored.
    pub fn backfill(&mut self, default_country: Option<&str>, default_city: Option<&str>) {
        backfill_field(&mut self.country, default_country);
        backfill_field(&mut self.city, default_city);
    }
}

fn backfill_field(field: &mut String, default: Option<&str>) {
    if !field.is_empty() {
        return;
    }
    if let Some(default) = default.map(str::trim).filter(|d| !d.is_empty()) {
        *field = default.to_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location {
            id: "node/1".into(),
            category: Category::Dining,
            name: "Cafe X".into(),
            address: String::new(),
            country: String::new(),
            city: String::new(),
            rating: 0.0,
            link: "https://www.openstreetmap.org/node/1".into(),
            images: vec![],
        }
    }

    #[test]
    fn backfill_empty_fields() {
        let mut l = location();
        l.backfill(Some("NG"), Some("Lagos"));
        assert_eq!(l.country, "NG");
        assert_eq!(l.city, "Lagos");
    }

    #[test]
    fn backfill_never_overwrites() {
        let mut l = location();
        l.country = "DE".into();
        l.city = "Berlin".into();
        l.backfill(Some("NG"), Some("Lagos"));
        assert_eq!(l.country, "DE");
        assert_eq!(l.city, "Berlin");
    }

    #[test]
    fn backfill_without_defaults() {
        let mut l = location();
        l.backfill(None, Some(""));
        assert_eq!(l.country, "");
        assert_eq!(l.city, "");
    }
}
