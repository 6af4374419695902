use super::*;
use dph_entities as e;

impl From<e::category::Category> for Category {
    fn from(from: e::category::Category) -> Self {
        use e::category::Category as C;
        match from {
            C::Dining => Self::Dining,
            C::Movies => Self::Movies,
            C::MuseumsExhibitions => Self::MuseumsExhibitions,
        }
    }
}

impl From<Category> for e::category::Category {
    fn from(from: Category) -> Self {
        use Category as C;
        match from {
            C::Dining => Self::Dining,
            C::Movies => Self::Movies,
            C::MuseumsExhibitions => Self::MuseumsExhibitions,
        }
    }
}

impl From<Element> for e::element::Element {
    fn from(from: Element) -> Self {
        let Element { kind, id, tags } = from;
        Self {
            kind,
            id,
            tags: tags.into(),
        }
    }
}

impl From<e::location::Location> for Location {
    fn from(from: e::location::Location) -> Self {
        let e::location::Location {
            id,
            category,
            name,
            address,
            country,
            city,
            rating,
            link,
            images,
        } = from;
        Self {
            id: id.into(),
            category: category.into(),
            name,
            address,
            country,
            city,
            rating,
            link,
            images,
        }
    }
}

impl From<Location> for e::location::Location {
    fn from(from: Location) -> Self {
        let Location {
            id,
            category,
            name,
            address,
            country,
            city,
            rating,
            link,
            images,
        } = from;
        Self {
            id: id.into(),
            category: category.into(),
            name,
            address,
            country,
            city,
            rating,
            link,
            images,
        }
    }
}
