pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{element_builder::*, location_builder::*};

pub mod element_builder {

    use super::*;
    use crate::element::*;

    #[derive(Debug)]
    pub struct ElementBuild {
        element: Element,
    }

    impl ElementBuild {
        pub fn kind(mut self, kind: &str) -> Self {
            self.element.kind = kind.into();
            self
        }
        pub fn id(mut self, id: u64) -> Self {
            self.element.id = id;
            self
        }
        pub fn tag(mut self, key: &str, value: &str) -> Self {
            self.element.tags.insert(key, value);
            self
        }
        pub fn name(self, name: &str) -> Self {
            self.tag("name", name)
        }
        pub fn amenity(self, amenity: &str) -> Self {
            self.tag("amenity", amenity)
        }
        pub fn tourism(self, tourism: &str) -> Self {
            self.tag("tourism", tourism)
        }
        pub fn finish(self) -> Element {
            self.element
        }
    }

    impl Builder for Element {
        type Build = ElementBuild;
        fn build() -> ElementBuild {
            ElementBuild {
                element: Element {
                    kind: "node".into(),
                    id: 0,
                    tags: Tags::default(),
                },
            }
        }
    }
}

pub mod location_builder {

    use super::*;
    use crate::{category::*, location::*};

    #[derive(Debug)]
    pub struct LocationBuild {
        location: Location,
    }

    impl LocationBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.location.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.location.name = name.into();
            self
        }
        pub fn category(mut self, category: Category) -> Self {
            self.location.category = category;
            self
        }
        pub fn country(mut self, country: &str) -> Self {
            self.location.country = country.into();
            self
        }
        pub fn city(mut self, city: &str) -> Self {
            self.location.city = city.into();
            self
        }
        pub fn rating(mut self, rating: f64) -> Self {
            self.location.rating = rating;
            self
        }
        pub fn link(mut self, link: &str) -> Self {
            self.location.link = link.into();
            self
        }
        pub fn finish(self) -> Location {
            self.location
        }
    }

    impl Builder for Location {
        type Build = LocationBuild;
        fn build() -> LocationBuild {
            LocationBuild {
                location: Location {
                    id: Default::default(),
                    category: Category::Dining,
                    name: Default::default(),
                    address: Default::default(),
                    country: Default::default(),
                    city: Default::default(),
                    rating: 0.0,
                    link: Default::default(),
                    images: vec![],
                },
            }
        }
    }
}
