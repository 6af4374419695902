use strum::{Display, EnumIter, EnumString};

/// The kind of date a location is suited for.
///
/// The string representations are the labels shown by the browsing
/// application and stored in the canonical collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
pub enum Category {
    #[strum(to_string = "Dining")]
    Dining,
    #[strum(to_string = "Movies")]
    Movies,
    #[strum(to_string = "Museums/Exhibitions")]
    MuseumsExhibitions,
}
