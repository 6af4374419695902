use itertools::Itertools;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street       : Option<String>,
    pub house_number : Option<String>,
    pub zip          : Option<String>,
    pub city         : Option<String>,
    pub country      : Option<String>,
}

impl Address {
    /// Formats the address as a single display line:
    /// `<street> <house number>, <zip> <city>`.
    ///
    /// Missing or blank parts are left out together with
    /// their separators. The country is not part of the line.
    pub fn display_line(&self) -> String {
        let line1 = join_present([&self.street, &self.house_number], " ");
        let line2 = join_present([&self.zip, &self.city], " ");
        [line1, line2]
            .into_iter()
            .filter(|line| !line.is_empty())
            .join(", ")
    }
}

fn join_present<'a>(parts: impl IntoIterator<Item = &'a Option<String>>, sep: &str) -> String {
    parts
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .join(sep)
}
