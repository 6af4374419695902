use std::collections::HashMap;

/// The key/value tags attached to an upstream element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(HashMap<String, String>);

impl Tags {
    /// The value of a tag, exactly as received.
    ///
    /// Empty values are treated like missing tags.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// The value of the first present tag among `keys`.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

impl From<HashMap<String, String>> for Tags {
    fn from(from: HashMap<String, String>) -> Self {
        Self(from)
    }
}

impl<K, V> FromIterator<(K, V)> for Tags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A single point of interest as returned by the upstream API.
///
/// Elements are never modified after they have been received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// `node`, `way` or `relation`
    pub kind: String,
    /// Unique within `kind`
    pub id: u64,
    pub tags: Tags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tags_are_missing() {
        let tags: Tags = [("name", "Cafe X"), ("name:en", " "), ("amenity", "")]
            .into_iter()
            .collect();
        assert_eq!(tags.get("name"), Some("Cafe X"));
        assert_eq!(tags.get("name:en"), Some(" "));
        assert_eq!(tags.get("amenity"), None);
        assert_eq!(tags.get("tourism"), None);
    }

    #[test]
    fn values_are_kept_verbatim() {
        let tags: Tags = [("name", "  Cafe X "), ("website", " https://a.example")]
            .into_iter()
            .collect();
        assert_eq!(tags.get("name"), Some("  Cafe X "));
        assert_eq!(tags.get("website"), Some(" https://a.example"));
    }

    #[test]
    fn first_present_tag() {
        let tags: Tags = [("addr:city", ""), ("addr:town", "Ikeja"), ("addr:suburb", "Allen")]
            .into_iter()
            .collect();
        assert_eq!(
            tags.first_of(&["addr:city", "addr:town", "addr:suburb"]),
            Some("Ikeja")
        );
        assert_eq!(tags.first_of(&["addr:city"]), None);
        assert_eq!(Tags::default().first_of(&[]), None);
    }
}
