use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Trailing numeric path segment of the resource URL, if any.
    ///
    /// `https://pokeapi.co/api/v2/pokemon-species/25/` yields `Some(25)`.
    pub fn id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// Anything tagged with the language it is written in.
pub trait Localized {
    fn language(&self) -> &str;
}

/// Find the entry written in `language` (e.g. `"en"`).
pub fn find_localized<'a, T: Localized>(entries: &'a [T], language: &str) -> Option<&'a T> {
    entries.iter().find(|entry| entry.language() == language)
}
