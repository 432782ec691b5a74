use crate::{Localized, NamedResource};
use serde::{Deserialize, Serialize};

/// Raw `/pokemon-species/{id-or-name}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub genera: Vec<Genus>,
    #[serde(default)]
    pub egg_groups: Vec<NamedResource>,
    /// `null` for species introduced after the habitat data was frozen.
    pub habitat: Option<NamedResource>,
    pub growth_rate: NamedResource,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    pub evolution_chain: Option<ApiResource>,
    /// Eighths of female, or -1 when genderless.
    #[serde(default)]
    pub gender_rate: i8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genus {
    pub genus: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
    pub version: Option<NamedResource>,
}

/// A `{ url }` reference without a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResource {
    pub url: String,
}

impl Localized for Genus {
    fn language(&self) -> &str {
        &self.language.name
    }
}

impl Localized for FlavorText {
    fn language(&self) -> &str {
        &self.language.name
    }
}
