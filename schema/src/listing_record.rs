use crate::NamedResource;
use serde::{Deserialize, Serialize};

/// Raw `/pokemon?offset=..&limit=..` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Raw response of the catalog search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub pokemons: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}
