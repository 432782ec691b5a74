use crate::NamedResource;
use serde::{Deserialize, Serialize};

/// Raw `/type/{name}` response, restricted to its damage relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    pub damage_relations: DamageRelations,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub double_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_to: Vec<NamedResource>,
}
