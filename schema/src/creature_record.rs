use crate::NamedResource;
use serde::{Deserialize, Serialize};

/// Raw `/pokemon/{id-or-name}` response, restricted to the fields the catalog reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default)]
    pub dream_world: SpriteSet,
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: SpriteSet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteSet {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub move_: NamedResource,
}

impl Sprites {
    /// Preferred artwork: dream world, then official artwork, then the plain front sprite.
    pub fn best_image(&self) -> Option<&str> {
        self.other
            .dream_world
            .front_default
            .as_deref()
            .or(self.other.official_artwork.front_default.as_deref())
            .or(self.front_default.as_deref())
    }
}
