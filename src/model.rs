//! Display-ready view models built by the aggregation layer.

use crate::text::Gender;
use crate::units::{Height, Weight};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a creature is addressed: by numeric id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKey {
    Id(u32),
    Name(String),
}

impl CreatureKey {
    /// Names are lower-cased to match the API's slugs.
    pub fn name(name: &str) -> Self {
        CreatureKey::Name(name.trim().to_lowercase())
    }
}

impl From<&str> for CreatureKey {
    fn from(s: &str) -> Self {
        match s.trim().parse::<u32>() {
            Ok(id) => CreatureKey::Id(id),
            Err(_) => CreatureKey::name(s),
        }
    }
}

impl FromStr for CreatureKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CreatureKey::from(s))
    }
}

impl From<u32> for CreatureKey {
    fn from(id: u32) -> Self {
        CreatureKey::Id(id)
    }
}

impl fmt::Display for CreatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatureKey::Id(id) => write!(f, "{}", id),
            CreatureKey::Name(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub stat_name: String,
    pub base_stat: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSummary {
    pub id: u32,
    pub name: String,
    pub img: Option<String>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<Stat>,
    pub height: Height,
    pub weight: Weight,
    pub gender: Gender,
}

impl CreatureSummary {
    pub fn stat(&self, stat_name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|stat| stat.stat_name == stat_name)
            .map(|stat| stat.base_stat)
    }

    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentIds {
    pub prev_id: Option<u32>,
    pub next_id: Option<u32>,
}

impl AdjacentIds {
    /// Neighbours of `id` in a catalog numbered `1..=catalog_size`.
    pub fn around(id: u32, catalog_size: u32) -> Self {
        AdjacentIds {
            prev_id: (id > 1).then(|| id - 1),
            next_id: (id < catalog_size).then(|| id + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    pub id: Option<u32>,
    pub name: String,
    /// Position in the chain; the base form is stage 0.
    pub stage: usize,
    pub min_level: Option<u32>,
    pub min_happiness: Option<u32>,
    pub trigger: Option<String>,
    pub item: Option<String>,
}

/// Type matchups of the creature's primary type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleCondition {
    pub double_damage_from: Vec<String>,
    pub double_damage_to: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureDetail {
    #[serde(flatten)]
    pub summary: CreatureSummary,
    pub species_name: String,
    pub egg_groups: Vec<String>,
    pub habitat: String,
    pub growth_rate: String,
    /// Share of females in percent; `None` for genderless species.
    pub female_percent: Option<f64>,
    pub description: String,
    pub prev_and_next: AdjacentIds,
    pub moves: Vec<String>,
    pub evolutions: Vec<EvolutionStage>,
    pub battle_condition: BattleCondition,
}

impl CreatureDetail {
    pub fn id(&self) -> u32 {
        self.summary.id
    }

    pub fn name(&self) -> &str {
        &self.summary.name
    }
}

/// One published page (or accumulated feed) of creatures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub creatures: Vec<CreatureSummary>,
    pub has_more: bool,
}

impl SearchResult {
    pub fn empty() -> Self {
        SearchResult {
            creatures: Vec::new(),
            has_more: false,
        }
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.creatures.iter().map(|c| c.id).collect()
    }
}

/// Sort ascending by id and drop repeated ids, keeping the first occurrence.
pub fn sort_and_dedup(creatures: &mut Vec<CreatureSummary>) {
    creatures.sort_by_key(|creature| creature.id);
    creatures.dedup_by_key(|creature| creature.id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!("25".parse::<CreatureKey>().unwrap(), CreatureKey::Id(25));
        assert_eq!(
            " Pikachu ".parse::<CreatureKey>().unwrap(),
            CreatureKey::Name("pikachu".to_string())
        );
        assert_eq!(
            "-3".parse::<CreatureKey>().unwrap(),
            CreatureKey::Name("-3".to_string())
        );
    }

    #[test]
    fn test_adjacent_ids() {
        assert_eq!(
            AdjacentIds::around(1, 151),
            AdjacentIds {
                prev_id: None,
                next_id: Some(2)
            }
        );
        assert_eq!(
            AdjacentIds::around(151, 151),
            AdjacentIds {
                prev_id: Some(150),
                next_id: None
            }
        );
    }
}
