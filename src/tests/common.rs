use crate::config::CatalogConfig;
use crate::errors::{FetchError, FetchResult};
use crate::fetch::CreatureSource;
use crate::model::CreatureKey;
use async_trait::async_trait;
use schema::{
    AbilitySlot, ApiResource, ChainLink, CreatureRecord, DamageRelations, EvolutionChainRecord,
    EvolutionDetail, FlavorText, Genus, ListingPage, MoveEntry, NamedResource, SearchHit,
    SearchPage, SpeciesRecord, Sprites, StatEntry, TypeRecord, TypeSlot,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

pub const API_ROOT: &str = "https://pokeapi.co/api/v2";

pub fn resource(name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: String::new(),
    }
}

pub fn creature_resource(id: u32, name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: format!("{}/pokemon/{}/", API_ROOT, id),
    }
}

pub fn chain_url(id: u32) -> String {
    format!("{}/evolution-chain/{}/", API_ROOT, id)
}

/// Config with no publish delay so tests don't sleep.
pub fn test_config() -> CatalogConfig {
    CatalogConfig {
        publish_delay_ms: 0,
        catalog_size: 151,
        ..CatalogConfig::default()
    }
}

/// A builder for creature records with common defaults.
///
/// # Example
/// ```
/// let record = TestCreatureBuilder::new(25, "pikachu")
///     .with_types(&["electric"])
///     .with_size(4, 60)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<String>,
    abilities: Vec<String>,
    stats: Vec<(String, u32)>,
    moves: Vec<String>,
}

impl TestCreatureBuilder {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            height: 7,
            weight: 69,
            types: vec!["normal".to_string()],
            abilities: vec!["run-away".to_string()],
            stats: vec![("hp".to_string(), 45), ("speed".to_string(), 45)],
            moves: vec!["tackle".to_string()],
        }
    }

    /// Types in slot order.
    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Height in decimetres and weight in hectograms.
    pub fn with_size(mut self, height: u32, weight: u32) -> Self {
        self.height = height;
        self.weight = weight;
        self
    }

    pub fn with_stats(mut self, stats: &[(&str, u32)]) -> Self {
        self.stats = stats.iter().map(|(s, v)| (s.to_string(), *v)).collect();
        self
    }

    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.moves = moves.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn build(self) -> CreatureRecord {
        CreatureRecord {
            id: self.id,
            name: self.name.clone(),
            height: self.height,
            weight: self.weight,
            sprites: Sprites {
                front_default: Some(format!("{}.png", self.id)),
                ..Sprites::default()
            },
            // Reversed on purpose: slot order, not list order, decides the primary type.
            types: self
                .types
                .iter()
                .enumerate()
                .rev()
                .map(|(i, name)| TypeSlot {
                    slot: i as u8 + 1,
                    type_: resource(name),
                })
                .collect(),
            abilities: self
                .abilities
                .iter()
                .map(|name| AbilitySlot {
                    ability: resource(name),
                    is_hidden: false,
                    slot: 1,
                })
                .collect(),
            stats: self
                .stats
                .iter()
                .map(|(name, value)| StatEntry {
                    base_stat: *value,
                    effort: 0,
                    stat: resource(name),
                })
                .collect(),
            moves: self
                .moves
                .iter()
                .map(|name| MoveEntry {
                    move_: resource(name),
                })
                .collect(),
        }
    }
}

/// Species record with English and Japanese entries.
pub fn species_record(id: u32, name: &str) -> SpeciesRecord {
    let language = |code: &str| resource(code);
    SpeciesRecord {
        id,
        name: name.to_string(),
        genera: vec![
            Genus {
                genus: "たねポケモン".to_string(),
                language: language("ja"),
            },
            Genus {
                genus: "Seed Pokémon".to_string(),
                language: language("en"),
            },
        ],
        egg_groups: vec![resource("monster"), resource("plant")],
        habitat: Some(resource("grassland")),
        growth_rate: resource("medium-slow"),
        flavor_text_entries: vec![
            FlavorText {
                flavor_text: "うまれたときから".to_string(),
                language: language("ja"),
                version: None,
            },
            FlavorText {
                flavor_text: "A strange seed was\nplanted on its\u{c}back at birth.".to_string(),
                language: language("en"),
                version: Some(resource("red")),
            },
        ],
        evolution_chain: Some(ApiResource { url: chain_url(1) }),
        gender_rate: 1,
    }
}

/// Species record without any English text.
pub fn untranslated_species(id: u32, name: &str) -> SpeciesRecord {
    let mut species = species_record(id, name);
    species.genera.retain(|g| g.language.name != "en");
    species.flavor_text_entries.retain(|f| f.language.name != "en");
    species
}

/// Bulbasaur -> Ivysaur (Lv. 16) -> Venusaur (Lv. 32).
pub fn seed_chain() -> EvolutionChainRecord {
    let level = |min_level: u32| EvolutionDetail {
        min_level: Some(min_level),
        trigger: Some(resource("level-up")),
        item: None,
        min_happiness: None,
    };
    let species = |id: u32, name: &str| NamedResource {
        name: name.to_string(),
        url: format!("{}/pokemon-species/{}/", API_ROOT, id),
    };
    EvolutionChainRecord {
        id: 1,
        chain: ChainLink {
            species: species(1, "bulbasaur"),
            evolution_details: Vec::new(),
            evolves_to: vec![ChainLink {
                species: species(2, "ivysaur"),
                evolution_details: vec![level(16)],
                evolves_to: vec![ChainLink {
                    species: species(3, "venusaur"),
                    evolution_details: vec![level(32)],
                    evolves_to: Vec::new(),
                }],
            }],
        },
    }
}

pub fn grass_type() -> TypeRecord {
    TypeRecord {
        name: "grass".to_string(),
        damage_relations: DamageRelations {
            double_damage_from: ["flying", "poison", "bug", "fire", "ice"]
                .iter()
                .map(|n| resource(n))
                .collect(),
            double_damage_to: ["ground", "rock", "water"]
                .iter()
                .map(|n| resource(n))
                .collect(),
            ..DamageRelations::default()
        },
    }
}

/// In-memory `CreatureSource` with failure and latency injection.
#[derive(Default)]
pub struct StubSource {
    creatures: BTreeMap<u32, CreatureRecord>,
    species: HashMap<u32, SpeciesRecord>,
    chains: HashMap<String, EvolutionChainRecord>,
    types: HashMap<String, TypeRecord>,
    listing: Option<Vec<NamedResource>>,
    delays: HashMap<u32, Duration>,
    failing: HashSet<u32>,
    offline: bool,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulbasaur, Ivysaur, Venusaur, Pikachu and Nidoran♀ with species,
    /// the seed evolution chain and grass matchups.
    pub fn with_starters() -> Self {
        let seed = |id: u32, name: &str| {
            TestCreatureBuilder::new(id, name)
                .with_types(&["grass", "poison"])
                .with_stats(&[
                    ("hp", 45),
                    ("attack", 49),
                    ("defense", 49),
                    ("special-attack", 65),
                    ("special-defense", 65),
                    ("speed", 45),
                ])
                .with_moves(&["razor-wind", "swords-dance", "vine-whip"])
                .build()
        };
        Self::new()
            .with_creature(seed(1, "bulbasaur"), species_record(1, "bulbasaur"))
            .with_creature(seed(2, "ivysaur"), species_record(2, "ivysaur"))
            .with_creature(seed(3, "venusaur"), species_record(3, "venusaur"))
            .with_creature(
                TestCreatureBuilder::new(25, "pikachu")
                    .with_types(&["electric"])
                    .with_size(4, 60)
                    .build(),
                species_record(25, "pikachu"),
            )
            .with_creature(
                TestCreatureBuilder::new(29, "nidoran-f")
                    .with_types(&["poison"])
                    .build(),
                species_record(29, "nidoran-f"),
            )
            .with_chain(chain_url(1), seed_chain())
            .with_type(grass_type())
    }

    /// Generic creatures `1..=count`, each with an English species record.
    pub fn with_catalog(count: u32) -> Self {
        (1..=count).fold(Self::new(), |source, id| {
            let name = format!("mon{}", id);
            source.with_creature(
                TestCreatureBuilder::new(id, &name).build(),
                species_record(id, &name),
            )
        })
    }

    pub fn with_creature(mut self, record: CreatureRecord, species: SpeciesRecord) -> Self {
        self.species.insert(record.id, species);
        self.creatures.insert(record.id, record);
        self
    }

    pub fn with_species(mut self, species: SpeciesRecord) -> Self {
        self.species.insert(species.id, species);
        self
    }

    pub fn with_chain(mut self, url: String, chain: EvolutionChainRecord) -> Self {
        self.chains.insert(url, chain);
        self
    }

    pub fn with_type(mut self, type_record: TypeRecord) -> Self {
        self.types.insert(type_record.name.clone(), type_record);
        self
    }

    /// Replace the generated listing with fixed entries.
    pub fn with_listing(mut self, entries: Vec<NamedResource>) -> Self {
        self.listing = Some(entries);
        self
    }

    /// Delay creature lookups of `id`.
    pub fn with_delay(mut self, id: u32, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    /// Make creature lookups of `id` fail with a server error.
    pub fn with_failure(mut self, id: u32) -> Self {
        self.failing.insert(id);
        self
    }

    /// Fail every request.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn check_online(&self, url: &str) -> FetchResult<()> {
        if self.offline {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            });
        }
        Ok(())
    }

    fn resolve(&self, key: &CreatureKey) -> Option<u32> {
        match key {
            CreatureKey::Id(id) => Some(*id),
            CreatureKey::Name(name) => self
                .creatures
                .values()
                .find(|record| &record.name == name)
                .map(|record| record.id),
        }
    }

    fn not_found(url: String) -> FetchError {
        FetchError::Status { url, status: 404 }
    }
}

#[async_trait]
impl CreatureSource for StubSource {
    async fn fetch_creature(&self, key: &CreatureKey) -> FetchResult<CreatureRecord> {
        let url = format!("{}/pokemon/{}", API_ROOT, key);
        self.check_online(&url)?;
        let id = self.resolve(key).ok_or_else(|| Self::not_found(url.clone()))?;
        if let Some(delay) = self.delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&id) {
            return Err(FetchError::Status { url, status: 500 });
        }
        self.creatures
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(url))
    }

    async fn fetch_species(&self, key: &CreatureKey) -> FetchResult<SpeciesRecord> {
        let url = format!("{}/pokemon-species/{}", API_ROOT, key);
        self.check_online(&url)?;
        self.resolve(key)
            .and_then(|id| self.species.get(&id))
            .cloned()
            .ok_or_else(|| Self::not_found(url))
    }

    async fn fetch_page(&self, offset: u32, limit: u32) -> FetchResult<ListingPage> {
        self.check_online(&format!("{}/pokemon?offset={}", API_ROOT, offset))?;
        let entries: Vec<NamedResource> = match &self.listing {
            Some(listing) => listing.clone(),
            None => self
                .creatures
                .values()
                .map(|record| creature_resource(record.id, &record.name))
                .collect(),
        };
        Ok(ListingPage {
            count: entries.len() as u32,
            next: None,
            previous: None,
            results: entries
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect(),
        })
    }

    async fn search(&self, query: &str, page: u32, page_size: u32) -> FetchResult<SearchPage> {
        self.check_online(&format!("search?name={}", query))?;
        let needle = query.to_lowercase();
        let skip = (page.max(1) - 1).saturating_mul(page_size);
        Ok(SearchPage {
            pokemons: self
                .creatures
                .values()
                .filter(|record| record.name.contains(&needle))
                .skip(skip as usize)
                .take(page_size as usize)
                .map(|record| SearchHit {
                    id: record.id,
                    name: record.name.clone(),
                })
                .collect(),
        })
    }

    async fn fetch_evolution_chain(&self, url: &str) -> FetchResult<EvolutionChainRecord> {
        self.check_online(url)?;
        self.chains
            .get(url)
            .cloned()
            .ok_or_else(|| Self::not_found(url.to_string()))
    }

    async fn fetch_type(&self, name: &str) -> FetchResult<TypeRecord> {
        let url = format!("{}/type/{}", API_ROOT, name);
        self.check_online(&url)?;
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| Self::not_found(url))
    }
}
