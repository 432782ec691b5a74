//! Aggregation of raw creature, species, evolution and type records into view models.

use crate::config::CatalogConfig;
use crate::errors::{AggregateError, AggregateResult, CatalogResult};
use crate::fetch::CreatureSource;
use crate::model::{
    AdjacentIds, BattleCondition, CreatureDetail, CreatureKey, CreatureSummary, EvolutionStage,
    Stat,
};
use crate::text::{capitalize, clean_flavor_text, split_gender};
use crate::units::{Height, HeightStyle, Weight};
use schema::{find_localized, CreatureRecord, EvolutionChainRecord, SpeciesRecord, TypeRecord};

const ENGLISH: &str = "en";
const UNKNOWN_HABITAT: &str = "Unknown";

/// Reshape a raw creature record into a summary.
pub fn summarize(record: &CreatureRecord, style: HeightStyle) -> CreatureSummary {
    let (base_name, gender) = split_gender(&record.name);

    let mut type_slots: Vec<_> = record.types.iter().collect();
    type_slots.sort_by_key(|slot| slot.slot);

    CreatureSummary {
        id: record.id,
        name: capitalize(base_name),
        img: record.sprites.best_image().map(str::to_string),
        types: type_slots
            .into_iter()
            .map(|slot| slot.type_.name.clone())
            .collect(),
        abilities: record
            .abilities
            .iter()
            .map(|slot| capitalize(&slot.ability.name))
            .collect(),
        stats: record
            .stats
            .iter()
            .map(|entry| Stat {
                stat_name: entry.stat.name.clone(),
                base_stat: entry.base_stat,
            })
            .collect(),
        height: Height::from_decimetres(record.height, style),
        weight: Weight::from_hectograms(record.weight),
        gender,
    }
}

/// Merge a species record into a summary of the same creature.
///
/// Evolutions and battle condition start empty; see [`evolution_stages`] and
/// [`battle_condition`].
pub fn merge_species(
    summary: CreatureSummary,
    record: &CreatureRecord,
    species: &SpeciesRecord,
    catalog_size: u32,
) -> AggregateResult<CreatureDetail> {
    let genus = find_localized(&species.genera, ENGLISH)
        .ok_or(AggregateError::MissingEnglishEntry { field: "genera" })?;
    let flavor = find_localized(&species.flavor_text_entries, ENGLISH).ok_or(
        AggregateError::MissingEnglishEntry {
            field: "flavor_text_entries",
        },
    )?;

    let prev_and_next = AdjacentIds::around(summary.id, catalog_size);

    Ok(CreatureDetail {
        species_name: genus.genus.clone(),
        egg_groups: species
            .egg_groups
            .iter()
            .map(|group| capitalize(&group.name))
            .collect(),
        habitat: species
            .habitat
            .as_ref()
            .map(|habitat| capitalize(&habitat.name))
            .unwrap_or_else(|| UNKNOWN_HABITAT.to_string()),
        growth_rate: capitalize(&species.growth_rate.name),
        female_percent: (species.gender_rate >= 0)
            .then(|| f64::from(species.gender_rate) * 100.0 / 8.0),
        description: clean_flavor_text(&flavor.flavor_text),
        prev_and_next,
        moves: record
            .moves
            .iter()
            .map(|entry| capitalize(&entry.move_.name))
            .collect(),
        evolutions: Vec::new(),
        battle_condition: BattleCondition::default(),
        summary,
    })
}

/// Flatten an evolution chain into stages, base form first.
pub fn evolution_stages(chain: &EvolutionChainRecord) -> Vec<EvolutionStage> {
    chain
        .chain
        .walk()
        .into_iter()
        .map(|(stage, link)| {
            let detail = link.evolution_details.first();
            EvolutionStage {
                id: link.species.id(),
                name: capitalize(&link.species.name),
                stage,
                min_level: detail.and_then(|d| d.min_level),
                min_happiness: detail.and_then(|d| d.min_happiness),
                trigger: detail
                    .and_then(|d| d.trigger.as_ref())
                    .map(|t| t.name.clone()),
                item: detail
                    .and_then(|d| d.item.as_ref())
                    .map(|i| capitalize(&i.name)),
            }
        })
        .collect()
}

pub fn battle_condition(type_record: &TypeRecord) -> BattleCondition {
    let names = |resources: &[schema::NamedResource]| {
        resources.iter().map(|r| r.name.clone()).collect::<Vec<_>>()
    };
    BattleCondition {
        double_damage_from: names(&type_record.damage_relations.double_damage_from),
        double_damage_to: names(&type_record.damage_relations.double_damage_to),
    }
}

/// Fetch and summarize one creature.
pub async fn load_summary(
    source: &dyn CreatureSource,
    key: &CreatureKey,
    style: HeightStyle,
) -> CatalogResult<CreatureSummary> {
    let record = source.fetch_creature(key).await?;
    Ok(summarize(&record, style))
}

/// Fetch base and species records concurrently and merge them, then attach
/// the evolution chain and primary-type matchups.
///
/// The two supplementary lookups are best-effort: a failure leaves the field empty.
pub async fn load_detail(
    source: &dyn CreatureSource,
    key: &CreatureKey,
    config: &CatalogConfig,
) -> CatalogResult<CreatureDetail> {
    let (record, species) =
        futures::try_join!(source.fetch_creature(key), source.fetch_species(key))?;

    let summary = summarize(&record, config.height_style);
    let mut detail = merge_species(summary, &record, &species, config.catalog_size)?;

    let evolutions = async {
        match &species.evolution_chain {
            Some(chain) => Some(source.fetch_evolution_chain(&chain.url).await),
            None => None,
        }
    };
    let primary_type = detail.summary.primary_type().map(str::to_string);
    let matchups = async {
        match &primary_type {
            Some(type_name) => Some(source.fetch_type(type_name).await),
            None => None,
        }
    };
    let (evolutions, matchups) = futures::join!(evolutions, matchups);

    match evolutions {
        Some(Ok(chain)) => detail.evolutions = evolution_stages(&chain),
        Some(Err(err)) => tracing::warn!(%key, error = %err, "evolution chain unavailable"),
        None => {}
    }
    match matchups {
        Some(Ok(type_record)) => detail.battle_condition = battle_condition(&type_record),
        Some(Err(err)) => tracing::warn!(%key, error = %err, "type matchups unavailable"),
        None => {}
    }

    Ok(detail)
}

/// [`load_summary`] with every failure collapsed to `None`.
pub async fn creature_summary(
    source: &dyn CreatureSource,
    key: &CreatureKey,
    style: HeightStyle,
) -> Option<CreatureSummary> {
    match load_summary(source, key, style).await {
        Ok(summary) => Some(summary),
        Err(err) => {
            tracing::warn!(%key, error = %err, "creature lookup failed");
            None
        }
    }
}

/// [`load_detail`] with every failure collapsed to `None`.
pub async fn creature_detail(
    source: &dyn CreatureSource,
    key: &CreatureKey,
    config: &CatalogConfig,
) -> Option<CreatureDetail> {
    match load_detail(source, key, config).await {
        Ok(detail) => Some(detail),
        Err(err) => {
            tracing::warn!(%key, error = %err, "creature detail lookup failed");
            None
        }
    }
}
