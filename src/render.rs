//! Plain-text rendering of catalog cards and the tabbed detail view.

use crate::listing::FeedSnapshot;
use crate::model::{CreatureDetail, CreatureSummary, SearchResult};
use crate::text::title_case;
use crate::view::DetailTab;
use std::fmt;
use strum::IntoEnumIterator;

const LABEL_WIDTH: usize = 14;
const BAR_WIDTH: usize = 20;
const MAX_BASE_STAT: u32 = 255;
pub const DEFAULT_MOVE_COLUMNS: usize = 4;

/// Stat slugs in display order with their labels.
const STAT_ROWS: [(&str, &str); 6] = [
    ("hp", "HP"),
    ("attack", "Attack"),
    ("defense", "Defense"),
    ("special-attack", "Sp. Atk"),
    ("special-defense", "Sp. Def"),
    ("speed", "Speed"),
];

impl fmt::Display for CreatureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03} {}", self.id, self.name)?;
        let gender = self.gender.to_string();
        if !gender.is_empty() {
            write!(f, " {}", gender)?;
        }
        write!(f, " [{}]", self.types.join(" / "))
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.creatures.is_empty() {
            return writeln!(f, "No Pokémon found.");
        }
        for creature in &self.creatures {
            writeln!(f, "  {}", creature)?;
        }
        if self.has_more {
            writeln!(f, "  ...more available")?;
        }
        Ok(())
    }
}

impl fmt::Display for FeedSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(query) = &self.query {
            writeln!(f, "Results for \"{}\":", query)?;
        }
        if self.loading {
            writeln!(f, "Loading...")?;
        }
        let page = SearchResult {
            creatures: self.creatures.clone(),
            has_more: self.has_more,
        };
        write!(f, "{}", page)
    }
}

/// A creature detail rendered with one tab open.
pub struct DetailView<'a> {
    pub detail: &'a CreatureDetail,
    pub tab: DetailTab,
    pub move_columns: usize,
}

impl<'a> DetailView<'a> {
    pub fn new(detail: &'a CreatureDetail, tab: DetailTab) -> Self {
        DetailView {
            detail,
            tab,
            move_columns: DEFAULT_MOVE_COLUMNS,
        }
    }
}

impl fmt::Display for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.detail;

        // --- 1. Header ---
        writeln!(f, "{}", detail.summary)?;
        let links = &detail.prev_and_next;
        let prev = links.prev_id.map(|id| format!("< #{:03}", id));
        let next = links.next_id.map(|id| format!("#{:03} >", id));
        writeln!(
            f,
            "{:<10}{:>30}",
            prev.unwrap_or_default(),
            next.unwrap_or_default()
        )?;

        // --- 2. Tab bar ---
        let tabs: Vec<String> = DetailTab::iter()
            .map(|tab| {
                if tab == self.tab {
                    format!("[{}]", tab)
                } else {
                    format!(" {} ", tab)
                }
            })
            .collect();
        writeln!(f, "{}", tabs.join(" "))?;
        writeln!(f, "--------------------")?;

        // --- 3. Active panel ---
        match self.tab {
            DetailTab::About => write_about(f, detail),
            DetailTab::Stats => write_stats(f, detail),
            DetailTab::Moves => write_moves(f, detail, self.move_columns),
            DetailTab::Evolutions => write_evolutions(f, detail),
        }
    }
}

fn write_about(f: &mut fmt::Formatter<'_>, detail: &CreatureDetail) -> fmt::Result {
    let summary = &detail.summary;
    writeln!(f, "{}", detail.description)?;
    writeln!(f)?;
    writeln!(f, "{:<LABEL_WIDTH$} : {}", "Species", detail.species_name)?;
    writeln!(
        f,
        "{:<LABEL_WIDTH$} : {} ({} m)",
        "Height", summary.height.feet, summary.height.meters
    )?;
    writeln!(
        f,
        "{:<LABEL_WIDTH$} : {} lbs ({} kg)",
        "Weight", summary.weight.lbs, summary.weight.kg
    )?;
    writeln!(
        f,
        "{:<LABEL_WIDTH$} : {}",
        "Abilities",
        summary.abilities.join(", ")
    )?;
    writeln!(
        f,
        "{:<LABEL_WIDTH$} : {}",
        "Egg Groups",
        detail.egg_groups.join(", ")
    )?;
    match detail.female_percent {
        Some(female) => writeln!(
            f,
            "{:<LABEL_WIDTH$} : {}% ♂, {}% ♀",
            "Gender",
            100.0 - female,
            female
        )?,
        None => writeln!(f, "{:<LABEL_WIDTH$} : Genderless", "Gender")?,
    }
    writeln!(f, "{:<LABEL_WIDTH$} : {}", "Habitat", detail.habitat)?;
    writeln!(f, "{:<LABEL_WIDTH$} : {}", "Growth Rate", detail.growth_rate)
}

fn stat_bar(value: u32) -> String {
    let filled = (value.min(MAX_BASE_STAT) as usize * BAR_WIDTH).div_ceil(MAX_BASE_STAT as usize);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn write_stats(f: &mut fmt::Formatter<'_>, detail: &CreatureDetail) -> fmt::Result {
    for (slug, label) in STAT_ROWS {
        match detail.summary.stat(slug) {
            Some(value) => writeln!(f, "{:<LABEL_WIDTH$} : {:>3} {}", label, value, stat_bar(value))?,
            None => writeln!(f, "{:<LABEL_WIDTH$} : ---", label)?,
        }
    }

    let condition = &detail.battle_condition;
    writeln!(f)?;
    writeln!(f, "Battle Condition")?;
    writeln!(
        f,
        "{:<LABEL_WIDTH$} : {}",
        "Weak against",
        condition.double_damage_from.join(", ")
    )?;
    writeln!(
        f,
        "{:<LABEL_WIDTH$} : {}",
        "Effective vs.",
        condition.double_damage_to.join(", ")
    )
}

/// Split `moves` into at most `columns` chunks of equal length (the last may be shorter).
pub fn chunk_moves(moves: &[String], columns: usize) -> Vec<&[String]> {
    if moves.is_empty() {
        return Vec::new();
    }
    let chunk_size = moves.len().div_ceil(columns.max(1));
    moves.chunks(chunk_size).collect()
}

fn write_moves(f: &mut fmt::Formatter<'_>, detail: &CreatureDetail, columns: usize) -> fmt::Result {
    let chunks = chunk_moves(&detail.moves, columns);
    if chunks.is_empty() {
        return writeln!(f, "No moves recorded.");
    }

    let width = detail.moves.iter().map(|m| m.chars().count()).max().unwrap_or(0) + 2;
    let rows = chunks[0].len();
    for row in 0..rows {
        let line: String = chunks
            .iter()
            .filter_map(|chunk| chunk.get(row))
            .map(|name| format!("{:<width$}", name))
            .collect();
        writeln!(f, "{}", line.trim_end())?;
    }
    Ok(())
}

fn write_evolutions(f: &mut fmt::Formatter<'_>, detail: &CreatureDetail) -> fmt::Result {
    if detail.evolutions.is_empty() {
        return writeln!(f, "No evolution data.");
    }
    for stage in &detail.evolutions {
        let indent = "  ".repeat(stage.stage);
        let arrow = if stage.stage == 0 { "" } else { "-> " };
        let number = stage
            .id
            .map(|id| format!("#{:03} ", id))
            .unwrap_or_default();
        write!(f, "{}{}{}{}", indent, arrow, number, stage.name)?;
        if let Some(level) = stage.min_level {
            write!(f, " (Lv. {})", level)?;
        } else if let Some(item) = &stage.item {
            write!(f, " (use {})", item)?;
        } else if let Some(happiness) = stage.min_happiness {
            write!(f, " (Friendship {})", happiness)?;
        } else if let Some(trigger) = stage.trigger.as_ref().filter(|_| stage.stage > 0) {
            write!(f, " ({})", title_case(trigger))?;
        }
        writeln!(f)?;
    }
    Ok(())
}
