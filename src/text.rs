use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender marker inferred from a `-f` / `-m` name suffix (e.g. `nidoran-f`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unspecified,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "♀"),
            Gender::Male => write!(f, "♂"),
            Gender::Unspecified => Ok(()),
        }
    }
}

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace form feeds, newlines and other control characters with spaces.
pub fn clean_flavor_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Split a gender suffix off a creature name.
///
/// Matching is case-insensitive so it works on capitalized names too.
pub fn split_gender(name: &str) -> (&str, Gender) {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with("-f") {
        (&name[..name.len() - 2], Gender::Female)
    } else if lower.ends_with("-m") {
        (&name[..name.len() - 2], Gender::Male)
    } else {
        (name, Gender::Unspecified)
    }
}

/// `special-attack` -> `Special Attack`.
pub fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
