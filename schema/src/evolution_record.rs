use crate::NamedResource;
use serde::{Deserialize, Serialize};

/// Raw `/evolution-chain/{id}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionChainRecord {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionDetail {
    pub min_level: Option<u32>,
    pub trigger: Option<NamedResource>,
    pub item: Option<NamedResource>,
    pub min_happiness: Option<u32>,
}

impl ChainLink {
    /// Depth-first walk yielding every link with its depth in the chain (base form is 0).
    pub fn walk(&self) -> Vec<(usize, &ChainLink)> {
        let mut out = Vec::new();
        let mut stack = vec![(0usize, self)];
        while let Some((depth, link)) = stack.pop() {
            out.push((depth, link));
            for next in link.evolves_to.iter().rev() {
                stack.push((depth + 1, next));
            }
        }
        out
    }
}
