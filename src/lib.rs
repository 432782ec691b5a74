// In: src/lib.rs

//! Pokédex Catalog Client
//!
//! Fetches creature records from PokeAPI and a catalog search endpoint,
//! reshapes them into display-ready view models, assembles paged listings,
//! and keeps the detail view state consistent under overlapping requests.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod aggregate;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod listing;
pub mod mcp_interface;
pub mod model;
pub mod render;
pub mod route;
pub mod text;
pub mod units;
pub mod view;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokedex` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Raw wire records, for callers implementing their own `CreatureSource`.
pub use schema::{
    CreatureRecord, EvolutionChainRecord, ListingPage, NamedResource, SearchHit, SearchPage,
    SpeciesRecord, TypeRecord,
};

// --- From this crate's modules (`src/`) ---

// Data access.
pub use fetch::{CreatureSource, PokeApiClient};

// Aggregation and listing entry points.
pub use aggregate::{creature_detail, creature_summary};
pub use listing::{browse, search, CatalogFeed, FeedSnapshot, PageRequest};

// View models and view state.
pub use model::{CreatureDetail, CreatureKey, CreatureSummary, SearchResult};
pub use route::Route;
pub use view::{DetailTab, ViewContext, ViewState};

// Configuration.
pub use config::CatalogConfig;
pub use units::HeightStyle;

// Crate-specific error and result types.
pub use errors::{
    AggregateError, AggregateResult, CatalogError, CatalogResult, ConfigError, ConfigResult,
    FetchError, FetchResult, RouteError,
};
