// Pokedex Schema - Wire record definitions
// This crate contains the raw response shapes of the PokeAPI and the catalog
// search endpoint. They are consumed read-only by the `pokedex` crate, which
// reshapes them into display-ready view models.

// Re-export the main types
pub use creature_record::*;
pub use evolution_record::*;
pub use listing_record::*;
pub use resource::*;
pub use species_record::*;
pub use type_record::*;

pub mod creature_record;
pub mod evolution_record;
pub mod listing_record;
pub mod resource;
pub mod species_record;
pub mod type_record;
