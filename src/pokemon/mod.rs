//! Domain-fetch helper for the public PokeAPI.

pub mod client;
pub mod types;

pub use client::{PokemonClient, detail_url, list_url};
pub use types::{ListOptions, PokemonError, PokemonListPage, PokemonState, PokemonSummary, id_from_url};
