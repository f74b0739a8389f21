//! PokeAPI wire types and the client's observable state.

use serde::{Deserialize, Serialize};

use crate::http::HttpError;

pub const DEFAULT_LIST_LIMIT: u32 = 20;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PokemonError {
    /// `get_pokemon_detail` was called with an empty id or name.
    #[error("pokemon id or name is required")]
    MissingIdentifier,

    #[error(transparent)]
    Http(#[from] HttpError),

    /// The list endpoint answered with something that is not a list page.
    #[error("unexpected pokemon list shape: {0}")]
    Decode(String),
}

// =============================================================================
// STATE
// =============================================================================

/// Loading flags for each endpoint plus the error of the last call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonState {
    pub list_loading: bool,
    pub detail_loading: bool,
    pub error: Option<PokemonError>,
}

// =============================================================================
// LIST
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self { limit: DEFAULT_LIST_LIMIT, offset: 0 }
    }
}

/// One entry of the list endpoint, with `id` taken from its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub id: String,
}

impl PokemonSummary {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let id = id_from_url(&url);
        Self { name: name.into(), url, id }
    }
}

/// A page of `GET /pokemon?limit=&offset=`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonListPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<PokemonSummary>,
}

/// Second-to-last `/` segment of `url`, or an empty string when there is none.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `"25"`.
#[must_use]
pub fn id_from_url(url: &str) -> String {
    url.rsplit('/').nth(1).unwrap_or_default().to_string()
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
