//! PokeAPI client built on the tracked HTTP helper.
//!
//! DESIGN
//! ======
//! Two endpoints only: detail (`/pokemon/{id_or_name}`) and paginated list
//! (`/pokemon?limit=&offset=`). Nothing is cached; every call re-fetches.
//! Each endpoint has its own loading flag; the error slot is shared.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::types::{ListOptions, PokemonError, PokemonListPage, PokemonState, PokemonSummary, id_from_url};
use crate::config::ApiConfig;
use crate::http::{Api, HttpTransport, RequestOptions};
use crate::reactive::Observable;

pub struct PokemonClient<T> {
    api: Api<T>,
    base_url: String,
    state: Observable<PokemonState>,
    pokemon_list: Observable<Vec<PokemonSummary>>,
    current_pokemon: Observable<Option<Value>>,
}

impl<T: HttpTransport> PokemonClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api: Api::new(transport),
            base_url,
            state: Observable::default(),
            pokemon_list: Observable::default(),
            current_pokemon: Observable::default(),
        }
    }

    pub fn from_config(transport: T, config: &ApiConfig) -> Self {
        Self::new(transport, config.base_url.clone())
    }

    pub fn state(&self) -> &Observable<PokemonState> {
        &self.state
    }

    pub fn pokemon_list(&self) -> &Observable<Vec<PokemonSummary>> {
        &self.pokemon_list
    }

    pub fn current_pokemon(&self) -> &Observable<Option<Value>> {
        &self.current_pokemon
    }

    /// The underlying HTTP helper, for its own request state.
    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    pub fn error(&self) -> Option<PokemonError> {
        self.state.with(|s| s.error.clone())
    }

    /// Fetch one pokemon by numeric id or name.
    ///
    /// Returns `None` without issuing a request when `id_or_name` is blank.
    pub async fn get_pokemon_detail(&self, id_or_name: &str) -> Option<Value> {
        let id_or_name = id_or_name.trim();
        if id_or_name.is_empty() {
            warn!("pokemon detail requested without id or name");
            self.state.update(|s| s.error = Some(PokemonError::MissingIdentifier));
            return None;
        }

        self.state.update(|s| {
            s.detail_loading = true;
            s.error = None;
        });
        let _loading = self.state.reset_on_drop(|s| s.detail_loading = false);

        match self.api.fetch(&detail_url(&self.base_url, id_or_name), RequestOptions::default()).await {
            Ok(detail) => {
                self.current_pokemon.set(Some(detail.clone()));
                Some(detail)
            }
            Err(e) => {
                error!(error = %e, %id_or_name, "error fetching pokemon");
                self.state.update(|s| s.error = Some(e.into()));
                None
            }
        }
    }

    /// Fetch one page of the pokemon list, attaching an `id` to every entry.
    ///
    /// An empty (`null`) body yields `None` without recording an error.
    pub async fn get_list_pokemon(&self, options: ListOptions) -> Option<PokemonListPage> {
        self.state.update(|s| {
            s.list_loading = true;
            s.error = None;
        });
        let _loading = self.state.reset_on_drop(|s| s.list_loading = false);

        let url = list_url(&self.base_url, options);
        let result = match self.api.fetch(&url, RequestOptions::default()).await {
            Ok(Value::Null) => {
                debug!(%url, "pokemon list response was empty");
                return None;
            }
            Ok(body) => parse_list_page(body),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok((page, has_results)) => {
                if has_results {
                    self.pokemon_list.set(page.results.clone());
                }
                Some(page)
            }
            Err(e) => {
                error!(error = %e, limit = options.limit, offset = options.offset, "error fetching pokemon list");
                self.state.update(|s| s.error = Some(e));
                None
            }
        }
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

#[must_use]
pub fn detail_url(base_url: &str, id_or_name: &str) -> String {
    format!("{base_url}/pokemon/{id_or_name}")
}

#[must_use]
pub fn list_url(base_url: &str, options: ListOptions) -> String {
    format!("{base_url}/pokemon?limit={}&offset={}", options.limit, options.offset)
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct WireListPage {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
    results: Option<Vec<WireSummary>>,
}

#[derive(Deserialize)]
struct WireSummary {
    name: String,
    url: String,
}

/// Decode a list body. The flag reports whether `results` was present.
fn parse_list_page(body: Value) -> Result<(PokemonListPage, bool), PokemonError> {
    let wire: WireListPage = serde_json::from_value(body).map_err(|e| PokemonError::Decode(e.to_string()))?;
    let has_results = wire.results.is_some();
    let results = wire
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|item| {
            let id = id_from_url(&item.url);
            PokemonSummary { name: item.name, url: item.url, id }
        })
        .collect();

    Ok((PokemonListPage { count: wire.count, next: wire.next, previous: wire.previous, results }, has_results))
}
