//! Reactive state helpers for a Pokédex-style front end.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` wraps a single request with loading/error tracking. `pokemon`
//! builds PokeAPI calls on top of it. `sektor` keeps a record list in
//! key-value storage. `table` holds grid paging/sort/filter state. Every
//! helper publishes its state through `reactive::Observable`.

pub mod config;
pub mod http;
pub mod pokemon;
pub mod reactive;
pub mod sektor;
pub mod table;

pub use config::{ApiConfig, ConfigError, HttpTimeouts};
pub use http::{Api, HttpError, HttpTransport, Method, ReqwestTransport, RequestOptions, RequestState};
pub use pokemon::{ListOptions, PokemonClient, PokemonError, PokemonListPage, PokemonSummary};
pub use reactive::Observable;
pub use sektor::{FileStore, KeyValueStore, MemoryStore, SektorError, SektorRecord, SektorStore};
pub use table::{PageEvent, SortOrder, Table, TableOptions, TableState};
