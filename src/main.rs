use dexkit::{
    ApiConfig, FileStore, ListOptions, PageEvent, PokemonClient, ReqwestTransport, SektorStore, Table, TableOptions,
};
use serde_json::{Map, json};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let transport = match ReqwestTransport::with_timeouts(config.timeouts) {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!(error = %e, "http client unavailable");
            std::process::exit(1);
        }
    };

    let pokemon = PokemonClient::from_config(transport, &config);
    let table = Table::new(TableOptions::default().on_page(|e| tracing::debug!(page = e.page, "page requested")));

    let rows = table.state().with(|s| s.page_size);
    let limit = u32::try_from(rows).unwrap_or(u32::MAX);

    table.set_loading(true);
    let page = pokemon.get_list_pokemon(ListOptions { limit, offset: 0 }).await;
    table.set_loading(false);

    match page {
        Some(page) => {
            let total = usize::try_from(page.count).ok();
            table.set_data(page.results, total);
            let info = table.paginator_info();
            tracing::info!(start = info.start, end = info.end, total = info.total, "pokemon list loaded");
        }
        None => {
            if let Some(e) = pokemon.error() {
                tracing::warn!(error = %e, "pokemon list unavailable");
            }
        }
    }

    let next = PageEvent { first: rows, rows, page: 1 };
    table.on_page(&next);
    let offset = u32::try_from(next.first).unwrap_or(u32::MAX);
    if let Some(page) = pokemon.get_list_pokemon(ListOptions { limit, offset }).await {
        table.set_data(page.results, usize::try_from(page.count).ok());
        let info = table.paginator_info();
        tracing::info!(start = info.start, end = info.end, total = info.total, "second page loaded");
    }

    if let Some(name) = std::env::args().nth(1) {
        if let Some(detail) = pokemon.get_pokemon_detail(&name).await {
            let id = detail.get("id").cloned().unwrap_or_default();
            tracing::info!(%name, %id, "pokemon detail loaded");
        }
    }

    let sektor = SektorStore::from_config(FileStore::new(config.storage_dir.clone()), &config);
    sektor.initialize();
    let mut fields = Map::new();
    fields.insert("name".into(), json!("demo"));
    if let Some(record) = sektor.add_sektor(fields) {
        tracing::info!(id = %record.id, count = sektor.sektor().with(Vec::len), "sektor saved");
    }
}
