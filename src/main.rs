//! Loads the configured documents into an index and, when a listen address is
//! configured, serves lookups against it.
//!
//! Usage: `netex-index [config-file]`. Without an argument `netex-index.*` is
//! read from the working directory if present. Every setting can be given as
//! a `NETEX_INDEX_*` environment variable.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use netex_index::interface::SharedIndex;
use netex_index::server;
use netex_index::settings::Settings;

fn setup_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> netex_index::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;
    setup_tracing(&settings.log);

    info!(inputs = settings.inputs.len(), "loading documents");
    let shared = Arc::new(SharedIndex::new(
        settings.inputs.clone(),
        settings.time_zone.clone(),
    ));
    let loader = Arc::clone(&shared);
    let (generation, summary) = tokio::task::spawn_blocking(move || loader.reload())
        .await
        .map_err(|e| netex_index::NetexError::Server(e.to_string()))?
        .inspect_err(|e| error!(error = %e, "loading failed"))?;

    let index = shared.current();
    info!(
        ?generation,
        stop_places = index.stop_places.len(),
        quays = index.quays.len(),
        lines = index.lines.len(),
        service_journeys = index.service_journeys.len(),
        skipped = summary.diagnostics.skipped().len(),
        dropped = summary.diagnostics.dropped().len(),
        time_zone = index.time_zone().as_deref().unwrap_or("unset"),
        published = ?index.publication_time(),
        "index ready"
    );

    if let Some(listen) = settings.listen {
        server::serve(shared, listen).await?;
    }
    Ok(())
}
