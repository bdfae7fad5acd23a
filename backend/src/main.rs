use backend::{
    assets::extract_static_assets,
    build_rocket,
    config::Config,
    storage,
    store::RosterStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚀 Starting roster server");

    let config = Config::load();
    let backend = storage::open(&config).await;
    let store = RosterStore::open(backend, config.choice_policy).await;

    info!(
        backend = %store.backend_kind(),
        policy = %store.policy(),
        reset = config.reset_enabled,
        "📋 Roster store ready"
    );

    let static_dir = extract_static_assets()?;

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", config.address));

    let _ = build_rocket(figment, store, static_dir, config.reset_enabled)
        .launch()
        .await?;

    Ok(())
}
