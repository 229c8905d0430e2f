use std::{sync::Arc, time::Duration};

use starfilms::{
    AppState, app, catalog::CatalogImporter, config::Config, db, films::FilmService,
    swapi::SwapiClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,starfilms=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("starfilms/0.1")
        .timeout(Duration::from_secs(config.swapi_timeout_secs))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;

    let swapi = SwapiClient::new(http, config.swapi_base_url.clone());
    let importer = CatalogImporter::new(db.clone(), swapi);
    let films = FilmService::new(db, importer);

    let state = Arc::new(AppState { config: config.clone(), films });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, swapi = %config.swapi_base_url, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
