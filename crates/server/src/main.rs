//! Krishi Mitra server entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use krishi_config::{load_settings, Settings};
use krishi_dialogue::{Responder, TurnResolver};
use krishi_knowledge::{KnowledgeBase, KnowledgeIndex};
use krishi_nlu::RuleClassifier;
use krishi_server::{create_router, AppState, InMemorySessionStore, OpenWeatherClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("KRISHI_MITRA_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized, use eprintln for early logging
            eprintln!("Warning: failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };
    settings.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    tracing::info!("Starting Krishi Mitra server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    let kb = Arc::new(KnowledgeBase::load(
        &settings.data.crop_advisory_file,
        &settings.data.mandi_prices_file,
        &settings.data.schemes_file,
    ));
    let index = Arc::new(KnowledgeIndex::build(&kb));

    let weather = Arc::new(OpenWeatherClient::new(&settings.weather)?);
    let classifier = RuleClassifier::new(index.clone(), settings.known_weather_locations.clone());
    let responder = Responder::new(
        kb,
        index,
        weather,
        settings.example_queries.clone(),
    );
    let resolver = Arc::new(TurnResolver::new(
        classifier,
        responder,
        settings.exit_phrases.clone(),
    ));

    let sessions = Arc::new(InMemorySessionStore::new(
        Duration::from_secs(settings.session.idle_ttl_secs),
        settings.session.max_sessions,
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let state = AppState::new(Arc::new(settings), resolver, sessions);
    let router = create_router(state);

    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
