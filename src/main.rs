//! Health Risk Advisor HTTP server.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use health_risk_advisor::adapters::cache::InMemoryCache;
use health_risk_advisor::adapters::http::{app_router, AnalysisAppState, HttpSettings};
use health_risk_advisor::adapters::narrative::{OpenAINarrativeConfig, OpenAINarrativeProvider};
use health_risk_advisor::adapters::profile::{FsProfileStore, InMemoryProfileStore};
use health_risk_advisor::adapters::sources::{
    LiveHealthDataSources, ReqwestTransport, ResilientFetcher, SourceSettings,
};
use health_risk_advisor::application::{AnalyzeProfileHandler, DataAggregator};
use health_risk_advisor::config::{AppConfig, ResolvedSourceConfig};
use health_risk_advisor::domain::provenance::SourceKind;
use health_risk_advisor::ports::ProfileReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let cache = InMemoryCache::new();
    cache.start(config.cache.sweep_interval());

    let fetcher = ResilientFetcher::new(Arc::new(ReqwestTransport::new()), Arc::new(cache.clone()));
    let mut sources = LiveHealthDataSources::new(fetcher);
    for kind in SourceKind::all() {
        let resolved = config.sources.resolve(*kind);
        tracing::info!(
            source = %kind,
            configured = resolved.base_url.is_some(),
            has_key = resolved.api_key.is_some(),
            "Source registered"
        );
        sources = sources.with_source(source_settings(resolved));
    }

    let aggregator = DataAggregator::new(Arc::new(sources))
        .with_timeout(config.analysis.aggregation_timeout());

    let profiles: Arc<dyn ProfileReader> = match &config.profiles.dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Using JSON profile store");
            Arc::new(FsProfileStore::new(dir))
        }
        None => Arc::new(InMemoryProfileStore::new()),
    };

    let mut handler = AnalyzeProfileHandler::new(aggregator, profiles)
        .with_narrative_timeout(config.analysis.narrative_timeout());
    if let Some(key) = config.ai.openai_api_key.as_deref().filter(|k| !k.is_empty()) {
        let narrator = OpenAINarrativeConfig::new(key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries);
        handler = handler.with_narrator(Arc::new(OpenAINarrativeProvider::new(narrator)));
        tracing::info!(model = %config.ai.model, "Narrative provider enabled");
    }

    let settings = HttpSettings {
        cors_origins: config.server.cors_origins(),
        request_timeout: config.server.request_timeout(),
    };
    let app = app_router(AnalysisAppState::new(Arc::new(handler)), &settings);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Health Risk Advisor listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache.stop().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.server.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

fn source_settings(resolved: ResolvedSourceConfig) -> SourceSettings {
    let mut settings = SourceSettings::new(resolved.kind)
        .with_timeout(resolved.timeout)
        .with_retries(resolved.retry_attempts, resolved.retry_delay)
        .requiring_auth_key(resolved.requires_auth_key)
        .with_api_key_param(resolved.api_key_param.clone())
        .with_cache_ttl(resolved.cache_ttl);
    if let Some(url) = resolved.base_url {
        settings = settings.with_base_url(url);
    }
    if let Some(key) = resolved.api_key {
        settings = settings.with_api_key(resolved.api_key_param, key);
    }
    settings
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
