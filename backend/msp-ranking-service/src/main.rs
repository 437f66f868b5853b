use actix_web::{web, App, HttpServer};
use anyhow::Context;
use msp_ranking_service::{
    handlers, middleware::RequestTiming, services::ranking::load_scoring_model, telemetry, Config,
    RankingHandlerState, RankingLayer, ScoringModel,
};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = Config::from_env().context("Failed to load configuration")?;

    telemetry::init(&config.logging)?;

    info!(
        "Starting {} v{} on {}",
        config.service.service_name,
        env!("CARGO_PKG_VERSION"),
        config.bind_address()
    );

    // Load the model once; it stays read-only for the life of the process
    let model = load_scoring_model(&config.model).context("Failed to load ranking model")?;
    info!(
        model = model.name(),
        path = %config.model.model_path.display(),
        "Ranking model ready"
    );

    let ranking = RankingLayer::new(model).with_max_candidates(config.ranking.max_candidates);
    let state = web::Data::new(RankingHandlerState::new(
        ranking,
        config.ranking.expose_error_details,
    ));
    let json_limit = config.service.json_limit_bytes;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(RequestTiming)
            .app_data(state.clone())
            .app_data(handlers::json_config(json_limit))
            .configure(handlers::configure)
    });

    if let Some(workers) = config.service.http_workers {
        server = server.workers(workers);
    }

    server
        .bind(config.bind_address())
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?
        .run()
        .await
        .context("HTTP server error")?;

    Ok(())
}
