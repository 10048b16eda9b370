use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use shoplist_server::{
    auth::{TokenService, bootstrap::bootstrap_superadmin},
    config::AppConfig,
    db::connection,
    logging::init_tracing,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    services::ServiceContext,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging.rust_log);

    let db_cfg = cfg
        .database
        .clone()
        .context("missing [database] configuration (APP_DATABASE__URL)")?;
    let auth_cfg = cfg
        .auth
        .clone()
        .context("missing [auth] configuration (APP_AUTH__JWT_SECRET)")?;

    tracing::info!(
        host = %cfg.general.host,
        port = cfg.general.port,
        environment = %cfg.general.environment,
        db_max_connections = db_cfg.max_connections,
        db_min_idle = db_cfg.min_idle,
        database = %db_cfg.redacted_url(),
        "starting server"
    );

    let db = connection::connect(&db_cfg).await?;
    let tokens = TokenService::from_config(&auth_cfg);
    bootstrap_superadmin(&auth_cfg, &ServiceContext::new(&db)).await?;

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .context("invalid host/port")?;
    let state = AppState::new(cfg, db, tokens);

    let app = Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
