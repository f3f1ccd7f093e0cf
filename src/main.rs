use axum::extract::DefaultBodyLimit;
use casting_backend::{
    config::Config, database::pool::create_pool, middleware::cors::permissive_cors,
    routes::api_router, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let pool = create_pool(&config).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let uploads_dir = config.uploads_dir.clone();
    let server_address = config.server_address.clone();
    let app_state = AppState::new(pool, config)?;

    info!("Serving uploads from: {}", uploads_dir);

    let app = api_router(app_state)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024));

    let addr: SocketAddr = server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
