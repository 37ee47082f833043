use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rate_monitor::api::routes::{router, ApiState};
use rate_monitor::config::Config;
use rate_monitor::db;
use rate_monitor::error::Result;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let pool = db::connect(&cfg.db_path).await?;
    info!("Database ready at {}", cfg.db_path);

    let state = ApiState::new(pool);

    // Unknown non-API routes fall through to the dashboard bundle; index.html
    // handles client-side routing.
    let index = Path::new(&cfg.static_dir).join("index.html");
    let static_service = ServeDir::new(&cfg.static_dir).fallback(ServeFile::new(index));
    let app = router(state).fallback_service(static_service);

    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
