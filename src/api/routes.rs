use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::health::HealthState;
use crate::api::latency::StoreLatency;
use crate::db::models::GlobalRateRow;
use crate::db::rates::GlobalRatesRepository;
use crate::db::readings::ReadingsRepository;
use crate::error::AppError;
use crate::types::{canonical_category, UpdatePricesRequest};

#[derive(Clone)]
pub struct ApiState {
    pub pool: sqlx::SqlitePool,
    pub health: Arc<HealthState>,
    pub latency: Arc<StoreLatency>,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            pool,
            health: Arc::new(HealthState::new()),
            latency: Arc::new(StoreLatency::new()),
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/update-prices", post(update_prices))
        .route("/precio-actual", get(precio_actual))
        // Fallback fetch path used by later dashboard revisions.
        .route("/api/market-data", get(precio_actual))
        .route("/api/update-global-rates", post(update_global_rates))
        .route("/global-rates", get(global_rates))
        .route("/health", get(health))
        .route("/stats/latency", get(stats_latency))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct PrecioActualQuery {
    pub categoria: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn update_prices(
    State(state): State<ApiState>,
    Json(body): Json<UpdatePricesRequest>,
) -> Result<Json<Value>, AppError> {
    let reading = body.into_reading();
    let now = Utc::now().timestamp();

    let started = Instant::now();
    let id = ReadingsRepository::insert(&state.pool, &reading, now).await?;
    state.latency.record_write(started.elapsed());

    state.health.record_reading(now);
    info!(id, categoria = %reading.categoria, "reading stored");

    Ok(Json(json!({ "message": "reading stored" })))
}

async fn precio_actual(
    State(state): State<ApiState>,
    Query(params): Query<PrecioActualQuery>,
) -> Result<Json<Value>, AppError> {
    let categoria = canonical_category(params.categoria.as_deref());

    let started = Instant::now();
    let row = ReadingsRepository::latest(&state.pool, &categoria).await?;
    state.latency.record_read(started.elapsed());

    // No row yet is not an error; the dashboard polls from first boot.
    match row {
        Some(row) => Ok(Json(serde_json::to_value(row)?)),
        None => Ok(Json(json!({}))),
    }
}

async fn update_global_rates(
    State(state): State<ApiState>,
    Json(rates): Json<BTreeMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let now = Utc::now().timestamp();
    let batch: Vec<(String, String)> = rates.into_iter().collect();
    let inserted = batch.len();

    let started = Instant::now();
    GlobalRatesRepository::insert_batch(&state.pool, &batch, now).await?;
    state.latency.record_write(started.elapsed());

    if inserted > 0 {
        state.health.record_rate_batch(now);
    }
    info!(inserted, "global rates stored");

    Ok(Json(json!({ "message": "global rates stored" })))
}

async fn global_rates(
    State(state): State<ApiState>,
) -> Result<Json<Vec<GlobalRateRow>>, AppError> {
    let started = Instant::now();
    let rows = GlobalRatesRepository::latest_per_code(&state.pool).await?;
    state.latency.record_read(started.elapsed());

    Ok(Json(rows))
}

async fn health(State(state): State<ApiState>) -> Json<Value> {
    let store_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    let last_ingest_at = state.health.last_ingest_at();

    Json(json!({
        "status": if store_ok { "ok" } else { "degraded" },
        "timestamp": Utc::now().to_rfc3339(),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "store_ok": store_ok,
        "readings_ingested": state.health.readings_ingested(),
        "rate_batches_ingested": state.health.rate_batches_ingested(),
        "last_ingest_at": if last_ingest_at == 0 { Value::Null } else { json!(last_ingest_at) },
    }))
}

async fn stats_latency(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "store_write": state.latency.write_percentiles(),
        "store_read": state.latency.read_percentiles(),
    }))
}
