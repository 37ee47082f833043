//! Database row types matching the migrations. Used by sqlx for typed queries
//! and serialized straight onto the wire.

use serde::Serialize;

/// Row of `market_data`. Quotes stay decimal-as-text end to end.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReadingRow {
    pub id: i64,
    pub precio_bcv: Option<String>,
    pub precio_usdt: Option<String>,
    pub precio_eur: Option<String>,
    pub brecha_bs: String,
    pub brecha_porcentaje: Option<String>,
    pub variacion_mercado: Option<String>,
    pub status: Option<String>,
    pub alerta_audio: bool,
    pub mostrar_banner: bool,
    pub categoria: String,
    pub created_at: i64,
}

/// Row of `global_rates`: one averaged rate for one currency code.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GlobalRateRow {
    pub id: i64,
    pub codigo: String,
    pub tasa: String,
    pub created_at: i64,
}
