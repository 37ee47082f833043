use sqlx::SqlitePool;

use crate::db::models::ReadingRow;
use crate::error::Result;
use crate::types::NewReading;

pub struct ReadingsRepository;

impl ReadingsRepository {
    /// Insert one reading and return its assigned id.
    pub async fn insert(pool: &SqlitePool, reading: &NewReading, created_at: i64) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO market_data (
                precio_bcv, precio_usdt, precio_eur, brecha_bs, brecha_porcentaje,
                variacion_mercado, status, alerta_audio, mostrar_banner, categoria,
                created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reading.precio_bcv)
        .bind(&reading.precio_usdt)
        .bind(&reading.precio_eur)
        .bind(&reading.brecha_bs)
        .bind(&reading.brecha_porcentaje)
        .bind(&reading.variacion_mercado)
        .bind(&reading.status)
        .bind(reading.alerta_audio)
        .bind(reading.mostrar_banner)
        .bind(&reading.categoria)
        .bind(created_at)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Most recent reading for a category. Highest id wins; wall-clock
    /// timestamps are never consulted.
    pub async fn latest(pool: &SqlitePool, categoria: &str) -> Result<Option<ReadingRow>> {
        let row = sqlx::query_as::<_, ReadingRow>(
            r#"
            SELECT id, precio_bcv, precio_usdt, precio_eur, brecha_bs, brecha_porcentaje,
                   variacion_mercado, status, alerta_audio, mostrar_banner, categoria, created_at
            FROM market_data
            WHERE categoria = ?
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(categoria)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UpdatePricesRequest;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        // Single connection so every query sees the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn reading(categoria: &str, precio_usdt: &str) -> NewReading {
        UpdatePricesRequest {
            precio_usdt: Some(precio_usdt.to_string()),
            categoria: Some(categoria.to_string()),
            ..Default::default()
        }
        .into_reading()
    }

    #[tokio::test]
    async fn insert_then_latest_returns_row() {
        let pool = memory_pool().await;

        let id = ReadingsRepository::insert(&pool, &reading("monitor", "40.00"), 100)
            .await
            .unwrap();
        let row = ReadingsRepository::latest(&pool, "monitor")
            .await
            .unwrap()
            .expect("row present");

        assert_eq!(row.id, id);
        assert_eq!(row.precio_usdt.as_deref(), Some("40.00"));
        assert_eq!(row.brecha_bs, "0.00");
        assert!(!row.alerta_audio);
        assert_eq!(row.categoria, "monitor");
        assert_eq!(row.created_at, 100);
    }

    #[tokio::test]
    async fn latest_filters_by_category() {
        let pool = memory_pool().await;

        ReadingsRepository::insert(&pool, &reading("monitor", "40.00"), 1)
            .await
            .unwrap();
        ReadingsRepository::insert(&pool, &reading("comparar", "41.00"), 2)
            .await
            .unwrap();

        let monitor = ReadingsRepository::latest(&pool, "monitor")
            .await
            .unwrap()
            .unwrap();
        let comparar = ReadingsRepository::latest(&pool, "comparar")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(monitor.categoria, "monitor");
        assert_eq!(monitor.precio_usdt.as_deref(), Some("40.00"));
        assert_eq!(comparar.categoria, "comparar");
        assert_eq!(comparar.precio_usdt.as_deref(), Some("41.00"));
    }

    #[tokio::test]
    async fn second_insert_wins_regardless_of_timestamp() {
        let pool = memory_pool().await;

        // Older wall-clock time on the later row; id still decides.
        ReadingsRepository::insert(&pool, &reading("monitor", "40.00"), 200)
            .await
            .unwrap();
        let second = ReadingsRepository::insert(&pool, &reading("monitor", "40.50"), 100)
            .await
            .unwrap();

        let row = ReadingsRepository::latest(&pool, "monitor")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.id, second);
        assert_eq!(row.precio_usdt.as_deref(), Some("40.50"));
    }

    #[tokio::test]
    async fn empty_table_returns_none() {
        let pool = memory_pool().await;
        let row = ReadingsRepository::latest(&pool, "monitor").await.unwrap();
        assert!(row.is_none());
    }
}
