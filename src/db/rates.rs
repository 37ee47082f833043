use sqlx::SqlitePool;

use crate::db::models::GlobalRateRow;
use crate::error::Result;

pub struct GlobalRatesRepository;

impl GlobalRatesRepository {
    /// Insert one batch of averaged rates, one row per currency code, in a
    /// single transaction.
    pub async fn insert_batch(
        pool: &SqlitePool,
        rates: &[(String, String)],
        created_at: i64,
    ) -> Result<()> {
        if rates.is_empty() {
            return Ok(());
        }

        let mut tx = pool.begin().await?;
        for (codigo, tasa) in rates {
            sqlx::query(
                r#"
                INSERT INTO global_rates (codigo, tasa, created_at)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(codigo)
            .bind(tasa)
            .bind(created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    /// Latest stored rate per currency code, ordered by code.
    pub async fn latest_per_code(pool: &SqlitePool) -> Result<Vec<GlobalRateRow>> {
        let rows = sqlx::query_as::<_, GlobalRateRow>(
            r#"
            SELECT g.id, g.codigo, g.tasa, g.created_at
            FROM global_rates g
            JOIN (SELECT codigo, MAX(id) AS id FROM global_rates GROUP BY codigo) latest
              ON g.id = latest.id
            ORDER BY g.codigo
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
