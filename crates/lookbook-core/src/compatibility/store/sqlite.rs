//! SQLite-backed edge store.
//!
//! Both orientations of every pair are stored, so a sku's neighbours are a
//! single indexed range scan on `sku_1`.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::info;

use super::{EdgeStore, IndexStats, RankedQuery, StoreError};
use crate::catalog::{Sku, Slot};
use crate::compatibility::edges::{CrossScores, EdgeSet, ScoredSku, SlotEdges};
use crate::compatibility::scoring::round3;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS compatibility_edges (
        sku_1 TEXT NOT NULL,
        sku_2 TEXT NOT NULL,
        target_slot TEXT NOT NULL,
        score REAL NOT NULL,
        PRIMARY KEY (sku_1, sku_2)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_edges_source_slot ON compatibility_edges (sku_1, target_slot, score DESC)",
];

pub struct SqliteEdgeStore {
    pool: SqlitePool,
}

impl SqliteEdgeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `url` and ensure the schema.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Each connection to `:memory:` is its own database, so pin one.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_slot(raw: &str) -> Result<Slot, StoreError> {
    Slot::from_str(raw).map_err(|err| StoreError::Corrupt(err.to_string()))
}

#[async_trait]
impl EdgeStore for SqliteEdgeStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn replace_edges(&self, edges: Arc<EdgeSet>) -> Result<(), StoreError> {
        let directed = edges.directed_edges();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM compatibility_edges")
            .execute(&mut *tx)
            .await?;

        for edge in &directed {
            sqlx::query(
                "INSERT INTO compatibility_edges (sku_1, sku_2, target_slot, score) VALUES (?, ?, ?, ?)",
            )
            .bind(edge.source.as_str())
            .bind(edge.target.as_str())
            .bind(edge.target_slot.key())
            .bind(edge.score)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(edges = directed.len(), "persisted compatibility edges");
        Ok(())
    }

    async fn ranked(&self, sku: &Sku, query: RankedQuery) -> Result<SlotEdges, StoreError> {
        let slot = query.slot.map(Slot::key);
        let limit = query.limit.map(|limit| limit as i64);

        let rows = sqlx::query(
            r#"
            SELECT sku_2, target_slot, score FROM (
                SELECT sku_2, target_slot, score,
                       ROW_NUMBER() OVER (
                           PARTITION BY target_slot ORDER BY score DESC, sku_2 ASC
                       ) AS position
                FROM compatibility_edges
                WHERE sku_1 = ?
                  AND (? IS NULL OR target_slot = ?)
                  AND score >= ?
            )
            WHERE (? IS NULL OR position <= ?)
            ORDER BY target_slot, score DESC, sku_2 ASC
            "#,
        )
        .bind(sku.as_str())
        .bind(slot)
        .bind(slot)
        .bind(query.min_score)
        .bind(limit)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut edges = SlotEdges::new();
        for row in rows {
            let target_slot: String = row.try_get("target_slot")?;
            let target: String = row.try_get("sku_2")?;
            edges
                .entry(parse_slot(&target_slot)?)
                .or_default()
                .push(ScoredSku {
                    sku: Sku(target),
                    score: row.try_get("score")?,
                });
        }
        Ok(edges)
    }

    async fn pair_score(&self, a: &Sku, b: &Sku) -> Result<Option<f64>, StoreError> {
        let row = sqlx::query(
            "SELECT score FROM compatibility_edges WHERE (sku_1 = ? AND sku_2 = ?) OR (sku_1 = ? AND sku_2 = ?) LIMIT 1",
        )
        .bind(a.as_str())
        .bind(b.as_str())
        .bind(b.as_str())
        .bind(a.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| row.try_get::<f64, _>("score"))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn cross_scores(&self, skus: &BTreeSet<Sku>) -> Result<CrossScores, StoreError> {
        let mut cross = CrossScores::default();
        if skus.len() < 2 {
            return Ok(cross);
        }

        let members = serde_json::to_string(&skus.iter().map(Sku::as_str).collect::<Vec<_>>())
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;

        let rows = sqlx::query(
            r#"
            SELECT sku_1, sku_2, score FROM compatibility_edges
            WHERE sku_1 < sku_2
              AND sku_1 IN (SELECT value FROM json_each(?))
              AND sku_2 IN (SELECT value FROM json_each(?))
            "#,
        )
        .bind(&members)
        .bind(&members)
        .fetch_all(&self.pool)
        .await?;

        for row in rows {
            let a: String = row.try_get("sku_1")?;
            let b: String = row.try_get("sku_2")?;
            cross.insert(&Sku(a), &Sku(b), row.try_get("score")?);
        }
        Ok(cross)
    }

    async fn stats(&self) -> Result<IndexStats, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS directed,
                   COUNT(DISTINCT sku_1) AS skus,
                   COALESCE(AVG(score), 0.0) AS mean
            FROM compatibility_edges
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let directed: i64 = row.try_get("directed")?;
        let skus: i64 = row.try_get("skus")?;
        let mean: f64 = row.try_get("mean")?;
        Ok(IndexStats {
            edge_count: (directed / 2) as usize,
            distinct_skus: skus as usize,
            mean_score: round3(mean),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;

    async fn seeded_store() -> SqliteEdgeStore {
        let store = SqliteEdgeStore::connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        let mut top = Item::new("TOP", Slot::BaseTop, "tee");
        top.primary_color = Some("blue".into());
        let mut shoe = Item::new("SHOE", Slot::Footwear, "sneakers");
        shoe.primary_color = Some("orange".into());
        let mut boot = Item::new("BOOT", Slot::Footwear, "boots");
        boot.primary_color = Some("black".into());
        store
            .replace_edges(Arc::new(EdgeSet::build(&[top, shoe, boot])))
            .await
            .expect("persist edges");
        store
    }

    #[tokio::test]
    async fn ranked_query_orders_and_limits_per_slot() {
        let store = seeded_store().await;
        let top = Sku::from("TOP");

        let all = store.ranked(&top, RankedQuery::ALL).await.expect("ranked");
        let footwear: Vec<&str> = all[&Slot::Footwear].iter().map(|n| n.sku.as_str()).collect();
        assert_eq!(footwear, vec!["BOOT", "SHOE"]);

        let limited = store
            .ranked(
                &top,
                RankedQuery {
                    slot: Some(Slot::Footwear),
                    limit: Some(1),
                    min_score: 0.0,
                },
            )
            .await
            .expect("ranked");
        assert_eq!(limited[&Slot::Footwear].len(), 1);
        assert_eq!(limited[&Slot::Footwear][0].sku, Sku::from("BOOT"));
    }

    #[tokio::test]
    async fn pair_score_resolves_both_orientations() {
        let store = seeded_store().await;
        let forward = store
            .pair_score(&Sku::from("TOP"), &Sku::from("SHOE"))
            .await
            .expect("pair");
        let backward = store
            .pair_score(&Sku::from("SHOE"), &Sku::from("TOP"))
            .await
            .expect("pair");
        assert!(forward.is_some());
        assert_eq!(forward, backward);
        assert_eq!(
            store
                .pair_score(&Sku::from("SHOE"), &Sku::from("BOOT"))
                .await
                .expect("pair"),
            None
        );
    }

    #[tokio::test]
    async fn cross_scores_and_stats_match_memory_build() {
        let store = seeded_store().await;
        let skus: BTreeSet<Sku> = ["TOP", "SHOE", "BOOT"].into_iter().map(Sku::from).collect();
        let cross = store.cross_scores(&skus).await.expect("cross");
        assert_eq!(cross.len(), 2);

        let stats = store.stats().await.expect("stats");
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.distinct_skus, 3);
    }
}
