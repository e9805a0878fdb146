// PostgreSQL-backed ScoreWriter, mirroring scoring_data_writer.py.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::model::{Entity, Space};

use super::ScoreWriter;

pub struct PostgresWriter {
    pool: Pool<Postgres>,
}

impl PostgresWriter {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new().max_connections(10).connect(database_url).await?;
        Ok(Self { pool })
    }

    async fn write_global_scores(tx: &mut sqlx::Transaction<'_, Postgres>, entities: &[Entity]) -> anyhow::Result<()> {
        if entities.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        for entity in entities {
            sqlx::query(
                r#"
                INSERT INTO global_scores (entity_id, score, updated_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (entity_id) DO UPDATE SET
                    score = EXCLUDED.score,
                    updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(entity.id.as_str())
            .bind(entity.normalized_score)
            .bind(now)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn write_local_scores(tx: &mut sqlx::Transaction<'_, Postgres>, entities: &[Entity]) -> anyhow::Result<()> {
        let now = Utc::now();
        for entity in entities {
            for perspective in &entity.perspectives {
                sqlx::query(
                    r#"
                    INSERT INTO local_scores (entity_id, space_id, score, updated_at)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (entity_id, space_id) DO UPDATE SET
                        score = EXCLUDED.score,
                        updated_at = EXCLUDED.updated_at
                    "#,
                )
                .bind(perspective.entity_id.as_str())
                .bind(perspective.space_id.as_str())
                .bind(perspective.normalized_score)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            }
        }
        Ok(())
    }

    async fn write_space_scores(tx: &mut sqlx::Transaction<'_, Postgres>, spaces: &[Space]) -> anyhow::Result<()> {
        if spaces.is_empty() {
            return Ok(());
        }
        let now = Utc::now();
        for space in spaces {
            sqlx::query(
                r#"
                INSERT INTO space_scores (space_id, score, updated_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (space_id) DO UPDATE SET
                    score = EXCLUDED.score,
                    updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(space.id.as_str())
            .bind(space.space_score)
            .bind(now)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ScoreWriter for PostgresWriter {
    async fn write_all(&self, entities: &[Entity], spaces: &[Space]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        Self::write_global_scores(&mut tx, entities).await?;
        Self::write_local_scores(&mut tx, entities).await?;
        Self::write_space_scores(&mut tx, spaces).await?;

        tx.commit().await?;
        info!(entities = entities.len(), spaces = spaces.len(), "scores written successfully");
        Ok(())
    }
}
