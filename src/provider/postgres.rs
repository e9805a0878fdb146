// PostgreSQL-backed DataProvider, mirroring scoring_data_provider.py.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, Pool, Postgres};
use tracing::{debug, info};

use crate::model::{Entity, Perspective, Space, SpaceId, User, Vote, VoteType};

use super::{DataProvider, ScoringData};

pub struct PostgresProvider {
    pool: Pool<Postgres>,
    root_space_id: SpaceId,
}

impl PostgresProvider {
    pub async fn connect(database_url: &str, root_space_id: impl Into<SpaceId>) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(2)
            .connect(database_url)
            .await?;

        Ok(Self {
            pool,
            root_space_id: root_space_id.into(),
        })
    }

    async fn fetch_entities(&self) -> anyhow::Result<Vec<Entity>> {
        #[derive(FromRow)]
        struct Row {
            id: String,
            created_at: DateTime<Utc>,
        }

        let rows: Vec<Row> = sqlx::query_as("SELECT id, created_at FROM entities")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| Entity::new(r.id, r.created_at)).collect())
    }

    async fn fetch_spaces(&self) -> anyhow::Result<Vec<Space>> {
        #[derive(FromRow)]
        struct Row {
            id: String,
            created_at: DateTime<Utc>,
            parent_space_id: Option<String>,
        }

        let rows: Vec<Row> = sqlx::query_as("SELECT id, created_at, parent_space_id FROM spaces")
            .fetch_all(&self.pool)
            .await?;

        let mut spaces: Vec<Space> = rows
            .into_iter()
            .map(|row| {
                let id = SpaceId::from(row.id);
                let is_root = id == self.root_space_id;
                let parent_space_id = if is_root {
                    None
                } else {
                    row.parent_space_id.map(SpaceId::from)
                };
                Space::new(id, row.created_at, parent_space_id)
            })
            .collect();

        let mut children: HashMap<SpaceId, HashSet<SpaceId>> = HashMap::new();
        for space in &spaces {
            if let Some(parent_id) = &space.parent_space_id {
                children.entry(parent_id.clone()).or_default().insert(space.id.clone());
            }
        }
        for space in spaces.iter_mut() {
            if let Some(ids) = children.remove(&space.id) {
                space.child_space_ids = ids;
            }
        }

        Ok(spaces)
    }

    async fn fetch_users(&self) -> anyhow::Result<Vec<User>> {
        #[derive(FromRow)]
        struct MembershipRow {
            address: String,
            space_id: String,
        }

        let members: Vec<MembershipRow> = sqlx::query_as("SELECT address, space_id FROM members")
            .fetch_all(&self.pool)
            .await?;
        let editors: Vec<MembershipRow> = sqlx::query_as("SELECT address, space_id FROM editors")
            .fetch_all(&self.pool)
            .await?;

        let mut users: HashMap<String, User> = HashMap::new();

        for row in members {
            let address = row.address.to_lowercase();
            users
                .entry(address.clone())
                .or_insert_with(|| User::new(address.clone()))
                .member_spaces
                .insert(SpaceId::from(row.space_id));
        }

        for row in editors {
            let address = row.address.to_lowercase();
            users
                .entry(address.clone())
                .or_insert_with(|| User::new(address.clone()))
                .editor_spaces
                .insert(SpaceId::from(row.space_id));
        }

        Ok(users.into_values().collect())
    }

    async fn fetch_votes(&self) -> anyhow::Result<Vec<Vote>> {
        #[derive(FromRow)]
        struct Row {
            user_id: String,
            entity_id: String,
            space_id: String,
            vote_type: i32,
            voted_at: DateTime<Utc>,
        }

        let rows: Vec<Row> = sqlx::query_as(
            "SELECT user_id, entity_id, space_id, vote_type, voted_at FROM user_votes",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut votes = Vec::with_capacity(rows.len());
        for row in rows {
            // Invalid polarity values are dropped at the provider boundary
            // (spec.md §6): the core expects only {+1, -1}.
            let vote_type = match row.vote_type {
                1 => VoteType::Upvote,
                -1 => VoteType::Downvote,
                _ => continue,
            };

            votes.push(Vote::new(
                row.user_id.to_lowercase(),
                row.entity_id,
                row.space_id,
                vote_type,
                row.voted_at,
            ));
        }

        Ok(votes)
    }

    async fn fetch_perspectives(&self) -> anyhow::Result<Vec<Perspective>> {
        #[derive(FromRow)]
        struct Row {
            entity_id: String,
            space_id: String,
        }

        let rows: Vec<Row> = sqlx::query_as(r#"SELECT DISTINCT entity_id, space_id FROM "values""#)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Perspective::new(r.entity_id, r.space_id, Utc::now()))
            .collect())
    }
}

#[async_trait]
impl DataProvider for PostgresProvider {
    async fn fetch_all(&self) -> anyhow::Result<ScoringData> {
        info!("fetching scoring data from database");

        let mut entities = self.fetch_entities().await?;
        let spaces = self.fetch_spaces().await?;
        let users = self.fetch_users().await?;
        let votes = self.fetch_votes().await?;
        let perspectives = self.fetch_perspectives().await?;

        let mut perspectives_by_entity: HashMap<String, Vec<Perspective>> = HashMap::new();
        for perspective in perspectives {
            perspectives_by_entity
                .entry(perspective.entity_id.as_str().to_string())
                .or_default()
                .push(perspective);
        }

        for entity in entities.iter_mut() {
            entity.perspectives = perspectives_by_entity.remove(entity.id.as_str()).unwrap_or_default();
        }

        debug!(
            entities = entities.len(),
            spaces = spaces.len(),
            users = users.len(),
            votes = votes.len(),
            "fetched scoring data"
        );

        Ok(ScoringData {
            entities,
            votes,
            users,
            spaces,
        })
    }
}
