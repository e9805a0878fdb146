// Upstream data-provider interface (spec.md §6): supplies a single
// snapshot of entities (with perspectives), votes, users, and spaces.

pub mod postgres;

use async_trait::async_trait;

use crate::model::{Entity, Space, User, Vote};

/// A snapshot of everything the ranking core needs for one run.
#[derive(Debug, Clone, Default)]
pub struct ScoringData {
    pub entities: Vec<Entity>,
    pub votes: Vec<Vote>,
    pub users: Vec<User>,
    pub spaces: Vec<Space>,
}

/// The upstream data provider. The core consumes already-materialized
/// collections (spec.md §1); this trait is the seam the relational
/// store sits behind.
#[async_trait]
pub trait DataProvider {
    async fn fetch_all(&self) -> anyhow::Result<ScoringData>;
}

pub use postgres::PostgresProvider;
