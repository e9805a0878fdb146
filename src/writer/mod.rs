// Downstream writer interface (spec.md §6): a single atomic
// transaction writing three upsert streams.

pub mod postgres;

use async_trait::async_trait;

use crate::model::{Entity, Space};

/// Persists the engine's output. Each keyed upsert preserves prior
/// rows untouched; all three streams commit (or abort) together.
#[async_trait]
pub trait ScoreWriter {
    async fn write_all(&self, entities: &[Entity], spaces: &[Space]) -> anyhow::Result<()>;
}

pub use postgres::PostgresWriter;
