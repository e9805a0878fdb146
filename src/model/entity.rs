// Entity model: a votable item, owning its Perspectives exclusively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EntityId;
use super::perspective::Perspective;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub created_at: DateTime<Utc>,
    pub perspectives: Vec<Perspective>,

    // Computed fields, aggregated from owned perspectives.
    pub upvotes: u64,
    pub downvotes: u64,
    pub raw_score: f64,
    pub normalized_score: f64,
    pub contestation_score: f64,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
            perspectives: Vec::new(),
            upvotes: 0,
            downvotes: 0,
            raw_score: 0.0,
            normalized_score: 0.0,
            contestation_score: 0.0,
        }
    }

    /// Recomputes the entity's aggregate fields (counts, raw_score,
    /// contestation_score) as the sum over its owned perspectives.
    /// `normalized_score` is computed separately by the ranking engine,
    /// which needs the owning spaces' scores too (spec.md §4.5 step 6).
    pub fn recompute_aggregates(&mut self) {
        self.upvotes = self.perspectives.iter().map(|p| p.upvotes).sum();
        self.downvotes = self.perspectives.iter().map(|p| p.downvotes).sum();
        self.raw_score = self.perspectives.iter().map(|p| p.raw_score).sum();
        self.contestation_score = self.perspectives.iter().map(|p| p.contestation_score).sum();
    }
}
