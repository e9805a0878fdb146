// Perspective model: the projection of one Entity into one Space.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EntityId, PerspectiveId, SpaceId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perspective {
    pub id: PerspectiveId,
    pub entity_id: EntityId,
    pub space_id: SpaceId,
    pub created_at: DateTime<Utc>,

    // Computed fields, populated by the Perspective Scorer & Normalizer.
    pub upvotes: u64,
    pub downvotes: u64,
    pub raw_score: f64,
    pub normalized_score: f64,
    pub contestation_score: f64,
}

impl Perspective {
    pub fn new(entity_id: impl Into<EntityId>, space_id: impl Into<SpaceId>, created_at: DateTime<Utc>) -> Self {
        let entity_id = entity_id.into();
        let space_id = space_id.into();
        let id = PerspectiveId::synthesize(&entity_id, &space_id);
        Self {
            id,
            entity_id,
            space_id,
            created_at,
            upvotes: 0,
            downvotes: 0,
            raw_score: 0.0,
            normalized_score: 0.0,
            contestation_score: 0.0,
        }
    }
}
