// Space model: a node in the hierarchical community tree rooted at
// ROOT_SPACE_ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ids::SpaceId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub created_at: DateTime<Utc>,
    pub parent_space_id: Option<SpaceId>,
    pub child_space_ids: HashSet<SpaceId>,

    // Computed fields, populated by the Space Scorer.
    pub distance_to_root: u32,
    pub space_score: f64,
    pub member_count: usize,
    pub entity_count: usize,
    pub activity_score: f64,
}

impl Space {
    pub fn new(id: impl Into<SpaceId>, created_at: DateTime<Utc>, parent_space_id: Option<SpaceId>) -> Self {
        Self {
            id: id.into(),
            created_at,
            parent_space_id,
            child_space_ids: HashSet::new(),
            distance_to_root: 0,
            // 1.0 is the space_score a freshly-constructed, not-yet-scored
            // space reports; the Space Scorer overwrites it before use.
            space_score: 1.0,
            member_count: 0,
            entity_count: 0,
            activity_score: 0.0,
        }
    }

    pub fn root(id: impl Into<SpaceId>, created_at: DateTime<Utc>) -> Self {
        Self::new(id, created_at, None)
    }
}
