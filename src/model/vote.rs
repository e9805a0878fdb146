// Vote model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EntityId, SpaceId, UserId};

/// A vote's polarity. The provider is expected to have already dropped
/// any raw polarity value that doesn't map to one of these (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn sign(self) -> f64 {
        match self {
            VoteType::Upvote => 1.0,
            VoteType::Downvote => -1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub user_id: UserId,
    pub entity_id: EntityId,
    pub space_id: SpaceId,
    pub vote_type: VoteType,
    pub timestamp: DateTime<Utc>,
    pub weight: f64,
}

impl Vote {
    pub fn new(
        user_id: impl Into<UserId>,
        entity_id: impl Into<EntityId>,
        space_id: impl Into<SpaceId>,
        vote_type: VoteType,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            entity_id: entity_id.into(),
            space_id: space_id.into(),
            vote_type,
            timestamp,
            weight: 1.0,
        }
    }

    /// Returns a copy of this vote with its weight replaced.
    pub fn reweighted(&self, weight: f64) -> Self {
        Self {
            user_id: self.user_id.clone(),
            entity_id: self.entity_id.clone(),
            space_id: self.space_id.clone(),
            vote_type: self.vote_type,
            timestamp: self.timestamp,
            weight,
        }
    }
}
