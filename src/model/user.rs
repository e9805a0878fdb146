// User model

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ids::{SpaceId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub member_spaces: HashSet<SpaceId>,
    pub editor_spaces: HashSet<SpaceId>,
}

impl User {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            member_spaces: HashSet::new(),
            editor_spaces: HashSet::new(),
        }
    }

    /// Union of member and editor spaces; the set of spaces this user
    /// counts as "belonging to" for membership-filtering and distance
    /// weighting purposes.
    pub fn all_spaces(&self) -> HashSet<SpaceId> {
        self.member_spaces
            .union(&self.editor_spaces)
            .cloned()
            .collect()
    }

    pub fn is_member_or_editor_of(&self, space_id: &SpaceId) -> bool {
        self.member_spaces.contains(space_id) || self.editor_spaces.contains(space_id)
    }
}
