// Vote Processor (spec.md §4.3): distance weighting (Stage A) and
// membership filtering (Stage B).

use crate::config::RankingConfig;
use crate::engine::distance::DistanceMap;
use crate::model::{Entity, SpaceId, User, UserId, Vote};
use std::collections::HashMap;

pub struct VoteProcessor<'a> {
    config: &'a RankingConfig,
}

impl<'a> VoteProcessor<'a> {
    pub fn new(config: &'a RankingConfig) -> Self {
        Self { config }
    }

    /// Stage A: reweights votes by voter-to-target-space distance,
    /// dropping any vote whose computed weight lands at zero.
    pub fn apply_distance_weighting(
        &self,
        votes: &[Vote],
        users: &[User],
        distances: &DistanceMap,
    ) -> Vec<Vote> {
        if !self.config.use_distance_weighting {
            return votes.to_vec();
        }

        let users_by_id: HashMap<&UserId, &User> = users.iter().map(|u| (&u.id, u)).collect();
        let max_distance = self.config.max_distance;

        let mut weighted = Vec::with_capacity(votes.len());
        for vote in votes {
            let Some(user) = users_by_id.get(&vote.user_id) else {
                weighted.push(vote.clone());
                continue;
            };

            let user_spaces = user.all_spaces();

            let min_distance: u32 = if user_spaces.is_empty() {
                // Intentional per source behavior (spec.md §9): this is
                // `max_distance`, not `max_distance + 1`, so an empty
                // user_spaces set admits a nonzero weight of
                // distance_weight_base^max_distance rather than zero.
                max_distance
            } else {
                user_spaces
                    .iter()
                    .filter_map(|space_id| distances.get(&(space_id.clone(), vote.space_id.clone())))
                    .copied()
                    .min()
                    .unwrap_or(max_distance + 1)
            };

            if min_distance <= max_distance {
                let distance_weight = self.config.distance_weight_base.powi(min_distance as i32);
                let new_weight = vote.weight * distance_weight;
                if new_weight > 0.0 {
                    weighted.push(vote.reweighted(new_weight));
                }
            }
        }

        weighted
    }

    /// Stage B: keeps a vote only if it matches one of `entity`'s
    /// perspectives and the voting user is a member/editor of that
    /// perspective's space.
    pub fn filter_valid_votes(&self, votes: &[Vote], users: &[User], entity: &Entity) -> Vec<Vote> {
        let users_by_id: HashMap<&UserId, &User> = users.iter().map(|u| (&u.id, u)).collect();
        let perspective_spaces: Vec<&SpaceId> = entity.perspectives.iter().map(|p| &p.space_id).collect();

        votes
            .iter()
            .filter(|vote| {
                if vote.entity_id != entity.id {
                    return false;
                }
                let Some(_space_id) = perspective_spaces.iter().find(|s| ***s == vote.space_id) else {
                    return false;
                };

                if !self.config.filter_non_members {
                    return true;
                }

                users_by_id
                    .get(&vote.user_id)
                    .map(|user| user.is_member_or_editor_of(&vote.space_id))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Perspective, VoteType};
    use chrono::Utc;

    fn entity_with_perspective(entity_id: &str, space_id: &str) -> Entity {
        let mut e = Entity::new(entity_id, Utc::now());
        e.perspectives.push(Perspective::new(entity_id, space_id, Utc::now()));
        e
    }

    #[test]
    fn membership_filter_drops_non_members() {
        let config = RankingConfig::default();
        let processor = VoteProcessor::new(&config);

        let entity = entity_with_perspective("E", "R");
        let mut outsider = User::new("outsider");
        outsider.member_spaces.insert(SpaceId::from("OTHER"));

        let votes = vec![Vote::new("outsider", "E", "R", VoteType::Upvote, Utc::now())];
        let valid = processor.filter_valid_votes(&votes, &[outsider], &entity);
        assert!(valid.is_empty());
    }

    #[test]
    fn membership_filter_keeps_members() {
        let config = RankingConfig::default();
        let processor = VoteProcessor::new(&config);

        let entity = entity_with_perspective("E", "R");
        let mut member = User::new("member");
        member.member_spaces.insert(SpaceId::from("R"));

        let votes = vec![Vote::new("member", "E", "R", VoteType::Upvote, Utc::now())];
        let valid = processor.filter_valid_votes(&votes, &[member], &entity);
        assert_eq!(valid.len(), 1);
    }

    #[test]
    fn votes_without_matching_perspective_are_discarded() {
        let config = RankingConfig::default();
        let processor = VoteProcessor::new(&config);

        let entity = entity_with_perspective("E", "R");
        let member = {
            let mut m = User::new("member");
            m.member_spaces.insert(SpaceId::from("OTHER"));
            m
        };

        let votes = vec![Vote::new("member", "E", "OTHER", VoteType::Upvote, Utc::now())];
        let valid = processor.filter_valid_votes(&votes, &[member], &entity);
        assert!(valid.is_empty());
    }

    #[test]
    fn distance_weighted_votes_all_have_positive_weight() {
        let config = RankingConfig::builder()
            .use_distance_weighting(true)
            .filter_non_members(false)
            .max_distance(10)
            .build()
            .unwrap();
        let processor = VoteProcessor::new(&config);

        let mut user = User::new("u");
        user.member_spaces.insert(SpaceId::from("A"));

        let mut distances = DistanceMap::new();
        distances.insert((SpaceId::from("A"), SpaceId::from("R")), 1);

        let votes = vec![Vote::new("u", "E", "R", VoteType::Upvote, Utc::now())];
        let weighted = processor.apply_distance_weighting(&votes, &[user], &distances);

        assert_eq!(weighted.len(), 1);
        assert!(weighted[0].weight > 0.0);
        assert!((weighted[0].weight - 0.8).abs() < 1e-12);
    }

    #[test]
    fn empty_user_spaces_uses_max_distance_not_max_plus_one() {
        let config = RankingConfig::builder()
            .use_distance_weighting(true)
            .filter_non_members(false)
            .max_distance(3)
            .build()
            .unwrap();
        let processor = VoteProcessor::new(&config);

        let user = User::new("u"); // no member/editor spaces
        let distances = DistanceMap::new();

        let votes = vec![Vote::new("u", "E", "R", VoteType::Upvote, Utc::now())];
        let weighted = processor.apply_distance_weighting(&votes, &[user], &distances);

        assert_eq!(weighted.len(), 1);
        assert!((weighted[0].weight - 0.8f64.powi(3)).abs() < 1e-12);
    }
}
