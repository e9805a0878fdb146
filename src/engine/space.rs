// Space Scorer (spec.md §4.2).

use std::collections::{HashMap, HashSet};

use crate::model::{Entity, Space, SpaceId, User, DISCONNECTED_SPACE_DEPTH, MAX_SPACE_DEPTH, SPACE_SCORE_DECAY_BASE};

pub struct SpaceScorer<'a> {
    root_space_id: &'a SpaceId,
}

impl<'a> SpaceScorer<'a> {
    pub fn new(root_space_id: &'a SpaceId) -> Self {
        Self { root_space_id }
    }

    /// Populates `distance_to_root`, `space_score`, `member_count`, and
    /// `entity_count` on `space` in that order (spec.md §4.2).
    pub fn calculate_space_score(
        &self,
        space: &mut Space,
        entities: &[Entity],
        users: &[User],
        spaces: &[Space],
    ) {
        space.distance_to_root = self.distance_to_root(space, spaces);
        space.space_score = SPACE_SCORE_DECAY_BASE.powi(space.distance_to_root as i32);

        space.member_count = users
            .iter()
            .filter(|u| u.is_member_or_editor_of(&space.id))
            .count();

        space.entity_count = entities
            .iter()
            .filter(|e| e.perspectives.iter().any(|p| p.space_id == space.id))
            .count();
    }

    /// Sums `raw_score` over every perspective belonging to `space`.
    /// Requires perspective raw_scores to already be computed; the
    /// Ranking Engine guarantees this call ordering (spec.md §4.2).
    pub fn calculate_activity_score(&self, space: &mut Space, entities: &[Entity]) {
        space.activity_score = entities
            .iter()
            .flat_map(|e| e.perspectives.iter())
            .filter(|p| p.space_id == space.id)
            .map(|p| p.raw_score)
            .sum();
    }

    /// Always 0: no staking system is modeled. Ported for parity with
    /// upstream, which never wires this into space ranking either.
    pub fn stake_weight(&self, _space: &Space) -> f64 {
        0.0
    }

    /// `stake_weight + activity_score * 0.1`. Never called from
    /// `rank_spaces`; kept as a standalone method for parity.
    pub fn composite_score(&self, space: &Space) -> f64 {
        self.stake_weight(space) + space.activity_score * 0.1
    }

    /// Ascends the `parent_space_id` chain from `space`, guarded against
    /// cycles via a visited set, up to `MAX_SPACE_DEPTH` hops.
    fn distance_to_root(&self, space: &Space, spaces: &[Space]) -> u32 {
        if space.id == *self.root_space_id {
            return 0;
        }

        let space_lookup: HashMap<&SpaceId, &Space> = spaces.iter().map(|s| (&s.id, s)).collect();

        let mut visited: HashSet<SpaceId> = HashSet::new();
        visited.insert(space.id.clone());

        let mut current_id = space.parent_space_id.clone();
        let mut distance: u32 = 1;

        while let Some(id) = current_id {
            if !visited.insert(id.clone()) {
                break; // cycle guard
            }
            if id == *self.root_space_id {
                return distance;
            }
            if distance > MAX_SPACE_DEPTH {
                break;
            }
            current_id = space_lookup.get(&id).and_then(|s| s.parent_space_id.clone());
            distance += 1;
        }

        DISCONNECTED_SPACE_DEPTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn root() -> Space {
        Space::root("R", Utc::now())
    }

    /// S1: two spaces, root R and child C (parent=R).
    #[test]
    fn s1_root_and_child_scores() {
        let root_id = SpaceId::from("R");
        let scorer = SpaceScorer::new(&root_id);

        let mut spaces = vec![root(), Space::new("C", Utc::now(), Some(SpaceId::from("R")))];
        let snapshot = spaces.clone();
        let entities = Vec::new();
        let users = Vec::new();

        for space in spaces.iter_mut() {
            scorer.calculate_space_score(space, &entities, &users, &snapshot);
        }

        assert_eq!(spaces[0].distance_to_root, 0);
        assert!((spaces[0].space_score - 1.0).abs() < 1e-12);
        assert_eq!(spaces[1].distance_to_root, 1);
        assert!((spaces[1].space_score - 0.8).abs() < 1e-12);
    }

    /// S4: disconnected space X (no parent, not root).
    #[test]
    fn s4_disconnected_space_uses_floor() {
        let root_id = SpaceId::from("R");
        let scorer = SpaceScorer::new(&root_id);

        let mut x = Space::new("X", Utc::now(), None);
        let snapshot = vec![root(), x.clone()];

        scorer.calculate_space_score(&mut x, &[], &[], &snapshot);

        assert_eq!(x.distance_to_root, DISCONNECTED_SPACE_DEPTH);
        assert!((x.space_score - 0.8f64.powi(11)).abs() < 1e-9);
    }

    #[test]
    fn cycle_guard_terminates() {
        let root_id = SpaceId::from("R");
        let scorer = SpaceScorer::new(&root_id);

        // A and B point at each other, neither reaches R.
        let mut a = Space::new("A", Utc::now(), Some(SpaceId::from("B")));
        let b = Space::new("B", Utc::now(), Some(SpaceId::from("A")));
        let snapshot = vec![root(), a.clone(), b];

        scorer.calculate_space_score(&mut a, &[], &[], &snapshot);
        assert_eq!(a.distance_to_root, DISCONNECTED_SPACE_DEPTH);
    }

    #[test]
    fn composite_score_is_stake_plus_tenth_of_activity() {
        let root_id = SpaceId::from("R");
        let scorer = SpaceScorer::new(&root_id);

        let mut space = root();
        space.activity_score = 5.0;

        assert_eq!(scorer.stake_weight(&space), 0.0);
        assert!((scorer.composite_score(&space) - 0.5).abs() < 1e-12);
    }

    /// Property 2: space_score is in (0,1] and strictly decreases as
    /// distance_to_root grows, over a straight chain R-S1-S2-...-S10.
    #[test]
    fn space_score_in_unit_interval_and_monotonic_in_distance() {
        let root_id = SpaceId::from("R");
        let scorer = SpaceScorer::new(&root_id);

        let mut chain = vec![root()];
        let mut parent = SpaceId::from("R");
        for i in 1..=10 {
            let id = SpaceId::from(format!("S{i}"));
            chain.push(Space::new(id.clone(), Utc::now(), Some(parent)));
            parent = id;
        }
        let snapshot = chain.clone();

        for space in chain.iter_mut() {
            scorer.calculate_space_score(space, &[], &[], &snapshot);
        }

        let mut previous_score = f64::INFINITY;
        for space in &chain {
            assert!(space.space_score > 0.0 && space.space_score <= 1.0);
            assert!(space.space_score < previous_score);
            previous_score = space.space_score;
        }
    }
}
