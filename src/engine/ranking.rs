// Ranking Engine (spec.md §4.5): the orchestrator.

use chrono::Utc;

use crate::config::RankingConfig;
use crate::engine::distance;
use crate::engine::perspective::{normalize_by_space, score_perspectives};
use crate::engine::space::SpaceScorer;
use crate::engine::votes::VoteProcessor;
use crate::model::{Entity, Space, SpaceId, User, Vote};

/// Single-shot run state (spec.md §4.5 "State machine"). Each
/// transition happens once per `RankingEngine::rank_entities` or
/// `rank_spaces` call; re-running requires a fresh `RankingEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Fresh,
    SpacesScored,
    VotesProcessed,
    PerspectivesScored,
    Normalized,
    EntitiesAggregated,
    Ranked,
}

pub struct RankingEngine {
    config: RankingConfig,
    root_space_id: SpaceId,
    state: RunState,
}

impl RankingEngine {
    pub fn new(config: RankingConfig, root_space_id: impl Into<SpaceId>) -> Self {
        Self {
            config,
            root_space_id: root_space_id.into(),
            state: RunState::Fresh,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Ranks `entities` by `normalized_score` descending (spec.md §4.5).
    pub fn rank_entities(
        &mut self,
        mut entities: Vec<Entity>,
        votes: &[Vote],
        users: &[User],
        mut spaces: Option<Vec<Space>>,
    ) -> Vec<Entity> {
        self.state = RunState::Fresh;

        // Step 1: space scores, if spaces are provided.
        if let Some(spaces) = spaces.as_mut() {
            let snapshot = spaces.clone();
            let scorer = SpaceScorer::new(&self.root_space_id);
            for space in spaces.iter_mut() {
                scorer.calculate_space_score(space, &entities, users, &snapshot);
            }
        }
        self.state = RunState::SpacesScored;

        // Step 2: distance-weight votes, if enabled and spaces are present.
        let processed_votes = match &spaces {
            Some(space_list) if self.config.use_distance_weighting => {
                let distances = distance::compute_distances(space_list, self.config.max_distance);
                let processor = VoteProcessor::new(&self.config);
                processor.apply_distance_weighting(votes, users, &distances)
            }
            _ => votes.to_vec(),
        };
        self.state = RunState::VotesProcessed;

        // Step 3: per-entity membership filter, perspective scores, aggregates.
        let processor = VoteProcessor::new(&self.config);
        for entity in entities.iter_mut() {
            let valid_votes = processor.filter_valid_votes(&processed_votes, users, entity);
            score_perspectives(entity, &valid_votes);
            entity.recompute_aggregates();
        }
        self.state = RunState::PerspectivesScored;

        // Step 4: time decay on entity raw_score, if enabled.
        if self.config.use_time_decay {
            let now = Utc::now();
            for entity in entities.iter_mut() {
                let age_hours = (now - entity.created_at).num_seconds() as f64 / 3600.0;
                let decay = (-self.config.time_decay_factor * age_hours).exp();
                entity.raw_score *= decay;
            }
        }

        // Step 5: normalize perspective scores within each space.
        if self.config.normalize_scores {
            normalize_by_space(&mut entities, self.config.normalization_method);
        }
        self.state = RunState::Normalized;

        // Step 6: space-weighted entity normalized_score.
        for entity in entities.iter_mut() {
            entity.normalized_score = match &spaces {
                Some(space_list) if !entity.perspectives.is_empty() => entity
                    .perspectives
                    .iter()
                    .filter_map(|perspective| {
                        space_list
                            .iter()
                            .find(|s| s.id == perspective.space_id)
                            .filter(|s| s.space_score > 0.0)
                            .map(|s| perspective.normalized_score * s.space_score)
                    })
                    .sum(),
                _ => 0.0,
            };
        }
        self.state = RunState::EntitiesAggregated;

        // Step 7: sort descending by normalized_score, stable on ties.
        entities.sort_by(|a, b| {
            b.normalized_score
                .partial_cmp(&a.normalized_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self.state = RunState::Ranked;

        entities
    }

    /// Ranks `spaces` by `space_score` descending (spec.md §4.5).
    pub fn rank_spaces(&mut self, mut spaces: Vec<Space>, entities: &[Entity], users: &[User]) -> Vec<Space> {
        self.state = RunState::Fresh;

        let snapshot = spaces.clone();
        let scorer = SpaceScorer::new(&self.root_space_id);
        for space in spaces.iter_mut() {
            scorer.calculate_space_score(space, entities, users, &snapshot);
            if self.config.use_activity_metrics {
                scorer.calculate_activity_score(space, entities);
            }
        }
        self.state = RunState::SpacesScored;

        spaces.sort_by(|a, b| {
            b.space_score
                .partial_cmp(&a.space_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self.state = RunState::Ranked;

        spaces
    }

    /// Convenience wrapper: the top `limit` entities by rank.
    pub fn top_entities(
        &mut self,
        entities: Vec<Entity>,
        votes: &[Vote],
        users: &[User],
        spaces: Option<Vec<Space>>,
        limit: usize,
    ) -> Vec<Entity> {
        let mut ranked = self.rank_entities(entities, votes, users, spaces);
        ranked.truncate(limit);
        ranked
    }

    /// Convenience wrapper: the top `limit` spaces by rank.
    pub fn top_spaces(&mut self, spaces: Vec<Space>, entities: &[Entity], users: &[User], limit: usize) -> Vec<Space> {
        let mut ranked = self.rank_spaces(spaces, entities, users);
        ranked.truncate(limit);
        ranked
    }

    /// `ln(max(|upvotes - downvotes|, 1)) + age_hours / 45000` — ported
    /// from the original for parity; never wired into `rank_entities`
    /// there either (see DESIGN.md §11).
    pub fn hot_score(entity: &Entity) -> f64 {
        let vote_difference = entity.upvotes as i64 - entity.downvotes as i64;
        let age_hours = (Utc::now() - entity.created_at).num_seconds() as f64 / 3600.0;
        (vote_difference.unsigned_abs().max(1) as f64).ln() + age_hours / 45000.0
    }
}
