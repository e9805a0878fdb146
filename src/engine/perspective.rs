// Perspective Scorer & Normalizer (spec.md §4.4).

use std::collections::HashMap;

use crate::model::{Entity, NormalizationMethod, SpaceId, Vote, VoteType};

/// Tallies weighted upvotes/downvotes for each perspective owned by
/// `entity`, restricted to `votes` matching that perspective's
/// `(entity_id, space_id)`.
pub fn score_perspectives(entity: &mut Entity, votes: &[Vote]) {
    for perspective in entity.perspectives.iter_mut() {
        let matching = votes
            .iter()
            .filter(|v| v.entity_id == perspective.entity_id && v.space_id == perspective.space_id);

        let mut upvotes = 0u64;
        let mut downvotes = 0u64;
        let mut weighted_upvotes = 0.0;
        let mut weighted_downvotes = 0.0;

        for vote in matching {
            match vote.vote_type {
                VoteType::Upvote => {
                    upvotes += 1;
                    weighted_upvotes += vote.weight;
                }
                VoteType::Downvote => {
                    downvotes += 1;
                    weighted_downvotes += vote.weight;
                }
            }
        }

        perspective.upvotes = upvotes;
        perspective.downvotes = downvotes;
        perspective.raw_score = weighted_upvotes - weighted_downvotes;
        perspective.contestation_score = weighted_upvotes + weighted_downvotes;
    }
}

/// Normalizes perspective scores within each space, grouping all
/// entities' perspectives by `space_id` (spec.md §4.4 normalization
/// table).
pub fn normalize_by_space(entities: &mut [Entity], method: NormalizationMethod) {
    let mut groups: HashMap<SpaceId, Vec<(usize, usize)>> = HashMap::new();
    for (entity_idx, entity) in entities.iter().enumerate() {
        for (perspective_idx, perspective) in entity.perspectives.iter().enumerate() {
            groups
                .entry(perspective.space_id.clone())
                .or_default()
                .push((entity_idx, perspective_idx));
        }
    }

    for locations in groups.values() {
        let raw_scores: Vec<f64> = locations
            .iter()
            .map(|(e, p)| entities[*e].perspectives[*p].raw_score)
            .collect();

        let normalized = normalize_scores(&raw_scores, method);

        for ((entity_idx, perspective_idx), score) in locations.iter().zip(normalized) {
            entities[*entity_idx].perspectives[*perspective_idx].normalized_score = score;
        }
    }
}

/// Pure normalization of a slice of raw scores by `method`, shared by
/// per-space perspective normalization.
pub fn normalize_scores(scores: &[f64], method: NormalizationMethod) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    match method {
        NormalizationMethod::ZScore => {
            let (mean, std) = mean_std(scores);
            if std > 0.0 {
                scores.iter().map(|s| (s - mean) / std).collect()
            } else {
                vec![0.0; scores.len()]
            }
        }
        NormalizationMethod::MinMax => {
            let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            if range > 0.0 {
                scores.iter().map(|s| (s - min) / range).collect()
            } else {
                vec![0.5; scores.len()]
            }
        }
        NormalizationMethod::Rank => {
            let n = scores.len();
            if n == 1 {
                return vec![0.5];
            }
            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap());

            let mut result = vec![0.0; n];
            for (rank, &idx) in order.iter().enumerate() {
                result[idx] = (n - 1 - rank) as f64 / (n - 1) as f64;
            }
            result
        }
        NormalizationMethod::ZScoreSigmoid => {
            let (mean, std) = mean_std(scores);
            if std > 0.0 {
                scores
                    .iter()
                    .map(|s| {
                        let z = (s - mean) / std;
                        1.0 / (1.0 + (-z).exp())
                    })
                    .collect()
            } else {
                vec![0.5; scores.len()]
            }
        }
    }
}

fn mean_std(scores: &[f64]) -> (f64, f64) {
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Perspective};
    use chrono::Utc;

    fn entity_with_vote(entity_id: &str, space_id: &str, votes: Vec<Vote>) -> Entity {
        let mut e = Entity::new(entity_id, Utc::now());
        e.perspectives.push(Perspective::new(entity_id, space_id, Utc::now()));
        score_perspectives(&mut e, &votes);
        e.recompute_aggregates();
        e
    }

    /// S2: one entity E with one perspective (E,R), one upvote.
    #[test]
    fn s2_single_upvote_raw_score() {
        let votes = vec![Vote::new("u", "E", "R", VoteType::Upvote, Utc::now())];
        let entity = entity_with_vote("E", "R", votes);
        assert_eq!(entity.perspectives[0].upvotes, 1);
        assert!((entity.perspectives[0].raw_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn z_score_single_perspective_is_zero() {
        let scores = vec![3.0];
        let normalized = normalize_scores(&scores, NormalizationMethod::ZScore);
        assert_eq!(normalized, vec![0.0]);
    }

    #[test]
    fn min_max_equal_scores_give_half() {
        let scores = vec![2.0, 2.0, 2.0];
        let normalized = normalize_scores(&scores, NormalizationMethod::MinMax);
        assert_eq!(normalized, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn rank_orders_descending_into_zero_one() {
        let scores = vec![5.0, 1.0, 3.0];
        let normalized = normalize_scores(&scores, NormalizationMethod::Rank);
        // 5.0 is highest -> rank 0 -> 1.0; 1.0 is lowest -> rank 2 -> 0.0
        assert!((normalized[0] - 1.0).abs() < 1e-12);
        assert!((normalized[1] - 0.0).abs() < 1e-12);
        assert!((normalized[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rank_single_perspective_is_half() {
        let normalized = normalize_scores(&[7.0], NormalizationMethod::Rank);
        assert_eq!(normalized, vec![0.5]);
    }

    #[test]
    fn z_score_sigmoid_is_bounded_in_unit_interval() {
        let scores = vec![-10.0, 0.0, 10.0];
        let normalized = normalize_scores(&scores, NormalizationMethod::ZScoreSigmoid);
        for v in normalized {
            assert!(v > 0.0 && v < 1.0);
        }
    }

    /// S3: entity E gets +1 upvote, E2 gets +1 downvote, z_score normalization.
    #[test]
    fn s3_two_entities_opposite_votes() {
        let e_votes = vec![Vote::new("u", "E", "R", VoteType::Upvote, Utc::now())];
        let e2_votes = vec![Vote::new("u", "E2", "R", VoteType::Downvote, Utc::now())];

        let mut e = entity_with_vote("E", "R", e_votes);
        let mut e2 = entity_with_vote("E2", "R", e2_votes);
        // Re-score against the union so both perspectives see all relevant votes.
        let all_votes = vec![
            Vote::new("u", "E", "R", VoteType::Upvote, Utc::now()),
            Vote::new("u", "E2", "R", VoteType::Downvote, Utc::now()),
        ];
        score_perspectives(&mut e, &all_votes);
        score_perspectives(&mut e2, &all_votes);

        let mut entities = vec![e, e2];
        normalize_by_space(&mut entities, NormalizationMethod::ZScore);

        assert!((entities[0].perspectives[0].normalized_score - 1.0).abs() < 1e-9);
        assert!((entities[1].perspectives[0].normalized_score - (-1.0)).abs() < 1e-9);
    }

    /// Property 3: each method's output stays in its documented range
    /// across varied, non-trivial raw_score distributions (not just
    /// the degenerate n=1 / all-equal cases covered above).
    #[test]
    fn normalization_methods_stay_in_documented_range() {
        let distributions: Vec<Vec<f64>> = vec![
            vec![1.0, -1.0, 0.0, 4.0, -3.0],
            vec![10.0, 10.0, -5.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![2.5],
        ];

        for scores in &distributions {
            let min_max = normalize_scores(scores, NormalizationMethod::MinMax);
            for v in &min_max {
                assert!((0.0..=1.0).contains(v), "min_max out of range: {v}");
            }

            let rank = normalize_scores(scores, NormalizationMethod::Rank);
            for v in &rank {
                assert!((0.0..=1.0).contains(v), "rank out of range: {v}");
            }

            let sigmoid = normalize_scores(scores, NormalizationMethod::ZScoreSigmoid);
            for v in &sigmoid {
                assert!(*v > 0.0 && *v < 1.0, "z_score_sigmoid out of range: {v}");
            }

            let z_score = normalize_scores(scores, NormalizationMethod::ZScore);
            for v in &z_score {
                assert!(v.is_finite(), "z_score not finite: {v}");
            }
        }
    }
}
