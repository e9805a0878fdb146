// Distance Oracle (spec.md §4.1): BFS over the space hierarchy treated
// as an undirected graph, bounded by max_distance.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::model::{Space, SpaceId};

/// Symmetric pairwise distance map: `(a, b) -> hops`, including self-pairs.
/// Pairs farther than `max_distance` apart are absent.
pub type DistanceMap = HashMap<(SpaceId, SpaceId), u32>;

/// Computes pairwise space distances via multi-source BFS over the
/// parent/child hierarchy.
///
/// Treats parent->child links as undirected edges. For each space,
/// BFS enqueues `(id, 0)` for the source; popping from the front
/// visits neighbors at `distance + 1` if unvisited. Expansion for a
/// given source stops once the popped distance equals `max_distance`
/// (spec.md §4.1).
pub fn compute_distances(spaces: &[Space], max_distance: u32) -> DistanceMap {
    let adjacency = build_adjacency(spaces);
    let mut distances = DistanceMap::new();

    for start in spaces {
        bfs_from(&start.id, &adjacency, max_distance, &mut distances);
    }

    distances
}

fn build_adjacency(spaces: &[Space]) -> HashMap<SpaceId, Vec<SpaceId>> {
    let mut adjacency: HashMap<SpaceId, Vec<SpaceId>> = HashMap::new();
    for space in spaces {
        adjacency.entry(space.id.clone()).or_default();
        if let Some(parent_id) = &space.parent_space_id {
            adjacency.entry(parent_id.clone()).or_default().push(space.id.clone());
            adjacency.entry(space.id.clone()).or_default().push(parent_id.clone());
        }
    }
    adjacency
}

fn bfs_from(
    start: &SpaceId,
    adjacency: &HashMap<SpaceId, Vec<SpaceId>>,
    max_distance: u32,
    distances: &mut DistanceMap,
) {
    let mut visited: HashSet<SpaceId> = HashSet::new();
    visited.insert(start.clone());

    let mut queue: VecDeque<(SpaceId, u32)> = VecDeque::new();
    queue.push_back((start.clone(), 0));

    while let Some((current_id, current_distance)) = queue.pop_front() {
        distances.insert((start.clone(), current_id.clone()), current_distance);

        if current_distance >= max_distance {
            continue;
        }

        if let Some(neighbors) = adjacency.get(&current_id) {
            for neighbor in neighbors {
                if visited.insert(neighbor.clone()) {
                    queue.push_back((neighbor.clone(), current_distance + 1));
                }
            }
        }
    }
}
