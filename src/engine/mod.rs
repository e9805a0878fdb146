// The five components of the ranking core (spec.md §2), leaves-first.

pub mod distance;
pub mod perspective;
pub mod ranking;
pub mod space;
pub mod votes;

pub use distance::{compute_distances, DistanceMap};
pub use ranking::{RankingEngine, RunState};
pub use space::SpaceScorer;
pub use votes::VoteProcessor;
