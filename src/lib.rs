//! Ranking core for a community-scoring batch service.
//!
//! Assigns space scores, per-perspective normalized scores, and
//! space-weighted entity global scores over a hierarchy of spaces,
//! votable entities, and per-space perspectives. See `RankingEngine`
//! for the orchestration entry point.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod provider;
pub mod writer;

pub use config::RankingConfig;
pub use engine::{RankingEngine, RunState};
pub use error::{ConfigError, RankingError};
