// Data model for the ranking core (spec.md §3).

pub mod constants;
pub mod entity;
pub mod ids;
pub mod normalization;
pub mod perspective;
pub mod space;
pub mod user;
pub mod vote;

pub use constants::{DISCONNECTED_SPACE_DEPTH, MAX_SPACE_DEPTH, SPACE_SCORE_DECAY_BASE};
pub use entity::Entity;
pub use ids::{EntityId, PerspectiveId, SpaceId, UserId};
pub use normalization::NormalizationMethod;
pub use perspective::Perspective;
pub use space::Space;
pub use user::User;
pub use vote::{Vote, VoteType};
