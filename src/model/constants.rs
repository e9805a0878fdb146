// Process-wide constants for space distance/decay.
//
// ROOT_SPACE_ID is deliberately not one of these: it's a configuration
// value (see RankingConfig / RankingConstants), not a hard-coded literal.

/// Base of the exponential space-score decay: `space_score = DECAY_BASE^distance_to_root`.
pub const SPACE_SCORE_DECAY_BASE: f64 = 0.8;

/// Distance assigned to a space that is disconnected from the root, or
/// whose true distance exceeds `MAX_SPACE_DEPTH`.
pub const DISCONNECTED_SPACE_DEPTH: u32 = 11;

/// Maximum number of parent hops considered when ascending to the root.
pub const MAX_SPACE_DEPTH: u32 = 10;
