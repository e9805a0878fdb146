// RankingConfig: process-wide, immutable per run (spec.md §6).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::NormalizationMethod;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    // Entity scoring
    pub use_contestation_score: bool,
    pub use_time_decay: bool,
    pub time_decay_factor: f64,

    // Space scoring
    pub include_subspace_votes: bool,
    pub use_activity_metrics: bool,

    // Distance-based vote weighting
    pub use_distance_weighting: bool,
    pub distance_weight_base: f64,
    pub max_distance: u32,

    // Normalization
    pub normalize_scores: bool,
    pub normalization_method: NormalizationMethod,

    // Anti-sybil
    pub filter_non_members: bool,
    pub require_space_membership: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            use_contestation_score: true,
            use_time_decay: false,
            time_decay_factor: 0.1,
            include_subspace_votes: false,
            use_activity_metrics: false,
            use_distance_weighting: false,
            distance_weight_base: 0.8,
            max_distance: 10,
            normalize_scores: true,
            normalization_method: NormalizationMethod::ZScore,
            filter_non_members: true,
            require_space_membership: true,
        }
    }
}

impl RankingConfig {
    /// Validates the configuration, returning a `ConfigError` for the
    /// one known-incoherent flag interlock (spec.md §4.3, §8 property 7).
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.use_distance_weighting && self.filter_non_members {
            return Err(ConfigError::IncompatibleVoteFiltering);
        }
        Ok(self)
    }

    pub fn builder() -> RankingConfigBuilder {
        RankingConfigBuilder::default()
    }
}

/// Builder for `RankingConfig`, validating the interlock at `build()`
/// the same way `RankingConfig::validated` does for a plain struct.
#[derive(Debug, Clone, Default)]
pub struct RankingConfigBuilder {
    config: RankingConfigOverrides,
}

#[derive(Debug, Clone, Default)]
struct RankingConfigOverrides {
    use_contestation_score: Option<bool>,
    use_time_decay: Option<bool>,
    time_decay_factor: Option<f64>,
    include_subspace_votes: Option<bool>,
    use_activity_metrics: Option<bool>,
    use_distance_weighting: Option<bool>,
    distance_weight_base: Option<f64>,
    max_distance: Option<u32>,
    normalize_scores: Option<bool>,
    normalization_method: Option<NormalizationMethod>,
    filter_non_members: Option<bool>,
    require_space_membership: Option<bool>,
}

macro_rules! setter {
    ($field:ident, $ty:ty) => {
        pub fn $field(mut self, value: $ty) -> Self {
            self.config.$field = Some(value);
            self
        }
    };
}

impl RankingConfigBuilder {
    setter!(use_contestation_score, bool);
    setter!(use_time_decay, bool);
    setter!(time_decay_factor, f64);
    setter!(include_subspace_votes, bool);
    setter!(use_activity_metrics, bool);
    setter!(use_distance_weighting, bool);
    setter!(distance_weight_base, f64);
    setter!(max_distance, u32);
    setter!(normalize_scores, bool);
    setter!(normalization_method, NormalizationMethod);
    setter!(filter_non_members, bool);
    setter!(require_space_membership, bool);

    pub fn build(self) -> Result<RankingConfig, ConfigError> {
        let defaults = RankingConfig::default();
        let o = self.config;
        RankingConfig {
            use_contestation_score: o.use_contestation_score.unwrap_or(defaults.use_contestation_score),
            use_time_decay: o.use_time_decay.unwrap_or(defaults.use_time_decay),
            time_decay_factor: o.time_decay_factor.unwrap_or(defaults.time_decay_factor),
            include_subspace_votes: o.include_subspace_votes.unwrap_or(defaults.include_subspace_votes),
            use_activity_metrics: o.use_activity_metrics.unwrap_or(defaults.use_activity_metrics),
            use_distance_weighting: o.use_distance_weighting.unwrap_or(defaults.use_distance_weighting),
            distance_weight_base: o.distance_weight_base.unwrap_or(defaults.distance_weight_base),
            max_distance: o.max_distance.unwrap_or(defaults.max_distance),
            normalize_scores: o.normalize_scores.unwrap_or(defaults.normalize_scores),
            normalization_method: o.normalization_method.unwrap_or(defaults.normalization_method),
            filter_non_members: o.filter_non_members.unwrap_or(defaults.filter_non_members),
            require_space_membership: o.require_space_membership.unwrap_or(defaults.require_space_membership),
        }
        .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RankingConfig::default().validated().is_ok());
    }

    #[test]
    fn distance_weighting_with_member_filter_is_rejected() {
        let err = RankingConfig::builder()
            .use_distance_weighting(true)
            .filter_non_members(true)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::IncompatibleVoteFiltering);
    }

    #[test]
    fn distance_weighting_alone_is_accepted() {
        let cfg = RankingConfig::builder()
            .use_distance_weighting(true)
            .filter_non_members(false)
            .build();
        assert!(cfg.is_ok());
    }
}
