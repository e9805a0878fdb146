// Normalization method — modeled as a tagged variant (see spec.md §9
// "Polymorphic normalization"); string names live only at the config
// boundary (CLI flags, serde).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMethod {
    ZScore,
    MinMax,
    Rank,
    ZScoreSigmoid,
}

impl Default for NormalizationMethod {
    fn default() -> Self {
        NormalizationMethod::ZScore
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NormalizationMethod::ZScore => "z_score",
            NormalizationMethod::MinMax => "min_max",
            NormalizationMethod::Rank => "rank",
            NormalizationMethod::ZScoreSigmoid => "z_score_sigmoid",
        };
        write!(f, "{s}")
    }
}

impl FromStr for NormalizationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "z_score" => Ok(NormalizationMethod::ZScore),
            "min_max" => Ok(NormalizationMethod::MinMax),
            "rank" => Ok(NormalizationMethod::Rank),
            "z_score_sigmoid" => Ok(NormalizationMethod::ZScoreSigmoid),
            other => Err(ConfigError::UnknownNormalizationMethod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_methods() {
        for m in [
            NormalizationMethod::ZScore,
            NormalizationMethod::MinMax,
            NormalizationMethod::Rank,
            NormalizationMethod::ZScoreSigmoid,
        ] {
            let parsed: NormalizationMethod = m.to_string().parse().unwrap();
            assert_eq!(parsed, m);
        }
    }

    #[test]
    fn rejects_unknown_method() {
        assert!("quantile".parse::<NormalizationMethod>().is_err());
    }
}
