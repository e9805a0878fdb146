// Crate-wide error types.
//
// Two tiers, mirroring the teacher's services::ServiceError /
// anyhow-at-the-edge split: ConfigError for anything the engine can
// reject before a run starts or during normalization, RankingError as
// the umbrella the CLI and provider/writer boundary deal in.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "use_distance_weighting and filter_non_members are both enabled; distance weighting \
         already encodes user/space proximity, so combining it with the membership filter is \
         semantically incoherent. Disable one of the two."
    )]
    IncompatibleVoteFiltering,

    #[error("unknown normalization method: {0}")]
    UnknownNormalizationMethod(String),
}

#[derive(Debug, Error)]
pub enum RankingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("data provider error: {0}")]
    Provider(#[source] anyhow::Error),

    #[error("score writer error: {0}")]
    Writer(#[source] anyhow::Error),
}
