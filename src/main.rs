use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use ranking_core::config::RankingConfig;
use ranking_core::engine::RankingEngine;
use ranking_core::model::NormalizationMethod;
use ranking_core::provider::{DataProvider, PostgresProvider};
use ranking_core::writer::{PostgresWriter, ScoreWriter};

#[derive(Parser)]
#[command(name = "ranking-core")]
#[command(about = "Score and rank spaces, perspectives, and entities for a community graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch data, run the ranking pipeline, and write scores back.
    Run {
        /// PostgreSQL connection string
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,

        /// Identifier of the root space in the hierarchy
        #[arg(long, env = "ROOT_SPACE_ID", default_value = "root")]
        root_space_id: String,

        /// Enable exponential time decay on entity raw scores
        #[arg(long, env = "USE_TIME_DECAY")]
        use_time_decay: bool,

        /// Time decay exponent per hour
        #[arg(long, env = "TIME_DECAY_FACTOR", default_value_t = 0.1)]
        time_decay_factor: f64,

        /// Populate space.activity_score during space ranking
        #[arg(long, env = "USE_ACTIVITY_METRICS")]
        use_activity_metrics: bool,

        /// Reweight votes by voter-to-target-space distance
        #[arg(long, env = "USE_DISTANCE_WEIGHTING")]
        use_distance_weighting: bool,

        /// Base of the distance weighting exponential
        #[arg(long, env = "DISTANCE_WEIGHT_BASE", default_value_t = 0.8)]
        distance_weight_base: f64,

        /// BFS bound and weighting cutoff
        #[arg(long, env = "MAX_DISTANCE", default_value_t = 10)]
        max_distance: u32,

        /// Disable per-space perspective normalization
        #[arg(long, env = "NO_NORMALIZE_SCORES")]
        no_normalize_scores: bool,

        /// Normalization method: z_score, min_max, rank, or z_score_sigmoid
        #[arg(long, env = "NORMALIZATION_METHOD", default_value = "z_score")]
        normalization_method: String,

        /// Disable the anti-sybil membership filter on votes
        #[arg(long, env = "NO_FILTER_NON_MEMBERS")]
        no_filter_non_members: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            database,
            root_space_id,
            use_time_decay,
            time_decay_factor,
            use_activity_metrics,
            use_distance_weighting,
            distance_weight_base,
            max_distance,
            no_normalize_scores,
            normalization_method,
            no_filter_non_members,
        } => {
            let normalization_method: NormalizationMethod = normalization_method.parse()?;

            let config = RankingConfig::builder()
                .use_time_decay(use_time_decay)
                .time_decay_factor(time_decay_factor)
                .use_activity_metrics(use_activity_metrics)
                .use_distance_weighting(use_distance_weighting)
                .distance_weight_base(distance_weight_base)
                .max_distance(max_distance)
                .normalize_scores(!no_normalize_scores)
                .normalization_method(normalization_method)
                .filter_non_members(!no_filter_non_members)
                .build()?;

            run(&database, &root_space_id, config).await?;
        }
    }

    Ok(())
}

async fn run(database_url: &str, root_space_id: &str, config: RankingConfig) -> Result<()> {
    info!("starting scoring pipeline");

    let provider = PostgresProvider::connect(database_url, root_space_id).await?;
    let data = provider.fetch_all().await?;
    info!(
        entities = data.entities.len(),
        spaces = data.spaces.len(),
        users = data.users.len(),
        votes = data.votes.len(),
        "fetched scoring data from database"
    );

    let mut engine = RankingEngine::new(config, root_space_id);

    info!("ranking spaces");
    let spaces = engine.rank_spaces(data.spaces, &data.entities, &data.users);
    info!(spaces = spaces.len(), "ranked spaces");

    info!("ranking entities");
    let entities = engine.rank_entities(data.entities, &data.votes, &data.users, Some(spaces.clone()));
    info!(entities = entities.len(), "ranked entities");

    info!("writing scores to database");
    let writer = PostgresWriter::connect(database_url).await?;
    writer.write_all(&entities, &spaces).await?;
    info!("scores written successfully");

    info!(
        entities = entities.len(),
        spaces = spaces.len(),
        "scoring pipeline completed"
    );

    Ok(())
}
