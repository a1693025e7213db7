use std::path::PathBuf;

use clap::Parser;

use guandan_bench::config::SeriesConfig;
use guandan_bench::logging::init_logging;
use guandan_bench::series::SeriesRunner;

/// Deterministic Guandan simulation harness: four heuristic bots play full
/// matches and the run is summarized as JSON artifacts.
#[derive(Debug, Parser)]
#[command(
    name = "guandan-bench",
    author,
    version,
    about = "Deterministic Guandan bot series harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/series.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the master RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the per-game hand cap.
    #[arg(long, value_name = "HANDS")]
    max_hands: Option<usize>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,

    /// Force bot decision telemetry regardless of config.
    #[arg(long)]
    log_bot_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SeriesConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }
    if let Some(games) = cli.games {
        config.games.count = games;
    }
    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }
    if let Some(max_hands) = cli.max_hands {
        config.games.max_hands = max_hands;
    }
    if cli.log_bot_details {
        config.logging.bot_details = true;
    }

    config.validate()?;

    if cli.validate_only {
        println!("configuration OK: {}", cli.config.display());
        return Ok(());
    }

    let outputs = config.resolved_outputs();
    let _logging = init_logging(&config.logging, &outputs)?;

    let summary = SeriesRunner::new(config).run()?;
    println!(
        "run {}: {} games, {} hands, wins N-S {} / E-W {}, {} capped",
        summary.run_id,
        summary.games_played,
        summary.total_hands,
        summary.wins[0],
        summary.wins[1],
        summary.capped_games,
    );
    println!("rows: {}", summary.jsonl_path.display());
    println!("summary: {}", summary.summary_path.display());
    Ok(())
}
