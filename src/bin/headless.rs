use anyhow::{Context, Result, anyhow};
use clap::Parser;
use climber::simulation::params::Params;
use climber::simulation::trainer::{ControlMode, Trainer};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "headless")]
#[command(about = "Train climber agents without a window")]
struct Cli {
    /// JSON parameter file; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 50)]
    generations: u32,
    #[arg(long)]
    agents: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Print one JSON object per generation instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn load_params(cli: &Cli) -> Result<Params> {
    let mut params = match &cli.config {
        Some(path) => {
            let path_str = path
                .to_str()
                .with_context(|| format!("config path {} is not valid UTF-8", path.display()))?;
            Params::load_from_file(path_str)
                .map_err(|err| anyhow!("{err}"))
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Params::default(),
    };

    if let Some(agents) = cli.agents {
        params.num_agents = agents;
    }
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }

    Ok(params)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "climber=info".to_owned()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let params = load_params(&cli)?;

    let mut trainer =
        Trainer::new(params, ControlMode::Machine).context("failed to set up training")?;

    let started = Instant::now();
    for _ in 0..cli.generations {
        let summary = trainer
            .run_generation()
            .with_context(|| format!("generation {} failed", trainer.generation()))?;

        if cli.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!("{summary}");
        }
    }

    info!(
        generations = cli.generations,
        elapsed_ms = started.elapsed().as_millis() as u64,
        best_score = trainer.stats().best_score_overall,
        best_level = trainer.stats().best_level_overall,
        "training finished"
    );

    Ok(())
}
