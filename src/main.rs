#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::path::PathBuf;

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use hotseat_battleship::{init_logging, term, GameConfig, GameEngine, Orchestrator, TerminalHost};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Two-player hot-seat battleship in the terminal", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// JSON game configuration; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Scatter both fleets at random instead of the fixed starting layout.
    #[arg(long)]
    shuffle: bool,
    #[arg(long, help = "Fix RNG seed for reproducible layouts (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Override the pulse rate of the animation clock.
    #[arg(long)]
    pulse_hz: Option<u32>,
    /// Append log lines to this file (level from HOTSEAT_LOG, default info).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[cfg(feature = "std")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(hz) = cli.pulse_hz {
        config.pulses_per_second = hz;
        config.validate()?;
    }

    let engine = if cli.shuffle || cli.seed.is_some() {
        let mut rng = if let Some(s) = cli.seed {
            log::info!("using fixed seed {}", s);
            SmallRng::seed_from_u64(s)
        } else {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        };
        GameEngine::with_random_layout(&config, &mut rng)?
    } else {
        GameEngine::new(&config)?
    };

    let host = TerminalHost::new(engine.bounds());
    let mut session = Orchestrator::new(engine, host, config.timing);
    log::info!(
        "starting {}x{} game with fleet {:?}",
        config.width,
        config.height,
        config.ship_lengths
    );
    term::run(&mut session, config.pulses_per_second).await?;
    if let Some(winner) = session.engine().winner() {
        println!("{} won!!!", winner);
    }
    Ok(())
}
