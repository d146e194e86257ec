use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bubbleshow::config::ArrayDefaults;
use bubbleshow::render::transcript::join;
use bubbleshow::ui::terminal_guard::install_panic_hook;
use bubbleshow::{play_until_idle, trace, util, App, ArrayConfig, Config, Player, Transcript};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::Instant;

/// Watch bubble sort run one compare, swap and settle at a time.
#[derive(Debug, Parser)]
#[command(name = "bubbleshow", version, about)]
struct Args {
    /// Print the playback as text instead of opening the TUI
    #[arg(long)]
    plain: bool,

    /// Values to sort, separated by commas or spaces
    #[arg(long)]
    values: Option<String>,

    /// Fixed array length for generated input
    #[arg(long)]
    length: Option<usize>,

    /// Fixed lower bound for generated values
    #[arg(long, requires = "range_to")]
    range_from: Option<i64>,

    /// Fixed upper bound for generated values
    #[arg(long, requires = "range_from")]
    range_to: Option<i64>,

    /// Milliseconds between two sort steps
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Directory for config and logs (default ~/.bubbleshow)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed for generated arrays
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn array_config(&self, defaults: &ArrayDefaults) -> ArrayConfig {
        let mut array = match &self.values {
            Some(raw) => ArrayConfig::manual(raw.clone(), defaults),
            None => ArrayConfig::random(defaults),
        };
        if let Some(length) = self.length {
            array = array.with_length(length);
        }
        if let (Some(from), Some(to)) = (self.range_from, self.range_to) {
            array = array.with_range(from, to);
        }
        array
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    util::init_data_dir(args.data_dir.clone());

    // Initialize logging to file (~/.bubbleshow/logs/bubbleshow.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    let mut config = Config::load();
    if let Some(ms) = args.interval_ms {
        config = config.with_interval(Duration::from_millis(ms));
    }

    let array = args.array_config(&config.array);

    if args.plain {
        return run_plain(&config, &array, &mut args.rng()).await;
    }

    install_panic_hook();
    let mut app = App::with_rng(config, array, args.rng());
    app.run().await
}

/// Play one show to stdout and exit.
async fn run_plain(config: &Config, array: &ArrayConfig, rng: &mut StdRng) -> Result<()> {
    let values = array.build(&config.array, rng)?;
    let traced = trace(&values);

    let mut out = io::stdout();
    writeln!(out, "input: {}", join(&values))?;
    writeln!(out, "sorted: {}", join(&traced.sorted))?;

    let mut transcript = Transcript::new(out);
    let mut player = Player::new(config.interval);
    player.start(&values, traced.trace, &mut transcript, Instant::now())?;
    let state = play_until_idle(&mut player, &mut transcript).await;
    tracing::debug!(%state, "Plain playback ended");

    transcript
        .finish()
        .context("Failed to write transcript to stdout")?;
    Ok(())
}
