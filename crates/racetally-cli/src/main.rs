mod repl;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use racetally::{MemoryLayout, Tracker, TrackerConfig, load_layout};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "racetally")]
#[command(about = "RCCars race result tracker")]
struct Args {
    /// Executable name of the game process
    #[arg(short, long, default_value = "RCCars.exe")]
    process_name: String,

    /// Memory layout file for a specific game build (JSON)
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Per-capture read budget in milliseconds (0 disables the deadline)
    #[arg(long, default_value_t = 2000)]
    read_timeout_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("racetally=info".parse()?))
        .init();

    let args = Args::parse();

    info!("racetally starting...");

    let layout = match &args.layout {
        Some(path) => {
            let layout = load_layout(path)?;
            info!("Loaded memory layout {:?} (version: {})", path, layout.version);
            layout
        }
        None => MemoryLayout::default(),
    };
    if !layout.is_valid() {
        anyhow::bail!("memory layout is incomplete (zero addresses or sizes)");
    }

    let config = TrackerConfig {
        executable: args.process_name,
        read_timeout: match args.read_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        },
    };
    let mut tracker = Tracker::with_config(layout, config);

    if tracker.game_running() {
        info!("Game process found, ready to capture");
    } else {
        warn!(
            "Game process {} is not running; start a race before capturing",
            tracker.config().executable
        );
    }

    repl::run(&mut tracker)
}
