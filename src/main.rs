//! Binary entrypoint for the hamsterhouse CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml` and the data directory
//! - `share [--layer name=material]... [--furnish category:type]...` - print a share token and link
//! - `decode <token-or-url>` - print the design inside a token or share link
//! - `history` - list the designs saved in the data directory
//! - `demo [--design <token>] [--seed <n>]` - run a scripted builder session and save it
//!
//! See the library crate docs for module-level details: `hamsterhouse::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

use hamsterhouse::codec;
use hamsterhouse::config::Config;
use hamsterhouse::controller::{Capabilities, InteractionController};
use hamsterhouse::design::{Design, DesignModel, Position};
use hamsterhouse::host::{ConsoleClipboard, FileStore, KeyValueStore, RandomSource, RngSource, SimulatedTimer};
use hamsterhouse::logutil::preview;
use hamsterhouse::surface::{MemorySurface, VisualSurface};

#[derive(Parser)]
#[command(name = "hamsterhouse")]
#[command(about = "Build, share and replay hamster house designs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Build a design from the defaults and print its share link
    Share {
        /// Layer material, e.g. `base=sand` (repeatable)
        #[arg(short, long = "layer")]
        layers: Vec<String>,
        /// Furnishing to add, e.g. `bedroom:soft-bed` (repeatable)
        #[arg(short, long = "furnish")]
        furnishings: Vec<String>,
    },
    /// Decode a share token or share link
    Decode {
        /// Token, query string or full share URL
        input: String,
    },
    /// List saved designs
    History,
    /// Run a scripted session against the in-memory surface and save the result
    Demo {
        /// Start from this share token
        #[arg(short, long)]
        design: Option<String>,
        /// Seed for reproducible placement and chatter
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init runs before a config exists
    let loaded = match cli.command {
        Commands::Init => Ok(None),
        _ => Config::load(&cli.config).await.map(Some),
    };
    let (pre_config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (None, Some(e)),
    };
    init_logging(&pre_config, cli.verbose);
    if let Some(e) = load_error {
        warn!("{:#}; using built-in defaults", e);
    }

    match cli.command {
        Commands::Init => {
            info!("Writing default configuration to {}", cli.config);
            Config::create_default(&cli.config).await?;
            let cfg = Config::default();
            tokio::fs::create_dir_all(&cfg.storage.data_dir).await?;
            info!("Configuration file created at {}", cli.config);
            info!("Saved designs will live in {}", cfg.storage.data_dir);
        }
        Commands::Share {
            layers,
            furnishings,
        } => {
            let config = pre_config.unwrap_or_default();
            let design = design_from_flags(&layers, &furnishings)?;
            let token = codec::encode_for_sharing(&design);
            println!("{}", token);
            println!(
                "{}",
                codec::share_url(&config.share.base_url, &config.share.query_param, &token)
            );
        }
        Commands::Decode { input } => {
            let config = pre_config.unwrap_or_default();
            let token = if input.contains('?') || input.contains("://") {
                codec::token_from_query(&input, &config.share.query_param).ok_or_else(|| {
                    anyhow!("No '{}' parameter in {}", config.share.query_param, preview(&input))
                })?
            } else {
                input
            };
            let design = codec::decode_from_sharing(&token)?;
            for key in DesignModel::new().merge(&design) {
                warn!("Would be ignored when loaded: {}", key);
            }
            println!("{}", serde_json::to_string_pretty(&design)?);
        }
        Commands::History => {
            let config = pre_config.unwrap_or_default();
            let store = FileStore::new(&config.storage.data_dir);
            let text = store.get(&config.storage.history_key);
            let designs = codec::read_saved_history(text.as_deref());
            if designs.is_empty() {
                println!("No saved designs in {}", store.dir().display());
            }
            for (i, design) in designs.iter().enumerate() {
                print_history_entry(i + 1, design);
            }
        }
        Commands::Demo { design, seed } => {
            let config = pre_config.unwrap_or_default();
            run_demo(config, design, seed)?;
        }
    }

    Ok(())
}

fn design_from_flags(layers: &[String], furnishings: &[String]) -> Result<Design> {
    let mut model = DesignModel::new();
    for flag in layers {
        let (layer, material) = flag
            .split_once('=')
            .ok_or_else(|| anyhow!("--layer expects name=material, got '{}'", flag))?;
        if model.set_layer(layer.trim(), material.trim()).is_none() {
            warn!("Unknown layer or material '{}', keeping the default", flag);
        }
    }
    for flag in furnishings {
        let (category, item) = flag
            .split_once(':')
            .ok_or_else(|| anyhow!("--furnish expects category:type, got '{}'", flag))?;
        if !model.add_furnishing(category.trim(), item.trim()) {
            warn!("Skipping furnishing '{}' (unknown or repeated)", flag);
        }
    }
    Ok(model.snapshot())
}

fn print_history_entry(n: usize, design: &Design) {
    let when = design
        .timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "undated".to_string());
    let layers: Vec<String> = design
        .layers
        .iter()
        .map(|(layer, material)| format!("{}={}", layer, material))
        .collect();
    println!("#{} {} [{}]", n, when, layers.join(", "));
    for (category, items) in &design.furnishings {
        for item in items {
            let at = design
                .furnishing_positions
                .as_ref()
                .and_then(|p| p.get(item))
                .map(|p| format!(" at ({}, {})", p.x, p.y))
                .unwrap_or_default();
            println!("    {}:{}{}", category, item, at);
        }
    }
}

fn run_demo(config: Config, design: Option<String>, seed: Option<u64>) -> Result<()> {
    let random: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(RngSource(StdRng::seed_from_u64(seed))),
        None => Box::new(RngSource::thread()),
    };
    let query = design.map(|token| format!("?{}={}", config.share.query_param, token));
    let store = FileStore::new(&config.storage.data_dir);
    let mut session = InteractionController::new(
        config,
        MemorySurface::new(),
        SimulatedTimer::new(),
        Capabilities {
            store: Box::new(store),
            clipboard: Box::new(ConsoleClipboard),
            random,
        },
    );

    info!("Starting demo session");
    session.start(query.as_deref());
    session.advance(Duration::from_millis(1500));
    session.select_layer("flooring", "bamboo");
    session.toggle_furnishing("eating", "food-bowl", true);
    session.toggle_furnishing("outside", "exercise-wheel", true);
    session.advance(Duration::from_millis(500));

    if let Some(node) = session.sync().furnishing_node("food-bowl") {
        let origin = session.sync().surface().position(node)?;
        let grab = Position::new(origin.x + 5.0, origin.y + 5.0);
        if session.pointer_down(node, grab) {
            session.pointer_move(Position::new(128.0, 82.0));
            session.pointer_up();
        }
    }
    session.advance(Duration::from_millis(16_000));
    session.click_mascot();
    session.toggle_furnishing("outside", "exercise-wheel", false);
    session.advance(Duration::from_millis(4000));
    if session.save().is_none() {
        warn!("Demo design was not saved");
    }
    let url = session.share();
    session.advance(Duration::from_millis(4000));

    for line in session.spoken() {
        println!("🐹 {}", line);
    }
    println!("Share link: {}", url);
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let file = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when someone is watching
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
