//! Binary entrypoint for the NickForge CLI.
//!
//! Commands:
//! - `start [--user-id <id>] [--username <name>]` - serve the bot on stdin/stdout
//! - `init` - create a starter `config.toml`
//! - `rules` - print the rule catalog
//! - `generate --game <name> [--count <n>] [--attempts <n>] [--json]` - one-shot batch
//! - `stats --user-id <id>` - print a user's totals and favorites
//!
//! See the library crate docs for module-level details: `nickforge::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::str::FromStr;

use nickforge::bot::{console, render, NickBot, Requester};
use nickforge::config::Config;
use nickforge::storage::NickStore;

#[derive(Parser)]
#[command(name = "nickforge")]
#[command(about = "A bot that generates game-compliant player nicknames")]
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
    /// Serve the bot on the console
    Start {
        /// User id for lines without an `@<id>` prefix
        #[arg(short, long, default_value_t = 1)]
        user_id: i64,
        /// Username recorded for that user on /start
        #[arg(long)]
        username: Option<String>,
    },
    /// Write a default configuration file
    Init,
    /// Print the naming rules of every game
    Rules,
    /// Generate one batch of nicknames and exit
    Generate {
        /// Game name (case-insensitive) or list number
        #[arg(short, long)]
        game: String,
        /// Batch size (defaults to bot.batch_size)
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Attempt budget (defaults to bot.max_attempts)
        #[arg(short, long)]
        attempts: Option<usize>,
        /// Record the batch under this user id
        #[arg(short, long, default_value_t = 0)]
        user_id: i64,
        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Show a user's generation stats and favorites
    Stats {
        #[arg(short, long)]
        user_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init writes the config, every other command reads it (falling back to defaults).
    let config = match cli.command {
        Commands::Init => None,
        _ => Some(load_or_default(&cli.config).await?),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Init => {
            info!("Initializing new NickForge configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Start { user_id, username } => {
            let config = config.unwrap_or_default();
            info!("Starting {} v{}", config.bot.name, env!("CARGO_PKG_VERSION"));
            let mut bot = NickBot::new(&config)?;
            info!(
                "{} games loaded, history at {}",
                bot.catalog().len(),
                config.storage.history_path().display()
            );
            let mut requester = Requester::new(user_id);
            if let Some(name) = username {
                requester = requester.with_username(name);
            }
            console::run(&mut bot, requester).await?;
        }
        Commands::Rules => {
            let config = config.unwrap_or_default();
            println!("{}", render::all_rules(&config.rule_catalog()?));
        }
        Commands::Generate {
            game,
            count,
            attempts,
            user_id,
            json,
        } => {
            let mut config = config.unwrap_or_default();
            if let Some(n) = count {
                config.bot.batch_size = n;
            }
            if let Some(n) = attempts {
                config.bot.max_attempts = n;
            }
            // Separate invocations must not repeat earlier names.
            config.bot.restore_seen_on_start = true;
            config.validate()?;

            let mut bot = NickBot::new(&config)?;
            let game_id = bot
                .catalog()
                .find(&game)
                .map(|e| e.id.clone())
                .ok_or_else(|| anyhow!("Unknown game '{}'. Try `nickforge rules`.", game))?;
            let batch = bot.generate_and_store(user_id, &game_id)?;

            if json {
                let payload = serde_json::json!({
                    "game": game_id,
                    "requested": config.bot.batch_size,
                    "nicknames": batch
                        .iter()
                        .map(|(id, nick)| serde_json::json!({ "id": id, "nickname": nick }))
                        .collect::<Vec<_>>(),
                });
                println!("{}", payload);
            } else if batch.is_empty() {
                println!("Could not generate nicknames for {}. Try again.", game_id);
            } else {
                for (id, nick) in &batch {
                    println!("#{:<6} {}", id, nick);
                }
            }
            std::process::exit(if batch.is_empty() { 1 } else { 0 });
        }
        Commands::Stats { user_id } => {
            let config = config.unwrap_or_default();
            let store = NickStore::open(config.storage.history_path())?;
            println!("{}", render::stats(store.user_stats(user_id)?));
            println!();
            println!("{}", render::favorites(&store.favorites(user_id)?));
        }
    }

    Ok(())
}

async fn load_or_default(path: &str) -> Result<Config> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        Config::load(path).await
    } else {
        Ok(Config::default())
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| log::LevelFilter::from_str(&c.logging.level).ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // The console transport owns stdout; only echo logs there when it is a terminal.
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
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
