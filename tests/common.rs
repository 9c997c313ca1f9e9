//! Test utilities & fixtures.

use nickforge::bot::NickBot;
use nickforge::config::Config;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default config pointed at a temp dir, with no cooldown and no log file.
pub fn temp_config(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.storage.data_dir = dir.path().to_string_lossy().to_string();
    config.bot.generate_cooldown_ms = 0;
    config.logging.file = None;
    config
}

/// Bot over an isolated store with a seeded RNG.
#[allow(dead_code)] // Not every test binary builds a bot.
pub fn seeded_bot(config: &Config, seed: u64) -> NickBot {
    NickBot::new(config)
        .expect("bot")
        .with_rng(StdRng::seed_from_u64(seed))
}
