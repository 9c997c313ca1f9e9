//! Process-local counters for generation and bot traffic.
//! Logged on shutdown; nothing is exported over the network.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static COMMANDS_HANDLED: AtomicU64 = AtomicU64::new(0);
static COMMANDS_RATE_LIMITED: AtomicU64 = AtomicU64::new(0);
static FAVORITES_MARKED: AtomicU64 = AtomicU64::new(0);

static GENERATION_COUNTERS: OnceLock<Mutex<HashMap<String, GenerationCounter>>> = OnceLock::new();

pub fn inc_commands_handled() {
    COMMANDS_HANDLED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_rate_limited() {
    COMMANDS_RATE_LIMITED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_favorites_marked() {
    FAVORITES_MARKED.fetch_add(1, Ordering::Relaxed);
}

/// Per-game generation totals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationCounter {
    pub requests: u64,
    pub nicknames: u64,
    pub attempts: u64,
    /// Requests that returned fewer nicknames than asked for.
    pub short_batches: u64,
    pub empty_batches: u64,
}

fn generation_lock() -> MutexGuard<'static, HashMap<String, GenerationCounter>> {
    GENERATION_COUNTERS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

pub fn record_generation(game: &str, requested: usize, produced: usize, attempts: usize) -> GenerationCounter {
    let mut guard = generation_lock();
    let counter = guard.entry(game.to_string()).or_default();
    counter.requests = counter.requests.saturating_add(1);
    counter.nicknames = counter.nicknames.saturating_add(produced as u64);
    counter.attempts = counter.attempts.saturating_add(attempts as u64);
    if produced < requested {
        counter.short_batches = counter.short_batches.saturating_add(1);
    }
    if produced == 0 {
        counter.empty_batches = counter.empty_batches.saturating_add(1);
    }
    *counter
}

pub fn generation_counters_snapshot() -> HashMap<String, GenerationCounter> {
    generation_lock().clone()
}

#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub commands_handled: u64,
    pub commands_rate_limited: u64,
    pub favorites_marked: u64,
    pub nicknames_generated: u64,
}

pub fn snapshot() -> Snapshot {
    let nicknames_generated = generation_lock().values().map(|c| c.nicknames).sum();
    Snapshot {
        commands_handled: COMMANDS_HANDLED.load(Ordering::Relaxed),
        commands_rate_limited: COMMANDS_RATE_LIMITED.load(Ordering::Relaxed),
        favorites_marked: FAVORITES_MARKED.load(Ordering::Relaxed),
        nicknames_generated,
    }
}
