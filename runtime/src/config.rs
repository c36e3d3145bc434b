use std::time::Duration;
use web_time::{SystemTime, UNIX_EPOCH};

/// Real time between two countdown steps. Each step takes one second off the displayed
/// counter, so a level's time limit lasts twice as long on the wall clock.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Pending actions the engine buffers before callers have to wait.
pub const DEFAULT_QUEUE_DEPTH: usize = 32;

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub tick_interval: Duration,
    /// Board generator seed, taken from the clock when unset.
    pub seed: Option<u64>,
    pub queue_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: None,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}
