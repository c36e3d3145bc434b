use mineswept_core::TimerDirective;
use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Repeating timer that only exists while a session is being played.
#[derive(Debug)]
pub struct Countdown {
    period: Duration,
    interval: Option<Interval>,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Starts ticking one period from now, dropping any previous schedule.
    pub fn start(&mut self) {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        log::debug!("Countdown started, one step every {:?}", self.period);
    }

    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            log::debug!("Countdown cancelled");
        }
    }

    pub fn apply(&mut self, directive: TimerDirective) {
        match directive {
            TimerDirective::Start => self.start(),
            TimerDirective::Stop => self.cancel(),
            TimerDirective::Keep => {}
        }
    }

    /// Resolves on the next step. Never resolves while cancelled.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}
