//! Fixed-interval driver
//!
//! Calls a tick closure every `interval` until an iteration limit is reached, the stop
//! handle is triggered, or the closure fails. The driver never sleeps after the final
//! tick and checks the stop handle while sleeping.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::SimulationConfig;

/// Longest uninterrupted sleep before the stop handle is checked again
const STOP_POLL: Duration = Duration::from_millis(50);

/// Cloneable stop signal, safe to trigger from any thread
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverStats {
    /// Ticks that ran to completion
    pub ticks: u64,
    /// The stop handle ended the run before the iteration limit
    pub stopped_early: bool,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Driver {
    interval: Duration,
    max_iterations: Option<u64>,
    stop: StopHandle,
}

impl Driver {
    pub fn new(interval: Duration, max_iterations: Option<u64>) -> Self {
        Self {
            interval,
            max_iterations,
            stop: StopHandle::new(),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.interval(), config.max_iterations)
    }

    /// Handle that stops this driver between ticks
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `tick` with the zero-based tick number until done.
    ///
    /// The first error returned by `tick` ends the run and is propagated.
    pub fn run<F, E>(&self, mut tick: F) -> Result<DriverStats, E>
    where
        F: FnMut(u64) -> Result<(), E>,
    {
        let started = Instant::now();
        let mut ticks = 0u64;
        let mut stopped_early = false;

        info!(
            interval_ms = self.interval.as_millis() as u64,
            max_iterations = ?self.max_iterations,
            "driver started"
        );

        while !self.limit_reached(ticks) {
            if self.stop.is_stopped() {
                stopped_early = true;
                break;
            }

            tick(ticks)?;
            ticks += 1;

            if self.limit_reached(ticks) {
                break;
            }
            if !self.sleep_interval() {
                stopped_early = true;
                break;
            }
        }

        let stats = DriverStats {
            ticks,
            stopped_early,
            elapsed: started.elapsed(),
        };

        if stopped_early {
            warn!(ticks, "driver stopped before completing its run");
        }
        info!(ticks, elapsed_ms = stats.elapsed.as_millis() as u64, "driver finished");

        Ok(stats)
    }

    fn limit_reached(&self, ticks: u64) -> bool {
        self.max_iterations.is_some_and(|max| ticks >= max)
    }

    /// Sleep for one interval; false if the stop handle fired meanwhile
    fn sleep_interval(&self) -> bool {
        let deadline = Instant::now() + self.interval;

        loop {
            if self.stop.is_stopped() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(STOP_POLL));
        }
    }
}
