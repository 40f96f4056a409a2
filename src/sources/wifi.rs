//! WiFi sensing simulator

use tracing::debug;

use crate::rng::RandomSource;
use crate::types::{Breathing, Movement, Signal, WifiReading};

/// Simulates WiFi signal strength, movement and breathing patterns
#[derive(Debug, Clone)]
pub struct WifiSimulator {
    source: RandomSource,
}

impl WifiSimulator {
    pub fn new(source: RandomSource) -> Self {
        Self { source }
    }

    /// Simulator replaying the stream for `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomSource::seeded(seed))
    }

    pub fn simulate_signal(&mut self) -> Signal {
        let signal: Signal = self.source.pick();
        debug!(%signal, "simulated signal");
        signal
    }

    pub fn simulate_movement(&mut self) -> Movement {
        let movement: Movement = self.source.pick();
        debug!(%movement, "simulated movement");
        movement
    }

    pub fn simulate_breathing(&mut self) -> Breathing {
        let breathing: Breathing = self.source.pick();
        debug!(%breathing, "simulated breathing");
        breathing
    }

    /// Draw signal, movement and breathing, in that order
    pub fn sample(&mut self) -> WifiReading {
        WifiReading {
            signal: self.simulate_signal(),
            movement: self.simulate_movement(),
            breathing: self.simulate_breathing(),
        }
    }
}
