//! Environment simulator

use tracing::debug;

use crate::rng::RandomSource;
use crate::types::{
    EnvironmentReading, HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C,
};

/// Simulates ambient temperature and relative humidity
#[derive(Debug, Clone)]
pub struct EnvironmentSimulator {
    source: RandomSource,
}

impl EnvironmentSimulator {
    pub fn new(source: RandomSource) -> Self {
        Self { source }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomSource::seeded(seed))
    }

    /// Temperature in Celsius, uniform over [-10, 40]
    pub fn simulate_temperature(&mut self) -> i32 {
        let temperature_c = self.source.int_in(TEMPERATURE_MIN_C..=TEMPERATURE_MAX_C);
        debug!(temperature_c, "simulated temperature");
        temperature_c
    }

    /// Relative humidity in percent, uniform over [0, 100]
    pub fn simulate_humidity(&mut self) -> i32 {
        let humidity_pct = self.source.int_in(HUMIDITY_MIN_PCT..=HUMIDITY_MAX_PCT);
        debug!(humidity_pct, "simulated humidity");
        humidity_pct
    }

    /// Draw temperature then humidity
    pub fn sample(&mut self) -> EnvironmentReading {
        EnvironmentReading {
            temperature_c: self.simulate_temperature(),
            humidity_pct: self.simulate_humidity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_in_range() {
        let mut simulator = EnvironmentSimulator::seeded(5);
        for _ in 0..1_000 {
            let temperature = simulator.simulate_temperature();
            assert!((-10..=40).contains(&temperature));
        }
    }

    #[test]
    fn test_humidity_in_range() {
        let mut simulator = EnvironmentSimulator::seeded(6);
        for _ in 0..1_000 {
            let humidity = simulator.simulate_humidity();
            assert!((0..=100).contains(&humidity));
        }
    }

    #[test]
    fn test_extremes_are_reachable() {
        let mut simulator = EnvironmentSimulator::seeded(8);
        let readings: Vec<EnvironmentReading> = (0..5_000).map(|_| simulator.sample()).collect();

        assert!(readings.iter().any(|r| r.temperature_c == TEMPERATURE_MIN_C));
        assert!(readings.iter().any(|r| r.temperature_c == TEMPERATURE_MAX_C));
        assert!(readings.iter().any(|r| r.humidity_pct == HUMIDITY_MIN_PCT));
        assert!(readings.iter().any(|r| r.humidity_pct == HUMIDITY_MAX_PCT));
    }
}
