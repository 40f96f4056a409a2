//! Combined evaluation
//!
//! Pulls one independent sample from each simulator and classifies the result:
//! environment → embedded response → WiFi signal (→ movement) → classifier.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::classifier::{ClassifierVariant, PerformanceClassifier};
use crate::config::SimulationConfig;
use crate::rng::RandomSource;
use crate::sources::{EmbeddedSimulator, EnvironmentSimulator, WifiSimulator};
use crate::types::{Evaluation, PerformanceLabel};

/// Evaluates WiFi performance from simulated environment, device and signal readings.
pub struct CombinedSimulator {
    wifi: WifiSimulator,
    embedded: EmbeddedSimulator,
    environment: EnvironmentSimulator,
    classifier: PerformanceClassifier,
    variant: ClassifierVariant,
    seed: u64,
}

impl CombinedSimulator {
    /// Build a simulator whose sources are all derived from `source`
    pub fn new(
        mut source: RandomSource,
        variant: ClassifierVariant,
        classifier: PerformanceClassifier,
    ) -> Self {
        let seed = source.seed();
        Self {
            wifi: WifiSimulator::new(source.fork()),
            embedded: EmbeddedSimulator::new(source.fork()),
            environment: EnvironmentSimulator::new(source.fork()),
            classifier,
            variant,
            seed,
        }
    }

    /// Movement-aware simulator with default thresholds replaying `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            RandomSource::seeded(seed),
            ClassifierVariant::default(),
            PerformanceClassifier::default(),
        )
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let source = match config.seed {
            Some(seed) => RandomSource::seeded(seed),
            None => RandomSource::from_entropy(),
        };
        Self::new(
            source,
            config.variant,
            PerformanceClassifier::new(config.thresholds),
        )
    }

    /// Root seed; replaying it reproduces every evaluation
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn variant(&self) -> ClassifierVariant {
        self.variant
    }

    /// Draw a fresh set of conditions and classify them
    pub fn evaluate(&mut self) -> Evaluation {
        self.evaluate_at(Utc::now())
    }

    /// Same as [`evaluate`](Self::evaluate) with an explicit observation time
    pub fn evaluate_at(&mut self, observed_at: DateTime<Utc>) -> Evaluation {
        let temperature_c = self.environment.simulate_temperature();
        let humidity_pct = self.environment.simulate_humidity();
        let response = self.embedded.receive_data();
        let signal = self.wifi.simulate_signal();
        let movement = if self.variant.uses_movement() {
            Some(self.wifi.simulate_movement())
        } else {
            None
        };

        let performance = self
            .classifier
            .classify(signal, temperature_c, humidity_pct, response, movement);
        debug!(%performance, "evaluated performance");

        Evaluation {
            observed_at,
            temperature_c,
            humidity_pct,
            response,
            signal,
            movement,
            performance,
        }
    }

    /// Draw a fresh set of conditions and return only the label
    pub fn evaluate_performance(&mut self) -> PerformanceLabel {
        self.evaluate().performance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::types::Categorical;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_evaluate_performance_in_domain() {
        let mut simulator = CombinedSimulator::seeded(2024);
        for _ in 0..500 {
            let label = simulator.evaluate_performance();
            assert!(PerformanceLabel::ALL.contains(&label));
        }
    }

    #[test]
    fn test_evaluation_matches_classifier() {
        let mut simulator = CombinedSimulator::seeded(17);
        for _ in 0..500 {
            let Evaluation {
                signal,
                temperature_c,
                humidity_pct,
                response,
                movement,
                performance,
                ..
            } = simulator.evaluate();

            assert!((-10..=40).contains(&temperature_c));
            assert!((0..=100).contains(&humidity_pct));
            assert!(movement.is_some());
            assert_eq!(
                performance,
                classify(signal, temperature_c, humidity_pct, response, movement)
            );
        }
    }

    #[test]
    fn test_same_seed_same_evaluations() {
        let at = Utc.with_ymd_and_hms(2024, 8, 4, 9, 30, 0).unwrap();
        let mut a = CombinedSimulator::seeded(555);
        let mut b = CombinedSimulator::seeded(555);

        let first: Vec<Evaluation> = (0..25).map(|_| a.evaluate_at(at)).collect();
        let second: Vec<Evaluation> = (0..25).map(|_| b.evaluate_at(at)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_basic_variant_never_draws_movement() {
        let mut simulator = CombinedSimulator::new(
            RandomSource::seeded(8),
            ClassifierVariant::Basic,
            PerformanceClassifier::default(),
        );

        for _ in 0..200 {
            let Evaluation {
                signal,
                temperature_c,
                humidity_pct,
                response,
                movement,
                performance,
                ..
            } = simulator.evaluate();

            assert_eq!(movement, None);
            assert_eq!(
                performance,
                classify(signal, temperature_c, humidity_pct, response, None)
            );
        }
    }

    #[test]
    fn test_all_labels_reachable() {
        let mut simulator = CombinedSimulator::seeded(4242);
        let mut seen = Vec::new();

        for _ in 0..20_000 {
            let label = simulator.evaluate_performance();
            if !seen.contains(&label) {
                seen.push(label);
            }
        }

        seen.sort();
        assert_eq!(seen, PerformanceLabel::ALL.to_vec());
    }

    #[test]
    fn test_from_config_uses_seed_and_variant() {
        let config = SimulationConfig {
            seed: Some(77),
            variant: ClassifierVariant::Basic,
            ..Default::default()
        };

        let simulator = CombinedSimulator::from_config(&config);
        assert_eq!(simulator.seed(), 77);
        assert_eq!(simulator.variant(), ClassifierVariant::Basic);
    }
}
