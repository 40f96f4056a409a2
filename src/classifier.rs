//! WiFi performance classification
//!
//! Maps one set of conditions to a [`PerformanceLabel`] through an ordered decision list.
//! The first tier whose conditions all hold wins; `Poor` is the fallback, so every input
//! has exactly one label.
//!
//! | Tier      | Signal       | Temperature | Humidity | Response             | Movement (if present)  |
//! |-----------|--------------|-------------|----------|----------------------|------------------------|
//! | Excellent | Strong       | 20..=30     | 30..=60  | Acknowledge          | None                   |
//! | Ideal     | Strong, Weak | 10..=35     | 20..=70  | Acknowledge, Timeout | None, Walking          |
//! | Optimized | Strong, Weak | -10..=40    | 0..=100  | any                  | None, Walking, Running |

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::types::{DeviceResponse, Movement, PerformanceLabel, Signal};

/// Inclusive integer band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub min: i32,
    pub max: i32,
}

impl Band {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Numeric bands for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBands {
    /// Temperature band (Celsius)
    pub temperature_c: Band,
    /// Humidity band (percent)
    pub humidity_pct: Band,
}

impl TierBands {
    fn admits(&self, temperature_c: i32, humidity_pct: i32) -> bool {
        self.temperature_c.contains(temperature_c) && self.humidity_pct.contains(humidity_pct)
    }
}

/// Numeric thresholds for the three qualifying tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub excellent: TierBands,
    pub ideal: TierBands,
    pub optimized: TierBands,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            excellent: TierBands {
                temperature_c: Band::new(20, 30),
                humidity_pct: Band::new(30, 60),
            },
            ideal: TierBands {
                temperature_c: Band::new(10, 35),
                humidity_pct: Band::new(20, 70),
            },
            optimized: TierBands {
                temperature_c: Band::new(-10, 40),
                humidity_pct: Band::new(0, 100),
            },
        }
    }
}

impl Thresholds {
    /// Reject bands whose bounds are inverted
    pub fn validate(&self) -> Result<(), SimError> {
        let tiers = [
            ("excellent", &self.excellent),
            ("ideal", &self.ideal),
            ("optimized", &self.optimized),
        ];

        for (tier, bands) in tiers {
            for (field, band) in [
                ("temperature_c", bands.temperature_c),
                ("humidity_pct", bands.humidity_pct),
            ] {
                if band.min > band.max {
                    return Err(SimError::InvalidConfig(format!(
                        "{tier}.{field}: min {} is greater than max {}",
                        band.min, band.max
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Which inputs the combined simulator feeds the classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierVariant {
    /// Movement is drawn and constrains every tier
    #[default]
    MovementAware,
    /// Movement is neither drawn nor considered
    Basic,
}

impl ClassifierVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierVariant::MovementAware => "movement_aware",
            ClassifierVariant::Basic => "basic",
        }
    }

    pub fn uses_movement(&self) -> bool {
        matches!(self, ClassifierVariant::MovementAware)
    }
}

/// Threshold-based performance classifier
#[derive(Debug, Clone, Default)]
pub struct PerformanceClassifier {
    thresholds: Thresholds,
}

impl PerformanceClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Classify one set of conditions.
    ///
    /// `movement` is optional: when `None` the movement clauses are skipped entirely.
    pub fn classify(
        &self,
        signal: Signal,
        temperature_c: i32,
        humidity_pct: i32,
        response: DeviceResponse,
        movement: Option<Movement>,
    ) -> PerformanceLabel {
        let t = &self.thresholds;
        let connected = matches!(signal, Signal::Strong | Signal::Weak);
        let movement_allows =
            |allowed: &[Movement]| movement.map_or(true, |m| allowed.contains(&m));

        if signal == Signal::Strong
            && t.excellent.admits(temperature_c, humidity_pct)
            && response == DeviceResponse::Acknowledge
            && movement_allows(&[Movement::None])
        {
            PerformanceLabel::Excellent
        } else if connected
            && t.ideal.admits(temperature_c, humidity_pct)
            && matches!(response, DeviceResponse::Acknowledge | DeviceResponse::Timeout)
            && movement_allows(&[Movement::None, Movement::Walking])
        {
            PerformanceLabel::Ideal
        } else if connected
            && t.optimized.admits(temperature_c, humidity_pct)
            && movement_allows(&[Movement::None, Movement::Walking, Movement::Running])
        {
            PerformanceLabel::Optimized
        } else {
            PerformanceLabel::Poor
        }
    }
}

/// Classify with the default thresholds
pub fn classify(
    signal: Signal,
    temperature_c: i32,
    humidity_pct: i32,
    response: DeviceResponse,
    movement: Option<Movement>,
) -> PerformanceLabel {
    let classifier = PerformanceClassifier::default();
    classifier.classify(signal, temperature_c, humidity_pct, response, movement)
}
