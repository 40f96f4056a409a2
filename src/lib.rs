//! Wifisense - simulated WiFi sensing with performance classification
//!
//! Wifisense draws random readings from fixed domains and combines them into a
//! qualitative WiFi performance label:
//! environment + embedded response + WiFi signal (+ movement) → classifier → label.
//!
//! ## Modules
//!
//! - **Simulators**: WiFi sensing, environment and embedded-peer readings, each seedable
//! - **Classifier**: ordered threshold table mapping one set of conditions to a label
//! - **Driver**: fixed-interval loop with an iteration limit and a stop handle

pub mod classifier;
pub mod config;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod evaluator;
pub mod rng;
pub mod sources;
pub mod types;

pub use classifier::{classify, ClassifierVariant, PerformanceClassifier, Thresholds};
pub use config::SimulationConfig;
pub use driver::{Driver, DriverStats, StopHandle};
pub use error::SimError;
pub use evaluator::CombinedSimulator;
pub use rng::RandomSource;
pub use sources::{EmbeddedSimulator, EnvironmentSimulator, WifiSimulator};
pub use types::{
    Breathing, Categorical, DeviceEvent, DeviceExchange, DevicePayload, DeviceResponse,
    EnvironmentReading, Evaluation, Movement, PerformanceLabel, Signal, WifiReading,
};

/// Wifisense version embedded in every output record
pub const WIFISENSE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for output records
pub const PRODUCER_NAME: &str = "wifisense";
