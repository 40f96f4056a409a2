//! Reading simulators
//!
//! Each simulator owns its own random source and draws uniformly from fixed domains:
//! WiFi sensing (signal, movement, breathing), environment (temperature, humidity)
//! and the embedded peer (sent payload, response).

mod embedded;
mod environment;
mod wifi;

pub use embedded::EmbeddedSimulator;
pub use environment::EnvironmentSimulator;
pub use wifi::WifiSimulator;
