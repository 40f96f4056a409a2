//! Core types for the Wifisense simulator
//!
//! This module defines the categorical readings each simulator produces, the readings
//! that group them, and the evaluation record produced by the combined simulator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// Lowest generated temperature (Celsius)
pub const TEMPERATURE_MIN_C: i32 = -10;
/// Highest generated temperature (Celsius)
pub const TEMPERATURE_MAX_C: i32 = 40;
/// Lowest generated relative humidity (percent)
pub const HUMIDITY_MIN_PCT: i32 = 0;
/// Highest generated relative humidity (percent)
pub const HUMIDITY_MAX_PCT: i32 = 100;

/// A value drawn from a fixed, non-empty, finite domain.
pub trait Categorical: Copy + Eq + 'static {
    /// Name of the reading, used in error messages
    const KIND: &'static str;
    /// Every value in the domain, in display order
    const ALL: &'static [Self];

    /// Human-readable label
    fn label(&self) -> &'static str;
}

/// Parse a categorical value by label.
///
/// Matching ignores case, spaces, hyphens and underscores, so `"No Signal"`,
/// `"no_signal"` and `"no-signal"` all name [`Signal::NoSignal`].
pub fn parse_label<T: Categorical>(input: &str) -> Result<T, SimError> {
    let wanted = fold_label(input);
    T::ALL
        .iter()
        .copied()
        .find(|value| fold_label(value.label()) == wanted)
        .ok_or_else(|| SimError::UnknownValue {
            kind: T::KIND,
            value: input.to_string(),
        })
}

fn fold_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// WiFi signal strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Strong,
    Weak,
    NoSignal,
}

impl Categorical for Signal {
    const KIND: &'static str = "signal";
    const ALL: &'static [Self] = &[Signal::Strong, Signal::Weak, Signal::NoSignal];

    fn label(&self) -> &'static str {
        match self {
            Signal::Strong => "Strong",
            Signal::Weak => "Weak",
            Signal::NoSignal => "No Signal",
        }
    }
}

/// Motion state detected from the WiFi channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    None,
    Walking,
    Running,
    Falling,
}

impl Categorical for Movement {
    const KIND: &'static str = "movement";
    const ALL: &'static [Self] = &[
        Movement::None,
        Movement::Walking,
        Movement::Running,
        Movement::Falling,
    ];

    fn label(&self) -> &'static str {
        match self {
            Movement::None => "None",
            Movement::Walking => "Walking",
            Movement::Running => "Running",
            Movement::Falling => "Falling",
        }
    }
}

/// Respiration pattern detected from the WiFi channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breathing {
    Normal,
    Fast,
    Slow,
}

impl Categorical for Breathing {
    const KIND: &'static str = "breathing";
    const ALL: &'static [Self] = &[Breathing::Normal, Breathing::Fast, Breathing::Slow];

    fn label(&self) -> &'static str {
        match self {
            Breathing::Normal => "Normal",
            Breathing::Fast => "Fast",
            Breathing::Slow => "Slow",
        }
    }
}

/// Acknowledgement status returned by the embedded peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceResponse {
    Acknowledge,
    Error,
    Timeout,
}

impl Categorical for DeviceResponse {
    const KIND: &'static str = "device response";
    const ALL: &'static [Self] = &[
        DeviceResponse::Acknowledge,
        DeviceResponse::Error,
        DeviceResponse::Timeout,
    ];

    fn label(&self) -> &'static str {
        match self {
            DeviceResponse::Acknowledge => "Acknowledge",
            DeviceResponse::Error => "Error",
            DeviceResponse::Timeout => "Timeout",
        }
    }
}

/// Payload sent to the embedded peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicePayload {
    Data1,
    Data2,
    Data3,
}

impl Categorical for DevicePayload {
    const KIND: &'static str = "device payload";
    const ALL: &'static [Self] = &[
        DevicePayload::Data1,
        DevicePayload::Data2,
        DevicePayload::Data3,
    ];

    fn label(&self) -> &'static str {
        match self {
            DevicePayload::Data1 => "Data1",
            DevicePayload::Data2 => "Data2",
            DevicePayload::Data3 => "Data3",
        }
    }
}

/// Qualitative WiFi performance, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLabel {
    Excellent,
    Ideal,
    Optimized,
    Poor,
}

impl Categorical for PerformanceLabel {
    const KIND: &'static str = "performance label";
    const ALL: &'static [Self] = &[
        PerformanceLabel::Excellent,
        PerformanceLabel::Ideal,
        PerformanceLabel::Optimized,
        PerformanceLabel::Poor,
    ];

    fn label(&self) -> &'static str {
        match self {
            PerformanceLabel::Excellent => "Excellent",
            PerformanceLabel::Ideal => "Ideal",
            PerformanceLabel::Optimized => "Optimized",
            PerformanceLabel::Poor => "Poor",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Breathing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for DeviceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for DevicePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for PerformanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Signal {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s)
    }
}

impl FromStr for Movement {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s)
    }
}

impl FromStr for Breathing {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s)
    }
}

impl FromStr for DeviceResponse {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s)
    }
}

impl FromStr for DevicePayload {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s)
    }
}

impl FromStr for PerformanceLabel {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s)
    }
}

/// One WiFi sensing sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiReading {
    pub signal: Signal,
    pub movement: Movement,
    pub breathing: Breathing,
}

impl fmt::Display for WifiReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Detected signal: {}, Movement: {}, Breathing: {}",
            self.signal, self.movement, self.breathing
        )
    }
}

/// One environment sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    /// Temperature (Celsius)
    pub temperature_c: i32,
    /// Relative humidity (percent)
    pub humidity_pct: i32,
}

impl fmt::Display for EnvironmentReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Simulated temperature: {}°C, Humidity: {}%",
            self.temperature_c, self.humidity_pct
        )
    }
}

/// One send/receive round trip with the embedded peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceExchange {
    pub sent: DevicePayload,
    pub response: DeviceResponse,
}

impl fmt::Display for DeviceExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sending data: {}\nReceived response: {}",
            self.sent, self.response
        )
    }
}

/// One half of an exchange with the embedded peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", content = "value", rename_all = "snake_case")]
pub enum DeviceEvent {
    Sent(DevicePayload),
    Received(DeviceResponse),
}

impl fmt::Display for DeviceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceEvent::Sent(payload) => write!(f, "Sending data: {}", payload),
            DeviceEvent::Received(response) => write!(f, "Received response: {}", response),
        }
    }
}

/// Result of one combined evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// When the inputs were drawn
    pub observed_at: DateTime<Utc>,
    /// Temperature (Celsius)
    pub temperature_c: i32,
    /// Relative humidity (percent)
    pub humidity_pct: i32,
    /// Embedded peer response
    pub response: DeviceResponse,
    /// WiFi signal strength
    pub signal: Signal,
    /// Movement, only drawn by the movement-aware variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,
    /// Classified WiFi performance
    pub performance: PerformanceLabel,
}

impl Evaluation {
    /// The conditions line printed before the verdict
    pub fn conditions_line(&self) -> String {
        let mut line = format!(
            "Temperature: {}°C, Humidity: {}%, Embedded Response: {}, WiFi Signal: {}",
            self.temperature_c, self.humidity_pct, self.response, self.signal
        );
        if let Some(movement) = self.movement {
            line.push_str(&format!(", Movement: {}", movement));
        }
        line
    }

    /// The verdict line
    pub fn performance_line(&self) -> String {
        format!("WiFi Performance: {}", self.performance)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.conditions_line(), self.performance_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_display_labels() {
        assert_eq!("Strong".parse::<Signal>().unwrap(), Signal::Strong);
        assert_eq!("No Signal".parse::<Signal>().unwrap(), Signal::NoSignal);
        assert_eq!("None".parse::<Movement>().unwrap(), Movement::None);
        assert_eq!(
            "Acknowledge".parse::<DeviceResponse>().unwrap(),
            DeviceResponse::Acknowledge
        );
        assert_eq!("Data2".parse::<DevicePayload>().unwrap(), DevicePayload::Data2);
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_separators() {
        assert_eq!("no_signal".parse::<Signal>().unwrap(), Signal::NoSignal);
        assert_eq!("NO-SIGNAL".parse::<Signal>().unwrap(), Signal::NoSignal);
        assert_eq!("walking".parse::<Movement>().unwrap(), Movement::Walking);
        assert_eq!("slow".parse::<Breathing>().unwrap(), Breathing::Slow);
    }

    #[test]
    fn test_parse_rejects_values_outside_domain() {
        let err = "Flying".parse::<Movement>().unwrap_err();
        assert!(matches!(err, SimError::UnknownValue { kind: "movement", .. }));

        assert!("invalid signal".parse::<Signal>().is_err());
        assert!("Holding Breath".parse::<Breathing>().is_err());
        assert!("Invalid Data".parse::<DevicePayload>().is_err());
        assert!("Invalid Response".parse::<DeviceResponse>().is_err());
        assert!("".parse::<PerformanceLabel>().is_err());
    }

    #[test]
    fn test_every_label_parses_back() {
        for signal in Signal::ALL {
            assert_eq!(signal.to_string().parse::<Signal>().unwrap(), *signal);
        }
        for movement in Movement::ALL {
            assert_eq!(movement.to_string().parse::<Movement>().unwrap(), *movement);
        }
        for label in PerformanceLabel::ALL {
            assert_eq!(label.to_string().parse::<PerformanceLabel>().unwrap(), *label);
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        assert_eq!(serde_json::to_string(&Signal::NoSignal).unwrap(), "\"no_signal\"");
        assert_eq!(
            serde_json::from_str::<DeviceResponse>("\"timeout\"").unwrap(),
            DeviceResponse::Timeout
        );
    }

    fn sample_evaluation(movement: Option<Movement>) -> Evaluation {
        Evaluation {
            observed_at: Utc.with_ymd_and_hms(2024, 8, 4, 12, 0, 0).unwrap(),
            temperature_c: 25,
            humidity_pct: 45,
            response: DeviceResponse::Acknowledge,
            signal: Signal::Strong,
            movement,
            performance: PerformanceLabel::Excellent,
        }
    }

    #[test]
    fn test_evaluation_lines() {
        let evaluation = sample_evaluation(Some(Movement::None));
        assert_eq!(
            evaluation.conditions_line(),
            "Temperature: 25°C, Humidity: 45%, Embedded Response: Acknowledge, WiFi Signal: Strong, Movement: None"
        );
        assert_eq!(evaluation.performance_line(), "WiFi Performance: Excellent");

        let basic = sample_evaluation(None);
        assert_eq!(
            basic.conditions_line(),
            "Temperature: 25°C, Humidity: 45%, Embedded Response: Acknowledge, WiFi Signal: Strong"
        );
    }

    #[test]
    fn test_evaluation_json_omits_missing_movement() {
        let json = serde_json::to_value(sample_evaluation(None)).unwrap();
        assert!(json.get("movement").is_none());
        assert_eq!(json["performance"], "excellent");
        assert_eq!(json["signal"], "strong");
    }

    #[test]
    fn test_reading_lines() {
        let wifi = WifiReading {
            signal: Signal::NoSignal,
            movement: Movement::Falling,
            breathing: Breathing::Fast,
        };
        assert_eq!(
            wifi.to_string(),
            "Detected signal: No Signal, Movement: Falling, Breathing: Fast"
        );

        let env = EnvironmentReading {
            temperature_c: -3,
            humidity_pct: 88,
        };
        assert_eq!(env.to_string(), "Simulated temperature: -3°C, Humidity: 88%");
    }

    #[test]
    fn test_device_event_lines() {
        let sent = DeviceEvent::Sent(DevicePayload::Data2);
        let received = DeviceEvent::Received(DeviceResponse::Timeout);

        assert_eq!(sent.to_string(), "Sending data: Data2");
        assert_eq!(received.to_string(), "Received response: Timeout");

        let json = serde_json::to_value(received).unwrap();
        assert_eq!(json["direction"], "received");
        assert_eq!(json["value"], "timeout");
    }
}
