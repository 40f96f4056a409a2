//! Output record encoding
//!
//! Wraps readings and evaluations in NDJSON records stamped with producer metadata,
//! and tallies labels over a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::SimError;
use crate::types::PerformanceLabel;
use crate::{PRODUCER_NAME, WIFISENSE_VERSION};

/// Producer metadata carried by every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// What a record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Evaluation,
    Wifi,
    Environment,
    Device,
    Summary,
}

/// One output record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record<T> {
    pub kind: RecordKind,
    /// Zero-based tick number within the run
    pub sequence: u64,
    /// Seed that reproduces the run; absent when nothing was drawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub emitted_at: DateTime<Utc>,
    pub producer: Producer,
    pub data: T,
}

/// Encoder for output records
pub struct RecordEncoder {
    producer: Producer,
    seed: Option<u64>,
}

impl RecordEncoder {
    /// Create an encoder for a seeded run with a unique instance ID
    pub fn new(seed: u64) -> Self {
        Self::with_instance_id(Some(seed), Uuid::new_v4().to_string())
    }

    /// Create an encoder for output that involves no random draws
    pub fn unseeded() -> Self {
        Self::with_instance_id(None, Uuid::new_v4().to_string())
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(seed: Option<u64>, instance_id: String) -> Self {
        Self {
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: WIFISENSE_VERSION.to_string(),
                instance_id,
            },
            seed,
        }
    }

    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    pub fn encode<T: Serialize>(&self, kind: RecordKind, sequence: u64, data: T) -> Record<T> {
        Record {
            kind,
            sequence,
            seed: self.seed,
            emitted_at: Utc::now(),
            producer: self.producer.clone(),
            data,
        }
    }

    /// Encode to a single JSON line (no trailing newline)
    pub fn encode_to_json<T: Serialize>(
        &self,
        kind: RecordKind,
        sequence: u64,
        data: T,
    ) -> Result<String, SimError> {
        let record = self.encode(kind, sequence, data);
        serde_json::to_string(&record).map_err(SimError::JsonError)
    }
}

/// Count of each label over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub excellent: u64,
    pub ideal: u64,
    pub optimized: u64,
    pub poor: u64,
}

impl RunSummary {
    pub fn record(&mut self, label: PerformanceLabel) {
        match label {
            PerformanceLabel::Excellent => self.excellent += 1,
            PerformanceLabel::Ideal => self.ideal += 1,
            PerformanceLabel::Optimized => self.optimized += 1,
            PerformanceLabel::Poor => self.poor += 1,
        }
    }

    pub fn count(&self, label: PerformanceLabel) -> u64 {
        match label {
            PerformanceLabel::Excellent => self.excellent,
            PerformanceLabel::Ideal => self.ideal,
            PerformanceLabel::Optimized => self.optimized,
            PerformanceLabel::Poor => self.poor,
        }
    }

    pub fn total(&self) -> u64 {
        self.excellent + self.ideal + self.optimized + self.poor
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Run complete: {} evaluations (Excellent: {}, Ideal: {}, Optimized: {}, Poor: {})",
            self.total(),
            self.excellent,
            self.ideal,
            self.optimized,
            self.poor
        )
    }
}
