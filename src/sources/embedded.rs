//! Embedded peer simulator
//!
//! Sending and receiving are independent random draws; no data crosses a wire.
//! `next_event` alternates between the two, starting with a send.

use tracing::debug;

use crate::rng::RandomSource;
use crate::types::{DeviceEvent, DeviceExchange, DevicePayload, DeviceResponse};

/// Simulates an embedded device that is sent data and answers with a status
#[derive(Debug, Clone)]
pub struct EmbeddedSimulator {
    source: RandomSource,
    awaiting_response: bool,
}

impl EmbeddedSimulator {
    pub fn new(source: RandomSource) -> Self {
        Self {
            source,
            awaiting_response: false,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomSource::seeded(seed))
    }

    /// Payload sent to the device
    pub fn send_data(&mut self) -> DevicePayload {
        let payload: DevicePayload = self.source.pick();
        debug!(%payload, "sending data");
        payload
    }

    /// Response received from the device
    pub fn receive_data(&mut self) -> DeviceResponse {
        let response: DeviceResponse = self.source.pick();
        debug!(%response, "received response");
        response
    }

    /// One send followed by one receive
    pub fn exchange(&mut self) -> DeviceExchange {
        let sent = self.send_data();
        let response = self.receive_data();
        DeviceExchange { sent, response }
    }

    /// Next half of the exchange: a send, then a receive, then a send again
    pub fn next_event(&mut self) -> DeviceEvent {
        let event = if self.awaiting_response {
            DeviceEvent::Received(self.receive_data())
        } else {
            DeviceEvent::Sent(self.send_data())
        };
        self.awaiting_response = !self.awaiting_response;
        event
    }
}
