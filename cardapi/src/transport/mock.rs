// cardapi-rs/cardapi/src/transport/mock.rs

use std::collections::VecDeque;

use crate::error::{TransportError, TransportResult};
use crate::transport::traits::Transport;

/// Mock transport for tests. It records sent APDUs and replays queued
/// responses or failures in order.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every APDU passed to transmit, in order
    pub sent: Vec<Vec<u8>>,
    /// Queued replies, consumed front first
    pub responses: VecDeque<TransportResult<Vec<u8>>>,
    /// Power-on data reported while the channel is open
    pub atr: Option<Vec<u8>>,
    pub card_present: bool,
    pub physical_channel_open: bool,
    /// Testing hook: number of open_physical_channel calls that should fail
    pub open_failures: usize,
    /// Testing hook: failure returned by the next close_physical_channel call
    pub close_failure: Option<TransportError>,
    /// Number of open_physical_channel calls
    pub open_calls: usize,
    /// Number of close_physical_channel calls
    pub close_calls: usize,
    /// Timeout passed with the most recent transmit
    pub last_timeout_ms: Option<u64>,
}

impl MockTransport {
    /// Mock with a card present and the physical channel closed.
    pub fn new(atr: Option<Vec<u8>>) -> Self {
        Self {
            atr,
            card_present: true,
            ..Self::default()
        }
    }

    /// Queue a raw response (data followed by SW1 SW2).
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(Ok(resp));
    }

    /// Queue a failure to be returned in place of the next response.
    pub fn push_failure(&mut self, err: TransportError) {
        self.responses.push_back(Err(err));
    }

    /// Set how many subsequent open_physical_channel calls should fail.
    pub fn set_open_failures(&mut self, n: usize) {
        self.open_failures = n;
    }

    /// Make the next close_physical_channel call fail with `err`.
    pub fn set_close_failure(&mut self, err: TransportError) {
        self.close_failure = Some(err);
    }

    /// Take the card out: presence checks report false from now on.
    pub fn remove_card(&mut self) {
        self.card_present = false;
    }
}

impl Transport for MockTransport {
    fn is_card_present(&mut self) -> TransportResult<bool> {
        Ok(self.card_present)
    }

    fn open_physical_channel(&mut self) -> TransportResult<()> {
        self.open_calls += 1;
        if self.open_failures > 0 {
            self.open_failures -= 1;
            return Err(TransportError::Reader("simulated open failure".into()));
        }
        if !self.card_present {
            return Err(TransportError::CardRemoved);
        }
        self.physical_channel_open = true;
        Ok(())
    }

    fn close_physical_channel(&mut self) -> TransportResult<()> {
        self.close_calls += 1;
        if let Some(err) = self.close_failure.take() {
            return Err(err);
        }
        self.physical_channel_open = false;
        Ok(())
    }

    fn is_physical_channel_open(&self) -> bool {
        self.physical_channel_open
    }

    fn power_on_data(&self) -> Option<Vec<u8>> {
        self.atr.clone()
    }

    fn transmit_apdu(&mut self, apdu: &[u8], timeout_ms: u64) -> TransportResult<Vec<u8>> {
        self.sent.push(apdu.to_vec());
        self.last_timeout_ms = Some(timeout_ms);
        if !self.card_present {
            return Err(TransportError::CardRemoved);
        }
        // An exhausted queue behaves like a silent card
        self.responses.pop_front().unwrap_or(Err(TransportError::Timeout))
    }
}
