use std::fmt;

use serde::Serialize;

use crate::apdu::ApduResponse;
use crate::utils::json;

/// Outcome of transmitting a [`CardRequest`](crate::card::CardRequest).
///
/// `apdu_responses` may be shorter than the request when the exchange was cut
/// short. Producers are responsible for `is_complete` agreeing with the
/// request length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    apdu_responses: Vec<ApduResponse>,
    is_logical_channel_open: bool,
    is_complete: bool,
}

impl CardResponse {
    /// Assemble a response. The flags are taken as given.
    pub fn new(
        apdu_responses: Vec<ApduResponse>,
        is_logical_channel_open: bool,
        is_complete: bool,
    ) -> Self {
        Self {
            apdu_responses,
            is_logical_channel_open,
            is_complete,
        }
    }

    /// Response to an empty exchange, e.g. a selection without follow-up
    /// APDUs.
    pub fn empty(is_logical_channel_open: bool) -> Self {
        Self::new(Vec::new(), is_logical_channel_open, true)
    }

    pub fn apdu_responses(&self) -> &[ApduResponse] {
        &self.apdu_responses
    }

    /// Take the responses out, dropping the flags.
    pub fn into_apdu_responses(self) -> Vec<ApduResponse> {
        self.apdu_responses
    }

    /// State of the logical channel once the exchange ended
    pub fn is_logical_channel_open(&self) -> bool {
        self.is_logical_channel_open
    }

    /// True when every APDU of the request got a response
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }
}

impl fmt::Display for CardResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_labeled(f, "CARD_RESPONSE", self)
    }
}
