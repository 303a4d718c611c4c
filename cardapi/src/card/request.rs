use std::fmt;

use serde::Serialize;

use crate::apdu::ApduRequest;
use crate::utils::json;

/// An ordered batch of APDUs sent to a card in one reader call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    apdu_requests: Vec<ApduRequest>,
    is_status_codes_verification_enabled: bool,
}

impl CardRequest {
    /// `status_codes_verification` makes the reader stop at the first APDU
    /// whose status code is not accepted by that APDU.
    pub fn new(apdu_requests: Vec<ApduRequest>, status_codes_verification: bool) -> Self {
        Self {
            apdu_requests,
            is_status_codes_verification_enabled: status_codes_verification,
        }
    }

    pub fn apdu_requests(&self) -> &[ApduRequest] {
        &self.apdu_requests
    }

    /// Number of APDUs in the batch
    pub fn len(&self) -> usize {
        self.apdu_requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apdu_requests.is_empty()
    }

    pub(crate) fn is_status_codes_verification_enabled(&self) -> bool {
        self.is_status_codes_verification_enabled
    }
}

impl fmt::Display for CardRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_labeled(f, "CARD_REQUEST", self)
    }
}
