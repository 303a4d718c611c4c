// cardapi-rs/cardapi/src/apdu/response.rs

use std::convert::TryFrom;
use std::fmt;

use serde::Serialize;

use crate::constants::{APDU_MIN_RESPONSE_LEN, SW_SUCCESS};
use crate::utils::{json, validate};
use crate::{Error, Result};

/// One inbound response APDU: optional data followed by SW1 SW2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApduResponse {
    #[serde(serialize_with = "json::hex_bytes")]
    bytes: Vec<u8>,
    status_code: u16,
}

impl ApduResponse {
    /// Parse a raw response. At least SW1 SW2 must be present.
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        validate::greater_or_equal(bytes.len(), APDU_MIN_RESPONSE_LEN, "bytes.length")?;
        let n = bytes.len();
        let status_code = u16::from_be_bytes([bytes[n - 2], bytes[n - 1]]);
        Ok(Self { bytes, status_code })
    }

    /// Full response, SW1 SW2 included
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// `(SW1 << 8) | SW2`
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn sw1(&self) -> u8 {
        (self.status_code >> 8) as u8
    }

    pub fn sw2(&self) -> u8 {
        self.status_code as u8
    }

    /// True for 0x9000
    pub fn is_success(&self) -> bool {
        self.status_code == SW_SUCCESS
    }

    /// Borrowed view of the response data, SW1 SW2 excluded.
    pub fn data(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - APDU_MIN_RESPONSE_LEN]
    }

    /// Fresh copy of the response data, SW1 SW2 excluded.
    pub fn data_out(&self) -> Vec<u8> {
        self.data().to_vec()
    }
}

impl TryFrom<&[u8]> for ApduResponse {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes.to_vec())
    }
}

impl TryFrom<Vec<u8>> for ApduResponse {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::new(bytes)
    }
}

impl fmt::Display for ApduResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_labeled(f, "APDU_RESPONSE", self)
    }
}
