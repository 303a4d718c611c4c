// cardapi-rs/cardapi/src/apdu/case.rs

use derive_more::Display;
use serde::Serialize;

use crate::constants::{APDU_HEADER_LEN, APDU_MIN_REQUEST_LEN};

/// ISO/IEC 7816-4 command case, by presence of command and response data.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ApduCase {
    /// No command data, no response data. P3 is 0x00.
    #[display(fmt = "case 1")]
    Case1,
    /// No command data, Le present.
    #[display(fmt = "case 2")]
    Case2,
    /// Command data, no Le.
    #[display(fmt = "case 3")]
    Case3,
    /// Command data and Le.
    #[display(fmt = "case 4")]
    Case4,
}

impl ApduCase {
    /// Classify an already encoded short command APDU.
    ///
    /// A 5-byte buffer is ambiguous on the wire: P3 = 0x00 reads as case 1,
    /// anything else as case 2. Returns `None` when the length does not
    /// agree with the Lc byte.
    pub fn of_encoded(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < APDU_MIN_REQUEST_LEN {
            return None;
        }
        let p3 = bytes[APDU_HEADER_LEN];
        if bytes.len() == APDU_MIN_REQUEST_LEN {
            return Some(if p3 == 0 { Self::Case1 } else { Self::Case2 });
        }
        let lc = p3 as usize;
        if lc == 0 {
            return None;
        }
        match bytes.len() - APDU_MIN_REQUEST_LEN {
            n if n == lc => Some(Self::Case3),
            n if n == lc + 1 => Some(Self::Case4),
            _ => None,
        }
    }

    /// Cases 3 and 4 carry Lc and data
    pub fn has_command_data(&self) -> bool {
        matches!(self, Self::Case3 | Self::Case4)
    }

    /// Cases 2 and 4 end with Le
    pub fn expects_response_data(&self) -> bool {
        matches!(self, Self::Case2 | Self::Case4)
    }
}
