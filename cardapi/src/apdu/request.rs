// cardapi-rs/cardapi/src/apdu/request.rs

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::apdu::ApduCase;
use crate::constants::{APDU_HEADER_LEN, APDU_MAX_DATA_LEN, APDU_MIN_REQUEST_LEN, SW_SUCCESS};
use crate::utils::{json, validate};
use crate::{Error, Result};

/// One outbound command APDU, stored in its wire encoding.
///
/// Built once. The successful status codes and the name are decorations set
/// before the request is handed to a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApduRequest {
    #[serde(serialize_with = "json::hex_bytes")]
    bytes: Vec<u8>,
    is_case4: bool,
    #[serde(skip)]
    case: Option<ApduCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    successful_status_codes: Option<BTreeSet<u16>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl ApduRequest {
    /// Build a short APDU from its fields, inferring the ISO 7816-4 case.
    ///
    /// | data | le | case | layout |
    /// |---|---|---|---|
    /// | - | - | 1 | `CLA INS P1 P2 00` |
    /// | - | Le | 2 | `CLA INS P1 P2 Le` |
    /// | data | - | 3 | `CLA INS P1 P2 Lc data` |
    /// | data | 0 | 4 | `CLA INS P1 P2 Lc data 00` |
    ///
    /// With data present, `le` must be 0: the real response length is
    /// negotiated by the transport layer.
    pub fn new(
        cla: u8,
        ins: u8,
        p1: u8,
        p2: u8,
        data_in: Option<&[u8]>,
        le: Option<u8>,
    ) -> Result<Self> {
        if let (Some(_), Some(le)) = (data_in, le) {
            if le != 0 {
                return Err(Error::InvalidArgument(format!(
                    "le must be equal to 0 when ingoing data are present, got {:#04x}",
                    le
                )));
            }
        }

        let mut bytes = Vec::with_capacity(
            APDU_MIN_REQUEST_LEN + data_in.map_or(0, <[u8]>::len) + usize::from(le.is_some()),
        );
        bytes.extend_from_slice(&[cla, ins, p1, p2]);

        let case = match (data_in, le) {
            (Some(data), le) => {
                validate::in_range(data.len(), 1, APDU_MAX_DATA_LEN, "dataIn.length")?;
                bytes.push(data.len() as u8);
                bytes.extend_from_slice(data);
                if le.is_some() {
                    bytes.push(0x00);
                    ApduCase::Case4
                } else {
                    ApduCase::Case3
                }
            }
            (None, Some(le)) => {
                bytes.push(le);
                ApduCase::Case2
            }
            (None, None) => {
                bytes.push(0x00);
                ApduCase::Case1
            }
        };

        Ok(Self {
            bytes,
            is_case4: case == ApduCase::Case4,
            case: Some(case),
            successful_status_codes: None,
            name: None,
        })
    }

    /// Wrap an already encoded APDU.
    ///
    /// When `is_case4` is set the buffer must read `header Lc data 00`.
    pub fn from_bytes(bytes: Vec<u8>, is_case4: bool) -> Result<Self> {
        validate::greater_or_equal(bytes.len(), APDU_MIN_REQUEST_LEN, "bytes.length")?;

        let case = if is_case4 {
            let lc = bytes[APDU_HEADER_LEN] as usize;
            if lc == 0 || bytes.len() != lc + APDU_MIN_REQUEST_LEN + 1 || bytes.last() != Some(&0)
            {
                return Err(Error::InvalidArgument(
                    "case 4 apdu must be laid out as header, Lc, data, Le=00".into(),
                ));
            }
            Some(ApduCase::Case4)
        } else {
            // without the flag a case 4 layout stays unclassified
            ApduCase::of_encoded(&bytes).filter(|case| *case != ApduCase::Case4)
        };

        Ok(Self {
            bytes,
            is_case4,
            case,
            successful_status_codes: None,
            name: None,
        })
    }

    /// Replace the 0x9000 default with an explicit set of accepted status
    /// codes.
    pub fn with_successful_status_codes<I>(mut self, codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = u16>,
    {
        let codes: BTreeSet<u16> = codes.into_iter().collect();
        if codes.is_empty() {
            return Err(Error::InvalidArgument(
                "successfulStatusCodes must not be empty".into(),
            ));
        }
        self.successful_status_codes = Some(codes);
        Ok(self)
    }

    /// Attach a free-text name used in traces.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Encoded APDU as sent to the card.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// True when the request carries data and expects response data
    /// (Le = 00). Readers use it to drive GET RESPONSE.
    pub fn is_case4(&self) -> bool {
        self.is_case4
    }

    /// ISO case of the request. Always known for requests built with
    /// [`ApduRequest::new`]. `None` for raw buffers whose length disagrees
    /// with their Lc byte, or that look like case 4 without being flagged
    /// as such.
    pub fn case(&self) -> Option<ApduCase> {
        self.case
    }

    pub fn cla(&self) -> u8 {
        self.bytes[0]
    }

    pub fn ins(&self) -> u8 {
        self.bytes[1]
    }

    pub fn p1(&self) -> u8 {
        self.bytes[2]
    }

    pub fn p2(&self) -> u8 {
        self.bytes[3]
    }

    /// Explicit accepted status codes, `None` when the 0x9000 default applies.
    pub fn successful_status_codes(&self) -> Option<&BTreeSet<u16>> {
        self.successful_status_codes.as_ref()
    }

    /// Name set with [`with_name`](Self::with_name), if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether `status_code` counts as success for this request.
    pub fn is_successful(&self, status_code: u16) -> bool {
        match &self.successful_status_codes {
            Some(codes) => codes.contains(&status_code),
            None => status_code == SW_SUCCESS,
        }
    }
}

impl fmt::Display for ApduRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_labeled(f, "APDU_REQUEST", self)
    }
}
