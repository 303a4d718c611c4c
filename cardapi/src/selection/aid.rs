use std::collections::BTreeSet;

use serde::Serialize;

use crate::apdu::ApduRequest;
use crate::constants::{
    AID_MAX_LEN, AID_MIN_LEN, CLA_ISO, INS_SELECT, SELECT_P1_BY_NAME, SW_SUCCESS,
};
use crate::types::AnswerToReset;
use crate::utils::{json, validate};
use crate::{Error, Result};

/// Generic ISO selector: optional ATR prefix filter followed by an optional
/// SELECT by AID.
///
/// Without an AID, a card passing the ATR filter matches on its ATR alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AidSelector {
    #[serde(serialize_with = "json::hex_bytes_opt")]
    aid: Option<Vec<u8>>,
    #[serde(serialize_with = "json::hex_bytes_opt")]
    atr_prefix: Option<Vec<u8>>,
    successful_selection_status_codes: BTreeSet<u16>,
}

impl Default for AidSelector {
    fn default() -> Self {
        Self {
            aid: None,
            atr_prefix: None,
            successful_selection_status_codes: BTreeSet::from([SW_SUCCESS]),
        }
    }
}

impl AidSelector {
    /// Selector matching any card that answers to reset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select by this AID (5 to 16 bytes). Without one, the ATR alone
    /// decides.
    pub fn with_aid(mut self, aid: &[u8]) -> Result<Self> {
        validate::in_range(aid.len(), AID_MIN_LEN, AID_MAX_LEN, "aid.length")?;
        self.aid = Some(aid.to_vec());
        Ok(self)
    }

    /// Only accept cards whose ATR starts with `prefix`
    pub fn with_atr_prefix(mut self, prefix: &[u8]) -> Self {
        self.atr_prefix = Some(prefix.to_vec());
        self
    }

    /// Status codes of the SELECT response that count as a match
    /// (default: 0x9000 only).
    pub fn with_successful_selection_status_codes<I>(mut self, codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = u16>,
    {
        let codes: BTreeSet<u16> = codes.into_iter().collect();
        if codes.is_empty() {
            return Err(Error::InvalidArgument(
                "successfulSelectionStatusCodes must not be empty".into(),
            ));
        }
        self.successful_selection_status_codes = codes;
        Ok(self)
    }

    pub fn aid(&self) -> Option<&[u8]> {
        self.aid.as_deref()
    }

    pub fn atr_prefix(&self) -> Option<&[u8]> {
        self.atr_prefix.as_deref()
    }

    /// Whether the ATR passes the prefix filter. A card without ATR only
    /// passes when no filter is set.
    pub fn accepts_atr(&self, atr: Option<&AnswerToReset>) -> bool {
        match (&self.atr_prefix, atr) {
            (None, _) => true,
            (Some(prefix), Some(atr)) => atr.starts_with(prefix),
            (Some(_), None) => false,
        }
    }

    /// Whether a SELECT status word counts as a match
    pub fn accepts_status_code(&self, status_code: u16) -> bool {
        self.successful_selection_status_codes
            .contains(&status_code)
    }

    /// `SELECT` by DF name for the configured AID, as a case 4 APDU.
    pub fn select_apdu(&self) -> Option<Result<ApduRequest>> {
        self.aid.as_deref().map(|aid| {
            ApduRequest::new(CLA_ISO, INS_SELECT, SELECT_P1_BY_NAME, 0x00, Some(aid), Some(0))
                .map(|r| r.with_name("Select Application"))
        })
    }
}
