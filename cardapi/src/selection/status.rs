use std::fmt;

use serde::Serialize;

use crate::apdu::ApduResponse;
use crate::types::AnswerToReset;
use crate::utils::json;
use crate::{Error, Result};

/// Outcome of trying to activate a card profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    atr: Option<AnswerToReset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fci: Option<ApduResponse>,
    has_matched: bool,
}

impl SelectionStatus {
    /// At least one of `atr` and `fci` must be present. `has_matched` is
    /// taken as given, never inferred from them.
    pub fn new(
        atr: Option<AnswerToReset>,
        fci: Option<ApduResponse>,
        has_matched: bool,
    ) -> Result<Self> {
        if atr.is_none() && fci.is_none() {
            return Err(Error::InvalidState("ATR and FCI are both null".into()));
        }
        Ok(Self {
            atr,
            fci,
            has_matched,
        })
    }

    /// Power-on data of the card, if the reader had any
    pub fn atr(&self) -> Option<&AnswerToReset> {
        self.atr.as_ref()
    }

    /// Response to the SELECT command, if one was sent.
    pub fn fci(&self) -> Option<&ApduResponse> {
        self.fci.as_ref()
    }

    pub fn has_matched(&self) -> bool {
        self.has_matched
    }

    pub(crate) fn into_unmatched(self) -> Self {
        Self {
            has_matched: false,
            ..self
        }
    }
}

impl fmt::Display for SelectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_labeled(f, "SELECTION_STATUS", self)
    }
}
