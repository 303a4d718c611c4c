// cardapi-rs/cardapi/src/types.rs

use std::convert::TryFrom;

use derive_more::Display;
use serde::{Deserialize, Serialize, Serializer};

use crate::utils::validate;
use crate::{Error, Result};

/// Answer-To-Reset: the card's power-on response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnswerToReset(Vec<u8>);

impl AnswerToReset {
    /// Shortest meaningful ATR: TS and T0.
    pub const MIN_LEN: usize = 2;

    /// Wrap raw ATR bytes. Fewer than [`Self::MIN_LEN`] bytes is an
    /// `InvalidArgument`.
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        validate::greater_or_equal(bytes.len(), Self::MIN_LEN, "atr.length")?;
        Ok(Self(bytes))
    }

    /// Raw ATR bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.0.starts_with(prefix)
    }

    /// Uppercase hex, as used in traces and JSON
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for AnswerToReset {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes.to_vec())
    }
}

impl Serialize for AnswerToReset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// What happens to the physical channel once an exchange completes.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelControl {
    /// Leave the channel open for further exchanges.
    #[display(fmt = "KEEP_OPEN")]
    KeepOpen,
    /// Close (release) the channel after the last exchange.
    #[display(fmt = "CLOSE_AFTER")]
    CloseAfter,
}

/// How a selection scenario walks its selection cases.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MultiSelectionProcessing {
    /// Stop at the first case that matches.
    #[display(fmt = "FIRST_MATCH")]
    FirstMatch,
    /// Attempt every case and collect every outcome.
    #[display(fmt = "PROCESS_ALL")]
    ProcessAll,
}
