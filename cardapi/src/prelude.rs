// cardapi-rs/cardapi/src/prelude.rs

pub use crate::apdu::{ApduCase, ApduRequest, ApduResponse};
pub use crate::card::{CardRequest, CardResponse};
pub use crate::reader::{CardSelectionProcessor, LocalReader, LocalReaderBuilder, ProxyReader, ReaderConfig};
pub use crate::selection::{
    AidSelector, CardSelectionRequest, CardSelectionResponse, CardSelectionScenario,
    SelectionStatus,
};
pub use crate::transport::Transport;
pub use crate::{AnswerToReset, ChannelControl, Error, MultiSelectionProcessing, Result};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced};
