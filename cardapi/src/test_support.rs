//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport and LocalReader setup so
//! tests across the crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::reader::{CardSelectionProcessor, LocalReader, ReaderConfig};
use crate::selection::AidSelector;
use crate::transport::mock::MockTransport;
use crate::Result;

/// ATR used by the helpers when the test does not care about its content.
#[doc(hidden)]
pub const SAMPLE_ATR: [u8; 6] = [0x3B, 0x88, 0x80, 0x01, 0x00, 0x00];

/// Build a MockTransport with the given ATR, pre-seeded with raw responses.
#[doc(hidden)]
pub fn mock_with_responses(atr: Option<&[u8]>, responses: Vec<Vec<u8>>) -> MockTransport {
    let mut mock = MockTransport::new(atr.map(<[u8]>::to_vec));
    for resp in responses {
        mock.push_response(resp);
    }
    mock
}

/// LocalReader over a seeded MockTransport, default configuration.
#[doc(hidden)]
pub fn mock_reader(responses: Vec<Vec<u8>>) -> LocalReader<MockTransport> {
    LocalReader::new(
        mock_with_responses(Some(&SAMPLE_ATR), responses),
        ReaderConfig::default(),
    )
}

/// Convenience: a mock reader whose logical channel is already open through
/// an ATR-only selection, ready for `transmit_card_request`. The responses
/// are left untouched for the caller.
#[doc(hidden)]
pub fn selected_mock_reader(responses: Vec<Vec<u8>>) -> Result<LocalReader<MockTransport>> {
    let mut reader = mock_reader(responses);
    reader.select_card(&AidSelector::new())?;
    Ok(reader)
}
