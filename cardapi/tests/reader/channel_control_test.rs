#[path = "../common/mod.rs"]
mod common;

use cardapi::card::CardRequest;
use cardapi::error::TransportError;
use cardapi::reader::ProxyReader;
use cardapi::{ChannelControl, Error};

#[test]
fn keep_open_leaves_both_channels_open() -> anyhow::Result<()> {
    let mut reader = common::helpers::selected_reader(vec![common::fixtures::ok_with(&[0x01])]);
    let req = CardRequest::new(vec![common::fixtures::read_binary(0)], false);
    let resp = reader.transmit_card_request(&req, ChannelControl::KeepOpen)?;
    assert!(resp.is_logical_channel_open());
    assert!(reader.is_logical_channel_open());
    assert!(reader.is_physical_channel_open());
    Ok(())
}

#[test]
fn close_after_releases_channels() -> anyhow::Result<()> {
    let mut reader = common::helpers::selected_reader(vec![common::fixtures::ok_with(&[0x01])]);
    let req = CardRequest::new(vec![common::fixtures::read_binary(0)], false);
    let resp = reader.transmit_card_request(&req, ChannelControl::CloseAfter)?;
    assert!(!resp.is_logical_channel_open());
    assert!(resp.is_complete());
    assert!(!reader.is_physical_channel_open());

    // nothing more can be sent until a new selection
    let again = reader.transmit_card_request(&req, ChannelControl::KeepOpen);
    assert!(matches!(again, Err(Error::InvalidState(_))));
    Ok(())
}

#[test]
fn close_after_applies_on_status_rejection() {
    let mut reader = common::helpers::selected_reader(vec![common::fixtures::sw(0x6982)]);
    let req = CardRequest::new(vec![common::fixtures::read_binary(0)], true);
    let err = reader
        .transmit_card_request(&req, ChannelControl::CloseAfter)
        .unwrap_err();
    let partial = err.card_response().unwrap();
    assert!(!partial.is_logical_channel_open());
    assert_eq!(partial.apdu_responses().len(), 1);
    assert_eq!(reader.transport().close_calls, 1);
}

#[test]
fn release_channel_failure_is_reader_failure() {
    let mut reader = common::helpers::selected_reader(vec![]);
    reader
        .transport_mut()
        .set_close_failure(TransportError::Reader("device lost".into()));
    let err = reader.release_channel().unwrap_err();
    assert!(matches!(
        err,
        Error::ReaderCommunication {
            card_response: None,
            ..
        }
    ));
    assert!(!reader.is_logical_channel_open());
}

#[test]
fn release_channel_is_idempotent() -> anyhow::Result<()> {
    let mut reader = common::helpers::selected_reader(vec![]);
    reader.release_channel()?;
    reader.release_channel()?;
    assert!(!reader.is_physical_channel_open());
    Ok(())
}
