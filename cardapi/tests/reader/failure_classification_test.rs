#[path = "../common/mod.rs"]
mod common;

use cardapi::card::CardRequest;
use cardapi::error::TransportError;
use cardapi::reader::{CardSelectionProcessor, ProxyReader};
use cardapi::{ChannelControl, Error};

fn two_reads() -> CardRequest {
    CardRequest::new(
        vec![
            common::fixtures::read_binary(0),
            common::fixtures::read_binary(1),
        ],
        true,
    )
}

#[test]
fn reader_failure_keeps_partial_response() {
    let mut reader = common::helpers::selected_reader(vec![common::fixtures::ok_with(&[0x01])]);
    reader
        .transport_mut()
        .push_failure(TransportError::Reader("usb disconnected".into()));
    let err = reader
        .transmit_card_request(&two_reads(), ChannelControl::KeepOpen)
        .unwrap_err();
    assert!(matches!(err, Error::ReaderCommunication { .. }));
    let partial = err.card_response().unwrap();
    assert_eq!(partial.apdu_responses().len(), 1);
    assert!(!partial.is_logical_channel_open());
    assert!(!reader.is_physical_channel_open());
}

#[test]
fn card_level_failures_are_card_communication() {
    let failures = [
        TransportError::Card("parity".into()),
        TransportError::CardRemoved,
        TransportError::Timeout,
    ];
    for failure in failures {
        let mut reader = common::helpers::selected_reader(vec![]);
        reader.transport_mut().push_failure(failure.clone());
        match reader.transmit_card_request(&two_reads(), ChannelControl::KeepOpen) {
            Err(Error::CardCommunication {
                card_response,
                source,
                ..
            }) => {
                assert!(card_response.apdu_responses().is_empty());
                assert_eq!(source, Some(failure));
            }
            other => panic!("expected CardCommunication, got: {:?}", other),
        }
    }
}

#[test]
fn card_removed_mid_batch() {
    let mut reader = common::helpers::selected_reader(vec![
        common::fixtures::ok_with(&[0x01]),
        common::fixtures::ok_with(&[0x02]),
    ]);
    let req = two_reads();
    let first = CardRequest::new(vec![common::fixtures::read_binary(0)], true);
    reader
        .transmit_card_request(&first, ChannelControl::KeepOpen)
        .unwrap();
    reader.transport_mut().remove_card();
    let err = reader
        .transmit_card_request(&req, ChannelControl::KeepOpen)
        .unwrap_err();
    assert!(err.is_apdu_failure());
    assert!(!reader.is_card_present().unwrap());
}

#[test]
fn selection_on_dead_reader_is_reader_failure() {
    let mut reader = common::helpers::reader_with(vec![]);
    reader.transport_mut().set_open_failures(1);
    let err = reader
        .select_card(&common::fixtures::aid_selector())
        .unwrap_err();
    assert!(matches!(err, Error::ReaderCommunication { .. }));
    assert!(!reader.is_logical_channel_open());
}

#[test]
fn select_without_answer_is_card_failure() {
    let mut reader = common::helpers::reader_with(vec![]);
    let err = reader
        .select_card(&common::fixtures::aid_selector())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::CardCommunication {
            source: Some(TransportError::Timeout),
            ..
        }
    ));
}
