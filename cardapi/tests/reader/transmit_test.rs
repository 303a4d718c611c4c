#[path = "../common/mod.rs"]
mod common;

use cardapi::card::CardRequest;
use cardapi::error::TransportError;
use cardapi::reader::ProxyReader;
use cardapi::{ChannelControl, Error};
use proptest::prelude::*;

#[test]
fn batch_is_sent_in_order() -> anyhow::Result<()> {
    let mut reader = common::helpers::selected_reader(vec![
        common::fixtures::ok_with(&[0x01]),
        common::fixtures::ok_with(&[0x02]),
        common::fixtures::ok_with(&[0x03]),
    ]);
    let req = CardRequest::new(
        (0..3).map(common::fixtures::read_binary).collect(),
        true,
    );
    let resp = reader.transmit_card_request(&req, ChannelControl::KeepOpen)?;

    let data: Vec<Vec<u8>> = resp.apdu_responses().iter().map(|r| r.data_out()).collect();
    assert_eq!(data, vec![vec![0x01], vec![0x02], vec![0x03]]);
    let offsets: Vec<u8> = reader.transport().sent.iter().map(|apdu| apdu[3]).collect();
    assert_eq!(offsets, vec![0, 1, 2]);
    assert!(resp.is_complete());
    Ok(())
}

#[test]
fn rejected_status_stops_batch_and_keeps_offending_response() {
    let mut reader = common::helpers::selected_reader(vec![
        common::fixtures::ok_with(&[0x01]),
        common::fixtures::sw(0x6A82),
        common::fixtures::ok_with(&[0x03]),
    ]);
    let req = CardRequest::new(
        (0..3).map(common::fixtures::read_binary).collect(),
        true,
    );
    match reader.transmit_card_request(&req, ChannelControl::KeepOpen) {
        Err(Error::UnexpectedStatusCode {
            index,
            status_code,
            card_response,
        }) => {
            assert_eq!(index, 1);
            assert_eq!(status_code, 0x6A82);
            assert_eq!(card_response.apdu_responses().len(), 2);
            assert_eq!(card_response.apdu_responses()[1].status_code(), 0x6A82);
            assert!(!card_response.is_complete());
            assert!(card_response.is_logical_channel_open());
        }
        other => panic!("expected UnexpectedStatusCode, got: {:?}", other),
    }
    // the third APDU never left the reader
    assert_eq!(reader.transport().sent.len(), 2);
}

#[test]
fn rejected_status_is_ignored_without_verification() -> anyhow::Result<()> {
    let mut reader = common::helpers::selected_reader(vec![
        common::fixtures::sw(0x6A82),
        common::fixtures::ok_with(&[0x02]),
    ]);
    let req = CardRequest::new(
        (0..2).map(common::fixtures::read_binary).collect(),
        false,
    );
    let resp = reader.transmit_card_request(&req, ChannelControl::KeepOpen)?;
    assert_eq!(resp.apdu_responses().len(), 2);
    assert!(resp.is_complete());
    Ok(())
}

#[test]
fn per_apdu_successful_codes_are_honoured() -> anyhow::Result<()> {
    let mut reader = common::helpers::selected_reader(vec![common::fixtures::sw(0x6282)]);
    let apdu = common::fixtures::read_binary(0).with_successful_status_codes([0x9000, 0x6282])?;
    let resp = reader.transmit_card_request(&CardRequest::new(vec![apdu], true), ChannelControl::KeepOpen)?;
    assert_eq!(resp.apdu_responses()[0].status_code(), 0x6282);
    Ok(())
}

proptest! {
    #[test]
    fn failure_at_k_keeps_k_responses((n, k) in (1usize..6).prop_flat_map(|n| (Just(n), 0..n))) {
        let responses: Vec<Vec<u8>> = (0..k).map(|i| common::fixtures::ok_with(&[i as u8])).collect();
        let mut reader = common::helpers::selected_reader(responses);
        reader.transport_mut().push_failure(TransportError::Card("tearing".into()));

        let req = CardRequest::new(
            (0..n).map(|i| common::fixtures::read_binary(i as u8)).collect(),
            true,
        );
        let err = reader.transmit_card_request(&req, ChannelControl::KeepOpen).unwrap_err();
        prop_assert!(
            matches!(err, Error::CardCommunication { .. }),
            "expected a card communication failure, got {:?}",
            err
        );
        let partial = err.into_card_response().unwrap();
        prop_assert_eq!(partial.apdu_responses().len(), k);
        prop_assert!(!partial.is_complete());
        for (i, r) in partial.apdu_responses().iter().enumerate() {
            prop_assert_eq!(r.data_out(), vec![i as u8]);
        }
    }
}
