#[path = "../common/mod.rs"]
mod common;

use cardapi::apdu::{ApduCase, ApduRequest};
use cardapi::Error;
use proptest::prelude::*;

#[test]
fn case1_header_only() {
    let r = ApduRequest::new(0x00, 0xA4, 0x04, 0x00, None, None).unwrap();
    assert_eq!(r.bytes(), &common::fixtures::hex("00 A4 04 00 00")[..]);
    assert!(!r.is_case4());
    assert_eq!(r.case(), Some(ApduCase::Case1));
}

#[test]
fn case2_with_le() {
    let r = ApduRequest::new(0x00, 0xB0, 0x00, 0x00, None, Some(0x10)).unwrap();
    assert_eq!(r.bytes(), &common::fixtures::hex("00 B0 00 00 10")[..]);
    assert!(!r.is_case4());
}

#[test]
fn case3_with_data() {
    let r = common::fixtures::update_binary(&[0xAA, 0xBB]);
    assert_eq!(r.bytes(), &common::fixtures::hex("00 D6 00 00 02 AA BB")[..]);
    assert!(!r.is_case4());
    assert_eq!(r.case(), Some(ApduCase::Case3));
}

#[test]
fn case4_with_data_and_le_zero() {
    let data = [0xA0, 0x00, 0x00, 0x01];
    let r = ApduRequest::new(0x00, 0xA4, 0x04, 0x00, Some(&data[..]), Some(0)).unwrap();
    assert_eq!(
        r.bytes(),
        &common::fixtures::hex("00 A4 04 00 04 A0 00 00 01 00")[..]
    );
    assert!(r.is_case4());
}

#[test]
fn case4_with_nonzero_le_is_illegal() {
    let data = [0xA0, 0x00, 0x00, 0x01];
    let res = ApduRequest::new(0x00, 0xA4, 0x04, 0x00, Some(&data[..]), Some(0x10));
    assert!(matches!(res, Err(Error::InvalidArgument(_))));
}

#[test]
fn raw_buffer_constructor() -> anyhow::Result<()> {
    let r = ApduRequest::from_bytes(common::fixtures::hex("00 B0 00 00 00"), false)?;
    assert_eq!(r.ins(), 0xB0);
    assert!(ApduRequest::from_bytes(vec![0x00, 0xB0, 0x00, 0x00], false).is_err());

    let select = ApduRequest::from_bytes(common::fixtures::hex("00 A4 04 00 02 3F 00 00"), true)?;
    assert!(select.is_case4());
    // flagged case 4 but missing the trailing Le
    assert!(ApduRequest::from_bytes(common::fixtures::hex("00 A4 04 00 02 3F 00"), true).is_err());
    Ok(())
}

#[test]
fn successful_status_codes_override_default() -> anyhow::Result<()> {
    let r = common::fixtures::read_binary(0).with_successful_status_codes([0x9000, 0x6282])?;
    assert!(r.is_successful(0x6282));
    assert!(!r.is_successful(0x6A82));
    assert!(common::fixtures::read_binary(0).is_successful(0x9000));
    assert!(!common::fixtures::read_binary(0).is_successful(0x6282));
    Ok(())
}

#[test]
fn display_is_labeled_json() {
    let r = common::fixtures::read_binary(4);
    let s = r.to_string();
    assert!(s.starts_with("APDU_REQUEST = {"));
    assert!(s.contains(r#""bytes":"00B0000400""#));
    assert!(s.contains(r#""name":"Read Binary""#));
}

proptest! {
    #[test]
    fn case_follows_data_and_le(
        header in any::<[u8; 4]>(),
        data in prop::option::of(prop::collection::vec(any::<u8>(), 1..=255)),
        le in prop::option::of(any::<u8>()),
    ) {
        let [cla, ins, p1, p2] = header;
        let res = ApduRequest::new(cla, ins, p1, p2, data.as_deref(), le);
        match (&data, le) {
            (Some(_), Some(le)) if le != 0 => prop_assert!(res.is_err()),
            (Some(d), le) => {
                let r = res.unwrap();
                prop_assert_eq!(r.bytes()[4] as usize, d.len());
                prop_assert_eq!(&r.bytes()[5..5 + d.len()], &d[..]);
                prop_assert_eq!(r.is_case4(), le == Some(0));
                prop_assert_eq!(r.bytes().len(), 5 + d.len() + usize::from(le.is_some()));
            }
            (None, le) => {
                let r = res.unwrap();
                prop_assert!(!r.is_case4());
                prop_assert_eq!(r.bytes(), &[cla, ins, p1, p2, le.unwrap_or(0)][..]);
            }
        }
    }
}

#[test]
fn value_objects_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApduRequest>();
    assert_send_sync::<cardapi::apdu::ApduResponse>();
    assert_send_sync::<cardapi::card::CardRequest>();
    assert_send_sync::<cardapi::card::CardResponse>();
    assert_send_sync::<cardapi::selection::CardSelectionScenario<cardapi::selection::AidSelector>>();
    assert_send_sync::<Error>();
}
