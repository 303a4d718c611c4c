#[path = "../common/mod.rs"]
mod common;

use cardapi::reader::CardSelectionProcessor;
use cardapi::selection::AidSelector;
use cardapi::Error;

#[test]
fn atr_only_selection() -> anyhow::Result<()> {
    let mut reader = common::helpers::reader_with(vec![]);
    let status = reader.select_card(&AidSelector::new())?;
    assert!(status.has_matched());
    assert_eq!(status.atr().unwrap().to_hex(), common::fixtures::SAMPLE_ATR_HEX);
    assert!(reader.transport().sent.is_empty());
    Ok(())
}

#[test]
fn atr_prefix_mismatch_skips_select() -> anyhow::Result<()> {
    let mut reader = common::helpers::reader_with(vec![common::fixtures::fci_ok()]);
    let selector = common::fixtures::aid_selector()
        .with_atr_prefix(&common::fixtures::hex(common::fixtures::OTHER_ATR_HEX)[..2]);
    // the two ATRs share their first byte only
    let status = reader.select_card(&selector)?;
    assert!(!status.has_matched());
    assert!(status.fci().is_none());
    assert!(reader.transport().sent.is_empty());
    Ok(())
}

#[test]
fn select_command_layout() -> anyhow::Result<()> {
    let mut reader = common::helpers::reader_with(vec![common::fixtures::fci_ok()]);
    reader.select_card(&common::fixtures::aid_selector())?;
    let mut expected = common::fixtures::hex("00 A4 04 00 08");
    expected.extend(common::fixtures::sample_aid());
    expected.push(0x00);
    assert_eq!(reader.transport().sent[0], expected);
    Ok(())
}

#[test]
fn accepted_selection_codes_widen_the_match() -> anyhow::Result<()> {
    let mut reader = common::helpers::reader_with(vec![common::fixtures::hex("6F 00 62 83")]);
    let selector = common::fixtures::aid_selector()
        .with_successful_selection_status_codes([0x9000, 0x6283])?;
    let status = reader.select_card(&selector)?;
    assert!(status.has_matched());
    assert!(reader.is_logical_channel_open());
    Ok(())
}

#[test]
fn invalid_aid_is_rejected() {
    assert!(matches!(
        AidSelector::new().with_aid(&[0xA0, 0x00]),
        Err(Error::InvalidArgument(_))
    ));
}
