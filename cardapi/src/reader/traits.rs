// cardapi-rs/cardapi/src/reader/traits.rs

use crate::Result;
use crate::card::{CardRequest, CardResponse};
use crate::selection::SelectionStatus;
use crate::types::ChannelControl;

/// Reader contract used by the card-facing services.
///
/// Calls are blocking and take `&mut self`, so one reader instance never
/// runs two exchanges at once.
pub trait ProxyReader {
    /// Send every APDU of `card_request` in order and collect the responses.
    ///
    /// `channel_control` is applied after the last APDU, and also when the
    /// exchange stops early. Errors keep whatever was received:
    ///
    /// - [`Error::ReaderCommunication`](crate::Error::ReaderCommunication):
    ///   the reader link failed;
    /// - [`Error::CardCommunication`](crate::Error::CardCommunication): APDU
    ///   k failed, the k earlier responses are attached;
    /// - [`Error::UnexpectedStatusCode`](crate::Error::UnexpectedStatusCode):
    ///   verification is enabled and APDU k was rejected, responses `0..=k`
    ///   are attached.
    fn transmit_card_request(
        &mut self,
        card_request: &CardRequest,
        channel_control: ChannelControl,
    ) -> Result<CardResponse>;

    /// Close the physical channel.
    fn release_channel(&mut self) -> Result<()>;
}

/// Capability to activate the card profile described by a selector of type
/// `S`.
pub trait CardSelectionProcessor<S> {
    /// Try to select the card. A successful match leaves the logical channel
    /// open.
    fn select_card(&mut self, card_selector: &S) -> Result<SelectionStatus>;

    /// Mark the logical channel closed. The physical channel stays as is.
    fn close_logical_channel(&mut self);
}
