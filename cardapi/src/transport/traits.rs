// cardapi-rs/cardapi/src/transport/traits.rs

use crate::error::TransportResult;

/// Transport trait abstracts raw card I/O away from the reader logic.
///
/// A transport owns the physical channel to one card slot. It knows nothing
/// about card requests, status-code policies or logical channels.
pub trait Transport {
    /// Whether a card currently sits in the field or slot
    fn is_card_present(&mut self) -> TransportResult<bool>;

    /// Power the card and open the physical channel
    fn open_physical_channel(&mut self) -> TransportResult<()>;

    /// Close the physical channel. Closing an already closed channel is a
    /// no-op.
    fn close_physical_channel(&mut self) -> TransportResult<()>;

    /// Whether the physical channel is currently open
    fn is_physical_channel_open(&self) -> bool;

    /// Power-on data (ATR) of the card on the open channel, if the transport
    /// provides one.
    fn power_on_data(&self) -> Option<Vec<u8>>;

    /// Send one encoded command APDU and return the raw response bytes
    fn transmit_apdu(&mut self, apdu: &[u8], timeout_ms: u64) -> TransportResult<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn is_card_present(&mut self) -> TransportResult<bool> {
        (**self).is_card_present()
    }

    fn open_physical_channel(&mut self) -> TransportResult<()> {
        (**self).open_physical_channel()
    }

    fn close_physical_channel(&mut self) -> TransportResult<()> {
        (**self).close_physical_channel()
    }

    fn is_physical_channel_open(&self) -> bool {
        (**self).is_physical_channel_open()
    }

    fn power_on_data(&self) -> Option<Vec<u8>> {
        (**self).power_on_data()
    }

    fn transmit_apdu(&mut self, apdu: &[u8], timeout_ms: u64) -> TransportResult<Vec<u8>> {
        (**self).transmit_apdu(apdu, timeout_ms)
    }
}
