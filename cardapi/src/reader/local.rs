// cardapi-rs/cardapi/src/reader/local.rs

use log::{debug, trace, warn};

use crate::apdu::{ApduRequest, ApduResponse};
use crate::card::{CardRequest, CardResponse};
use crate::constants::{CLA_ISO, GET_RESPONSE_MAX_ROUNDS, INS_GET_RESPONSE, SW1_MORE_DATA};
use crate::error::{TransportError, TransportResult};
use crate::reader::builder::ReaderConfig;
use crate::reader::traits::{CardSelectionProcessor, ProxyReader};
use crate::selection::{AidSelector, SelectionStatus};
use crate::transport::Transport;
use crate::types::{AnswerToReset, ChannelControl};
use crate::utils::{bytes_to_hex_spaced, validate};
use crate::{Error, Result};

/// Reader driving one card slot through a [`Transport`].
///
/// The logical channel is opened by a successful
/// [`select_card`](CardSelectionProcessor::select_card) and closed by
/// [`ChannelControl::CloseAfter`], [`ProxyReader::release_channel`] or any
/// communication failure.
pub struct LocalReader<T: Transport = Box<dyn Transport>> {
    transport: T,
    config: ReaderConfig,
    logical_channel_open: bool,
}

impl<T: Transport> LocalReader<T> {
    /// Wrap a transport. Both channels start closed; nothing is sent until
    /// the first selection.
    pub fn new(transport: T, config: ReaderConfig) -> Self {
        Self {
            transport,
            config,
            logical_channel_open: false,
        }
    }

    /// Reader name from the config
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport, used by tests to queue responses.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the reader and return the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// True between a matched selection and the next close
    pub fn is_logical_channel_open(&self) -> bool {
        self.logical_channel_open
    }

    pub fn is_physical_channel_open(&self) -> bool {
        self.transport.is_physical_channel_open()
    }

    /// Ask the transport whether a card is in the slot. A transport failure
    /// is reported as `ReaderCommunication`.
    pub fn is_card_present(&mut self) -> Result<bool> {
        self.transport
            .is_card_present()
            .map_err(|source| Error::ReaderCommunication {
                message: format!("card presence check failed on '{}'", self.config.name),
                card_response: None,
                source: Some(source),
            })
    }

    fn open_physical_channel_if_needed(&mut self) -> Result<()> {
        if self.transport.is_physical_channel_open() {
            return Ok(());
        }
        debug!("[{}] opening physical channel", self.config.name);
        self.transport.open_physical_channel().map_err(|source| {
            Error::from_transport(
                source,
                "failed to open the physical channel",
                CardResponse::new(Vec::new(), false, false),
            )
        })
    }

    fn close_channels(&mut self) -> TransportResult<()> {
        self.logical_channel_open = false;
        debug!("[{}] closing physical channel", self.config.name);
        self.transport.close_physical_channel()
    }

    /// Close both channels after a failure. A close error is only logged.
    fn close_channels_silently(&mut self) {
        if let Err(e) = self.close_channels() {
            warn!("[{}] failed to close the physical channel: {}", self.config.name, e);
        }
    }

    /// Send one command and, for case 4 commands, drain any pending
    /// response data.
    fn exchange(&mut self, request: &ApduRequest) -> TransportResult<ApduResponse> {
        let response = self.transmit_raw(request.bytes(), request.name())?;
        if self.config.auto_get_response
            && request.is_case4()
            && response.sw1() == SW1_MORE_DATA
        {
            return self.drain_get_response(response);
        }
        Ok(response)
    }

    fn transmit_raw(&mut self, apdu: &[u8], label: Option<&str>) -> TransportResult<ApduResponse> {
        trace!(
            "[{}] {} >> {}",
            self.config.name,
            label.unwrap_or("apdu"),
            bytes_to_hex_spaced(apdu)
        );
        let raw = self.transport.transmit_apdu(apdu, self.config.timeout_ms)?;
        trace!("[{}] << {}", self.config.name, bytes_to_hex_spaced(&raw));
        let length = raw.len();
        ApduResponse::new(raw).map_err(|_| TransportError::MalformedResponse { length })
    }

    /// Follow a `61xx` chain with GET RESPONSE, concatenating the data parts.
    /// The final status word is the one of the last exchange.
    fn drain_get_response(&mut self, first: ApduResponse) -> TransportResult<ApduResponse> {
        let mut data = first.data_out();
        let mut current = first;
        let mut rounds = 0;
        while current.sw1() == SW1_MORE_DATA {
            if rounds == GET_RESPONSE_MAX_ROUNDS {
                return Err(TransportError::Card(format!(
                    "GET RESPONSE chain exceeded {} rounds",
                    GET_RESPONSE_MAX_ROUNDS
                )));
            }
            rounds += 1;
            let get_response = [CLA_ISO, INS_GET_RESPONSE, 0x00, 0x00, current.sw2()];
            current = self.transmit_raw(&get_response, Some("Get Response"))?;
            data.extend_from_slice(current.data());
        }
        debug!(
            "[{}] collected {} byte(s) through {} GET RESPONSE exchange(s)",
            self.config.name,
            data.len(),
            rounds
        );
        data.extend_from_slice(&[current.sw1(), current.sw2()]);
        let length = data.len();
        ApduResponse::new(data).map_err(|_| TransportError::MalformedResponse { length })
    }

    /// Apply channel control after an exchange cut short by a status code
    /// check. Returns whether the logical channel is still open.
    fn finish_silently(&mut self, channel_control: ChannelControl) -> bool {
        if channel_control == ChannelControl::CloseAfter {
            self.close_channels_silently();
        }
        self.logical_channel_open
    }
}

impl<T: Transport> ProxyReader for LocalReader<T> {
    fn transmit_card_request(
        &mut self,
        card_request: &CardRequest,
        channel_control: ChannelControl,
    ) -> Result<CardResponse> {
        validate::not_empty(card_request.apdu_requests(), "cardRequest.apduRequests")?;
        if !self.logical_channel_open {
            return Err(Error::InvalidState(format!(
                "no logical channel open on reader '{}'",
                self.config.name
            )));
        }
        debug!(
            "[{}] transmitting {} apdu(s), {}",
            self.config.name,
            card_request.len(),
            channel_control
        );

        let mut responses = Vec::with_capacity(card_request.len());
        for (index, request) in card_request.apdu_requests().iter().enumerate() {
            let response = match self.exchange(request) {
                Ok(response) => response,
                Err(source) => {
                    warn!("[{}] apdu #{} failed: {}", self.config.name, index, source);
                    self.close_channels_silently();
                    return Err(Error::from_transport(
                        source,
                        format!("apdu #{} failed", index),
                        CardResponse::new(responses, false, false),
                    ));
                }
            };
            let status_code = response.status_code();
            responses.push(response);

            if card_request.is_status_codes_verification_enabled()
                && !request.is_successful(status_code)
            {
                warn!(
                    "[{}] apdu #{} rejected with status {:04X}",
                    self.config.name, index, status_code
                );
                let open = self.finish_silently(channel_control);
                return Err(Error::UnexpectedStatusCode {
                    index,
                    status_code,
                    card_response: CardResponse::new(responses, open, false),
                });
            }
        }

        match channel_control {
            ChannelControl::KeepOpen => Ok(CardResponse::new(responses, true, true)),
            ChannelControl::CloseAfter => match self.close_channels() {
                Ok(()) => Ok(CardResponse::new(responses, false, true)),
                Err(source) => Err(Error::ReaderCommunication {
                    message: "failed to release the channel after the exchange".into(),
                    card_response: Some(CardResponse::new(responses, false, true)),
                    source: Some(source),
                }),
            },
        }
    }

    fn release_channel(&mut self) -> Result<()> {
        self.close_channels()
            .map_err(|source| Error::ReaderCommunication {
                message: "failed to release the channel".into(),
                card_response: None,
                source: Some(source),
            })
    }
}

impl<T: Transport> CardSelectionProcessor<AidSelector> for LocalReader<T> {
    fn select_card(&mut self, card_selector: &AidSelector) -> Result<SelectionStatus> {
        self.open_physical_channel_if_needed()?;

        // An ATR shorter than TS T0 is treated as absent
        let atr = self
            .transport
            .power_on_data()
            .and_then(|bytes| AnswerToReset::new(bytes).ok());

        if !card_selector.accepts_atr(atr.as_ref()) {
            debug!("[{}] ATR rejected by the selector", self.config.name);
            self.logical_channel_open = false;
            return match atr {
                Some(_) => SelectionStatus::new(atr, None, false),
                None => Err(missing_power_on_data("no power-on data to filter on")),
            };
        }

        let (fci, has_matched) = match card_selector.select_apdu().transpose()? {
            None if atr.is_none() => {
                self.logical_channel_open = false;
                return Err(missing_power_on_data(
                    "no power-on data and no SELECT to identify the card",
                ));
            }
            None => (None, true),
            Some(select) => {
                let fci = match self.exchange(&select) {
                    Ok(fci) => fci,
                    Err(source) => {
                        warn!("[{}] SELECT failed: {}", self.config.name, source);
                        self.close_channels_silently();
                        return Err(Error::from_transport(
                            source,
                            "SELECT failed",
                            CardResponse::new(Vec::new(), false, false),
                        ));
                    }
                };
                let matched = card_selector.accepts_status_code(fci.status_code());
                (Some(fci), matched)
            }
        };

        let status = SelectionStatus::new(atr, fci, has_matched)?;
        debug!(
            "[{}] selection {}",
            self.config.name,
            if has_matched { "matched" } else { "did not match" }
        );
        self.logical_channel_open = has_matched;
        Ok(status)
    }

    fn close_logical_channel(&mut self) {
        self.logical_channel_open = false;
    }
}

/// Selection outcome for a card that cannot be described by either ATR or
/// FCI. Reported as a card failure so a scenario records it and moves on.
fn missing_power_on_data(message: &str) -> Error {
    Error::CardCommunication {
        message: message.into(),
        card_response: CardResponse::new(Vec::new(), false, false),
        source: None,
    }
}
