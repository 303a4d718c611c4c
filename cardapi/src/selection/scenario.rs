use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::card::CardResponse;
use crate::reader::{CardSelectionProcessor, ProxyReader};
use crate::selection::{CardSelectionRequest, CardSelectionResponse};
use crate::types::{ChannelControl, MultiSelectionProcessing};
use crate::utils::{json, validate};
use crate::{Error, Result};

/// Ordered selection cases plus the policies applied while walking them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSelectionScenario<S> {
    card_selection_requests: Vec<CardSelectionRequest<S>>,
    multi_selection_processing: MultiSelectionProcessing,
    channel_control: ChannelControl,
}

impl<S> CardSelectionScenario<S> {
    /// At least one selection case is required.
    pub fn new(
        card_selection_requests: Vec<CardSelectionRequest<S>>,
        multi_selection_processing: MultiSelectionProcessing,
        channel_control: ChannelControl,
    ) -> Result<Self> {
        validate::not_empty(&card_selection_requests, "cardSelectionRequests")?;
        Ok(Self {
            card_selection_requests,
            multi_selection_processing,
            channel_control,
        })
    }

    /// Cases in processing order
    pub fn card_selection_requests(&self) -> &[CardSelectionRequest<S>] {
        &self.card_selection_requests
    }

    pub fn multi_selection_processing(&self) -> MultiSelectionProcessing {
        self.multi_selection_processing
    }

    /// What happens to the channel once the scenario ends
    pub fn channel_control(&self) -> ChannelControl {
        self.channel_control
    }

    /// Run the cases against `reader`, in order.
    ///
    /// Returns one response per attempted case. With
    /// [`MultiSelectionProcessing::FirstMatch`] the walk stops after the first
    /// match and that channel stays open for the caller; with
    /// [`MultiSelectionProcessing::ProcessAll`] the logical channel is closed
    /// between cases. [`ChannelControl::CloseAfter`] releases the physical
    /// channel once the walk is over.
    ///
    /// Communication failures are recorded in the affected case's response.
    /// Argument and state errors abort the walk; `CloseAfter` still releases
    /// the channel before the error is returned. A failed release is logged
    /// and the collected responses are returned anyway.
    pub fn process<R>(&self, reader: &mut R) -> Result<Vec<CardSelectionResponse>>
    where
        R: ProxyReader + CardSelectionProcessor<S>,
    {
        let outcome = self.walk(reader);
        if self.channel_control == ChannelControl::CloseAfter {
            if let Err(e) = reader.release_channel() {
                warn!("failed to release the channel after selection: {}", e);
            }
        }
        outcome
    }

    fn walk<R>(&self, reader: &mut R) -> Result<Vec<CardSelectionResponse>>
    where
        R: ProxyReader + CardSelectionProcessor<S>,
    {
        let mut responses = Vec::with_capacity(self.card_selection_requests.len());
        let last = self.card_selection_requests.len() - 1;

        for (index, case) in self.card_selection_requests.iter().enumerate() {
            let response = Self::process_case(reader, case)?;
            let matched = response.has_matched();
            debug!(
                "selection case #{}: {}",
                index,
                if matched { "matched" } else { "no match" }
            );
            responses.push(response);

            if matched {
                match self.multi_selection_processing {
                    MultiSelectionProcessing::FirstMatch => break,
                    MultiSelectionProcessing::ProcessAll if index < last => {
                        reader.close_logical_channel()
                    }
                    MultiSelectionProcessing::ProcessAll => {}
                }
            }
        }
        Ok(responses)
    }

    fn process_case<R>(
        reader: &mut R,
        case: &CardSelectionRequest<S>,
    ) -> Result<CardSelectionResponse>
    where
        R: ProxyReader + CardSelectionProcessor<S>,
    {
        let status = match reader.select_card(case.card_selector()) {
            Ok(status) => status,
            Err(e) if e.is_communication_failure() => {
                warn!("selection failed to communicate: {}", e);
                return Ok(CardSelectionResponse::failed(partial_response(e)));
            }
            Err(e) => return Err(e),
        };

        if !status.has_matched() {
            reader.close_logical_channel();
            return Ok(CardSelectionResponse::new(status, CardResponse::empty(false)));
        }

        let Some(card_request) = case.card_request() else {
            return Ok(CardSelectionResponse::new(status, CardResponse::empty(true)));
        };

        match reader.transmit_card_request(card_request, ChannelControl::KeepOpen) {
            Ok(card_response) => Ok(CardSelectionResponse::new(status, card_response)),
            Err(e @ Error::UnexpectedStatusCode { .. }) => {
                debug!("selection follow-up stopped: {}", e);
                Ok(CardSelectionResponse::new(status, partial_response(e)))
            }
            Err(e) if e.is_communication_failure() => {
                warn!("selection follow-up failed: {}", e);
                Ok(CardSelectionResponse::new(
                    status.into_unmatched(),
                    partial_response(e),
                ))
            }
            Err(e) => Err(e),
        }
    }
}

fn partial_response(error: Error) -> CardResponse {
    error
        .into_card_response()
        .unwrap_or_else(|| CardResponse::new(Vec::new(), false, false))
}

impl<S: Serialize> fmt::Display for CardSelectionScenario<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_labeled(f, "CARD_SELECTION_SCENARIO", self)
    }
}
