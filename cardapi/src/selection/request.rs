use std::fmt;

use serde::Serialize;

use crate::card::{CardRequest, CardResponse};
use crate::selection::SelectionStatus;
use crate::utils::json;

/// One selection case: a card selector plus an optional card request to send
/// once the logical channel is open.
///
/// The selector is opaque here: it is stored and handed back to the reader,
/// never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSelectionRequest<S> {
    card_selector: S,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_request: Option<CardRequest>,
}

impl<S> CardSelectionRequest<S> {
    /// Select only, no follow-up APDUs.
    pub fn new(card_selector: S) -> Self {
        Self {
            card_selector,
            card_request: None,
        }
    }

    /// Select, then send `card_request` on the opened channel.
    pub fn with_card_request(card_selector: S, card_request: CardRequest) -> Self {
        Self {
            card_selector,
            card_request: Some(card_request),
        }
    }

    pub fn card_selector(&self) -> &S {
        &self.card_selector
    }

    /// Follow-up APDUs, if any
    pub fn card_request(&self) -> Option<&CardRequest> {
        self.card_request.as_ref()
    }
}

impl<S: Serialize> fmt::Display for CardSelectionRequest<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_labeled(f, "CARD_SELECTION_REQUEST", self)
    }
}

/// Result of one selection case.
///
/// `selection_status` is absent only when the case could not communicate
/// with the card at all; such a response never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSelectionResponse {
    selection_status: Option<SelectionStatus>,
    card_response: CardResponse,
}

impl CardSelectionResponse {
    /// Response for a case that reached the card.
    pub fn new(selection_status: SelectionStatus, card_response: CardResponse) -> Self {
        Self {
            selection_status: Some(selection_status),
            card_response,
        }
    }

    /// Response for a case whose selection failed to communicate.
    pub fn failed(card_response: CardResponse) -> Self {
        Self {
            selection_status: None,
            card_response,
        }
    }

    /// `None` when the selection could not communicate with the card
    pub fn selection_status(&self) -> Option<&SelectionStatus> {
        self.selection_status.as_ref()
    }

    pub fn card_response(&self) -> &CardResponse {
        &self.card_response
    }

    /// True when the selection status exists and matched
    pub fn has_matched(&self) -> bool {
        self.selection_status
            .as_ref()
            .is_some_and(SelectionStatus::has_matched)
    }
}

impl fmt::Display for CardSelectionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        json::write_labeled(f, "CARD_SELECTION_RESPONSE", self)
    }
}
