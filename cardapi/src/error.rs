// cardapi-rs/cardapi/src/error.rs

use thiserror::Error;

use crate::card::CardResponse;

/// Failure reported by a [`Transport`](crate::transport::Transport).
///
/// Readers map these onto [`Error::ReaderCommunication`] or
/// [`Error::CardCommunication`] using [`TransportError::is_reader_failure`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Reader device unreachable or failing
    #[error("reader i/o error: {0}")]
    Reader(String),

    /// Exchange with the card failed
    #[error("card i/o error: {0}")]
    Card(String),

    /// Card left the field during the exchange
    #[error("card removed")]
    CardRemoved,

    /// No answer within the exchange timeout
    #[error("operation timed out")]
    Timeout,

    /// Response too short to hold SW1 SW2
    #[error("malformed response: {length} byte(s)")]
    MalformedResponse {
        /// Number of bytes received
        length: usize,
    },
}

impl TransportError {
    /// True when the reader device itself is unreachable; the card state is
    /// unknown in that case.
    pub fn is_reader_failure(&self) -> bool {
        matches!(self, Self::Reader(_))
    }
}

/// Result of a transport call
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied value was rejected before any exchange
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The call is not allowed in the current channel state
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The link to the reader failed. Responses collected before the failure,
    /// if any, are kept for diagnostics.
    #[error("reader communication failure: {message}")]
    ReaderCommunication {
        /// Human-readable context
        message: String,
        /// Responses received before the failure
        card_response: Option<CardResponse>,
        /// Underlying transport failure, if any
        source: Option<TransportError>,
    },

    /// The exchange with the card failed mid-batch. `card_response` holds
    /// exactly the responses received before the failing APDU.
    #[error("card communication failure: {message}")]
    CardCommunication {
        /// Human-readable context
        message: String,
        /// Responses received before the failing APDU
        card_response: CardResponse,
        /// Underlying transport failure, `None` for failures raised by the reader itself
        source: Option<TransportError>,
    },

    /// Status-code verification rejected APDU `index`. `card_response` holds
    /// responses `0..=index`.
    #[error("unexpected status code {status_code:#06x} for apdu #{index}")]
    UnexpectedStatusCode {
        /// Position of the rejected APDU in the request
        index: usize,
        /// Status word returned for that APDU
        status_code: u16,
        /// Responses up to and including the rejected one
        card_response: CardResponse,
    },
}

impl Error {
    /// Partial card response attached to the error, if any.
    pub fn card_response(&self) -> Option<&CardResponse> {
        match self {
            Self::ReaderCommunication { card_response, .. } => card_response.as_ref(),
            Self::CardCommunication { card_response, .. }
            | Self::UnexpectedStatusCode { card_response, .. } => Some(card_response),
            Self::InvalidArgument(_) | Self::InvalidState(_) => None,
        }
    }

    /// Consume the error and keep its partial card response.
    pub fn into_card_response(self) -> Option<CardResponse> {
        match self {
            Self::ReaderCommunication { card_response, .. } => card_response,
            Self::CardCommunication { card_response, .. }
            | Self::UnexpectedStatusCode { card_response, .. } => Some(card_response),
            Self::InvalidArgument(_) | Self::InvalidState(_) => None,
        }
    }

    /// Reader or card communication failure.
    pub fn is_communication_failure(&self) -> bool {
        matches!(
            self,
            Self::ReaderCommunication { .. } | Self::CardCommunication { .. }
        )
    }

    /// Failures that always carry a card response: card communication and
    /// unexpected status code.
    pub fn is_apdu_failure(&self) -> bool {
        matches!(
            self,
            Self::CardCommunication { .. } | Self::UnexpectedStatusCode { .. }
        )
    }

    /// Map a transport failure onto the reader/card taxonomy.
    pub(crate) fn from_transport(
        source: TransportError,
        message: impl Into<String>,
        card_response: CardResponse,
    ) -> Self {
        let message = message.into();
        if source.is_reader_failure() {
            Self::ReaderCommunication {
                message,
                card_response: Some(card_response),
                source: Some(source),
            }
        } else {
            Self::CardCommunication {
                message,
                card_response,
                source: Some(source),
            }
        }
    }
}

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;
