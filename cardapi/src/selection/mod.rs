// cardapi-rs/cardapi/src/selection/mod.rs

//! Selection model: opening a logical channel against a card profile.
//!
//! A [`CardSelectionScenario`] lists selection cases; each case pairs an
//! opaque card selector with an optional [`CardRequest`](crate::card::CardRequest)
//! sent once the channel is open. Readers able to interpret a selector type
//! implement [`CardSelectionProcessor`](crate::reader::CardSelectionProcessor).

mod aid;
mod request;
mod scenario;
mod status;

pub use aid::AidSelector;
pub use request::{CardSelectionRequest, CardSelectionResponse};
pub use scenario::CardSelectionScenario;
pub use status::SelectionStatus;
