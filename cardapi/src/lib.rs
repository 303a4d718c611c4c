// cardapi-rs/cardapi/src/lib.rs

//! cardapi
//!
//! Card communication core for ISO/IEC 7816-4 smart cards: APDU value
//! objects, card requests, selection scenarios and the reader contract.
#![warn(missing_docs)]

pub mod apdu;
pub mod card;
pub mod constants;
pub mod error;
pub mod prelude;
pub mod reader;
pub mod selection;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the small types in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
