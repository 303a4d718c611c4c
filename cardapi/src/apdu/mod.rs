// cardapi-rs/cardapi/src/apdu/mod.rs

pub mod case;
pub mod request;
pub mod response;

pub use case::ApduCase;
pub use request::ApduRequest;
pub use response::ApduResponse;
