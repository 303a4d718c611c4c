// cardapi-rs/cardapi/src/card/mod.rs

mod request;
mod response;

pub use request::CardRequest;
pub use response::CardResponse;
