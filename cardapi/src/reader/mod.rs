// cardapi-rs/cardapi/src/reader/mod.rs

pub mod builder;
pub mod local;
pub mod traits;

pub use builder::{LocalReaderBuilder, ReaderConfig};
pub use local::LocalReader;
pub use traits::{CardSelectionProcessor, ProxyReader};
