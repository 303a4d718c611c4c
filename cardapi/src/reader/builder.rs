// cardapi-rs/cardapi/src/reader/builder.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::reader::local::LocalReader;
use crate::transport::Transport;
use crate::constants::DEFAULT_READ_TIMEOUT_MS;
use crate::{Error, Result};

/// Settings of a [`LocalReader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderConfig {
    /// Name used in logs
    pub name: String,
    /// Per-APDU exchange timeout handed to the transport
    pub timeout_ms: u64,
    /// Chain GET RESPONSE when a case 4 command is answered with 61xx
    pub auto_get_response: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            name: "local-reader".to_string(),
            timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            auto_get_response: true,
        }
    }
}

impl ReaderConfig {
    /// Exchange timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Helper to construct a LocalReader with optional configuration.
pub struct LocalReaderBuilder<T> {
    transport: Option<T>,
    config: ReaderConfig,
}

impl<T> Default for LocalReaderBuilder<T> {
    fn default() -> Self {
        Self {
            transport: None,
            config: ReaderConfig::default(),
        }
    }
}

impl<T: Transport> LocalReaderBuilder<T> {
    /// Builder with the default config and no transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the whole config
    pub fn config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Per-APDU exchange timeout
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.timeout_ms = timeout_ms;
        self
    }

    /// Toggle GET RESPONSE chaining on 61xx
    pub fn auto_get_response(mut self, enabled: bool) -> Self {
        self.config.auto_get_response = enabled;
        self
    }

    /// Consume the builder. Requires a transport and a non-zero timeout.
    pub fn build(self) -> Result<LocalReader<T>> {
        if self.config.timeout_ms == 0 {
            return Err(Error::InvalidArgument("timeoutMs must be positive".into()));
        }
        match self.transport {
            Some(t) => Ok(LocalReader::new(t, self.config)),
            None => Err(Error::InvalidState("no transport provided".into())),
        }
    }
}
