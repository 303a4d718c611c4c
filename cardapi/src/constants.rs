// cardapi-rs/cardapi/src/constants.rs
//! Common ISO/IEC 7816-4 constants used across the crate

/// Crate version as published in the package manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status word reported by a card for "normal processing, no error".
pub const SW_SUCCESS: u16 = 0x9000;

/// SW1 announcing that SW2 bytes are available through GET RESPONSE.
pub const SW1_MORE_DATA: u8 = 0x61;

/// Command header length: CLA INS P1 P2
pub const APDU_HEADER_LEN: usize = 4;

/// Shortest valid command APDU (header + P3)
pub const APDU_MIN_REQUEST_LEN: usize = 5;

/// Shortest valid response APDU (SW1 SW2)
pub const APDU_MIN_RESPONSE_LEN: usize = 2;

/// Maximum Lc for short APDUs
pub const APDU_MAX_DATA_LEN: usize = 255;

/// Inter-industry class byte
pub const CLA_ISO: u8 = 0x00;

/// SELECT instruction
pub const INS_SELECT: u8 = 0xA4;

/// SELECT P1: select by DF name (AID)
pub const SELECT_P1_BY_NAME: u8 = 0x04;

/// GET RESPONSE instruction
pub const INS_GET_RESPONSE: u8 = 0xC0;

/// Default per-APDU exchange timeout in milliseconds
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Upper bound on chained GET RESPONSE exchanges for one command
pub const GET_RESPONSE_MAX_ROUNDS: usize = 32;

/// Application identifier length bounds (ISO/IEC 7816-4 §8.2.1.2)
pub const AID_MIN_LEN: usize = 5;
/// Longest AID accepted by SELECT
pub const AID_MAX_LEN: usize = 16;
