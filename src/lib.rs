//! Mochimo Block Codec
//!
//! Canonical binary encoding of a block record and its in-memory form:
//! - Header: 2220 bytes (length tag, miner address, reward)
//! - Body: any number of fixed 8824-byte transaction entries
//! - Trailer: 160 bytes (hashes, counters, timing, nonce, difficulty)
//!
//! Decoding is a pure function over an in-memory buffer. Malformed input is
//! reported through [`DecodeError`]; the header tag and body alignment checks
//! follow the policies in [`DecodeOptions`].

pub mod block;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod header;
pub mod logging;
pub mod summary;
pub mod trailer;
pub mod transaction;
pub mod types;
pub mod utils;

pub use block::{decode_block, encode_block, split_regions, Block, BlockRegions};
pub use codec::{BodyPolicy, DecodeOptions, HeaderPolicy, WireFormat};
pub use config::Config;
pub use error::{DecodeError, Error, Region, Result};
pub use header::Header;
pub use summary::BlockSummary;
pub use trailer::Trailer;
pub use transaction::{decode_body, encode_body, TransactionEntry};
pub use types::*;

/// Application information
pub const APP_NAME: &str = "mcm-block";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
