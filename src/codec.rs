//! Shared codec seam and decode policies

use crate::error::DecodeError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-size region of the block wire format
pub trait WireFormat: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Decode from the first `SIZE` bytes of `bytes`
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError>;

    /// Append the encoding to `out`
    fn encode_into(&self, out: &mut Vec<u8>);

    /// Encode into a fresh buffer of exactly `SIZE` bytes
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        self.encode_into(&mut out);
        out
    }
}

/// What to do when the header length tag is not the expected constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderPolicy {
    /// Fail with `InvalidHeaderTag`
    #[default]
    Strict,
    /// Return a header with zero address and reward, keeping the tag that was read
    Lenient,
}

impl fmt::Display for HeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderPolicy::Strict => write!(f, "strict"),
            HeaderPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

/// What to do when the body is not a whole number of transaction entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyPolicy {
    /// Fail with `MisalignedBody`
    #[default]
    Reject,
    /// Drop the trailing partial record
    Truncate,
}

impl fmt::Display for BodyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyPolicy::Reject => write!(f, "reject"),
            BodyPolicy::Truncate => write!(f, "truncate"),
        }
    }
}

/// Policies applied by [`crate::Block::decode_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeOptions {
    pub header: HeaderPolicy,
    pub body: BodyPolicy,
}

impl DecodeOptions {
    /// Reject bad header tags and misaligned bodies
    pub fn strict() -> Self {
        Self {
            header: HeaderPolicy::Strict,
            body: BodyPolicy::Reject,
        }
    }

    /// Accept bad header tags and truncate misaligned bodies
    pub fn lenient() -> Self {
        Self {
            header: HeaderPolicy::Lenient,
            body: BodyPolicy::Truncate,
        }
    }

    pub fn with_header(mut self, header: HeaderPolicy) -> Self {
        self.header = header;
        self
    }

    pub fn with_body(mut self, body: BodyPolicy) -> Self {
        self.body = body;
        self
    }
}
