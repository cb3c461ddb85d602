//! Block assembly and disassembly
//!
//! A block is `header || entry* || trailer`. The header's length tag marks
//! where the body starts, the trailer is always the last 160 bytes, and the
//! body is everything in between.

use crate::codec::{DecodeOptions, WireFormat};
use crate::constants::{HEADER_LEN, TRAILER_LEN, TX_ENTRY_LEN};
use crate::error::{DecodeError, Region};
use crate::header::Header;
use crate::trailer::Trailer;
use crate::transaction::{decode_body, TransactionEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decoded block: header, ordered transaction entries and trailer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub body: Vec<TransactionEntry>,
    pub trailer: Trailer,
}

/// Borrowed views of the three regions of an encoded block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRegions<'a> {
    pub header: &'a [u8],
    pub body: &'a [u8],
    pub trailer: &'a [u8],
}

impl BlockRegions<'_> {
    /// Offset of the first body byte
    pub fn body_offset(&self) -> usize {
        self.header.len()
    }

    /// Offset of the first trailer byte
    pub fn trailer_offset(&self) -> usize {
        self.header.len() + self.body.len()
    }

    /// Total length of the underlying buffer
    pub fn total_len(&self) -> usize {
        self.trailer_offset() + self.trailer.len()
    }
}

/// Split `bytes` into header, body and trailer given the header length
pub fn split_regions(bytes: &[u8], header_len: usize) -> Result<BlockRegions<'_>, DecodeError> {
    let needed = header_len.saturating_add(TRAILER_LEN);
    if bytes.len() < needed {
        return Err(DecodeError::truncated(Region::Trailer, needed, bytes.len()));
    }

    let trailer_offset = bytes.len() - TRAILER_LEN;
    Ok(BlockRegions {
        header: &bytes[..header_len],
        body: &bytes[header_len..trailer_offset],
        trailer: &bytes[trailer_offset..],
    })
}

impl Block {
    pub fn new(header: Header, body: Vec<TransactionEntry>, trailer: Trailer) -> Self {
        Self {
            header,
            body,
            trailer,
        }
    }

    /// Decode with strict header and body policies
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_with(bytes, DecodeOptions::default())
    }

    /// Decode with explicit policies
    pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Result<Self, DecodeError> {
        let header = Header::decode_with(bytes, options.header)?;
        let regions = split_regions(bytes, header.length as usize)?;
        let body = decode_body(regions.body, options.body)?;
        let trailer = Trailer::decode(regions.trailer)?;

        debug!(
            size = bytes.len(),
            transactions = body.len(),
            block_number = trailer.block_number_value(),
            "decoded block"
        );

        Ok(Self {
            header,
            body,
            trailer,
        })
    }

    /// Encode header, every entry in order, then trailer
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.header.encode_into(&mut out);
        for entry in &self.body {
            entry.encode_into(&mut out);
        }
        self.trailer.encode_into(&mut out);
        out
    }

    /// Size of [`Block::encode`] output in bytes
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.body.len() * TX_ENTRY_LEN + TRAILER_LEN
    }

    pub fn transaction_count(&self) -> usize {
        self.body.len()
    }
}

/// Decode a complete block with the default strict policies
pub fn decode_block(bytes: &[u8]) -> Result<Block, DecodeError> {
    Block::decode(bytes)
}

/// Encode a complete block
pub fn encode_block(block: &Block) -> Vec<u8> {
    block.encode()
}
