//! Transaction entry codec
//!
//! The body of a block is a run of fixed 8824-byte transaction entries. The
//! codec treats entries as opaque containers: amounts are not parsed and
//! signatures are not checked.

use crate::codec::{BodyPolicy, WireFormat};
use crate::constants::{
    TX_CHANGE_TOTAL_OFFSET, TX_CHG_OFFSET, TX_DST_OFFSET, TX_ENTRY_LEN, TX_FEE_OFFSET,
    TX_ID_OFFSET, TX_SEND_TOTAL_OFFSET, TX_SIG_OFFSET, TX_SRC_OFFSET,
};
use crate::error::{DecodeError, Region};
use crate::types::{Address, Hash, Signature, U64Bytes};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// One value transfer as stored in a block body
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub source_address: Address,
    pub destination_address: Address,
    pub change_address: Address,
    pub send_total: U64Bytes,
    pub change_total: U64Bytes,
    pub tx_fee: U64Bytes,
    pub signature: Signature,
    pub tx_id: Hash,
}

impl TransactionEntry {
    pub fn send_total_value(&self) -> u64 {
        self.send_total.value()
    }

    pub fn change_total_value(&self) -> u64 {
        self.change_total.value()
    }

    pub fn tx_fee_value(&self) -> u64 {
        self.tx_fee.value()
    }
}

impl WireFormat for TransactionEntry {
    const SIZE: usize = TX_ENTRY_LEN;

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < TX_ENTRY_LEN {
            return Err(DecodeError::truncated(Region::Body, TX_ENTRY_LEN, bytes.len()));
        }

        Ok(Self {
            source_address: Address::from_slice(&bytes[TX_SRC_OFFSET..TX_DST_OFFSET])?,
            destination_address: Address::from_slice(&bytes[TX_DST_OFFSET..TX_CHG_OFFSET])?,
            change_address: Address::from_slice(&bytes[TX_CHG_OFFSET..TX_SEND_TOTAL_OFFSET])?,
            send_total: U64Bytes::from_slice(&bytes[TX_SEND_TOTAL_OFFSET..TX_CHANGE_TOTAL_OFFSET])?,
            change_total: U64Bytes::from_slice(&bytes[TX_CHANGE_TOTAL_OFFSET..TX_FEE_OFFSET])?,
            tx_fee: U64Bytes::from_slice(&bytes[TX_FEE_OFFSET..TX_SIG_OFFSET])?,
            signature: Signature::from_slice(&bytes[TX_SIG_OFFSET..TX_ID_OFFSET])?,
            tx_id: Hash::from_slice(&bytes[TX_ID_OFFSET..TX_ENTRY_LEN])?,
        })
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.source_address.as_bytes());
        out.extend_from_slice(self.destination_address.as_bytes());
        out.extend_from_slice(self.change_address.as_bytes());
        out.extend_from_slice(self.send_total.as_bytes());
        out.extend_from_slice(self.change_total.as_bytes());
        out.extend_from_slice(self.tx_fee.as_bytes());
        out.extend_from_slice(self.signature.as_bytes());
        out.extend_from_slice(self.tx_id.as_bytes());
    }
}

/// Number of whole entries in a body region of `length` bytes
pub fn body_entry_count(length: usize, policy: BodyPolicy) -> Result<usize, DecodeError> {
    let remainder = length % TX_ENTRY_LEN;
    if remainder != 0 {
        match policy {
            BodyPolicy::Reject => {
                return Err(DecodeError::MisalignedBody { length, remainder });
            }
            BodyPolicy::Truncate => {
                warn!(length, remainder, "dropping trailing partial transaction entry");
            }
        }
    }
    Ok(length / TX_ENTRY_LEN)
}

/// Decode a body region into its transaction entries, preserving order
pub fn decode_body(bytes: &[u8], policy: BodyPolicy) -> Result<Vec<TransactionEntry>, DecodeError> {
    let count = body_entry_count(bytes.len(), policy)?;
    trace!(count, "decoding body");

    bytes
        .chunks_exact(TX_ENTRY_LEN)
        .take(count)
        .map(TransactionEntry::decode)
        .collect()
}

/// Encode entries back to back, preserving order
pub fn encode_body(entries: &[TransactionEntry]) -> Vec<u8> {
    let mut out = Vec::with_capacity(entries.len() * TX_ENTRY_LEN);
    for entry in entries {
        entry.encode_into(&mut out);
    }
    out
}
