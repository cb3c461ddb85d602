//! Human-readable view of a decoded block
//!
//! Interprets the raw numeric trailer fields for display. Nothing here is
//! validated: a trailer whose declared transaction count disagrees with the
//! body is reported as-is.

use crate::block::Block;
use crate::types::Hash;
use crate::utils::format_bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Interpreted block fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub block_number: u64,
    pub header_valid: bool,
    pub miner_reward: u64,
    pub miner_fee: u64,
    pub transactions: usize,
    pub declared_transactions: u32,
    pub difficulty: u32,
    pub start_time: Option<DateTime<Utc>>,
    pub solve_time: Option<DateTime<Utc>>,
    pub solve_duration: Option<String>,
    pub previous_hash: Hash,
    pub merkle_root: Hash,
    pub block_hash: Hash,
    pub encoded_size: usize,
}

impl BlockSummary {
    pub fn from_block(block: &Block) -> Self {
        let trailer = &block.trailer;
        let start = trailer.start_time_value();
        let solve = trailer.solve_time_value();

        Self {
            block_number: trailer.block_number_value(),
            header_valid: block.header.is_valid(),
            miner_reward: block.header.miner_reward,
            miner_fee: trailer.miner_fee_value(),
            transactions: block.transaction_count(),
            declared_transactions: trailer.tx_count_value(),
            difficulty: trailer.difficulty_value(),
            start_time: DateTime::from_timestamp(i64::from(start), 0),
            solve_time: DateTime::from_timestamp(i64::from(solve), 0),
            solve_duration: solve.checked_sub(start).map(|secs| {
                humantime::format_duration(Duration::from_secs(u64::from(secs))).to_string()
            }),
            previous_hash: trailer.previous_hash,
            merkle_root: trailer.merkle_root,
            block_hash: trailer.block_hash,
            encoded_size: block.encoded_len(),
        }
    }

    /// Whether the trailer's declared count matches the decoded body
    pub fn counts_agree(&self) -> bool {
        self.transactions == self.declared_transactions as usize
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for BlockSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "block number:   {}", self.block_number)?;
        writeln!(f, "size:           {}", format_bytes(self.encoded_size))?;
        writeln!(f, "header valid:   {}", self.header_valid)?;
        writeln!(f, "miner reward:   {}", self.miner_reward)?;
        writeln!(f, "miner fee:      {}", self.miner_fee)?;
        write!(f, "transactions:   {}", self.transactions)?;
        if !self.counts_agree() {
            write!(f, " (trailer declares {})", self.declared_transactions)?;
        }
        writeln!(f)?;
        writeln!(f, "difficulty:     {}", self.difficulty)?;
        writeln!(f, "start time:     {}", format_time(self.start_time))?;
        writeln!(f, "solve time:     {}", format_time(self.solve_time))?;
        writeln!(
            f,
            "solve duration: {}",
            self.solve_duration.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "previous hash:  {}", self.previous_hash)?;
        writeln!(f, "merkle root:    {}", self.merkle_root)?;
        write!(f, "block hash:     {}", self.block_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;
    use crate::trailer::Trailer;
    use crate::transaction::TransactionEntry;
    use crate::types::{Address, U32Bytes, U64Bytes};

    fn block_with_times(start: u32, solve: u32, declared: u32) -> Block {
        let trailer = Trailer {
            block_number: U64Bytes::from_value(1024),
            miner_fee: U64Bytes::from_value(500),
            tx_count: U32Bytes::from_value(declared),
            start_time: U32Bytes::from_value(start),
            solve_time: U32Bytes::from_value(solve),
            difficulty: U32Bytes::from_value(20),
            ..Default::default()
        };
        Block::new(
            Header::new(Address::zero(), 5_000),
            vec![TransactionEntry::default()],
            trailer,
        )
    }

    #[test]
    fn test_summary_fields() {
        let summary = BlockSummary::from_block(&block_with_times(1_700_000_000, 1_700_000_090, 1));

        assert_eq!(summary.block_number, 1024);
        assert!(summary.header_valid);
        assert_eq!(summary.miner_reward, 5_000);
        assert_eq!(summary.miner_fee, 500);
        assert_eq!(summary.transactions, 1);
        assert!(summary.counts_agree());
        assert_eq!(summary.difficulty, 20);
        assert_eq!(summary.solve_duration.as_deref(), Some("1m 30s"));
        assert_eq!(
            summary.start_time.unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
        assert_eq!(summary.encoded_size, 2220 + 8824 + 160);
    }

    #[test]
    fn test_solve_before_start_has_no_duration() {
        let summary = BlockSummary::from_block(&block_with_times(100, 50, 1));
        assert!(summary.solve_duration.is_none());
    }

    #[test]
    fn test_display_reports_count_mismatch() {
        let summary = BlockSummary::from_block(&block_with_times(0, 0, 3));
        assert!(!summary.counts_agree());

        let report = summary.to_string();
        assert!(report.contains("transactions:   1 (trailer declares 3)"));
        assert!(report.contains("block number:   1024"));
        assert!(report.contains("size:           10.94 KB"));
    }
}
