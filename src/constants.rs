//! Field widths and offsets of the block wire format
//!
//! Every region is positional: no delimiters, no length prefixes apart from
//! the header's own length tag.

/// Size of an address blob in bytes
pub const TX_ADDR_LEN: usize = 2208;

/// Size of an amount field in bytes
pub const TX_AMOUNT_LEN: usize = 8;

/// Size of a transaction signature in bytes
pub const TX_SIG_LEN: usize = 2144;

/// Size of a hash in bytes
pub const HASH_LEN: usize = 32;

/// Size of the block header in bytes; also the expected value of its length tag
pub const HEADER_LEN: usize = 4 + TX_ADDR_LEN + 8;

/// Value the header length tag must carry for this format version
pub const HEADER_TAG: u32 = HEADER_LEN as u32;

/// Size of one transaction entry in bytes
pub const TX_ENTRY_LEN: usize = 3 * TX_ADDR_LEN + 3 * TX_AMOUNT_LEN + TX_SIG_LEN + HASH_LEN;

/// Size of the block trailer in bytes
pub const TRAILER_LEN: usize = HASH_LEN + 8 + 8 + 4 + 4 + 4 + HASH_LEN + HASH_LEN + 4 + HASH_LEN;

/// Smallest well-formed block: header and trailer with an empty body
pub const MIN_BLOCK_LEN: usize = HEADER_LEN + TRAILER_LEN;

// Header
pub const HEADER_TAG_OFFSET: usize = 0;
pub const HEADER_ADDR_OFFSET: usize = HEADER_TAG_OFFSET + 4;
pub const HEADER_REWARD_OFFSET: usize = HEADER_ADDR_OFFSET + TX_ADDR_LEN;

// Transaction entry
pub const TX_SRC_OFFSET: usize = 0;
pub const TX_DST_OFFSET: usize = TX_SRC_OFFSET + TX_ADDR_LEN;
pub const TX_CHG_OFFSET: usize = TX_DST_OFFSET + TX_ADDR_LEN;
pub const TX_SEND_TOTAL_OFFSET: usize = TX_CHG_OFFSET + TX_ADDR_LEN;
pub const TX_CHANGE_TOTAL_OFFSET: usize = TX_SEND_TOTAL_OFFSET + TX_AMOUNT_LEN;
pub const TX_FEE_OFFSET: usize = TX_CHANGE_TOTAL_OFFSET + TX_AMOUNT_LEN;
pub const TX_SIG_OFFSET: usize = TX_FEE_OFFSET + TX_AMOUNT_LEN;
pub const TX_ID_OFFSET: usize = TX_SIG_OFFSET + TX_SIG_LEN;

// Trailer
pub const TRAILER_PHASH_OFFSET: usize = 0;
pub const TRAILER_BNUM_OFFSET: usize = TRAILER_PHASH_OFFSET + HASH_LEN;
pub const TRAILER_MFEE_OFFSET: usize = TRAILER_BNUM_OFFSET + 8;
pub const TRAILER_TCOUNT_OFFSET: usize = TRAILER_MFEE_OFFSET + 8;
pub const TRAILER_TIME0_OFFSET: usize = TRAILER_TCOUNT_OFFSET + 4;
pub const TRAILER_DIFFICULTY_OFFSET: usize = TRAILER_TIME0_OFFSET + 4;
pub const TRAILER_MROOT_OFFSET: usize = TRAILER_DIFFICULTY_OFFSET + 4;
pub const TRAILER_NONCE_OFFSET: usize = TRAILER_MROOT_OFFSET + HASH_LEN;
pub const TRAILER_STIME_OFFSET: usize = TRAILER_NONCE_OFFSET + HASH_LEN;
pub const TRAILER_BHASH_OFFSET: usize = TRAILER_STIME_OFFSET + 4;
