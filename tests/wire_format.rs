//! Wire format layout tests
//!
//! Blocks are assembled by hand from the documented field offsets and checked
//! against the decoder field by field.

use mcm_block_codec::constants::*;
use mcm_block_codec::{Block, DecodeError, DecodeOptions, Region, WireFormat};

/// Write `value` little-endian at `offset`
fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_u64(buf: &mut [u8], offset: usize, value: u64) {
    buf[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

fn fill(buf: &mut [u8], offset: usize, len: usize, byte: u8) {
    buf[offset..offset + len].fill(byte);
}

fn header_bytes(reward: u64) -> Vec<u8> {
    let mut buf = vec![0u8; HEADER_LEN];
    put_u32(&mut buf, 0, 2220);
    fill(&mut buf, 4, 2208, 0xA1);
    put_u64(&mut buf, 2212, reward);
    buf
}

fn entry_bytes(marker: u8) -> Vec<u8> {
    let mut buf = vec![0u8; TX_ENTRY_LEN];
    fill(&mut buf, 0, 2208, marker);
    fill(&mut buf, 2208, 2208, marker ^ 0x01);
    fill(&mut buf, 4416, 2208, marker ^ 0x02);
    put_u64(&mut buf, 6624, 1_000);
    put_u64(&mut buf, 6632, 90);
    put_u64(&mut buf, 6640, 10);
    fill(&mut buf, 6648, 2144, marker ^ 0x04);
    fill(&mut buf, 8792, 32, marker ^ 0x08);
    buf
}

fn trailer_bytes(tx_count: u32) -> Vec<u8> {
    let mut buf = vec![0u8; TRAILER_LEN];
    fill(&mut buf, 0, 32, 0x11);
    put_u64(&mut buf, 32, 0x1_0000);
    put_u64(&mut buf, 40, 500);
    put_u32(&mut buf, 48, tx_count);
    put_u32(&mut buf, 52, 1_600_000_000);
    put_u32(&mut buf, 56, 26);
    fill(&mut buf, 60, 32, 0x22);
    fill(&mut buf, 92, 32, 0x33);
    put_u32(&mut buf, 124, 1_600_000_045);
    fill(&mut buf, 128, 32, 0x44);
    buf
}

fn block_bytes(entries: &[u8]) -> Vec<u8> {
    let mut buf = header_bytes(5_000_000);
    for marker in entries {
        buf.extend(entry_bytes(*marker));
    }
    buf.extend(trailer_bytes(entries.len() as u32));
    buf
}

#[test]
fn test_format_constants() {
    assert_eq!(HEADER_LEN, 2220, "Header must be 2220 bytes");
    assert_eq!(TX_ENTRY_LEN, 8824, "Transaction entry must be 8824 bytes");
    assert_eq!(TRAILER_LEN, 160, "Trailer must be 160 bytes");
}

#[test]
fn test_one_transaction_block() {
    let bytes = block_bytes(&[0x50]);
    assert_eq!(bytes.len(), 2220 + 8824 + 160);

    let block = Block::decode(&bytes).unwrap();
    assert_eq!(block.header.length, 2220);
    assert_eq!(block.header.miner_address.as_bytes(), &[0xA1; 2208]);
    assert_eq!(block.header.miner_reward, 5_000_000);

    assert_eq!(block.body.len(), 1);
    let entry = &block.body[0];
    assert_eq!(entry.source_address.as_bytes(), &[0x50; 2208]);
    assert_eq!(entry.destination_address.as_bytes(), &[0x51; 2208]);
    assert_eq!(entry.change_address.as_bytes(), &[0x52; 2208]);
    assert_eq!(entry.send_total_value(), 1_000);
    assert_eq!(entry.change_total_value(), 90);
    assert_eq!(entry.tx_fee_value(), 10);
    assert_eq!(entry.signature.as_bytes(), &[0x54; 2144]);
    assert_eq!(entry.tx_id.as_bytes(), &[0x58; 32]);

    let trailer = &block.trailer;
    assert_eq!(trailer.previous_hash.as_bytes(), &[0x11; 32]);
    assert_eq!(trailer.block_number_value(), 0x1_0000);
    assert_eq!(trailer.miner_fee_value(), 500);
    assert_eq!(trailer.tx_count_value(), 1);
    assert_eq!(trailer.start_time_value(), 1_600_000_000);
    assert_eq!(trailer.difficulty_value(), 26);
    assert_eq!(trailer.merkle_root.as_bytes(), &[0x22; 32]);
    assert_eq!(trailer.nonce.as_bytes(), &[0x33; 32]);
    assert_eq!(trailer.solve_time_value(), 1_600_000_045);
    assert_eq!(trailer.block_hash.as_bytes(), &[0x44; 32]);

    assert_eq!(block.encode(), bytes, "Re-encoding must be byte-for-byte");
}

#[test]
fn test_zero_transaction_block() {
    let bytes = block_bytes(&[]);
    assert_eq!(bytes.len(), MIN_BLOCK_LEN);

    let block = Block::decode(&bytes).unwrap();
    assert!(block.body.is_empty());
    assert_eq!(block.trailer.encode(), &bytes[2220..2380]);
    assert_eq!(block.encode(), bytes);
}

#[test]
fn test_body_order_preserved() {
    let bytes = block_bytes(&[0x10, 0x20, 0x10, 0x30]);
    let block = Block::decode(&bytes).unwrap();

    let markers: Vec<u8> = block
        .body
        .iter()
        .map(|entry| entry.source_address.as_bytes()[0])
        .collect();
    assert_eq!(markers, vec![0x10, 0x20, 0x10, 0x30]);
    assert_eq!(block.encode(), bytes);
}

#[test]
fn test_header_tag_is_little_endian() {
    let mut bytes = block_bytes(&[]);
    // 2220 big-endian
    bytes[0..4].copy_from_slice(&[0x00, 0x00, 0x08, 0xAC]);

    match Block::decode(&bytes) {
        Err(DecodeError::InvalidHeaderTag { found, expected }) => {
            assert_eq!(found, 0xAC08_0000);
            assert_eq!(expected, 2220);
        }
        other => panic!("expected InvalidHeaderTag, got {:?}", other),
    }
}

#[test]
fn test_lenient_header_is_zeroed() {
    let mut bytes = block_bytes(&[]);
    put_u32(&mut bytes, 0, 2219);

    let block = Block::decode_with(&bytes, DecodeOptions::lenient()).unwrap();
    assert_eq!(block.header.length, 2219);
    assert!(block.header.miner_address.is_zero());
    assert_eq!(block.header.miner_reward, 0);
    assert_eq!(block.trailer.block_number_value(), 0x1_0000);
}

#[test]
fn test_trailing_partial_entry() {
    let mut bytes = header_bytes(1);
    bytes.extend(entry_bytes(0x70));
    bytes.extend(vec![0xFF; 1234]);
    bytes.extend(trailer_bytes(1));

    match Block::decode(&bytes) {
        Err(DecodeError::MisalignedBody { length, remainder }) => {
            assert_eq!(length, 8824 + 1234);
            assert_eq!(remainder, 1234);
        }
        other => panic!("expected MisalignedBody, got {:?}", other),
    }

    let block = Block::decode_with(&bytes, DecodeOptions::lenient()).unwrap();
    assert_eq!(block.body.len(), 1);
    assert_eq!(block.encode().len(), bytes.len() - 1234);
}

#[test]
fn test_short_buffers() {
    let bytes = block_bytes(&[]);

    for len in [0, 3] {
        match Block::decode(&bytes[..len]) {
            Err(DecodeError::Truncated { region, .. }) => assert_eq!(region, Region::Header),
            other => panic!("len {}: expected Truncated, got {:?}", len, other),
        }
    }

    match Block::decode(&bytes[..HEADER_LEN + 159]) {
        Err(DecodeError::Truncated {
            region,
            needed,
            available,
        }) => {
            assert_eq!(region, Region::Trailer);
            assert_eq!(needed, 2380);
            assert_eq!(available, 2379);
        }
        other => panic!("expected Truncated, got {:?}", other),
    }
}
