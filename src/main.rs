//! Mochimo block codec - command line tool
//!
//! Reads block records from a file or stdin and decodes, re-encodes or
//! inspects them.

use mcm_block_codec::{
    block::split_regions,
    config::{Config, Mode, OutputFormat},
    logging::init_logging,
    transaction::body_entry_count,
    utils::{bytes_to_hex, first_difference, hex_to_bytes},
    Block, BlockSummary, DecodeError, DecodeOptions, Error, Header, Result, APP_NAME,
    APP_VERSION,
};

use serde::Serialize;
use std::ops::Range;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, error, info};

/// Byte ranges of the regions of an encoded block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RegionReport {
    header: Range<usize>,
    body: Range<usize>,
    trailer: Range<usize>,
    transactions: usize,
    header_valid: bool,
}

impl std::fmt::Display for RegionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "header   {:>8}..{:<8} ({} bytes{})",
            self.header.start,
            self.header.end,
            self.header.len(),
            if self.header_valid { "" } else { ", bad tag" }
        )?;
        writeln!(
            f,
            "body     {:>8}..{:<8} ({} bytes, {} transactions)",
            self.body.start,
            self.body.end,
            self.body.len(),
            self.transactions
        )?;
        write!(
            f,
            "trailer  {:>8}..{:<8} ({} bytes)",
            self.trailer.start,
            self.trailer.end,
            self.trailer.len()
        )
    }
}

/// Locate header, body and trailer without decoding the entries
fn region_report(bytes: &[u8], options: DecodeOptions) -> Result<RegionReport> {
    let header = Header::decode_with(bytes, options.header)?;
    let regions = split_regions(bytes, header.length as usize)?;
    let transactions = body_entry_count(regions.body.len(), options.body)?;

    Ok(RegionReport {
        header: 0..regions.body_offset(),
        body: regions.body_offset()..regions.trailer_offset(),
        trailer: regions.trailer_offset()..regions.total_len(),
        transactions,
        header_valid: header.is_valid(),
    })
}

/// Render a decoded block in the requested format
fn render_block(block: &Block, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(block)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(block)?),
        OutputFormat::Summary => Ok(BlockSummary::from_block(block).to_string()),
    }
}

/// Parse a JSON or YAML block document and encode it
fn encode_document(text: &str, format: OutputFormat) -> Result<Vec<u8>> {
    let block: Block = match format {
        OutputFormat::Json => serde_json::from_str(text)?,
        OutputFormat::Yaml => serde_yaml::from_str(text)?,
        OutputFormat::Summary => {
            return Err(Error::config("Summary output cannot be encoded"));
        }
    };
    Ok(block.encode())
}

/// Block documents must be UTF-8; invalid bytes are an error, not replaced
fn document_text(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw)
        .map_err(|e| Error::config(format!("Block document is not valid UTF-8: {}", e)))
}

/// Decode then re-encode; the block is returned only if the bytes match exactly
fn round_trip(bytes: &[u8], options: DecodeOptions) -> Result<Block> {
    let block = Block::decode_with(bytes, options)?;
    let encoded = block.encode();

    match first_difference(bytes, &encoded) {
        Some(offset) => Err(Error::round_trip(offset, bytes.len(), encoded.len())),
        None => Ok(block),
    }
}

/// Read the raw input, stdin when no path is configured
async fn read_input(config: &Config) -> Result<Vec<u8>> {
    let raw = match config.input_path() {
        Some(path) => tokio::fs::read(path).await?,
        None => {
            let mut buffer = Vec::new();
            tokio::io::stdin().read_to_end(&mut buffer).await?;
            buffer
        }
    };
    debug!(bytes = raw.len(), "read input");
    Ok(raw)
}

/// Read block bytes, decoding hex text when configured
async fn read_block_bytes(config: &Config) -> Result<Vec<u8>> {
    let raw = read_input(config).await?;
    if !config.hex {
        return Ok(raw);
    }

    let text = std::str::from_utf8(&raw).map_err(|e| DecodeError::InvalidHex {
        field: "input",
        message: e.to_string(),
    })?;
    Ok(hex_to_bytes(text)?)
}

async fn write_output(config: &Config, data: &[u8]) -> Result<()> {
    match config.output_path() {
        Some(path) => tokio::fs::write(path, data).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(data).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

async fn write_text(config: &Config, text: &str) -> Result<()> {
    let mut data = text.as_bytes().to_vec();
    if !text.ends_with('\n') {
        data.push(b'\n');
    }
    write_output(config, &data).await
}

/// Run the configured operation
async fn run(config: &Config) -> Result<()> {
    let options = config.decode_options();

    match config.mode() {
        Mode::Decode => {
            let bytes = read_block_bytes(config).await?;
            let block = Block::decode_with(&bytes, options)?;
            info!(
                transactions = block.transaction_count(),
                block_number = block.trailer.block_number_value(),
                "decoded block"
            );
            write_text(config, &render_block(&block, config.output_format())?).await
        }
        Mode::Encode => {
            let raw = read_input(config).await?;
            let bytes = encode_document(document_text(&raw)?, config.output_format())?;
            info!(bytes = bytes.len(), "encoded block");

            if config.hex {
                write_text(config, &bytes_to_hex(&bytes)).await
            } else {
                write_output(config, &bytes).await
            }
        }
        Mode::Roundtrip => {
            let bytes = read_block_bytes(config).await?;
            let block = round_trip(&bytes, options)?;
            write_text(
                config,
                &format!(
                    "round trip ok: {} bytes, {} transactions",
                    bytes.len(),
                    block.transaction_count()
                ),
            )
            .await
        }
        Mode::Regions => {
            let bytes = read_block_bytes(config).await?;
            let report = region_report(&bytes, options)?;
            let text = match config.output_format() {
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
                OutputFormat::Yaml => serde_yaml::to_string(&report)?,
                OutputFormat::Summary => report.to_string(),
            };
            write_text(config, &text).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load and validate configuration
    let config = Config::load().await?;

    init_logging(config.log_level(), config.log_format());

    // Handle special commands
    if config.info {
        print_info();
        return Ok(());
    }

    if config.print_config {
        print_configuration(&config)?;
        return Ok(());
    }

    info!(
        mode = %config.mode(),
        header_policy = %config.decode_options().header,
        body_policy = %config.decode_options().body,
        "starting {} v{}",
        APP_NAME,
        APP_VERSION
    );

    if let Err(e) = run(&config).await {
        error!(category = e.category(), "{}", e);
        return Err(e);
    }

    Ok(())
}

/// Print basic program information
fn print_info() {
    println!("{} v{}", APP_NAME, APP_VERSION);
    println!("Byte-exact codec for block records (2220-byte header, 8824-byte entries, 160-byte trailer)");
}

/// Print current configuration
fn print_configuration(config: &Config) -> Result<()> {
    let config_yaml = serde_yaml::to_string(config)?;
    println!("{}", config_yaml);
    Ok(())
}
