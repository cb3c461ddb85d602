//! Configuration management for the block tool
//!
//! Supports configuration via command line arguments, environment variables
//! and configuration files (YAML/JSON). Values given on the command line take
//! precedence over the file; the file fills in whatever was left unset.

use crate::codec::{BodyPolicy, DecodeOptions, HeaderPolicy};
use crate::logging::{LogFormat, LogLevel};
use crate::{Error, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Operations supported by the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Decode block bytes and print them
    #[default]
    Decode,
    /// Encode a JSON/YAML block document into block bytes
    Encode,
    /// Decode, re-encode and compare with the input
    Roundtrip,
    /// Print the byte ranges of header, body and trailer
    Regions,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Decode => write!(f, "decode"),
            Mode::Encode => write!(f, "encode"),
            Mode::Roundtrip => write!(f, "roundtrip"),
            Mode::Regions => write!(f, "regions"),
        }
    }
}

/// Document format for decoded output (and encode input)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    /// Human-readable report
    Summary,
}

/// Complete configuration for the block tool
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(
    name = "mcm-block",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mochimo block codec",
    long_about = "Decode, encode and inspect binary block records (header, transaction entries, trailer)"
)]
pub struct Config {
    /// Print program info and exit
    #[arg(long)]
    #[serde(default)]
    pub info: bool,

    /// Print the parsed configuration and exit
    #[arg(long)]
    #[serde(default)]
    pub print_config: bool,

    /// Configuration file path (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,

    /// Operation to perform [default: decode]
    #[arg(short = 'm', long)]
    pub mode: Option<Mode>,

    /// Input file; stdin when absent or "-"
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file; stdout when absent
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Block bytes are read and written as hex text
    #[arg(short = 'x', long)]
    #[serde(default)]
    pub hex: bool,

    /// Output document format [default: summary]
    #[arg(short = 'f', long)]
    pub format: Option<OutputFormat>,

    /// Handling of a wrong header length tag [default: strict]
    #[arg(long, env = "MCM_BLOCK_HEADER_POLICY")]
    pub header_policy: Option<HeaderPolicy>,

    /// Handling of a body that is not a whole number of entries [default: reject]
    #[arg(long, env = "MCM_BLOCK_BODY_POLICY")]
    pub body_policy: Option<BodyPolicy>,

    /// Log level [default: info]
    #[arg(short = 'l', long, env = "MCM_BLOCK_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Log output format [default: text]
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Parse the command line, then layer the config file if specified
    pub async fn load() -> Result<Self> {
        Self::parse().resolve().await
    }

    /// Merge the config file (if any) into parsed arguments and validate
    pub async fn resolve(mut self) -> Result<Self> {
        if let Some(config_file) = self.config_file.clone() {
            let file_config = Self::load_from_file(&config_file).await?;
            self = self.merge_with_file(file_config);
        }

        self.validate()?;
        Ok(self)
    }

    /// Load configuration from file
    async fn load_from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;

        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&content).map_err(Error::from)
        } else {
            // Default to YAML
            serde_yaml::from_str(&content).map_err(Error::from)
        }
    }

    /// Merge CLI config with file config (CLI takes precedence)
    fn merge_with_file(mut self, file_config: Self) -> Self {
        if self.mode.is_none() {
            self.mode = file_config.mode;
        }

        if self.input.is_none() {
            self.input = file_config.input;
        }

        if self.output.is_none() {
            self.output = file_config.output;
        }

        if self.format.is_none() {
            self.format = file_config.format;
        }

        if self.header_policy.is_none() {
            self.header_policy = file_config.header_policy;
        }

        if self.body_policy.is_none() {
            self.body_policy = file_config.body_policy;
        }

        if !self.hex {
            self.hex = file_config.hex;
        }

        if self.log_level.is_none() {
            self.log_level = file_config.log_level;
        }

        if self.log_format.is_none() {
            self.log_format = file_config.log_format;
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.mode() == Mode::Encode && self.output_format() == OutputFormat::Summary {
            return Err(Error::config(
                "Encode mode reads a JSON or YAML block document; use --format json or --format yaml",
            ));
        }

        if let (Some(input), Some(output)) = (&self.input, &self.output) {
            if input == output && input.as_os_str() != "-" {
                return Err(Error::config("Input and output must be different files"));
            }
        }

        Ok(())
    }

    /// Operation resolved against its default
    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_default()
    }

    /// Log level resolved against its default
    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or(LogLevel::Info)
    }

    /// Log format resolved against its default
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_default()
    }

    /// Decode policies resolved against their defaults
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            header: self.header_policy.unwrap_or_default(),
            body: self.body_policy.unwrap_or_default(),
        }
    }

    /// Output format resolved against its default
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Summary)
    }

    /// Input path, `None` meaning stdin
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }

    /// Output path, `None` meaning stdout
    pub fn output_path(&self) -> Option<&Path> {
        self.output
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}
