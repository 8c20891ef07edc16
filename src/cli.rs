// src/cli.rs

use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

use crate::core::error::{ToolError, ToolResult};
use crate::core::tools::ToolRequest;
use crate::core::tools::cipher::{Algorithm, Mode};
use crate::core::tools::phishing::ContentKind;
use crate::core::tools::port_scan::ScanType;
use crate::core::tools::stego::StegoOperation;

/// VR Tools - a terminal toolkit of simulated security tools for training.
///
/// Run without a subcommand to open the interactive dashboard. All network
/// results are simulated; nothing is sent anywhere.
#[derive(Parser, Debug)]
#[command(name = "vr-tools")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Fixed RNG seed for repeatable simulated results
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Skip the simulated analysis delay
    #[arg(long, global = true)]
    pub no_delay: bool,

    /// Print the report as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write the text report to the export directory
    #[arg(long, global = true)]
    pub export: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available tools, or show one by its route slug
    Tools { slug: Option<String> },

    /// Score a URL or a message for phishing indicators
    Phishing {
        /// The URL or text to analyze
        content: String,
        #[arg(long, value_enum, default_value_t = ContentArg::Url)]
        kind: ContentArg,
    },

    /// Generate lookalike links for awareness training
    Lookalike { url: String },

    /// Analyze raw email headers (reads stdin when no file is given)
    EmailHeaders { file: Option<PathBuf> },

    /// Simulate a port scan of a host
    PortScan {
        target: String,
        #[arg(long = "type", value_enum, default_value_t = ScanArg::Basic)]
        scan_type: ScanArg,
    },

    /// Encrypt or decrypt text with one of the demo algorithms
    Cipher {
        text: String,
        #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Aes)]
        algorithm: AlgorithmArg,
        #[arg(short, long, value_enum, default_value_t = ModeArg::Encrypt)]
        mode: ModeArg,
        /// Required for AES
        #[arg(short, long, default_value = "")]
        password: String,
    },

    /// Generate a demo RSA key pair
    Keygen,

    /// Hide or extract a message in a PNG or JPEG image
    Stego {
        #[command(subcommand)]
        action: StegoAction,
    },

    /// Check an email address against known breaches
    Breach { email: String },

    /// Look up DNS records, WHOIS and reputation for a domain
    Dns {
        domain: String,
        /// Print only the records, one `TYPE NAME VALUE TTL [PRIORITY]` line each
        #[arg(long)]
        records: bool,
    },

    /// Show IP details (your own when no address is given)
    Ip { address: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum StegoAction {
    Encode {
        image: PathBuf,
        #[arg(short, long)]
        message: String,
        #[arg(short, long)]
        passphrase: String,
    },
    Decode {
        image: PathBuf,
        #[arg(short, long)]
        passphrase: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ContentArg {
    Url,
    Text,
}

impl From<ContentArg> for ContentKind {
    fn from(arg: ContentArg) -> Self {
        match arg {
            ContentArg::Url => ContentKind::Url,
            ContentArg::Text => ContentKind::Text,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ScanArg {
    Basic,
    Advanced,
}

impl From<ScanArg> for ScanType {
    fn from(arg: ScanArg) -> Self {
        match arg {
            ScanArg::Basic => ScanType::Basic,
            ScanArg::Advanced => ScanType::Advanced,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum AlgorithmArg {
    Aes,
    Base64,
    Rsa,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Aes => Algorithm::Aes,
            AlgorithmArg::Base64 => Algorithm::Base64,
            AlgorithmArg::Rsa => Algorithm::Rsa,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Encrypt,
    Decrypt,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Encrypt => Mode::Encrypt,
            ModeArg::Decrypt => Mode::Decrypt,
        }
    }
}

fn read_headers(file: Option<&PathBuf>) -> ToolResult<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|source| ToolError::Io {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|source| ToolError::Io { path: "<stdin>".to_string(), source })?;
            Ok(raw)
        }
    }
}

impl Command {
    /// Builds the validated request, or `None` for commands that run no tool.
    pub fn to_request(&self) -> ToolResult<Option<ToolRequest>> {
        let request = match self {
            Command::Tools { .. } => return Ok(None),
            Command::Phishing { content, kind } => ToolRequest::phishing(content, (*kind).into())?,
            Command::Lookalike { url } => ToolRequest::lookalike(url)?,
            Command::EmailHeaders { file } => ToolRequest::email_headers(&read_headers(file.as_ref())?)?,
            Command::PortScan { target, scan_type } => ToolRequest::port_scan(target, (*scan_type).into())?,
            Command::Cipher { text, algorithm, mode, password } => {
                ToolRequest::cipher((*algorithm).into(), (*mode).into(), text, password)?
            }
            Command::Keygen => ToolRequest::KeyPair,
            Command::Stego { action } => match action {
                StegoAction::Encode { image, message, passphrase } => ToolRequest::stego(
                    &image.to_string_lossy(),
                    StegoOperation::Encode { message: message.clone(), passphrase: passphrase.clone() },
                )?,
                StegoAction::Decode { image, passphrase } => ToolRequest::stego(
                    &image.to_string_lossy(),
                    StegoOperation::Decode { passphrase: passphrase.clone() },
                )?,
            },
            Command::Breach { email } => ToolRequest::breach(email)?,
            Command::Dns { domain, .. } => ToolRequest::dns(domain)?,
            Command::Ip { address } => ToolRequest::ip(address.as_deref().unwrap_or_default())?,
        };
        Ok(Some(request))
    }
}
