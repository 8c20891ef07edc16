// src/core/tools/mod.rs

// One module per tool. Each owns its result types and its generator; this
// file turns a validated request into a report.
pub mod breach;
pub mod cipher;
pub mod dns_lookup;
pub mod email_headers;
pub mod ip_lookup;
pub mod lookalike;
pub mod phishing;
pub mod port_scan;
pub mod stego;

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, instrument};

use crate::config::Settings;
use crate::core::catalog::ToolKind;
use crate::core::error::{ToolError, ToolResult};
use crate::core::models::ToolReport;
use crate::core::validate;

use self::cipher::{Algorithm, Mode};
use self::ip_lookup::ClientDetails;
use self::phishing::ContentKind;
use self::port_scan::ScanType;
use self::stego::StegoOperation;

/// A validated request for one tool operation.
///
/// Build it through the constructors, which apply the input rules, so that
/// nothing invalid ever reaches [`run_tool`].
#[derive(Debug, Clone)]
pub enum ToolRequest {
    Phishing { content: String, kind: ContentKind },
    Lookalike { url: String },
    EmailHeaders { raw: String },
    PortScan { target: String, scan_type: ScanType },
    Cipher { algorithm: Algorithm, mode: Mode, text: String, password: String },
    KeyPair,
    Stego { path: PathBuf, operation: StegoOperation },
    Breach { email: String },
    Dns { domain: String },
    Ip { ip: Option<String> },
}

impl ToolRequest {
    pub fn phishing(content: &str, kind: ContentKind) -> ToolResult<Self> {
        let message = match kind {
            ContentKind::Url => "Please enter a URL to analyze",
            ContentKind::Text => "Please enter text to analyze",
        };
        let content = validate::required(content, message)?;
        Ok(ToolRequest::Phishing { content: content.to_string(), kind })
    }

    pub fn lookalike(url: &str) -> ToolResult<Self> {
        let url = validate::required(url, "Please enter a valid URL")?;
        Ok(ToolRequest::Lookalike { url: url.to_string() })
    }

    pub fn email_headers(raw: &str) -> ToolResult<Self> {
        validate::required(raw, "Please enter email headers")?;
        Ok(ToolRequest::EmailHeaders { raw: raw.to_string() })
    }

    pub fn port_scan(target: &str, scan_type: ScanType) -> ToolResult<Self> {
        let target = validate::required(target, "Please enter a valid target")?;
        Ok(ToolRequest::PortScan { target: target.to_string(), scan_type })
    }

    pub fn cipher(algorithm: Algorithm, mode: Mode, text: &str, password: &str) -> ToolResult<Self> {
        validate::required(text, "Please enter text to process")?;
        Ok(ToolRequest::Cipher {
            algorithm,
            mode,
            text: text.to_string(),
            password: password.to_string(),
        })
    }

    pub fn stego(path: &str, operation: StegoOperation) -> ToolResult<Self> {
        if path.trim().is_empty() {
            return Err(ToolError::validation(operation.missing_fields_message()));
        }
        Ok(ToolRequest::Stego { path: PathBuf::from(path.trim()), operation: operation.validated()? })
    }

    pub fn breach(email: &str) -> ToolResult<Self> {
        let email = validate::email(email)?;
        Ok(ToolRequest::Breach { email: email.to_string() })
    }

    pub fn dns(domain: &str) -> ToolResult<Self> {
        let domain = validate::domain(domain)?;
        Ok(ToolRequest::Dns { domain: domain.to_string() })
    }

    /// A blank IP means "my own address".
    pub fn ip(ip: &str) -> ToolResult<Self> {
        if ip.trim().is_empty() {
            return Ok(ToolRequest::Ip { ip: None });
        }
        let ip = validate::ip(ip)?;
        Ok(ToolRequest::Ip { ip: Some(ip.to_string()) })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolRequest::Phishing { .. } => ToolKind::PhishingDetector,
            ToolRequest::Lookalike { .. } => ToolKind::LookalikeLinks,
            ToolRequest::EmailHeaders { .. } => ToolKind::EmailHeaders,
            ToolRequest::PortScan { .. } => ToolKind::PortScanner,
            ToolRequest::Cipher { .. } | ToolRequest::KeyPair => ToolKind::Encryption,
            ToolRequest::Stego { .. } => ToolKind::Steganography,
            ToolRequest::Breach { .. } => ToolKind::BreachChecker,
            ToolRequest::Dns { .. } => ToolKind::DnsLookup,
            ToolRequest::Ip { .. } => ToolKind::IpLookup,
        }
    }

    /// How long the simulated analysis pretends to take.
    pub fn latency(&self) -> Duration {
        match self {
            ToolRequest::Phishing { .. } => Duration::from_millis(3000),
            ToolRequest::Lookalike { .. } => Duration::from_millis(1500),
            ToolRequest::EmailHeaders { .. } => Duration::from_millis(2000),
            ToolRequest::PortScan { scan_type, .. } => scan_type.latency(),
            ToolRequest::Cipher { .. } => Duration::from_millis(1000),
            ToolRequest::KeyPair => Duration::ZERO,
            ToolRequest::Stego { operation, .. } => operation.latency(),
            ToolRequest::Breach { .. } => Duration::from_millis(2000),
            ToolRequest::Dns { .. } => Duration::from_millis(1000),
            ToolRequest::Ip { .. } => Duration::from_millis(1500),
        }
    }
}

/// Runs one simulated analysis to completion.
#[instrument(skip_all, fields(tool = %request.kind()))]
pub async fn run_tool(request: ToolRequest, settings: &Settings) -> ToolResult<ToolReport> {
    let mut rng = settings.rng();

    if settings.simulate_latency {
        let delay = request.latency();
        debug!(delay_ms = delay.as_millis() as u64, "Simulating latency.");
        tokio::time::sleep(delay).await;
    }

    let report = match request {
        ToolRequest::Phishing { content, kind } => {
            ToolReport::Phishing(phishing::analyze(&content, kind, &mut rng))
        }
        ToolRequest::Lookalike { url } => ToolReport::Lookalike(lookalike::generate(&url, &mut rng)),
        ToolRequest::EmailHeaders { raw } => {
            ToolReport::EmailHeaders(email_headers::analyze(&raw, &mut rng))
        }
        ToolRequest::PortScan { target, scan_type } => {
            ToolReport::PortScan(port_scan::scan(&target, scan_type))
        }
        ToolRequest::Cipher { algorithm, mode, text, password } => {
            ToolReport::Cipher(cipher::process(algorithm, mode, &text, &password)?)
        }
        ToolRequest::KeyPair => ToolReport::KeyPair(cipher::generate_key_pair(&mut rng)),
        ToolRequest::Stego { path, operation } => {
            let (header, size) = read_cover(&path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ToolReport::Stego(stego::process(&file_name, &header, size, &operation)?)
        }
        ToolRequest::Breach { email } => ToolReport::Breach(breach::check(&email, &mut rng)),
        ToolRequest::Dns { domain } => ToolReport::Dns(dns_lookup::lookup(&domain, &mut rng)),
        ToolRequest::Ip { ip } => {
            ToolReport::Ip(ip_lookup::lookup(ip.as_deref(), ClientDetails::from_environment(), &mut rng))
        }
    };

    info!(headline = %report.headline(), "Tool run finished.");
    Ok(report)
}

/// Reads the leading magic bytes of the cover image and its size on disk.
async fn read_cover(path: &Path) -> ToolResult<(Vec<u8>, u64)> {
    let io_error = |source| ToolError::Io { path: path.display().to_string(), source };
    let file = tokio::fs::File::open(path).await.map_err(io_error)?;
    let size = file.metadata().await.map_err(io_error)?.len();
    let mut header = Vec::with_capacity(stego::MAGIC_LEN);
    file.take(stego::MAGIC_LEN as u64).read_to_end(&mut header).await.map_err(io_error)?;
    Ok((header, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RiskLevel;

    fn instant() -> Settings {
        Settings { simulate_latency: false, seed: Some(11), ..Settings::default() }
    }

    #[test]
    fn constructors_validate_input() {
        assert_eq!(
            ToolRequest::phishing("  ", ContentKind::Url).unwrap_err().to_string(),
            "Please enter a URL to analyze"
        );
        assert_eq!(
            ToolRequest::phishing("", ContentKind::Text).unwrap_err().to_string(),
            "Please enter text to analyze"
        );
        assert!(ToolRequest::breach("nobody").is_err());
        assert!(ToolRequest::dns("not a domain").is_err());
        assert!(ToolRequest::ip("1.2.3.999").is_err());
        assert!(matches!(ToolRequest::ip("").unwrap(), ToolRequest::Ip { ip: None }));
        assert_eq!(
            ToolRequest::cipher(Algorithm::Base64, Mode::Encrypt, "", "").unwrap_err().to_string(),
            "Please enter text to process"
        );
        let op = StegoOperation::Decode { passphrase: "x".into() };
        assert_eq!(
            ToolRequest::stego("", op).unwrap_err().to_string(),
            "Please select an image and provide the passphrase"
        );
    }

    #[test]
    fn requests_map_to_their_tool() {
        assert_eq!(ToolRequest::KeyPair.kind(), ToolKind::Encryption);
        assert_eq!(ToolRequest::dns("example.com").unwrap().kind(), ToolKind::DnsLookup);
        assert_eq!(
            ToolRequest::port_scan("h", ScanType::Advanced).unwrap().latency(),
            Duration::from_millis(4000)
        );
    }

    #[tokio::test]
    async fn runs_phishing_without_delay() {
        let request = ToolRequest::phishing("urgent paypal notice", ContentKind::Text).unwrap();
        let report = run_tool(request, &instant()).await.unwrap();
        match report {
            ToolReport::Phishing(a) => {
                assert_eq!(a.score, 40);
                assert_eq!(a.risk_level, RiskLevel::Suspicious);
            }
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[tokio::test]
    async fn same_seed_same_report() {
        let request = ToolRequest::dns("example.com").unwrap();
        let a = run_tool(request.clone(), &instant()).await.unwrap();
        let b = run_tool(request, &instant()).await.unwrap();
        match (a, b) {
            (ToolReport::Dns(a), ToolReport::Dns(b)) => {
                assert_eq!(a.records[0].value, b.records[0].value);
                assert_eq!(a.whois.registrar, b.whois.registrar);
            }
            _ => panic!("expected DNS reports"),
        }
    }

    #[tokio::test]
    async fn cipher_errors_surface() {
        let request = ToolRequest::cipher(Algorithm::Rsa, Mode::Decrypt, "plain", "").unwrap();
        let err = run_tool(request, &instant()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid RSA encrypted text format");
    }

    #[tokio::test]
    async fn stego_reads_and_sniffs_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0, 0]).unwrap();

        let op = StegoOperation::Encode { message: "hi".into(), passphrase: "pw".into() };
        let request = ToolRequest::stego(path.to_str().unwrap(), op).unwrap();
        match run_tool(request, &instant()).await.unwrap() {
            ToolReport::Stego(outcome) => assert_eq!(outcome.file_name, "cover.jpg"),
            other => panic!("unexpected report {other:?}"),
        }

        let big = dir.path().join("big.png");
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.resize(5 * 1024 * 1024, 0);
        std::fs::write(&big, &bytes).unwrap();
        let op = StegoOperation::Decode { passphrase: "pw".into() };
        let request = ToolRequest::stego(big.to_str().unwrap(), op).unwrap();
        match run_tool(request, &instant()).await.unwrap() {
            ToolReport::Stego(outcome) => assert_eq!(outcome.size_kb, 5 * 1024),
            other => panic!("unexpected report {other:?}"),
        }

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "plain text").unwrap();
        let op = StegoOperation::Decode { passphrase: "pw".into() };
        let request = ToolRequest::stego(text.to_str().unwrap(), op).unwrap();
        assert!(matches!(run_tool(request, &instant()).await, Err(ToolError::UnsupportedImage)));

        let op = StegoOperation::Decode { passphrase: "pw".into() };
        let request = ToolRequest::stego("/definitely/missing.png", op).unwrap();
        assert!(matches!(run_tool(request, &instant()).await, Err(ToolError::Io { .. })));
    }
}
