// src/core/models.rs

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::catalog::ToolKind;
use crate::core::tools::breach::BreachReport;
use crate::core::tools::cipher::{CipherOutput, KeyPair};
use crate::core::tools::dns_lookup::DnsReport;
use crate::core::tools::email_headers::EmailAnalysis;
use crate::core::tools::ip_lookup::IpInfo;
use crate::core::tools::lookalike::LookalikeSet;
use crate::core::tools::phishing::PhishingAnalysis;
use crate::core::tools::port_scan::PortScanReport;
use crate::core::tools::stego::StegoOutcome;

// --- Shared Value Types ---

/// How much weight a single indicator carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Points added to a risk score for every pattern matched at this severity.
    pub fn weight(self) -> u32 {
        match self {
            Severity::High => 25,
            Severity::Medium => 15,
            Severity::Low => 10,
        }
    }
}

/// Bucketed verdict shown next to a risk score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum RiskLevel {
    Safe,
    Suspicious,
    Dangerous,
}

impl RiskLevel {
    pub const SUSPICIOUS_THRESHOLD: u32 = 40;
    pub const DANGEROUS_THRESHOLD: u32 = 80;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::DANGEROUS_THRESHOLD {
            RiskLevel::Dangerous
        } else if score >= Self::SUSPICIOUS_THRESHOLD {
            RiskLevel::Suspicious
        } else {
            RiskLevel::Safe
        }
    }
}

// --- Main Report ---

/// The result of any single tool run.
///
/// Every tool owns its own result shape; this enum is only the envelope that
/// travels from the analysis task back to the TUI or the CLI printer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tool", content = "result", rename_all = "kebab-case")]
pub enum ToolReport {
    Phishing(PhishingAnalysis),
    Lookalike(LookalikeSet),
    EmailHeaders(EmailAnalysis),
    PortScan(PortScanReport),
    Cipher(CipherOutput),
    KeyPair(KeyPair),
    Stego(StegoOutcome),
    Breach(BreachReport),
    Dns(DnsReport),
    Ip(IpInfo),
}

impl ToolReport {
    /// The tool page this report belongs to.
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolReport::Phishing(_) => ToolKind::PhishingDetector,
            ToolReport::Lookalike(_) => ToolKind::LookalikeLinks,
            ToolReport::EmailHeaders(_) => ToolKind::EmailHeaders,
            ToolReport::PortScan(_) => ToolKind::PortScanner,
            ToolReport::Cipher(_) | ToolReport::KeyPair(_) => ToolKind::Encryption,
            ToolReport::Stego(_) => ToolKind::Steganography,
            ToolReport::Breach(_) => ToolKind::BreachChecker,
            ToolReport::Dns(_) => ToolKind::DnsLookup,
            ToolReport::Ip(_) => ToolKind::IpLookup,
        }
    }

    /// One-line headline used for notices and the summary panel.
    pub fn headline(&self) -> String {
        match self {
            ToolReport::Phishing(a) => format!("Risk Level: {} ({}/100)", a.risk_level, a.score),
            ToolReport::Lookalike(s) => format!("{} variants generated", s.variants.len()),
            ToolReport::EmailHeaders(e) => format!(
                "SPF {} / DKIM {} / DMARC {}",
                e.spf.status, e.dkim.status, e.dmarc.status
            ),
            ToolReport::PortScan(p) => format!("{} open ports on {}", p.open_ports().count(), p.target),
            ToolReport::Cipher(c) => format!("Text {}ed successfully", c.mode),
            ToolReport::KeyPair(_) => "RSA key pair generated successfully".to_string(),
            ToolReport::Stego(s) => s.result.headline().to_string(),
            ToolReport::Breach(b) => match b.breaches.len() {
                0 => "Good news! No breaches found".to_string(),
                n => format!("Found in {} breach{}", n, if n == 1 { "" } else { "es" }),
            },
            ToolReport::Dns(d) => format!("Comprehensive analysis completed for {}", d.domain),
            ToolReport::Ip(i) => format!("IP information retrieved for {}", i.ip),
        }
    }

    /// A 0-100 score and its bucket when the tool produces one. Each tool
    /// buckets its own score.
    pub fn risk(&self) -> Option<(u8, RiskLevel)> {
        match self {
            ToolReport::Phishing(a) => Some((a.score, a.risk_level)),
            ToolReport::Ip(i) => Some((i.security.risk_score, i.security.risk_level())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_bucket_scores() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Safe);
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Safe);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Suspicious);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Suspicious);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Dangerous);
        assert_eq!(RiskLevel::from_score(250), RiskLevel::Dangerous);
    }

    #[test]
    fn clamping_does_not_change_the_bucket() {
        for raw in 0..300u32 {
            assert_eq!(RiskLevel::from_score(raw), RiskLevel::from_score(raw.min(100)));
        }
    }

    #[test]
    fn severity_weights() {
        assert_eq!(Severity::High.weight(), 25);
        assert_eq!(Severity::Medium.weight(), 15);
        assert_eq!(Severity::Low.weight(), 10);
    }
}
