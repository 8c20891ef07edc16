// src/core/catalog.rs

//! The tool catalog behind the dashboard.
//!
//! A static, read-only table of every tool the dashboard offers, with the
//! human-readable card text and the route slug each tool is reachable under.
//! The slug doubles as the CLI subcommand stem and the export file prefix.

use serde::Serialize;
use std::fmt;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Identifies one tool page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
pub enum ToolKind {
    PhishingDetector,
    IpLookup,
    Encryption,
    DnsLookup,
    PortScanner,
    LookalikeLinks,
    EmailHeaders,
    Steganography,
    BreachChecker,
}

impl ToolKind {
    /// Resolves a route slug such as `phishing-detector`.
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim_start_matches('/');
        ToolKind::iter().find(|k| k.descriptor().slug == slug)
    }

    pub fn descriptor(self) -> &'static ToolDescriptor {
        // Every variant has exactly one row in TOOLS.
        TOOLS
            .iter()
            .find(|t| t.kind == self)
            .unwrap_or(&TOOLS[0])
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor().title)
    }
}

/// Skill level printed on the dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A dashboard card.
#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub difficulty: Difficulty,
    /// Route path without the leading slash.
    pub slug: &'static str,
}

static TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        kind: ToolKind::PhishingDetector,
        title: "Phishing Detector",
        description: "Analyze URLs and text for phishing indicators with heuristic detection",
        category: "Threat Detection",
        difficulty: Difficulty::Beginner,
        slug: "phishing-detector",
    },
    ToolDescriptor {
        kind: ToolKind::IpLookup,
        title: "What is My IP",
        description: "Discover your public IP address, location, ISP info, and network details",
        category: "Network Analysis",
        difficulty: Difficulty::Beginner,
        slug: "ip-lookup",
    },
    ToolDescriptor {
        kind: ToolKind::Encryption,
        title: "Encryption/Decryption",
        description: "Encrypt and decrypt text using AES, RSA, and Base64 demo algorithms",
        category: "Cryptography",
        difficulty: Difficulty::Intermediate,
        slug: "encryption",
    },
    ToolDescriptor {
        kind: ToolKind::DnsLookup,
        title: "DNS Lookup",
        description: "Perform comprehensive DNS record lookups including A, MX, TXT, and WHOIS",
        category: "Network Analysis",
        difficulty: Difficulty::Beginner,
        slug: "dns-lookup",
    },
    ToolDescriptor {
        kind: ToolKind::PortScanner,
        title: "Nmap Scanner",
        description: "Basic and advanced port scanning with service detection and OS fingerprinting",
        category: "Reconnaissance",
        difficulty: Difficulty::Advanced,
        slug: "nmap-scanner",
    },
    ToolDescriptor {
        kind: ToolKind::LookalikeLinks,
        title: "Phishing Link Rewriter",
        description: "Create phishing-style links for security awareness training and education",
        category: "Social Engineering",
        difficulty: Difficulty::Intermediate,
        slug: "phishing-rewriter",
    },
    ToolDescriptor {
        kind: ToolKind::EmailHeaders,
        title: "Email Header Analyzer",
        description: "Analyze email headers for SPF, DKIM, DMARC validation and origin tracking",
        category: "Email Security",
        difficulty: Difficulty::Intermediate,
        slug: "email-analyzer",
    },
    ToolDescriptor {
        kind: ToolKind::Steganography,
        title: "Steganography Tool",
        description: "Hide and extract secret messages from images using steganography",
        category: "Cryptography",
        difficulty: Difficulty::Advanced,
        slug: "steganography",
    },
    ToolDescriptor {
        kind: ToolKind::BreachChecker,
        title: "Breach Checker",
        description: "Check if email addresses have been compromised in known data breaches",
        category: "Threat Intelligence",
        difficulty: Difficulty::Beginner,
        slug: "breach-checker",
    },
];

pub fn all() -> &'static [ToolDescriptor] {
    TOOLS
}

/// Case-insensitive search over title, description and category.
pub fn filter(term: &str) -> Vec<&'static ToolDescriptor> {
    let needle = term.trim().to_lowercase();
    TOOLS
        .iter()
        .filter(|t| {
            needle.is_empty()
                || t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
                || t.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Distinct categories, in catalog order.
pub fn categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for tool in TOOLS {
        if !seen.contains(&tool.category) {
            seen.push(tool.category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_descriptor() {
        for kind in ToolKind::iter() {
            assert_eq!(kind.descriptor().kind, kind);
        }
        assert_eq!(all().len(), ToolKind::iter().count());
    }

    #[test]
    fn slugs_round_trip() {
        for tool in all() {
            assert_eq!(ToolKind::from_slug(tool.slug), Some(tool.kind));
        }
        assert_eq!(ToolKind::from_slug("/dns-lookup"), Some(ToolKind::DnsLookup));
        assert_eq!(ToolKind::from_slug("vulnerability-scanner"), None);
    }

    #[test]
    fn filter_matches_title_description_and_category() {
        assert_eq!(filter("").len(), all().len());
        let by_title: Vec<_> = filter("BREACH").iter().map(|t| t.kind).collect();
        assert_eq!(by_title, vec![ToolKind::BreachChecker]);
        let by_category: Vec<_> = filter("cryptography").iter().map(|t| t.kind).collect();
        assert_eq!(by_category, vec![ToolKind::Encryption, ToolKind::Steganography]);
        assert!(filter("WHOIS").iter().any(|t| t.kind == ToolKind::DnsLookup));
        assert!(filter("nothing matches this").is_empty());
    }

    #[test]
    fn categories_are_distinct_and_ordered() {
        let cats = categories();
        assert_eq!(cats[0], "Threat Detection");
        assert_eq!(cats[1], "Network Analysis");
        assert_eq!(cats.iter().filter(|c| **c == "Cryptography").count(), 1);
    }
}
