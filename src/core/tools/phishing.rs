// src/core/tools/phishing.rs

//! Heuristic phishing scorer.
//!
//! Scoring is a flat walk over an ordered rule table: every pattern found in
//! the lower-cased content adds its category's weight. URL and free text get a
//! few structural checks on top. The raw sum is bucketed into a [`RiskLevel`]
//! and reported clamped to 100.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use strum::Display;
use tracing::{debug, info};
use url::Url;

use crate::core::models::{RiskLevel, Severity};

/// What the submitted content is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum ContentKind {
    Url,
    Text,
}

/// One category of the rule table.
struct IndicatorRule {
    category: &'static str,
    patterns: &'static [&'static str],
    severity: Severity,
}

static RULES: &[IndicatorRule] = &[
    IndicatorRule {
        category: "Suspicious Keywords",
        patterns: &[
            "urgent", "verify", "suspend", "click here", "act now", "limited time",
            "confirm identity", "unusual activity", "security alert",
        ],
        severity: Severity::Medium,
    },
    IndicatorRule {
        category: "Brand Impersonation",
        patterns: &["paypal", "amazon", "microsoft", "apple", "google", "facebook", "netflix", "spotify"],
        severity: Severity::High,
    },
    IndicatorRule {
        category: "Financial Threats",
        patterns: &["update payment", "billing issue", "account suspended", "refund", "tax refund", "invoice"],
        severity: Severity::High,
    },
    IndicatorRule {
        category: "URL Shorteners",
        patterns: &["bit.ly", "tinyurl", "t.co", "goo.gl", "ow.ly", "short.link"],
        severity: Severity::Medium,
    },
    IndicatorRule {
        category: "Suspicious Domains",
        patterns: &["security-", "verify-", "update-", "login-", "account-", "-security", "-verify"],
        severity: Severity::High,
    },
];

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap());
static RE_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());

const CAPS_RATIO_LIMIT: f64 = 0.3;

#[derive(Debug, Clone, Serialize)]
pub struct Indicator {
    pub category: String,
    pub severity: Severity,
    pub description: String,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlStructure {
    pub protocol: String,
    pub domain: String,
    pub path: String,
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TechnicalDetails {
    pub url_structure: Option<UrlStructure>,
    pub domain_age: Option<String>,
    pub ssl_certificate: Option<String>,
    pub redirect_chain: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhishingAnalysis {
    pub kind: ContentKind,
    pub risk_level: RiskLevel,
    /// Always within `0..=100`.
    pub score: u8,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
    pub technical_details: TechnicalDetails,
    pub indicators: Vec<Indicator>,
}

/// Scores `content` against the rule table and the structural checks for `kind`.
pub fn analyze(content: &str, kind: ContentKind, rng: &mut impl Rng) -> PhishingAnalysis {
    info!(%kind, length = content.len(), "Starting phishing analysis.");

    let mut score = 0u32;
    let mut reasons = Vec::new();
    let mut indicators = Vec::new();
    let mut technical_details = TechnicalDetails::default();

    score += score_rules(content, &mut reasons, &mut indicators);

    match kind {
        ContentKind::Url => score += score_url(content, &mut reasons, &mut technical_details, rng),
        ContentKind::Text => score += score_text(content, &mut reasons),
    }

    let risk_level = RiskLevel::from_score(score);
    if reasons.is_empty() {
        reasons.push("No obvious phishing indicators detected".to_string());
    }

    info!(raw_score = score, level = %risk_level, "Phishing analysis finished.");
    PhishingAnalysis {
        kind,
        risk_level,
        score: score.min(100) as u8,
        reasons,
        recommendations: recommendations_for(risk_level),
        technical_details,
        indicators,
    }
}

/// Applies the keyword table. Returns the points contributed.
fn score_rules(content: &str, reasons: &mut Vec<String>, indicators: &mut Vec<Indicator>) -> u32 {
    let lower = content.to_lowercase();
    let mut score = 0;

    for rule in RULES {
        let found: Vec<&str> = rule.patterns.iter().copied().filter(|p| lower.contains(p)).collect();

        if found.is_empty() {
            indicators.push(Indicator {
                category: rule.category.to_string(),
                severity: rule.severity,
                description: format!("No {} detected", rule.category.to_lowercase()),
                found: false,
            });
            continue;
        }

        debug!(category = rule.category, matches = found.len(), "Rule matched.");
        score += rule.severity.weight() * found.len() as u32;
        for pattern in found {
            reasons.push(format!("{}: Contains \"{}\"", rule.category, pattern));
            indicators.push(Indicator {
                category: rule.category.to_string(),
                severity: rule.severity,
                description: format!("Found suspicious pattern: \"{}\"", pattern),
                found: true,
            });
        }
    }
    score
}

fn score_url(
    content: &str,
    reasons: &mut Vec<String>,
    details: &mut TechnicalDetails,
    rng: &mut impl Rng,
) -> u32 {
    let url = match Url::parse(content.trim()) {
        Ok(url) => url,
        Err(e) => {
            debug!(error = %e, "URL did not parse.");
            reasons.push("Invalid or malformed URL format".to_string());
            return 25;
        }
    };

    let mut score = 0;
    let host = url.host_str().unwrap_or_default().to_string();
    let path = url.path().to_string();

    if host.contains("security") || host.contains("verify") {
        score += 30;
        reasons.push("Domain contains security-related keywords".to_string());
    }
    if path.contains("login") || path.contains("account") {
        score += 20;
        reasons.push("URL path suggests authentication page".to_string());
    }
    let levels = host.split('.').count();
    if levels > 3 {
        score += 15;
        reasons.push(format!("Complex subdomain structure ({} levels)", levels));
    }
    if url.scheme() == "http" {
        score += 20;
        reasons.push("Insecure HTTP protocol (not HTTPS)".to_string());
    }

    details.url_structure = Some(UrlStructure {
        protocol: format!("{}:", url.scheme()),
        domain: host,
        path,
        parameters: url.query_pairs().map(|(k, _)| k.into_owned()).collect(),
    });

    // Simulated lookups.
    details.domain_age = Some(
        if rng.gen_bool(0.5) {
            "Recently registered (< 30 days)"
        } else {
            "Established domain (> 1 year)"
        }
        .to_string(),
    );
    details.ssl_certificate = Some(
        if url.scheme() == "https" { "Valid SSL certificate" } else { "No SSL certificate" }.to_string(),
    );
    details.redirect_chain = if rng.gen_bool(0.3) {
        vec![
            content.trim().to_string(),
            "https://suspicious-redirect.com".to_string(),
            "https://final-destination.com".to_string(),
        ]
    } else {
        vec![content.trim().to_string()]
    };

    score
}

fn score_text(content: &str, reasons: &mut Vec<String>) -> u32 {
    let mut score = 0;

    let emails = RE_EMAIL.find_iter(content).count();
    if emails > 2 {
        score += 15;
        reasons.push(format!("Multiple email addresses found ({})", emails));
    }

    if RE_PHONE.is_match(content) {
        score += 10;
        reasons.push("Phone numbers detected in content".to_string());
    }

    let total = content.chars().count();
    if total > 0 {
        let caps = content.chars().filter(|c| c.is_ascii_uppercase()).count();
        if caps as f64 / total as f64 > CAPS_RATIO_LIMIT {
            score += 15;
            reasons.push("Excessive use of capital letters".to_string());
        }
    }

    score
}

fn recommendations_for(level: RiskLevel) -> Vec<String> {
    let items: &[&str] = match level {
        RiskLevel::Dangerous => &[
            "DO NOT interact with this content",
            "Report to your IT security team immediately",
            "Delete/block this content",
            "Warn others about this threat",
        ],
        RiskLevel::Suspicious => &[
            "Exercise extreme caution",
            "Verify sender through alternative means",
            "Do not click links without verification",
            "Contact the supposed sender directly",
        ],
        RiskLevel::Safe => &[
            "Content appears legitimate",
            "Still verify sender if unexpected",
            "Remain vigilant for future threats",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn run(content: &str, kind: ContentKind) -> PhishingAnalysis {
        analyze(content, kind, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn clean_text_is_safe() {
        let result = run("see you at lunch tomorrow", ContentKind::Text);
        assert_eq!(result.score, 0);
        assert_eq!(result.risk_level, RiskLevel::Safe);
        assert_eq!(result.reasons, vec!["No obvious phishing indicators detected"]);
        assert_eq!(result.indicators.len(), RULES.len());
        assert!(result.indicators.iter().all(|i| !i.found));
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn each_match_adds_its_category_weight() {
        // Two Medium keywords.
        let result = run("this is urgent, please verify", ContentKind::Text);
        assert_eq!(result.score, 30);
        assert_eq!(result.risk_level, RiskLevel::Safe);
        let found: Vec<_> = result.indicators.iter().filter(|i| i.found).collect();
        assert_eq!(found.len(), 2);
        assert!(result.reasons.contains(&"Suspicious Keywords: Contains \"urgent\"".to_string()));
    }

    #[test]
    fn suspicious_bucket_starts_at_forty() {
        // paypal (25) + urgent (15)
        let result = run("urgent message from paypal", ContentKind::Text);
        assert_eq!(result.score, 40);
        assert_eq!(result.risk_level, RiskLevel::Suspicious);
        assert_eq!(result.recommendations[0], "Exercise extreme caution");
    }

    #[test]
    fn score_is_clamped_and_dangerous() {
        let text = "URGENT security alert: verify your paypal amazon microsoft account suspended, \
                    update payment for your invoice or tax refund";
        let result = run(text, ContentKind::Text);
        assert_eq!(result.score, 100);
        assert_eq!(result.risk_level, RiskLevel::Dangerous);
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn url_structure_checks() {
        let result = run("http://login.security.paypal.example.com/account/login?user=1&next=2", ContentKind::Url);
        let structure = result.technical_details.url_structure.as_ref().unwrap();
        assert_eq!(structure.protocol, "http:");
        assert_eq!(structure.domain, "login.security.paypal.example.com");
        assert_eq!(structure.parameters, vec!["user", "next"]);
        assert_eq!(result.technical_details.ssl_certificate.as_deref(), Some("No SSL certificate"));
        assert!(result.reasons.iter().any(|r| r == "Insecure HTTP protocol (not HTTPS)"));
        assert!(result.reasons.iter().any(|r| r == "Complex subdomain structure (5 levels)"));
        assert!(result.reasons.iter().any(|r| r == "URL path suggests authentication page"));
        assert!(result.reasons.iter().any(|r| r == "Domain contains security-related keywords"));
        assert_eq!(result.risk_level, RiskLevel::Dangerous);
        assert!(!result.technical_details.redirect_chain.is_empty());
    }

    #[test]
    fn malformed_url_adds_penalty() {
        let result = run("not a url at all", ContentKind::Url);
        assert_eq!(result.score, 25);
        assert!(result.reasons.contains(&"Invalid or malformed URL format".to_string()));
        assert!(result.technical_details.url_structure.is_none());
    }

    #[test]
    fn benign_https_url_is_safe() {
        let result = run("https://example.org/docs", ContentKind::Url);
        assert_eq!(result.score, 0);
        assert_eq!(result.technical_details.ssl_certificate.as_deref(), Some("Valid SSL certificate"));
    }

    #[test]
    fn text_checks() {
        let text = "contact a@x.io, b@x.io or c@x.io or call 555-123-4567";
        let result = run(text, ContentKind::Text);
        assert_eq!(result.score, 25);
        assert!(result.reasons.contains(&"Multiple email addresses found (3)".to_string()));
        assert!(result.reasons.contains(&"Phone numbers detected in content".to_string()));

        let shouting = run("HELLO THERE FRIEND", ContentKind::Text);
        assert_eq!(shouting.score, 15);
        assert!(shouting.reasons.contains(&"Excessive use of capital letters".to_string()));
    }

    #[test]
    fn same_seed_same_details() {
        let a = run("https://example.com", ContentKind::Url);
        let b = run("https://example.com", ContentKind::Url);
        assert_eq!(a.technical_details.domain_age, b.technical_details.domain_age);
        assert_eq!(a.technical_details.redirect_chain, b.technical_details.redirect_chain);
    }
}
