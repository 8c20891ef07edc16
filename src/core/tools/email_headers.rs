// src/core/tools/email_headers.rs

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use strum::Display;
use tracing::{debug, info};

static RE_IPV4_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").unwrap());

const FALLBACK_ORIGIN_IP: &str = "192.168.1.100";
const SIMULATED_LOCATION: &str = "San Francisco, CA, US";

const SAMPLE_HEADERS: &[(&str, &str)] = &[
    ("Return-Path", "<sender@example.com>"),
    ("Received", "from mail.example.com by mx.google.com"),
    ("From", "sender@example.com"),
    ("To", "recipient@domain.com"),
    ("Subject", "Test Email Subject"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum AuthStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthCheck {
    pub status: AuthStatus,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailAnalysis {
    pub spf: AuthCheck,
    pub dkim: AuthCheck,
    pub dmarc: AuthCheck,
    pub origin_ip: String,
    pub location: String,
    pub headers: Vec<HeaderField>,
}

/// Splits raw header text into fields. Lines starting with whitespace continue
/// the previous field. Bare `\r` counts as a line break, as terminals send it on paste.
pub fn parse_headers(raw: &str) -> Vec<HeaderField> {
    let mut fields: Vec<HeaderField> = Vec::new();

    for line in raw.split(['\r', '\n']) {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with([' ', '\t']) {
            if let Some(last) = fields.last_mut() {
                last.value.push(' ');
                last.value.push_str(line.trim());
            }
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if !name.is_empty() && !name.contains(' ') {
                fields.push(HeaderField { name: name.to_string(), value: value.trim().to_string() });
            }
        }
    }
    fields
}

pub fn analyze(raw: &str, rng: &mut impl Rng) -> EmailAnalysis {
    let mut headers = parse_headers(raw);
    info!(parsed = headers.len(), "Analyzing email headers.");

    if headers.is_empty() {
        debug!("No parsable headers, using the sample set.");
        headers = SAMPLE_HEADERS
            .iter()
            .map(|(n, v)| HeaderField { name: n.to_string(), value: v.to_string() })
            .collect();
    }

    let origin_ip = headers
        .iter()
        .filter(|h| h.name.eq_ignore_ascii_case("received"))
        .find_map(|h| RE_IPV4_IN_TEXT.find(&h.value).map(|m| m.as_str().to_string()))
        .unwrap_or_else(|| FALLBACK_ORIGIN_IP.to_string());

    EmailAnalysis {
        spf: AuthCheck {
            status: pass_or_fail(rng, 0.7),
            details: "v=spf1 include:_spf.google.com ~all".to_string(),
        },
        dkim: AuthCheck {
            status: pass_or_fail(rng, 0.8),
            details: "DKIM signature validated successfully".to_string(),
        },
        dmarc: AuthCheck {
            status: pass_or_fail(rng, 0.6),
            details: "v=DMARC1; p=quarantine; rua=mailto:dmarc@example.com".to_string(),
        },
        origin_ip,
        location: SIMULATED_LOCATION.to_string(),
        headers,
    }
}

fn pass_or_fail(rng: &mut impl Rng, pass_probability: f64) -> AuthStatus {
    if rng.gen_bool(pass_probability) { AuthStatus::Pass } else { AuthStatus::Fail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const RAW: &str = "Return-Path: <alice@example.net>\n\
Received: from mx.example.net (mx.example.net [203.0.113.9])\n\
\tby mail.local with ESMTPS\n\
Subject: Quarterly report\n\
not a header line\n";

    #[test]
    fn parses_folded_headers() {
        let fields = parse_headers(RAW);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name, "Return-Path");
        assert_eq!(fields[1].value, "from mx.example.net (mx.example.net [203.0.113.9]) by mail.local with ESMTPS");
        assert_eq!(fields[2].value, "Quarterly report");
    }

    #[test]
    fn origin_ip_comes_from_received() {
        let analysis = analyze(RAW, &mut StdRng::seed_from_u64(3));
        assert_eq!(analysis.origin_ip, "203.0.113.9");
        assert_eq!(analysis.headers.len(), 3);
    }

    #[test]
    fn pasted_carriage_returns_split_lines() {
        let pasted = "Return-Path: <alice@example.net>\rReceived: from mx (mx [203.0.113.9])\r\tby mail.local\rSubject: hi\r";
        let analysis = analyze(pasted, &mut StdRng::seed_from_u64(3));
        assert_eq!(analysis.headers.len(), 3);
        assert_eq!(analysis.headers[0].value, "<alice@example.net>");
        assert_eq!(analysis.headers[1].value, "from mx (mx [203.0.113.9]) by mail.local");
        assert_eq!(analysis.origin_ip, "203.0.113.9");

        let crlf = RAW.replace('\n', "\r\n");
        assert_eq!(parse_headers(&crlf).len(), 3);
    }

    #[test]
    fn unparsable_input_falls_back_to_sample() {
        let analysis = analyze("just some words", &mut StdRng::seed_from_u64(3));
        assert_eq!(analysis.headers.len(), SAMPLE_HEADERS.len());
        assert_eq!(analysis.origin_ip, FALLBACK_ORIGIN_IP);
        assert_eq!(analysis.location, SIMULATED_LOCATION);
    }
}
