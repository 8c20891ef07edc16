// src/core/report.rs

//! Plain-text rendering of tool reports and export to disk.
//!
//! The same text backs the TUI report pane, the CLI's default output and the
//! exported `.txt` files.

use chrono::{Local, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::error::{ToolError, ToolResult};
use crate::core::models::ToolReport;
use crate::core::tools::breach::format_count;
use crate::core::tools::dns_lookup::records_table;
use crate::core::tools::ip_lookup::IpHistory;
use crate::core::tools::stego::StegoResult;

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n=== {} ===\n", title));
}

fn line(out: &mut String, text: impl AsRef<str>) {
    out.push_str(text.as_ref());
    out.push('\n');
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn title_for(report: &ToolReport) -> &'static str {
    match report {
        ToolReport::Phishing(_) => "Phishing Analysis",
        ToolReport::Lookalike(_) => "Lookalike Links",
        ToolReport::EmailHeaders(_) => "Email Header Analysis",
        ToolReport::PortScan(_) => "Port Scan",
        ToolReport::Cipher(_) => "Encryption",
        ToolReport::KeyPair(_) => "Key Pair",
        ToolReport::Stego(_) => "Steganography",
        ToolReport::Breach(_) => "Breach Check",
        ToolReport::Dns(_) => "DNS Analysis",
        ToolReport::Ip(_) => "IP Analysis",
    }
}

/// Renders `report` as a sectioned plain-text document.
pub fn render(report: &ToolReport) -> String {
    let mut out = String::new();
    line(&mut out, format!("VR Tools - {} Report", title_for(report)));
    line(&mut out, format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));

    match report {
        ToolReport::Phishing(a) => {
            section(&mut out, "ANALYSIS SUMMARY");
            line(&mut out, format!("Content Type: {}", a.kind));
            line(&mut out, format!("Risk Level: {}", a.risk_level));
            line(&mut out, format!("Risk Score: {}/100", a.score));

            section(&mut out, "DETECTED INDICATORS");
            for reason in &a.reasons {
                line(&mut out, format!("• {}", reason));
            }

            section(&mut out, "SECURITY RECOMMENDATIONS");
            for rec in &a.recommendations {
                line(&mut out, format!("• {}", rec));
            }

            let details = &a.technical_details;
            section(&mut out, "TECHNICAL DETAILS");
            if let Some(s) = &details.url_structure {
                line(&mut out, "URL Structure:");
                line(&mut out, format!("- Protocol: {}", s.protocol));
                line(&mut out, format!("- Domain: {}", s.domain));
                line(&mut out, format!("- Path: {}", s.path));
                let params = if s.parameters.is_empty() { "None".to_string() } else { s.parameters.join(", ") };
                line(&mut out, format!("- Parameters: {}", params));
            }
            if let Some(age) = &details.domain_age {
                line(&mut out, format!("Domain Age: {}", age));
            }
            if let Some(ssl) = &details.ssl_certificate {
                line(&mut out, format!("SSL Certificate: {}", ssl));
            }
            if details.redirect_chain.len() > 1 {
                line(&mut out, format!("Redirect Chain: {}", details.redirect_chain.join(" -> ")));
            }

            section(&mut out, "INDICATOR BREAKDOWN");
            for ind in &a.indicators {
                let state = if ind.found { "DETECTED" } else { "NOT DETECTED" };
                line(&mut out, format!("{} ({}): {}", ind.category, ind.severity, state));
                line(&mut out, format!("- {}", ind.description));
            }
        }
        ToolReport::Lookalike(set) => {
            section(&mut out, "ORIGINAL URL");
            line(&mut out, &set.original);
            section(&mut out, "VARIANTS");
            for (i, v) in set.variants.iter().enumerate() {
                line(&mut out, format!("{}. [{}] {}", i + 1, v.technique, v.url));
            }
            section(&mut out, "TRAINING NOTE");
            line(&mut out, "For security awareness training only. Do not use these links to deceive anyone.");
        }
        ToolReport::EmailHeaders(e) => {
            section(&mut out, "AUTHENTICATION");
            for (name, check) in [("SPF", &e.spf), ("DKIM", &e.dkim), ("DMARC", &e.dmarc)] {
                line(&mut out, format!("{}: {} - {}", name, check.status, check.details));
            }
            section(&mut out, "ORIGIN");
            line(&mut out, format!("Origin IP: {}", e.origin_ip));
            line(&mut out, format!("Location: {}", e.location));
            section(&mut out, "HEADERS");
            for h in &e.headers {
                line(&mut out, format!("{}: {}", h.name, h.value));
            }
        }
        ToolReport::PortScan(p) => {
            section(&mut out, "HOST");
            line(&mut out, format!("Target: {}", p.target));
            line(&mut out, format!("Scan Type: {}", p.scan_type));
            line(&mut out, format!("IP: {}", p.host.ip));
            if let Some(hostname) = &p.host.hostname {
                line(&mut out, format!("Hostname: {}", hostname));
            }
            if let Some(os) = &p.host.os {
                line(&mut out, format!("OS: {}", os));
            }
            if let Some(uptime) = &p.host.uptime {
                line(&mut out, format!("Uptime: {}", uptime));
            }
            section(&mut out, "PORTS");
            line(&mut out, format!("{:<10}{:<10}{:<14}VERSION", "PORT", "STATE", "SERVICE"));
            for port in &p.ports {
                line(
                    &mut out,
                    format!(
                        "{:<10}{:<10}{:<14}{}",
                        format!("{}/{}", port.port, port.protocol),
                        port.state,
                        port.service,
                        port.version.unwrap_or("-")
                    ),
                );
            }
        }
        ToolReport::Cipher(c) => {
            section(&mut out, "OUTPUT");
            line(&mut out, format!("Algorithm: {}", c.algorithm));
            line(&mut out, format!("Mode: {}", c.mode));
            line(&mut out, "");
            line(&mut out, &c.text);
        }
        ToolReport::KeyPair(k) => {
            section(&mut out, "PUBLIC KEY");
            line(&mut out, &k.public_key);
            section(&mut out, "PRIVATE KEY");
            line(&mut out, &k.private_key);
        }
        ToolReport::Stego(s) => {
            section(&mut out, "IMAGE");
            line(&mut out, format!("File: {}", s.file_name));
            line(&mut out, format!("Size: {} KB", s.size_kb));
            line(&mut out, format!("Format: {}", s.format));
            section(&mut out, "RESULT");
            line(&mut out, s.result.headline());
            if let StegoResult::Extracted { message } = &s.result {
                line(&mut out, format!("Message: {}", message));
            }
        }
        ToolReport::Breach(b) => {
            section(&mut out, "SUMMARY");
            line(&mut out, format!("Email: {}", b.email));
            line(&mut out, format!("Breaches Found: {}", b.breaches.len()));
            if b.breaches.is_empty() {
                line(&mut out, "Your email was not found in any known data breaches.");
            }
            for breach in &b.breaches {
                section(&mut out, &breach.name.to_uppercase());
                line(&mut out, format!("Date: {}", breach.date));
                line(&mut out, format!("Accounts: {} ({})", format_count(breach.compromised_accounts), breach.tier()));
                line(&mut out, format!("Verified: {}", yes_no(breach.verified)));
                line(&mut out, format!("Data: {}", breach.data_classes.join(", ")));
                line(&mut out, breach.description);
            }
        }
        ToolReport::Dns(d) => {
            section(&mut out, "DNS RECORDS");
            line(&mut out, records_table(&d.records));

            let w = &d.whois;
            section(&mut out, "WHOIS");
            line(&mut out, format!("Registrar: {}", w.registrar));
            line(&mut out, format!("Registered: {}", w.registration_date));
            line(&mut out, format!("Expires: {}", w.expiration_date));
            line(&mut out, format!("Updated: {}", w.last_updated));
            line(&mut out, format!("Name Servers: {}", w.name_servers.join(", ")));
            line(&mut out, format!("Status: {}", w.status.join(", ")));
            line(&mut out, format!("Registrant: {}", w.contacts.registrant));

            let s = &d.security;
            section(&mut out, "SECURITY");
            line(&mut out, format!("DNSSEC: {}", if s.dnssec { "Enabled" } else { "Disabled" }));
            line(&mut out, format!("Blacklisted: {}", yes_no(s.blacklisted)));
            line(&mut out, format!("Reputation: {}", s.reputation));
            if !s.threat_categories.is_empty() {
                line(&mut out, format!("Threat Categories: {}", s.threat_categories.join(", ")));
            }
            line(&mut out, format!("Last Scan: {}", s.last_scan.format("%Y-%m-%d %H:%M UTC")));

            let p = &d.performance;
            section(&mut out, "PERFORMANCE");
            line(&mut out, format!("Response Time: {}ms", p.response_time_ms));
            line(&mut out, format!("Propagation: {}", p.propagation));
            for server in &p.global_servers {
                let status = if server.online { "Online" } else { "Offline" };
                line(&mut out, format!("- {}: {} ({}ms)", server.location, status, server.response_time_ms));
            }
        }
        ToolReport::Ip(i) => {
            section(&mut out, "BASIC INFORMATION");
            line(&mut out, format!("IP Address: {}", i.ip));
            let l = &i.location;
            line(
                &mut out,
                format!("Location: {}, {}, {} ({})", l.city, l.region, l.country, l.country_code),
            );
            line(&mut out, format!("Timezone: {}", l.timezone));
            line(&mut out, format!("Coordinates: {:.4}, {:.4}", l.latitude, l.longitude));
            line(&mut out, format!("Map: {}", l.maps_url()));

            let n = &i.network;
            section(&mut out, "NETWORK INFORMATION");
            line(&mut out, format!("ISP: {}", n.isp));
            line(&mut out, format!("Organization: {}", n.organization));
            line(&mut out, format!("ASN: {}", n.asn));
            line(&mut out, format!("Type: {}", n.network_type));
            line(&mut out, format!("Domain: {}", n.domain));

            let s = &i.security;
            section(&mut out, "SECURITY ANALYSIS");
            line(&mut out, format!("VPN Detected: {}", yes_no(s.is_vpn)));
            line(&mut out, format!("Proxy Detected: {}", yes_no(s.is_proxy)));
            line(&mut out, format!("Tor Network: {}", yes_no(s.is_tor)));
            line(&mut out, format!("Threat Level: {}", s.threat));
            line(&mut out, format!("Risk Score: {}/100", s.risk_score));

            let c = &i.client;
            section(&mut out, "ADDITIONAL DETAILS");
            line(&mut out, format!("User Agent: {}", c.user_agent));
            line(&mut out, format!("Languages: {}", c.languages.join(", ")));
            line(&mut out, format!("Platform: {}", c.platform));
            line(&mut out, format!("Terminal Size: {}", c.terminal_size));
        }
    }

    out
}

/// Renders the session's IP lookup history, or nothing when it is empty.
pub fn render_history(history: &IpHistory) -> String {
    let mut out = String::new();
    if history.is_empty() {
        return out;
    }
    section(&mut out, "LOOKUP HISTORY");
    for entry in history.entries() {
        line(
            &mut out,
            format!("{}  {}  {}", entry.timestamp.format("%H:%M:%S"), entry.ip, entry.location),
        );
    }
    out
}

/// Export file name, stamped with milliseconds since the epoch.
pub fn file_name(report: &ToolReport, millis: i64) -> String {
    match report {
        ToolReport::Phishing(_) => format!("phishing-analysis-{}.txt", millis),
        ToolReport::Ip(i) => format!("ip-report-{}-{}.txt", i.ip.replace(':', "_"), millis),
        ToolReport::Cipher(c) => format!("{}ed_{}_{}.txt", c.mode, c.algorithm, millis),
        ToolReport::KeyPair(_) => format!("rsa-keypair-{}.txt", millis),
        other => format!("{}-{}.txt", other.kind().descriptor().slug, millis),
    }
}

/// What gets written to disk. The cipher saves only its output text.
fn export_body(report: &ToolReport) -> String {
    match report {
        ToolReport::Cipher(c) => c.text.clone(),
        other => render(other),
    }
}

/// Writes `report` into `dir`, creating it if needed. Returns the file path.
pub fn export(report: &ToolReport, dir: &Path) -> ToolResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| ToolError::Io {
        path: dir.display().to_string(),
        source,
    })?;
    let path = dir.join(file_name(report, Utc::now().timestamp_millis()));
    std::fs::write(&path, export_body(report)).map_err(|source| ToolError::Io {
        path: path.display().to_string(),
        source,
    })?;

    info!(path = %path.display(), "Report exported.");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tools::cipher::{self, Algorithm, Mode};
    use crate::core::tools::ip_lookup::{self, ClientDetails};
    use crate::core::tools::phishing::{self, ContentKind};
    use crate::core::tools::{breach, dns_lookup};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn client() -> ClientDetails {
        ClientDetails {
            user_agent: "vr-tools/test".into(),
            languages: vec!["en-US".into()],
            platform: "linux x86_64".into(),
            terminal_size: "80x24".into(),
        }
    }

    #[test]
    fn phishing_report_has_all_sections() {
        let mut rng = StdRng::seed_from_u64(1);
        let report = ToolReport::Phishing(phishing::analyze(
            "http://verify-paypal.example.com/login",
            ContentKind::Url,
            &mut rng,
        ));
        let text = render(&report);
        for heading in [
            "=== ANALYSIS SUMMARY ===",
            "=== DETECTED INDICATORS ===",
            "=== SECURITY RECOMMENDATIONS ===",
            "=== TECHNICAL DETAILS ===",
            "=== INDICATOR BREAKDOWN ===",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.starts_with("VR Tools - Phishing Analysis Report"));
        assert!(text.contains("- Protocol: http:"));
        assert!(text.contains("Brand Impersonation (High): DETECTED"));
    }

    #[test]
    fn ip_report_and_history() {
        let mut rng = StdRng::seed_from_u64(3);
        let info = ip_lookup::lookup(Some("8.8.8.8"), client(), &mut rng);
        let mut history = IpHistory::default();
        assert!(render_history(&history).is_empty());
        history.record(&info);

        let text = render(&ToolReport::Ip(info));
        assert!(text.contains("IP Address: 8.8.8.8"));
        assert!(text.contains("=== SECURITY ANALYSIS ==="));
        assert!(render_history(&history).contains("8.8.8.8"));
    }

    #[test]
    fn breach_report_formats_counts() {
        let report = (0..50)
            .map(|seed| breach::check("a@b.io", &mut StdRng::seed_from_u64(seed)))
            .find(|r| !r.breaches.is_empty())
            .unwrap();
        let text = render(&ToolReport::Breach(report));
        assert!(text.contains("=== ADOBE ==="));
        assert!(text.contains("Accounts: 152,445,165 (Critical)"));

        let empty = breach::BreachReport { email: "a@b.io".into(), breaches: vec![] };
        assert!(render(&ToolReport::Breach(empty)).contains("Breaches Found: 0"));
    }

    #[test]
    fn dns_report_embeds_the_record_table() {
        let mut rng = StdRng::seed_from_u64(5);
        let text = render(&ToolReport::Dns(dns_lookup::lookup("example.com", &mut rng)));
        assert!(text.contains("Type\tName\tValue\tTTL\tPriority"));
        assert!(text.contains("=== WHOIS ==="));
    }

    #[test]
    fn file_names_follow_the_tool() {
        let mut rng = StdRng::seed_from_u64(9);
        let phishing = ToolReport::Phishing(phishing::analyze("hi", ContentKind::Text, &mut rng));
        assert_eq!(file_name(&phishing, 42), "phishing-analysis-42.txt");

        let ip = ToolReport::Ip(ip_lookup::lookup(Some("1.2.3.4"), client(), &mut rng));
        assert_eq!(file_name(&ip, 42), "ip-report-1.2.3.4-42.txt");

        let enc = ToolReport::Cipher(cipher::process(Algorithm::Base64, Mode::Encrypt, "x", "").unwrap());
        assert_eq!(file_name(&enc, 42), "encrypted_base64_42.txt");

        let dns = ToolReport::Dns(dns_lookup::lookup("example.com", &mut rng));
        assert_eq!(file_name(&dns, 42), "dns-lookup-42.txt");
    }

    #[test]
    fn export_creates_the_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("reports");
        let report = ToolReport::Cipher(cipher::process(Algorithm::Base64, Mode::Encrypt, "hello", "").unwrap());

        let path = export(&report, &target).unwrap();
        assert!(path.starts_with(&target));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "aGVsbG8=");
    }
}
