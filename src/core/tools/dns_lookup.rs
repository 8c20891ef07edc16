// src/core/tools/dns_lookup.rs

//! Simulated DNS, WHOIS, reputation and propagation lookup.
//!
//! Record values are templated from the queried domain; everything else is
//! drawn from the provided RNG. No resolver is ever contacted.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use strum::Display;
use tracing::{debug, info};

const REGISTRARS: &[&str] = &["GoDaddy LLC", "Namecheap Inc", "Google Domains", "Cloudflare Inc", "Amazon Registrar"];
const WHOIS_STATUSES: &[&str] = &["clientTransferProhibited", "clientUpdateProhibited", "clientDeleteProhibited"];
const THREAT_CATEGORIES: &[&str] = &["Malware", "Phishing", "Spam", "Botnet"];
const PROBE_LOCATIONS: &[&str] = &["New York", "London", "Tokyo", "Sydney", "Frankfurt", "Singapore"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Mx,
    Txt,
    Ns,
    Cname,
    Srv,
}

#[derive(Debug, Clone, Serialize)]
pub struct DnsRecord {
    pub record_type: RecordType,
    pub name: String,
    pub value: String,
    pub ttl: u32,
    pub priority: Option<u16>,
    pub weight: Option<u16>,
    pub port: Option<u16>,
}

impl DnsRecord {
    fn new(record_type: RecordType, name: impl Into<String>, value: impl Into<String>, ttl: u32) -> Self {
        Self {
            record_type,
            name: name.into(),
            value: value.into(),
            ttl,
            priority: None,
            weight: None,
            port: None,
        }
    }

    fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// `TYPE NAME VALUE TTL [PRIORITY]`, the single-record copy format.
    pub fn to_line(&self) -> String {
        let mut line = format!("{} {} {} {}", self.record_type, self.name, self.value, self.ttl);
        if let Some(p) = self.priority {
            line.push_str(&format!(" {}", p));
        }
        line
    }
}

/// Tab-separated table of all records with a header row.
pub fn records_table(records: &[DnsRecord]) -> String {
    let mut out = String::from("Type\tName\tValue\tTTL\tPriority");
    for r in records {
        out.push_str(&format!("\n{}\t{}\t{}\t{}", r.record_type, r.name, r.value, r.ttl));
        if let Some(p) = r.priority {
            out.push_str(&format!("\t{}", p));
        }
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct WhoisContacts {
    pub registrant: String,
    pub admin: String,
    pub tech: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhoisInfo {
    pub domain: String,
    pub registrar: String,
    pub registration_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub last_updated: NaiveDate,
    pub name_servers: Vec<String>,
    pub status: Vec<String>,
    pub contacts: WhoisContacts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Reputation {
    Good,
    Suspicious,
    Malicious,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityInfo {
    pub dnssec: bool,
    pub blacklisted: bool,
    pub reputation: Reputation,
    pub threat_categories: Vec<String>,
    pub last_scan: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Propagation {
    Complete,
    Partial,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerProbe {
    pub location: String,
    pub online: bool,
    pub response_time_ms: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    pub response_time_ms: u32,
    pub propagation: Propagation,
    pub global_servers: Vec<ServerProbe>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DnsReport {
    pub domain: String,
    pub records: Vec<DnsRecord>,
    pub whois: WhoisInfo,
    pub security: SecurityInfo,
    pub performance: PerformanceMetrics,
}

pub fn lookup(domain: &str, rng: &mut impl Rng) -> DnsReport {
    info!(domain, "Starting simulated DNS lookup.");
    let report = DnsReport {
        domain: domain.to_string(),
        records: generate_records(domain, rng),
        whois: generate_whois(domain, rng),
        security: generate_security(rng),
        performance: generate_performance(rng),
    };
    debug!(records = report.records.len(), reputation = %report.security.reputation, "DNS lookup finished.");
    report
}

pub fn generate_records(domain: &str, rng: &mut impl Rng) -> Vec<DnsRecord> {
    let a_value = format!(
        "{}.{}.{}.{}",
        rng.gen_range(0..255u8),
        rng.gen_range(0..255u8),
        rng.gen_range(0..255u8),
        rng.gen_range(0..255u8)
    );

    let mut srv = DnsRecord::new(RecordType::Srv, format!("_sip._tcp.{domain}"), format!("sip.{domain}"), 3600)
        .with_priority(10);
    srv.weight = Some(5);
    srv.port = Some(5060);

    vec![
        DnsRecord::new(RecordType::A, domain, a_value, 300),
        DnsRecord::new(RecordType::Aaaa, domain, "2001:db8:85a3::8a2e:370:7334", 300),
        DnsRecord::new(RecordType::Mx, domain, format!("mail.{domain}"), 3600).with_priority(10),
        DnsRecord::new(RecordType::Mx, domain, format!("mail2.{domain}"), 3600).with_priority(20),
        DnsRecord::new(RecordType::Txt, domain, "v=spf1 include:_spf.google.com ~all", 3600),
        DnsRecord::new(
            RecordType::Txt,
            format!("_dmarc.{domain}"),
            format!("v=DMARC1; p=quarantine; rua=mailto:dmarc@{domain}"),
            3600,
        ),
        DnsRecord::new(
            RecordType::Txt,
            format!("_dkim._domainkey.{domain}"),
            "v=DKIM1; k=rsa; p=MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQC...",
            3600,
        ),
        DnsRecord::new(RecordType::Ns, domain, format!("ns1.{domain}"), 86400),
        DnsRecord::new(RecordType::Ns, domain, format!("ns2.{domain}"), 86400),
        DnsRecord::new(RecordType::Cname, format!("www.{domain}"), domain, 3600),
        srv,
    ]
}

fn days_ago(rng: &mut impl Rng, max_days: i64) -> NaiveDate {
    (Utc::now() - Duration::days(rng.gen_range(0..=max_days))).date_naive()
}

pub fn generate_whois(domain: &str, rng: &mut impl Rng) -> WhoisInfo {
    let registrar = REGISTRARS.choose(rng).copied().unwrap_or(REGISTRARS[0]);
    let registration_date = days_ago(rng, 365 * 5);
    let expiration_date = (Utc::now() + Duration::days(rng.gen_range(0..=365 * 3))).date_naive();
    let last_updated = days_ago(rng, 30);
    let status_count = rng.gen_range(1..=WHOIS_STATUSES.len());

    WhoisInfo {
        domain: domain.to_string(),
        registrar: registrar.to_string(),
        registration_date,
        expiration_date,
        last_updated,
        name_servers: (1..=4).map(|i| format!("ns{i}.{domain}")).collect(),
        status: WHOIS_STATUSES[..status_count].iter().map(|s| s.to_string()).collect(),
        contacts: WhoisContacts {
            registrant: "Privacy Protected".to_string(),
            admin: "Privacy Protected".to_string(),
            tech: "Privacy Protected".to_string(),
        },
    }
}

pub fn generate_security(rng: &mut impl Rng) -> SecurityInfo {
    let reputation = [Reputation::Good, Reputation::Suspicious, Reputation::Malicious]
        .choose(rng)
        .copied()
        .unwrap_or(Reputation::Good);
    let threat_categories = if rng.gen_bool(0.3) {
        let n = rng.gen_range(1..=2);
        THREAT_CATEGORIES[..n].iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    };

    SecurityInfo {
        dnssec: rng.gen_bool(0.7),
        blacklisted: rng.gen_bool(0.2),
        reputation,
        threat_categories,
        last_scan: Utc::now(),
    }
}

pub fn generate_performance(rng: &mut impl Rng) -> PerformanceMetrics {
    PerformanceMetrics {
        response_time_ms: rng.gen_range(50..250),
        propagation: if rng.gen_bool(0.8) { Propagation::Complete } else { Propagation::Partial },
        global_servers: PROBE_LOCATIONS
            .iter()
            .map(|location| ServerProbe {
                location: location.to_string(),
                online: rng.gen_bool(0.9),
                response_time_ms: rng.gen_range(20..320),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn records_are_templated_from_the_domain() {
        let records = generate_records("example.com", &mut StdRng::seed_from_u64(1));
        assert_eq!(records.len(), 11);
        assert_eq!(records[0].record_type, RecordType::A);
        assert_eq!(records[0].value.split('.').count(), 4);
        assert_eq!(records[2].to_line(), "MX example.com mail.example.com 3600 10");
        assert_eq!(records[9].to_line(), "CNAME www.example.com example.com 3600");
        let srv = &records[10];
        assert_eq!((srv.priority, srv.weight, srv.port), (Some(10), Some(5), Some(5060)));
    }

    #[test]
    fn table_has_header_and_one_row_per_record() {
        let records = generate_records("example.com", &mut StdRng::seed_from_u64(1));
        let table = records_table(&records);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Type\tName\tValue\tTTL\tPriority");
        assert_eq!(lines.len(), records.len() + 1);
        assert_eq!(lines[4], "MX\texample.com\tmail2.example.com\t3600\t20");
    }

    #[test]
    fn whois_dates_are_ordered_around_today() {
        let whois = generate_whois("example.com", &mut StdRng::seed_from_u64(5));
        let today = Utc::now().date_naive();
        assert!(whois.registration_date <= today);
        assert!(whois.expiration_date >= today);
        assert!(whois.last_updated >= today - Duration::days(30));
        assert_eq!(whois.name_servers.len(), 4);
        assert!((1..=3).contains(&whois.status.len()));
    }

    #[test]
    fn performance_ranges() {
        for seed in 0..10 {
            let perf = generate_performance(&mut StdRng::seed_from_u64(seed));
            assert!((50..250).contains(&perf.response_time_ms));
            assert_eq!(perf.global_servers.len(), PROBE_LOCATIONS.len());
            for server in &perf.global_servers {
                assert!((20..320).contains(&server.response_time_ms));
            }
        }
    }
}
