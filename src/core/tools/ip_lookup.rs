// src/core/tools/ip_lookup.rs

use chrono::{DateTime, Local};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::info;

use crate::core::models::RiskLevel;

const SAMPLE_IPS: &[&str] = &["203.0.113.1", "198.51.100.42", "192.0.2.123", "172.217.4.174", "8.8.8.8"];

/// City, region, country, country code, ISP, ISP domain. One row is drawn per lookup.
const PLACES: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("San Francisco", "California", "United States", "US", "Google LLC", "google.com"),
    ("New York", "New York", "United States", "US", "Amazon.com", "amazon.com"),
    ("London", "England", "United Kingdom", "GB", "Cloudflare", "cloudflare.com"),
    ("Tokyo", "Tokyo", "Japan", "JP", "Microsoft", "microsoft.com"),
    ("Sydney", "New South Wales", "Australia", "AU", "Akamai", "akamai.com"),
    ("Berlin", "Berlin", "Germany", "DE", "Deutsche Telekom", "telekom.de"),
    ("Toronto", "Ontario", "Canada", "CA", "Rogers", "rogers.com"),
];

const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub city: String,
    pub region: String,
    pub country: String,
    pub country_code: String,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn maps_url(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Network {
    pub isp: String,
    pub organization: String,
    pub asn: String,
    pub network_type: String,
    pub domain: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityFlags {
    pub is_vpn: bool,
    pub is_proxy: bool,
    pub is_tor: bool,
    pub threat: String,
    pub risk_score: u8,
}

impl SecurityFlags {
    /// IP reputation uses stricter bands than the phishing score: above 70 is
    /// dangerous, above 40 suspicious.
    pub fn risk_level(&self) -> RiskLevel {
        match self.risk_score {
            71.. => RiskLevel::Dangerous,
            41..=70 => RiskLevel::Suspicious,
            _ => RiskLevel::Safe,
        }
    }
}

/// Details about the machine running the lookup.
#[derive(Debug, Clone, Serialize)]
pub struct ClientDetails {
    pub user_agent: String,
    pub languages: Vec<String>,
    pub platform: String,
    pub terminal_size: String,
}

impl ClientDetails {
    pub fn from_environment() -> Self {
        let languages = std::env::var("LANG")
            .ok()
            .map(|lang| lang.split('.').next().unwrap_or_default().replace('_', "-"))
            .filter(|lang| !lang.is_empty() && lang != "C" && lang != "POSIX")
            .map(|lang| vec![lang])
            .unwrap_or_else(|| vec!["en-US".to_string()]);
        let terminal_size = crossterm::terminal::size()
            .map(|(w, h)| format!("{}x{}", w, h))
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            languages,
            platform: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            terminal_size,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IpInfo {
    pub ip: String,
    pub location: Location,
    pub network: Network,
    pub security: SecurityFlags,
    pub client: ClientDetails,
}

/// Produces simulated details for `ip`, or for a sample public IP when absent.
pub fn lookup(ip: Option<&str>, client: ClientDetails, rng: &mut impl Rng) -> IpInfo {
    let ip = match ip {
        Some(ip) => ip.to_string(),
        None => SAMPLE_IPS.choose(rng).copied().unwrap_or(SAMPLE_IPS[0]).to_string(),
    };
    info!(%ip, "Simulating IP lookup.");

    let (city, region, country, code, isp, domain) = PLACES[rng.gen_range(0..PLACES.len())];
    let sign = if rng.gen_bool(0.5) { '+' } else { '-' };

    IpInfo {
        ip,
        location: Location {
            city: city.to_string(),
            region: region.to_string(),
            country: country.to_string(),
            country_code: code.to_string(),
            timezone: format!("UTC{}{}", sign, rng.gen_range(0..12)),
            latitude: 37.7749 + rng.gen_range(-10.0..10.0),
            longitude: -122.4194 + rng.gen_range(-10.0..10.0),
        },
        network: Network {
            isp: isp.to_string(),
            organization: format!("{} Network", isp),
            asn: format!("AS{}", 13000 + rng.gen_range(0..50000)),
            network_type: if rng.gen_bool(0.5) { "Business" } else { "Residential" }.to_string(),
            domain: domain.to_string(),
        },
        security: SecurityFlags {
            is_vpn: rng.gen_bool(0.2),
            is_proxy: rng.gen_bool(0.1),
            is_tor: rng.gen_bool(0.05),
            threat: if rng.gen_bool(0.1) { "Low Risk" } else { "Clean" }.to_string(),
            risk_score: rng.gen_range(0..100),
        },
        client,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub ip: String,
    pub timestamp: DateTime<Local>,
    pub location: String,
}

/// Lookups made this session, newest first.
#[derive(Debug, Default)]
pub struct IpHistory {
    entries: VecDeque<HistoryEntry>,
}

impl IpHistory {
    pub fn record(&mut self, info: &IpInfo) {
        self.entries.push_front(HistoryEntry {
            ip: info.ip.clone(),
            timestamp: Local::now(),
            location: format!("{}, {}", info.location.city, info.location.country),
        });
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn client() -> ClientDetails {
        ClientDetails {
            user_agent: "test".into(),
            languages: vec!["en-US".into()],
            platform: "linux".into(),
            terminal_size: "80x24".into(),
        }
    }

    #[test]
    fn explicit_ip_is_kept() {
        let info = lookup(Some("8.8.4.4"), client(), &mut StdRng::seed_from_u64(2));
        assert_eq!(info.ip, "8.8.4.4");
        assert!(info.security.risk_score < 100);
        assert!(info.network.asn.starts_with("AS"));
        assert!(info.location.timezone.starts_with("UTC"));
    }

    #[test]
    fn risk_bands_differ_from_phishing() {
        let flags = |risk_score| SecurityFlags {
            is_vpn: false,
            is_proxy: false,
            is_tor: false,
            threat: "Clean".into(),
            risk_score,
        };
        assert_eq!(flags(40).risk_level(), RiskLevel::Safe);
        assert_eq!(flags(41).risk_level(), RiskLevel::Suspicious);
        assert_eq!(flags(70).risk_level(), RiskLevel::Suspicious);
        assert_eq!(flags(71).risk_level(), RiskLevel::Dangerous);
        assert_eq!(RiskLevel::from_score(71), RiskLevel::Suspicious);
    }

    #[test]
    fn missing_ip_uses_a_sample() {
        let info = lookup(None, client(), &mut StdRng::seed_from_u64(2));
        assert!(SAMPLE_IPS.contains(&info.ip.as_str()));
    }

    #[test]
    fn location_row_is_consistent() {
        for seed in 0..20 {
            let info = lookup(None, client(), &mut StdRng::seed_from_u64(seed));
            let row = PLACES.iter().find(|p| p.0 == info.location.city).unwrap();
            assert_eq!(row.3, info.location.country_code);
            assert_eq!(row.4, info.network.isp);
        }
    }

    #[test]
    fn history_keeps_newest_ten() {
        let mut history = IpHistory::default();
        let mut rng = StdRng::seed_from_u64(4);
        for i in 0..12 {
            let ip = format!("10.0.0.{}", i);
            history.record(&lookup(Some(&ip), client(), &mut rng));
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.entries().next().unwrap().ip, "10.0.0.11");
        assert_eq!(history.entries().last().unwrap().ip, "10.0.0.2");
    }
}
