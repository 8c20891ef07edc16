// src/core/tools/lookalike.rs

//! Lookalike link generator for security awareness training.
//!
//! Produces the classic disguises a phishing link uses so that trainees learn
//! to recognise them. Nothing here resolves or registers anything.

use once_cell::sync::Lazy;
use rand::Rng;
use rand::distributions::Alphanumeric;
use regex::Regex;
use serde::Serialize;
use tracing::info;

static RE_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").unwrap());

#[derive(Debug, Clone, Serialize)]
pub struct LookalikeVariant {
    pub technique: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LookalikeSet {
    pub original: String,
    pub variants: Vec<LookalikeVariant>,
}

pub fn generate(url: &str, rng: &mut impl Rng) -> LookalikeSet {
    info!(url, "Generating lookalike variants.");

    let token: String = (0..9)
        .map(|_| (rng.sample(Alphanumeric) as char).to_ascii_lowercase())
        .collect();

    let variants = vec![
        LookalikeVariant {
            technique: "URL encoding",
            url: url.replace('.', "%2E"),
        },
        LookalikeVariant {
            // Cyrillic о and а.
            technique: "Homograph characters",
            url: url.replace('o', "\u{043e}").replace('a', "\u{0430}"),
        },
        LookalikeVariant {
            technique: "IP-based host",
            url: url.replace("google.com", "172.217.4.174"),
        },
        LookalikeVariant {
            technique: "Shortened redirect",
            url: format!("http://bit.ly/shortened-{}", token),
        },
        LookalikeVariant {
            technique: "Subdomain spoofing",
            url: RE_SCHEME
                .replacen(url, 1, "https://secure-")
                .replacen(".com", "-verification.com", 1),
        },
    ];

    LookalikeSet { original: url.to_string(), variants }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn produces_five_disguises() {
        let set = generate("https://google.com/login", &mut StdRng::seed_from_u64(1));
        let urls: Vec<&str> = set.variants.iter().map(|v| v.url.as_str()).collect();

        assert_eq!(urls.len(), 5);
        assert_eq!(urls[0], "https://google%2Ecom/login");
        assert_eq!(urls[1], "https://g\u{043e}\u{043e}gle.c\u{043e}m/l\u{043e}gin");
        assert_eq!(urls[2], "https://172.217.4.174/login");
        assert!(urls[3].starts_with("http://bit.ly/shortened-"));
        assert_eq!(urls[3].len(), "http://bit.ly/shortened-".len() + 9);
        assert_eq!(urls[4], "https://secure-google-verification.com/login");
    }

    #[test]
    fn url_without_scheme_keeps_its_shape() {
        let set = generate("example.org", &mut StdRng::seed_from_u64(1));
        assert_eq!(set.variants[4].url, "example.org");
        assert_eq!(set.variants[2].url, "example.org");
    }
}
