// src/config.rs

use color_eyre::eyre::{Result, WrapErr};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::logging::{get_config_dir, get_data_dir};

pub const CONFIG_FILE: &str = "config.toml";

/// User settings, read from `config.toml` in the platform config directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wait the per-tool delay before a result is shown.
    pub simulate_latency: bool,
    /// Fixed RNG seed; every run with the same seed and input yields the same report.
    pub seed: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub show_disclaimer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            seed: None,
            export_dir: None,
            show_disclaimer: true,
        }
    }
}

impl Settings {
    /// Loads the default config file, falling back to defaults when it is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_dir().join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults.");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?;
        let settings: Settings = toml::from_str(&raw)
            .wrap_err_with(|| format!("parsing {}", path.display()))?;
        info!(path = %path.display(), "Loaded settings.");
        Ok(settings)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| get_data_dir().join("reports"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert!(settings.simulate_latency);
        assert!(settings.show_disclaimer);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "simulate_latency = false\nseed = 42\nexport_dir = \"/tmp/vr\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert!(!settings.simulate_latency);
        assert!(settings.show_disclaimer);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.export_dir(), PathBuf::from("/tmp/vr"));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "seed = \"not a number\"").unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        assert!(format!("{err}").contains("parsing"));
    }

    #[test]
    fn seeded_rng_is_repeatable() {
        let settings = Settings { seed: Some(7), ..Settings::default() };
        let a: u64 = settings.rng().gen_range(0..u64::MAX);
        let b: u64 = settings.rng().gen_range(0..u64::MAX);
        assert_eq!(a, b);
    }
}
