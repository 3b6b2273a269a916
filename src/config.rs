//! Configuration loading from clt.toml
//!
//! Default parameters can be kept in a `clt.toml` file. The file is discovered
//! by walking up from the current directory; command-line flags override it.

use crate::constants::{
    BINOMIAL_P, BINS, EXPONENTIAL_LAMBDA, FIGURE_HEIGHT, FIGURE_WIDTH, SAMPLE_COUNT, SAMPLE_SIZE,
    UNIFORM_A, UNIFORM_B,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "clt.toml";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CltConfig {
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub binomial: BinomialConfig,
    #[serde(default)]
    pub exponential: ExponentialConfig,
    #[serde(default)]
    pub uniform: UniformConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Shared sampling controls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplingConfig {
    /// Number of samples (m)
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Draws per sample (n)
    #[serde(default = "default_size")]
    pub size: usize,
    /// Histogram bins for the standardized panel
    #[serde(default = "default_bins")]
    pub bins: usize,
    /// Fixed seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            size: default_size(),
            bins: default_bins(),
            seed: None,
        }
    }
}

fn default_samples() -> usize {
    SAMPLE_COUNT.default as usize
}
fn default_size() -> usize {
    SAMPLE_SIZE.default as usize
}
fn default_bins() -> usize {
    BINS.default as usize
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BinomialConfig {
    #[serde(default = "default_p")]
    pub p: f64,
    /// Trials per draw; follows the sample size when absent
    #[serde(default)]
    pub trials: Option<u64>,
}

impl Default for BinomialConfig {
    fn default() -> Self {
        Self {
            p: default_p(),
            trials: None,
        }
    }
}

fn default_p() -> f64 {
    BINOMIAL_P.default
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExponentialConfig {
    #[serde(default = "default_lambda")]
    pub lambda: f64,
}

impl Default for ExponentialConfig {
    fn default() -> Self {
        Self {
            lambda: default_lambda(),
        }
    }
}

fn default_lambda() -> f64 {
    EXPONENTIAL_LAMBDA.default
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UniformConfig {
    #[serde(default = "default_a")]
    pub a: f64,
    #[serde(default = "default_b")]
    pub b: f64,
}

impl Default for UniformConfig {
    fn default() -> Self {
        Self {
            a: default_a(),
            b: default_b(),
        }
    }
}

fn default_a() -> f64 {
    UNIFORM_A.default
}
fn default_b() -> f64 {
    UNIFORM_B.default
}

/// Where and how large figures are written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}
fn default_width() -> u32 {
    FIGURE_WIDTH
}
fn default_height() -> u32 {
    FIGURE_HEIGHT
}

impl CltConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Walk up from the current directory looking for `clt.toml`.
    ///
    /// Returns `Ok(None)` when no file exists; a file that fails to parse is an error.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                debug!(path = %config_path.display(), "loading configuration");
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Central Limit Theorem demo configuration

[sampling]
# Number of samples (m), 100-2000
samples = 1000
# Draws per sample (n), 5-200
size = 100
# Histogram bins for the standardized panel, 5-55
bins = 35
# Fixed seed for reproducible runs (uncomment to enable)
# seed = 42

[binomial]
# Success probability, 0.05-0.95
p = 0.5
# Trials per draw; defaults to the sample size (uncomment to override)
# trials = 100

[exponential]
# Rate parameter, 1-22
lambda = 7.0

[uniform]
# Interval bounds, a in 5-20 and b in 25-50
a = 15.0
b = 35.0

[output]
# Directory for rendered figures
directory = "."
# Figure size in pixels (both panels)
width = 1200
height = 600
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CltConfig::default();
        assert_eq!(config.sampling.samples, 1000);
        assert_eq!(config.sampling.size, 100);
        assert_eq!(config.sampling.bins, 35);
        assert_eq!(config.sampling.seed, None);
        assert_eq!(config.binomial.p, 0.5);
        assert_eq!(config.exponential.lambda, 7.0);
        assert_eq!((config.uniform.a, config.uniform.b), (15.0, 35.0));
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            [sampling]
            samples = 500
            seed = 7

            [uniform]
            b = 40.0
        "#;

        let config: CltConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sampling.samples, 500);
        assert_eq!(config.sampling.seed, Some(7));
        assert_eq!(config.uniform.b, 40.0);
        // Defaults should still apply
        assert_eq!(config.sampling.size, 100);
        assert_eq!(config.uniform.a, 15.0);
        assert_eq!(config.output.width, 1200);
    }

    #[test]
    fn test_default_toml_parses() {
        let config: CltConfig = toml::from_str(&CltConfig::default_toml()).unwrap();
        assert_eq!(config, CltConfig::default());
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(toml::from_str::<CltConfig>("[sampling]\nsamples = \"many\"\n").is_err());
    }
}
