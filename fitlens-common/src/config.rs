use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleConfig {
    #[serde(default = "default_min_support")]
    pub min_support: i64,
    #[serde(default = "default_max_support")]
    pub max_support: i64,
}

fn default_min_support() -> i64 {
    0
}
fn default_max_support() -> i64 {
    20
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            min_support: default_min_support(),
            max_support: default_max_support(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    #[serde(default = "default_significance")]
    pub significance: f64,
}

fn default_significance() -> f64 {
    0.05
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            significance: default_significance(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_format() -> String {
    "json".into()
}
fn default_output_dir() -> String {
    ".".into()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sample: SampleConfig,
    #[serde(default)]
    pub test: TestConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitlens")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("FITLENS_CONFIG") {
            PathBuf::from(env_path) // $FITLENS_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        Self::load_from(&path)
    }

    /// Missing file means defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| crate::FitLensError::Config(e.to_string()))?;
        if cfg.sample.min_support > cfg.sample.max_support {
            return Err(crate::FitLensError::Config(format!(
                "min_support {} exceeds max_support {}",
                cfg.sample.min_support, cfg.sample.max_support
            )));
        }
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::FitLensError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
