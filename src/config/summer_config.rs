use crate::utils::error::{Result, SumError};
use crate::utils::validation::{validate_one_of, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummerConfig {
    pub logging: LoggingConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub flavor: RuntimeFlavor,
    /// Only used by the multi-threaded flavor.
    pub worker_threads: Option<usize>,
}

/// `CurrentThread` gives the deterministic single-threaded scheduling the
/// event ordering guarantees are stated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeFlavor {
    #[default]
    CurrentThread,
    MultiThread,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl SummerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SummerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for SummerConfig {
    fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        self.runtime.validate()
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        validate_one_of("logging.level", &self.level, LOG_LEVELS)
    }
}

impl Validate for RuntimeConfig {
    fn validate(&self) -> Result<()> {
        match (self.flavor, self.worker_threads) {
            (RuntimeFlavor::CurrentThread, Some(_)) => Err(SumError::ConfigError {
                message: "runtime.worker_threads requires flavor = \"multi_thread\"".to_string(),
            }),
            (RuntimeFlavor::MultiThread, Some(threads)) => {
                validate_positive_number("runtime.worker_threads", threads, 1)
            }
            _ => Ok(()),
        }
    }
}

impl RuntimeConfig {
    pub fn build_runtime(&self) -> Result<tokio::runtime::Runtime> {
        let mut builder = match self.flavor {
            RuntimeFlavor::CurrentThread => tokio::runtime::Builder::new_current_thread(),
            RuntimeFlavor::MultiThread => {
                let mut builder = tokio::runtime::Builder::new_multi_thread();
                if let Some(threads) = self.worker_threads {
                    builder.worker_threads(threads);
                }
                builder
            }
        };
        tracing::debug!("Building {:?} runtime", self.flavor);
        Ok(builder.enable_all().build()?)
    }
}
