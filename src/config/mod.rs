pub mod summer_config;

pub use summer_config::{LogFormat, LoggingConfig, RuntimeConfig, RuntimeFlavor, SummerConfig};
