//! Configuration file loading for consult-audit
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `AUDIT_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./audit.toml` or `./.audit.toml`
//! 4. Global: `$XDG_CONFIG_HOME/consult-audit/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, FileConfig, FileJudgmentConfig, FileOutputConfig,
    FileReviewConfig, FileStoreConfig,
};
pub use loader::ConfigLoader;
