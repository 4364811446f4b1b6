// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod core;
pub mod loader;
pub mod validation;

pub use self::core::{HunterConfig, ScannerSettings};
pub use loader::{apply_env_overrides, ConfigFormat, ConfigLoader};
pub use validation::ConfigValidator;

use anyhow::Result;
use std::path::Path;

impl HunterConfig {
    /// Defaults with environment variable overrides applied
    ///
    /// Supports the following environment variables:
    /// - HUNTER_TARGET_URL: seed URL and scope host
    /// - HUNTER_SIGNATURE_PATH: signature directory
    /// - HUNTER_MAX_CONCURRENCY: maximum requests in flight
    /// - HUNTER_TIMEOUT: request timeout in seconds
    /// - ACCEPT_INVALID_CERTS: skip TLS certificate validation
    pub fn from_env() -> Result<Self> {
        let mut config = HunterConfig::default();
        apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Load from a YAML/TOML/JSON file when given, otherwise from the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => ConfigLoader::new(path)?.load_config(),
            None => Self::from_env(),
        }
    }
}
