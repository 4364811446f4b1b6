// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::core::HunterConfig;
use super::validation::ConfigValidator;

pub struct ConfigLoader {
    config_path: PathBuf,
    format: ConfigFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref().to_path_buf();
        let format = Self::detect_format(&path)?;

        Ok(Self {
            config_path: path,
            format,
        })
    }

    fn detect_format(path: &Path) -> Result<ConfigFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config file format"))?;

        match extension {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(anyhow::anyhow!("Unsupported config file format: {}", extension)),
        }
    }

    /// Read the file, apply environment overrides and validate
    pub fn load_config(&self) -> Result<HunterConfig> {
        let content = std::fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file: {:?}", self.config_path))?;

        let mut config = self.parse(&content)?;

        apply_env_overrides(&mut config)?;

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    fn parse(&self, content: &str) -> Result<HunterConfig> {
        let config = match self.format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .context("Failed to parse YAML config")?,
            ConfigFormat::Toml => toml::from_str(content)
                .context("Failed to parse TOML config")?,
            ConfigFormat::Json => serde_json::from_str(content)
                .context("Failed to parse JSON config")?,
        };
        Ok(config)
    }
}

/// Apply `HUNTER_*` and `ACCEPT_INVALID_CERTS` environment variables
pub fn apply_env_overrides(config: &mut HunterConfig) -> Result<()> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

fn apply_overrides_from<F>(config: &mut HunterConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(target_url) = lookup("HUNTER_TARGET_URL") {
        config.target_url = target_url;
    }

    if let Some(signature_path) = lookup("HUNTER_SIGNATURE_PATH") {
        config.signature_path = PathBuf::from(signature_path);
    }

    if let Some(concurrency) = lookup("HUNTER_MAX_CONCURRENCY") {
        config.scanner.max_concurrency = concurrency
            .parse()
            .context("Invalid HUNTER_MAX_CONCURRENCY")?;
    }

    if let Some(timeout) = lookup("HUNTER_TIMEOUT") {
        config.scanner.request_timeout_secs = timeout
            .parse()
            .context("Invalid HUNTER_TIMEOUT")?;
    }

    if let Some(accept) = lookup("ACCEPT_INVALID_CERTS") {
        config.scanner.accept_invalid_certs = accept.parse().unwrap_or(false);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LinkMode, MatchPolicy};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            ConfigLoader::detect_format(Path::new("hunter.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigLoader::detect_format(Path::new("hunter.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigLoader::detect_format(Path::new("hunter.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigLoader::detect_format(Path::new("hunter.ini")).is_err());
        assert!(ConfigLoader::detect_format(Path::new("hunter")).is_err());
    }

    #[test]
    fn test_load_toml_config() -> Result<()> {
        let toml_content = r#"
target_url = "http://victim.example.com/"
signature_path = "/opt/sigs"

[scanner]
max_concurrency = 8
match_policy = "legacy"
link_mode = "absolute"
max_pages = 500
"#;
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        file.write_all(toml_content.as_bytes())?;

        let loader = ConfigLoader::new(file.path())?;
        let config = loader.parse(toml_content)?;

        assert_eq!(config.target_url, "http://victim.example.com/");
        assert_eq!(config.signature_path, PathBuf::from("/opt/sigs"));
        assert_eq!(config.scanner.max_concurrency, 8);
        assert_eq!(config.scanner.request_timeout_secs, 10);
        assert_eq!(config.scanner.match_policy, MatchPolicy::Legacy);
        assert_eq!(config.scanner.link_mode, LinkMode::Absolute);
        assert_eq!(config.scanner.max_pages, Some(500));
        Ok(())
    }

    #[test]
    fn test_load_yaml_defaults() -> Result<()> {
        let yaml_content = "target_url: \"https://example.org/\"\n";
        let mut file = Builder::new().suffix(".yml").tempfile()?;
        file.write_all(yaml_content.as_bytes())?;

        let config = ConfigLoader::new(file.path())?.parse(yaml_content)?;
        assert_eq!(config.target_url, "https://example.org/");
        assert_eq!(config.signature_path, PathBuf::from("./sigs/filenames"));
        assert_eq!(config.scanner.max_concurrency, 50);
        assert_eq!(config.scanner.match_policy, MatchPolicy::Success);
        Ok(())
    }

    #[test]
    fn test_invalid_json_is_error() -> Result<()> {
        let file = Builder::new().suffix(".json").tempfile()?;
        let loader = ConfigLoader::new(file.path())?;
        assert!(loader.parse("{ not json").is_err());
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let vars: HashMap<&str, &str> = [
            ("HUNTER_TARGET_URL", "http://override.example.com/"),
            ("HUNTER_MAX_CONCURRENCY", "3"),
            ("ACCEPT_INVALID_CERTS", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = HunterConfig::default();
        apply_overrides_from(&mut config, |key| vars.get(key).map(|v| v.to_string()))?;

        assert_eq!(config.target_url, "http://override.example.com/");
        assert_eq!(config.scanner.max_concurrency, 3);
        assert!(config.scanner.accept_invalid_certs);
        assert_eq!(config.scanner.request_timeout_secs, 10);
        Ok(())
    }

    #[test]
    fn test_bad_override_is_error() {
        let mut config = HunterConfig::default();
        let result = apply_overrides_from(&mut config, |key| {
            (key == "HUNTER_TIMEOUT").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
