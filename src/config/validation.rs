// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use validator::Validate;

use super::core::HunterConfig;
use crate::resolver::Target;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &HunterConfig) -> Result<()> {
        config.validate()
            .context("Configuration validation failed")?;

        Self::validate_target(config)?;
        Self::validate_signature_path(config)?;

        Ok(())
    }

    fn validate_target(config: &HunterConfig) -> Result<()> {
        Target::parse(&config.target_url)?;
        Ok(())
    }

    fn validate_signature_path(config: &HunterConfig) -> Result<()> {
        if config.signature_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Signature path cannot be empty"));
        }

        Ok(())
    }
}
