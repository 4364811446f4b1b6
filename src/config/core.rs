// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

use crate::crawler::HuntOptions;
use crate::http_client::MAX_BODY_SIZE;
use crate::types::{LinkMode, MatchPolicy};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HunterConfig {
    #[validate(url)]
    #[serde(default = "default_target_url")]
    pub target_url: String,

    #[serde(default = "default_signature_path")]
    pub signature_path: PathBuf,

    #[validate(nested)]
    #[serde(default)]
    pub scanner: ScannerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScannerSettings {
    #[validate(range(min = 1, max = 10000))]
    #[serde(default = "default_concurrency")]
    pub max_concurrency: usize,

    #[validate(range(min = 1, max = 3600))]
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[validate(range(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub match_policy: MatchPolicy,

    #[serde(default)]
    pub link_mode: LinkMode,

    #[validate(range(min = 1024))]
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for HunterConfig {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            signature_path: default_signature_path(),
            scanner: ScannerSettings::default(),
        }
    }
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            max_concurrency: default_concurrency(),
            request_timeout_secs: default_timeout(),
            max_pages: None,
            user_agent: None,
            match_policy: MatchPolicy::default(),
            link_mode: LinkMode::default(),
            max_body_size: default_max_body_size(),
            accept_invalid_certs: false,
        }
    }
}

impl ScannerSettings {
    pub fn hunt_options(&self) -> HuntOptions {
        HuntOptions {
            max_concurrency: self.max_concurrency,
            max_pages: self.max_pages,
            link_mode: self.link_mode,
            match_policy: self.match_policy,
        }
    }
}

fn default_target_url() -> String {
    "http://www.thesaurus.com/".to_string()
}

fn default_signature_path() -> PathBuf {
    PathBuf::from("./sigs/filenames")
}

fn default_concurrency() -> usize {
    50
}

fn default_timeout() -> u64 {
    10
}

fn default_max_body_size() -> usize {
    MAX_BODY_SIZE
}
