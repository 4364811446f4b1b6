// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};

/// Rule deciding whether a probe response counts as a webshell hit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Any 2xx status
    Success,
    /// Status code <= 200
    Legacy,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Success
    }
}

impl MatchPolicy {
    pub fn is_match(&self, status_code: u16) -> bool {
        match self {
            MatchPolicy::Success => (200..300).contains(&status_code),
            MatchPolicy::Legacy => status_code <= 200,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Success => "success",
            MatchPolicy::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which anchor hrefs the link extractor yields
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Every anchor href that can name a page
    All,
    /// Only hrefs beginning with `http`
    Absolute,
}

impl Default for LinkMode {
    fn default() -> Self {
        LinkMode::All
    }
}

impl LinkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkMode::All => "all",
            LinkMode::Absolute => "absolute",
        }
    }
}

impl std::fmt::Display for LinkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
}

/// A candidate webshell path: page URL concatenated with one signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTask {
    pub url: String,
}

impl ProbeTask {
    pub fn new(page_url: &str, signature: &str) -> Self {
        Self {
            url: format!("{}{}", page_url, signature),
        }
    }
}

/// Positive probe result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub url: String,
    pub status_code: u16,
}

/// Summary of a finished hunt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntReport {
    pub target: String,
    pub pages_discovered: usize,
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub out_of_scope: usize,
    pub probes_sent: usize,
    pub probe_failures: usize,
    pub matches: Vec<MatchResult>,
    pub duration_ms: u64,
}
