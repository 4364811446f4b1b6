// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod summary;

pub use summary::{render_json, render_text};

use crate::types::MatchResult;
use parking_lot::Mutex;

/// Observer for positive probe results. Called once per match, as soon as
/// the probe is classified.
pub trait MatchReporter: Send + Sync {
    fn report(&self, result: &MatchResult);
}

/// Writes `MATCH FOUND: <url> (HTTP <status>)` lines to stdout
#[derive(Debug, Default)]
pub struct StdoutReporter;

impl MatchReporter for StdoutReporter {
    fn report(&self, result: &MatchResult) {
        println!("{}", format_match(result));
    }
}

/// Keeps every reported match in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    matches: Mutex<Vec<MatchResult>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self) -> Vec<MatchResult> {
        self.matches.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.matches.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.lock().is_empty()
    }
}

impl MatchReporter for MemoryReporter {
    fn report(&self, result: &MatchResult) {
        self.matches.lock().push(result.clone());
    }
}

pub fn format_match(result: &MatchResult) -> String {
    format!("MATCH FOUND: {} (HTTP {})", result.url, result.status_code)
}
