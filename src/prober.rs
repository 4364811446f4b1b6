// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Webshell Prober
 * Requests candidate webshell paths and classifies the responses
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::NetworkError;
use crate::http_client::HttpClient;
use crate::types::{MatchPolicy, MatchResult};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Match(MatchResult),
    NoMatch { status_code: u16 },
}

impl ProbeOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ProbeOutcome::Match(_))
    }
}

#[derive(Clone)]
pub struct Prober {
    http_client: HttpClient,
    policy: MatchPolicy,
}

impl Prober {
    pub fn new(http_client: HttpClient, policy: MatchPolicy) -> Self {
        Self { http_client, policy }
    }

    /// GET `url` with a non-reused connection and classify the status code
    pub async fn classify(&self, url: &str) -> Result<ProbeOutcome, NetworkError> {
        debug!("[Prober] Checking: {}", url);
        let status_code = self.http_client.probe_status(url).await?;
        info!("[Prober] {} -> {}", url, status_code);
        Ok(self.outcome(url, status_code))
    }

    fn outcome(&self, url: &str, status_code: u16) -> ProbeOutcome {
        if self.policy.is_match(status_code) {
            ProbeOutcome::Match(MatchResult {
                url: url.to_string(),
                status_code,
            })
        } else {
            ProbeOutcome::NoMatch { status_code }
        }
    }
}
