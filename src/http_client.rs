// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use reqwest::header::{HeaderValue, CONNECTION};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::{HunterError, NetworkError, ReadError};

/// Realistic browser User-Agents to avoid trivial blocking
const BROWSER_USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

fn get_browser_user_agent() -> &'static str {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let index = COUNTER.fetch_add(1, Ordering::Relaxed) % BROWSER_USER_AGENTS.len();
    BROWSER_USER_AGENTS[index]
}

/// Maximum response body size (10MB) to prevent memory exhaustion
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

const MAX_REDIRECTS: usize = 5;

/// Shared HTTP plumbing for page fetches and probes.
///
/// Page fetches use a pooled client that follows redirects. Probes use a
/// second client with no idle pool and `Connection: close`, and never follow
/// redirects so a redirect to a landing page is not mistaken for a hit.
#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    probe_client: Arc<Client>,
    timeout: Duration,
    max_body_size: usize,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Self::with_config(timeout_secs, None, false)
    }

    pub fn with_config(
        timeout_secs: u64,
        user_agent: Option<&str>,
        accept_invalid_certs: bool,
    ) -> Result<Self> {
        if accept_invalid_certs {
            warn!("Certificate validation is DISABLED for this run");
        }

        let user_agent = user_agent.unwrap_or_else(|| get_browser_user_agent()).to_string();
        let timeout = Duration::from_secs(timeout_secs);

        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent.clone())
            .tcp_nodelay(true)
            .build()
            .context("Failed to create HTTP client")?;

        let probe_client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(user_agent)
            .pool_max_idle_per_host(0)
            .tcp_nodelay(true)
            .build()
            .context("Failed to create probe HTTP client")?;

        Ok(Self {
            client: Arc::new(client),
            probe_client: Arc::new(probe_client),
            timeout,
            max_body_size: MAX_BODY_SIZE,
        })
    }

    /// Cap on bytes read from a fetched page; the rest is discarded
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Fetch a page. No retries: a failed fetch is reported to the caller once.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, HunterError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(url, &e, self.timeout))?;

        let status_code = response.status().as_u16();

        let headers = {
            let headers = response.headers();
            let mut map = HashMap::with_capacity(headers.len());
            for (k, v) in headers.iter() {
                if let Ok(value_str) = v.to_str() {
                    map.insert(k.as_str().to_string(), value_str.to_string());
                }
            }
            map
        };

        let mut body_bytes: Vec<u8> = Vec::new();
        loop {
            let chunk = response.chunk().await.map_err(|e| ReadError {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            let Some(chunk) = chunk else { break };

            let room = self.max_body_size.saturating_sub(body_bytes.len());
            if chunk.len() >= room {
                body_bytes.extend_from_slice(&chunk[..room]);
                debug!("Truncated body of {} at {} bytes", url, self.max_body_size);
                break;
            }
            body_bytes.extend_from_slice(&chunk);
        }

        Ok(HttpResponse {
            status_code,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
            headers,
        })
    }

    /// Send a probe GET with `Connection: close` and return only the status.
    /// The body is never read.
    pub async fn probe_status(&self, url: &str) -> Result<u16, NetworkError> {
        let response = self
            .probe_client
            .get(url)
            .header(CONNECTION, HeaderValue::from_static("close"))
            .send()
            .await
            .map_err(|e| NetworkError::from_reqwest(url, &e, self.timeout))?;

        Ok(response.status().as_u16())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_lowercase()).cloned()
    }

    /// True unless the server declared a non-HTML content type
    pub fn looks_like_html(&self) -> bool {
        match self.header("content-type") {
            Some(content_type) => {
                let ct = content_type.to_lowercase();
                ct.contains("html") || ct.contains("xml") || ct.starts_with("text/plain")
            }
            None => true,
        }
    }
}
