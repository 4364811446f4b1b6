// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Webshell Hunter Error Types
 * Per-task error taxonomy with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for the hunter
#[derive(Error, Debug)]
pub enum HunterError {
    /// Signature dictionary errors
    #[error("Signature error: {0}")]
    Signature(#[from] SignatureError),

    /// A discovered link or the target URL failed to parse
    #[error("URL parse error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Response body could not be read
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// Target rejected at startup
    #[error("Invalid target {url}: {reason}")]
    InvalidTarget { url: String, reason: String },
}

/// Signature dictionary load errors
#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Cannot list signature directory {path:?}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read signature file {path:?}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot parse '{url}': {reason}")]
pub struct UrlParseError {
    pub url: String,
    pub reason: String,
}

impl UrlParseError {
    pub fn new(url: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Network-specific errors with detailed classification
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection timeout after {timeout:?} to {url}")]
    ConnectionTimeout { url: String, timeout: Duration },

    #[error("DNS resolution failed for {host}: {reason}")]
    DnsResolutionFailed { host: String, reason: String },

    #[error("TLS handshake failed for {host}: {reason}")]
    TlsHandshakeFailed { host: String, reason: String },

    #[error("Connection refused for {url}")]
    ConnectionRefused { url: String },

    #[error("Too many redirects for {url}")]
    TooManyRedirects { url: String },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Network error for {url}: {reason}")]
    Other { url: String, reason: String },
}

#[derive(Error, Debug)]
#[error("Failed to read response body from {url}: {reason}")]
pub struct ReadError {
    pub url: String,
    pub reason: String,
}

impl NetworkError {
    /// Classify a reqwest send error. `timeout` is the client's configured limit.
    pub fn from_reqwest(url: &str, err: &reqwest::Error, timeout: Duration) -> Self {
        let host = url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        let chain = error_chain(err);

        if err.is_timeout() {
            NetworkError::ConnectionTimeout {
                url: url.to_string(),
                timeout,
            }
        } else if err.is_redirect() {
            NetworkError::TooManyRedirects {
                url: url.to_string(),
            }
        } else if err.is_builder() {
            NetworkError::InvalidUrl {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            let lower = chain.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") || lower.contains("lookup") {
                NetworkError::DnsResolutionFailed { host, reason: chain }
            } else if lower.contains("certificate") || lower.contains("tls") || lower.contains("handshake") {
                NetworkError::TlsHandshakeFailed { host, reason: chain }
            } else {
                NetworkError::ConnectionRefused {
                    url: url.to_string(),
                }
            }
        } else {
            NetworkError::Other {
                url: url.to_string(),
                reason: chain,
            }
        }
    }
}

/// Flatten an error and its sources into one line
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
