// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - URL Resolver
 * Turns raw hrefs into absolute URLs and defines the crawl scope
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::{HunterError, UrlParseError};
use url::{ParseError, Url};

/// The host under investigation. Immutable after startup.
#[derive(Debug, Clone)]
pub struct Target {
    url: Url,
    host: String,
    origin: String,
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self, HunterError> {
        let url = Url::parse(raw.trim()).map_err(|e| HunterError::InvalidTarget {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(HunterError::InvalidTarget {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let host = url
            .host_str()
            .ok_or_else(|| HunterError::InvalidTarget {
                url: raw.to_string(),
                reason: "missing host".to_string(),
            })?
            .to_string();
        let origin = url.origin().ascii_serialization();

        Ok(Self { url, host, origin })
    }

    /// Crawl seed
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Scheme, host and non-default port, without a trailing slash
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Scope filter: http(s) URLs whose host equals the target host.
    pub fn in_scope(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => {
                matches!(parsed.scheme(), "http" | "https")
                    && parsed.host_str() == Some(self.host.as_str())
            }
            Err(_) => false,
        }
    }
}

/// Resolve `raw_link` found on `base_url` to an absolute URL.
///
/// Branches are tried in order: absolute links pass through unchanged,
/// `//host/...` gets an `http:` prefix, `/path` is appended to the target
/// origin, and anything else is joined against the page URL.
pub fn resolve(base_url: &str, raw_link: &str, target: &Target) -> Result<String, UrlParseError> {
    let raw = raw_link.trim();

    match Url::parse(raw) {
        Ok(_) => return Ok(raw.to_string()),
        Err(ParseError::RelativeUrlWithoutBase) => {}
        Err(e) => return Err(UrlParseError::new(raw, e)),
    }

    if raw.starts_with("//") {
        let absolute = format!("http:{}", raw);
        return validated(absolute);
    }

    if raw.starts_with('/') {
        let absolute = format!("{}{}", target.origin(), raw);
        return validated(absolute);
    }

    let base = Url::parse(base_url).map_err(|e| UrlParseError::new(base_url, e))?;
    base.join(raw)
        .map(|url| url.to_string())
        .map_err(|e| UrlParseError::new(raw, e))
}

fn validated(absolute: String) -> Result<String, UrlParseError> {
    match Url::parse(&absolute) {
        Ok(_) => Ok(absolute),
        Err(e) => Err(UrlParseError::new(absolute, e)),
    }
}

/// Visited-set key: parsed, re-serialized, fragment removed
pub fn normalize(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    parsed.set_fragment(None);
    Some(parsed.to_string())
}
