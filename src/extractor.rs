// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Link Extractor
 * Syntactic anchor scan, tolerant of malformed markup
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::LinkMode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// `href` must start an attribute; quoted values of earlier attributes are
// skipped whole so `data-href=` or `title="... href=..."` never match.
static ANCHOR_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<a\s(?:(?:[^>"']|"[^"]*"|'[^']*')*?\s)?href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#,
    )
    .expect("anchor href pattern is valid")
});

const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Lazily yield the raw `href` of every anchor in `body`.
///
/// `LinkMode::Absolute` keeps only hrefs starting with `http`; `LinkMode::All`
/// keeps every href that can name a page (fragment-only and script/mail
/// pseudo-links are dropped). `&amp;` is decoded.
pub fn extract_links(body: &str, mode: LinkMode) -> impl Iterator<Item = Cow<'_, str>> + '_ {
    ANCHOR_HREF
        .captures_iter(body)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().trim())
        .filter(move |href| accepts(href, mode))
        .map(|href| {
            if href.contains("&amp;") {
                Cow::Owned(href.replace("&amp;", "&"))
            } else {
                Cow::Borrowed(href)
            }
        })
}

fn accepts(href: &str, mode: LinkMode) -> bool {
    if href.is_empty() {
        return false;
    }

    match mode {
        LinkMode::Absolute => href.starts_with("http"),
        LinkMode::All => {
            if href.starts_with('#') {
                return false;
            }
            let lower = href.to_ascii_lowercase();
            !SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
        }
    }
}
