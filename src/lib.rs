// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Webshell Hunter Library
 * Crawls a target host and probes every discovered path for webshell filenames
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod config;
pub mod crawler;
pub mod extractor;
pub mod http_client;
pub mod prober;
pub mod reporting;
pub mod resolver;
pub mod signatures;
pub mod types;

// Error handling
pub mod errors;

pub use crawler::{HuntOptions, Hunter};
pub use errors::HunterError;
pub use resolver::Target;
pub use signatures::SignatureSet;
pub use types::{HuntReport, LinkMode, MatchPolicy, MatchResult};
