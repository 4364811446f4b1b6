// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Signature Store
 * Loads webshell filename signatures from a directory of .txt files
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::SignatureError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

const SIGNATURE_EXTENSION: &str = "txt";
const COMMENT_MARKER: char = '#';

/// Immutable set of webshell filenames. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct SignatureSet {
    filenames: Arc<Vec<String>>,
}

impl SignatureSet {
    pub fn new(filenames: Vec<String>) -> Self {
        Self {
            filenames: Arc::new(filenames),
        }
    }

    /// Load every `.txt` file in `dir`. Unreadable files are logged and skipped;
    /// only an unlistable directory fails the load.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, SignatureError> {
        let dir = dir.as_ref();
        info!("[Signatures] Reading signatures from {}", dir.display());

        let entries = std::fs::read_dir(dir).map_err(|source| SignatureError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_signature_extension(path))
            .collect();
        paths.sort();

        Ok(Self::load_files(paths))
    }

    /// Read each file in order. A file that cannot be read is logged and
    /// skipped so the rest still load.
    fn load_files(paths: Vec<PathBuf>) -> Self {
        let mut filenames = Vec::new();
        let mut files_read = 0;

        for path in paths {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let content = String::from_utf8_lossy(&bytes);
                    let before = filenames.len();
                    filenames.extend(parse_signatures(&content));
                    files_read += 1;
                    debug!("[Signatures] {} signatures from {}", filenames.len() - before, path.display());
                }
                Err(source) => {
                    let err = SignatureError::FileUnreadable { path, source };
                    warn!("[Signatures] {}", err);
                }
            }
        }

        info!(
            "[Signatures] Loaded {} signatures from {} files",
            filenames.len(),
            files_read
        );

        Self::new(filenames)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.filenames.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }
}

fn has_signature_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(SIGNATURE_EXTENSION))
        .unwrap_or(false)
}

/// Extract signatures from one file's text: blank and `#` lines dropped,
/// CR/LF/TAB removed from the rest.
pub fn parse_signatures(content: &str) -> impl Iterator<Item = String> + '_ {
    content.lines().filter_map(parse_line)
}

fn parse_line(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
        return None;
    }

    let cleaned: String = line
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
