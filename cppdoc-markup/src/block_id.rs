//! Block identifiers
//!
//! A [`BlockId`] is a normalized opaque string used to address a rendered
//! block (section anchors, cross references). Normalization makes ids safe
//! for URL fragments and stable across whitespace differences; uniqueness
//! across a rendered document is a caller invariant, not enforced here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized opaque block identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(String);

impl BlockId {
    /// Normalize `raw` into a block id.
    ///
    /// Lowercases, maps whitespace runs to a single `-`, keeps ASCII
    /// alphanumerics and `- _ . :`, and drops everything else.
    pub fn new(raw: &str) -> Self {
        let mut out = String::with_capacity(raw.len());
        let mut pending_dash = false;
        for ch in raw.trim().chars() {
            if ch.is_whitespace() {
                pending_dash = !out.is_empty();
                continue;
            }
            let keep = ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | ':');
            if !keep {
                continue;
            }
            if pending_dash {
                out.push('-');
                pending_dash = false;
            }
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        }
        BlockId(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BlockId {
    fn from(raw: &str) -> Self {
        BlockId::new(raw)
    }
}
