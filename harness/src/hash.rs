//! Domain-separated content hashing.
//!
//! Algorithm: SHA-256 over `domain || data`. Result format:
//! `"sha256:<hex_digest>"`.

use sha2::{Digest, Sha256};

/// Domain prefix for route report hashing.
pub const DOMAIN_ROUTE_REPORT: &[u8] = b"WAYPOINT::ROUTE_REPORT::V1\0";

/// Domain prefix for search policy hashing.
pub const DOMAIN_SEARCH_POLICY: &[u8] = b"WAYPOINT::SEARCH_POLICY::V1\0";

/// Domain prefix for world document hashing.
pub const DOMAIN_WORLD: &[u8] = b"WAYPOINT::WORLD::V1\0";

/// A content-addressed hash with algorithm identifier.
///
/// Invariant: the inner string contains a `:` with non-empty text on both
/// sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Hash `data` under `domain`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    ContentHash {
        full: format!("sha256:{}", hex::encode(hasher.finalize())),
        colon: "sha256".len(),
    }
}
