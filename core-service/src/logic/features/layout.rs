//! Feature Layout - URL Feature Definition
//!
//! **CRITICAL: This file controls the URL feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment URL_FEATURE_VERSION
//! 2. Change order → increment URL_FEATURE_VERSION
//! 3. Rename feature → increment URL_FEATURE_VERSION
//!
//! Spellings are matched bit-for-bit against persisted schemas. A renamed
//! feature does not fail at load time; it is zero-filled during reconciliation
//! and only shows up in the diagnostics.

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current URL feature layout version
/// MUST be incremented when layout changes
pub const URL_FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// URL feature names in exact order they appear in the vector
pub const URL_FEATURE_LAYOUT: &[&str] = &[
    // === Whole URL (0-1) ===
    "URLLength",              // 0
    "IsHTTPS",                // 1

    // === Host (2-10) ===
    "DomainLength",           // 2
    "SubdomainLength",        // 3
    "TLDLength",              // 4
    "NumSubdomains",          // 5
    "NumDotsInDomain",        // 6
    "HyphenCount",            // 7
    "DigitInDomain",          // 8
    "LongDomain",             // 9: domain longer than 15 chars
    "IsDomainIP",             // 10

    // === Path (11-12) ===
    "NumPathSegments",        // 11
    "PathLength",             // 12

    // === Character composition (13-18) ===
    "NumLetters",             // 13
    "LetterRatio",            // 14
    "NumDigits",              // 15
    "DigitRatio",             // 16
    "NumSpecialChars",        // 17: ? = & @ - _ %
    "SpecialCharRatio",       // 18

    // === Signals (19-22) ===
    "SuspiciousKeywordCount", // 19
    "ObfuscationCount",       // 20: @ - _
    "HasObfuscation",         // 21
    "ObfuscationRatio",       // 22
];

/// Total number of URL features
/// IMPORTANT: Must match URL_FEATURE_LAYOUT.len()!
pub const URL_FEATURE_COUNT: usize = 23;

/// Shared owned copy of the layout names, handed to every extracted vector
static URL_FEATURE_NAMES: Lazy<Arc<[String]>> = Lazy::new(|| {
    URL_FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()
});

pub fn url_feature_names() -> Arc<[String]> {
    Arc::clone(&URL_FEATURE_NAMES)
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of a feature layout
/// Used to detect layout mismatches between artifacts and extractors
pub fn compute_layout_hash<S: AsRef<str>>(version: u8, names: &[S]) -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[version]);

    // Hash all feature names in order
    for name in names {
        hasher.update(name.as_ref().as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

static URL_LAYOUT_HASH: Lazy<u32> =
    Lazy::new(|| compute_layout_hash(URL_FEATURE_VERSION, URL_FEATURE_LAYOUT));

/// Hash of the current URL layout
pub fn url_layout_hash() -> u32 {
    *URL_LAYOUT_HASH
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn url() -> Self {
        Self {
            version: URL_FEATURE_VERSION,
            hash: url_layout_hash(),
            feature_count: URL_FEATURE_COUNT,
            feature_names: URL_FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get URL feature index by name (O(n) but features are few)
pub fn url_feature_index(name: &str) -> Option<usize> {
    URL_FEATURE_LAYOUT.iter().position(|&n| n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(URL_FEATURE_LAYOUT.len(), URL_FEATURE_COUNT);
        assert_eq!(url_feature_names().len(), URL_FEATURE_COUNT);
    }

    #[test]
    fn test_layout_names_unique() {
        let mut names: Vec<_> = URL_FEATURE_LAYOUT.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), URL_FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        let hash1 = compute_layout_hash(URL_FEATURE_VERSION, URL_FEATURE_LAYOUT);
        let hash2 = url_layout_hash();
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, 0);
    }

    #[test]
    fn test_layout_hash_sensitive_to_order_and_version() {
        let base = compute_layout_hash(1, &["a", "b"]);
        assert_ne!(base, compute_layout_hash(1, &["b", "a"]));
        assert_ne!(base, compute_layout_hash(2, &["a", "b"]));
        // Separator keeps "ab" + "" distinct from "a" + "b"
        assert_ne!(base, compute_layout_hash(1, &["ab", ""]));
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(url_feature_index("URLLength"), Some(0));
        assert_eq!(url_feature_index("IsDomainIP"), Some(10));
        assert_eq!(url_feature_index("ObfuscationRatio"), Some(22));
        assert_eq!(url_feature_index("nonexistent"), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::url();
        assert_eq!(info.version, URL_FEATURE_VERSION);
        assert_eq!(info.hash, url_layout_hash());
        assert_eq!(info.feature_names.len(), URL_FEATURE_COUNT);
    }
}
