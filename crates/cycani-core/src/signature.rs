//! Request signature for the catalog API
//!
//! The API authenticates calls with a time-based MD5 key: the digest of a
//! fixed prefix, the Unix timestamp in seconds, and a fixed salt. The server
//! recomputes the digest for the submitted `time` and compares.

use md5::{Digest, Md5};
use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

const KEY_PREFIX: &str = "DS";
const KEY_SALT: &str = "DCC147D11943AF75";

/// A signed `(key, time)` pair to attach to a catalog API request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// 32-character lowercase hex MD5 digest
    pub key: String,
    /// Unix timestamp in seconds, as a decimal string
    pub time: String,
}

/// Derives the API signature for a given Unix timestamp in seconds
///
/// Deterministic: the same timestamp always yields the same key, so the
/// scheme is testable without network access.
///
/// # Example
/// ```
/// use cycani_core::signature::sign;
/// let sig = sign(0);
/// assert_eq!(sig.key.len(), 32);
/// assert_eq!(sig.time, "0");
/// ```
pub fn sign(unix_secs: u64) -> Signature {
    let time = unix_secs.to_string();

    let mut hasher = Md5::new();
    hasher.update(KEY_PREFIX.as_bytes());
    hasher.update(time.as_bytes());
    hasher.update(KEY_SALT.as_bytes());
    let digest = hasher.finalize();

    let mut key = String::with_capacity(32);
    for byte in digest {
        // {:02x} keeps leading zeros, so the key is always 32 chars
        let _ = write!(key, "{:02x}", byte);
    }

    Signature { key, time }
}

/// Derives the API signature for the current system clock
pub fn sign_now() -> Signature {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    sign(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Vectors computed independently as md5("DS" + time + "DCC147D11943AF75")
    #[test]
    fn test_sign_known_vectors() {
        assert_eq!(sign(0).key, "84bb4f88ac6e2f63ac8be4521bb6e648");
        assert_eq!(sign(1).key, "e2ddb92f97447407de0978e711561e70");
        assert_eq!(sign(1714536152).key, "d6c4530bb2f04462e518718bac3552c9");
    }

    #[test]
    fn test_sign_time_is_decimal_seconds() {
        assert_eq!(sign(1714536152).time, "1714536152");
    }

    #[test]
    fn test_sign_deterministic() {
        assert_eq!(sign(1735689600), sign(1735689600));
    }

    #[test]
    fn test_sign_now_key_format() {
        let sig = sign_now();
        assert_eq!(sig.key.len(), 32);
        assert!(sig.key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    proptest! {
        #[test]
        fn prop_key_is_32_lowercase_hex(t in any::<u64>()) {
            let sig = sign(t);
            prop_assert_eq!(sig.key.len(), 32);
            prop_assert!(sig.key.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
            prop_assert_eq!(sig.time, t.to_string());
        }
    }
}
