// src/fingerprint.rs
use sha2::{Digest, Sha256};

/// Fingerprint of a formatted message, used to detect unchanged content
/// across cycles. SHA-256 hex; a dedupe key, not a security boundary.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
