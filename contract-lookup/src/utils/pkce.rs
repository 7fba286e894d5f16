//! PKCE (RFC 7636) verifier and S256 challenge helpers.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Bytes of entropy behind each verifier; encodes to 43 characters.
pub const VERIFIER_BYTES: usize = 32;

pub const CHALLENGE_METHOD: &str = "S256";

/// Generate a fresh code verifier from the OS-seeded thread RNG.
pub fn generate_code_verifier() -> String {
    let mut bytes = [0u8; VERIFIER_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// `BASE64URL-NOPAD(SHA-256(verifier))`. Deterministic for a given verifier.
pub fn code_challenge(code_verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code_verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}
