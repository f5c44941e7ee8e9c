//! PKCE S256 and `state` generation for the authorization-code flow.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

fn random_token(bytes: usize) -> String {
    let mut buf = vec![0_u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

/// Fresh code verifier: 32 random bytes, base64url without padding.
#[must_use]
pub fn generate_verifier() -> String {
    random_token(32)
}

/// Fresh opaque `state` value.
#[must_use]
pub fn generate_state() -> String {
    random_token(24)
}

/// S256 challenge for `verifier`.
///
/// # Examples
/// ```
/// use console::domain::auth::code_challenge;
///
/// assert_eq!(
///     code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
///     "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM",
/// );
/// ```
#[must_use]
pub fn code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}
