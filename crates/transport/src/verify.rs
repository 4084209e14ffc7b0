// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Webhook credential verification.
//!
//! Two independent modes, selected by which credential header is present
//! on the request (never both trusted at once): a direct HMAC-SHA256
//! signature over the raw body, or a reverse-proxy-injected bearer token.
//! Both comparisons run in constant time via [`subtle::ConstantTimeEq`] to
//! close the timing side-channel a `==` comparison would open.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute the lowercase-hex HMAC-SHA256 digest of `body` under `secret`.
pub fn hmac_hex_digest(secret: &str, body: &[u8]) -> String {
    let mut mac = match <HmacSha256 as Mac>::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        // HMAC accepts keys of any length; this branch is unreachable.
        Err(_) => unreachable!("HMAC-SHA256 rejected a key"),
    };
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a direct-mode HMAC signature header against the raw request body.
///
/// `provided_hex` is compared to the expected digest in constant time; an
/// unparsable/wrong-length hex string always fails rather than panicking.
pub fn verify_hmac_signature(secret: &str, body: &[u8], provided_hex: &str) -> bool {
    let expected = hmac_hex_digest(secret, body);
    constant_time_str_eq(&expected, provided_hex)
}

/// Verify a proxy-mode bearer token against the configured shared secret.
pub fn verify_bearer_token(expected: &str, provided: &str) -> bool {
    constant_time_str_eq(expected, provided)
}

fn constant_time_str_eq(a: &str, b: &str) -> bool {
    // Length must match before the byte-wise compare; this leaks only the
    // length of the two strings, which carries no usable secret for
    // fixed-length digests/tokens.
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
