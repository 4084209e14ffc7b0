// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn correct_hmac_digest_passes() {
    let secret = "s3cr3t";
    let body = b"{\"hello\":\"world\"}";
    let digest = hmac_hex_digest(secret, body);
    assert!(verify_hmac_signature(secret, body, &digest));
}

#[test]
fn wrong_digest_fails() {
    let secret = "s3cr3t";
    let body = b"{\"hello\":\"world\"}";
    let digest = hmac_hex_digest(secret, body);
    let mut tampered = digest.clone();
    tampered.replace_range(0..1, if &digest[0..1] == "a" { "b" } else { "a" });
    assert!(!verify_hmac_signature(secret, body, &tampered));
}

#[test]
fn digest_computed_with_wrong_secret_fails() {
    let body = b"payload";
    let digest = hmac_hex_digest("right-secret", body);
    assert!(!verify_hmac_signature("wrong-secret", body, &digest));
}

#[test]
fn any_digest_fails_for_any_other_body() {
    let secret = "s3cr3t";
    let digest = hmac_hex_digest(secret, b"body-one");
    assert!(!verify_hmac_signature(secret, b"body-two", &digest));
}

#[test]
fn bearer_requires_exact_match() {
    assert!(verify_bearer_token("token-123", "token-123"));
    assert!(!verify_bearer_token("token-123", "token-124"));
    assert!(!verify_bearer_token("token-123", "token-12"));
    assert!(!verify_bearer_token("token-123", ""));
}

#[test]
fn empty_secret_still_compares_safely() {
    let digest = hmac_hex_digest("", b"body");
    assert!(verify_hmac_signature("", b"body", &digest));
    assert!(!verify_hmac_signature("", b"other", &digest));
}
