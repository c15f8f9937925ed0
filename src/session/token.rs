// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token expiry detection.
//!
//! The front-end never holds the API's signing key, so tokens are only
//! inspected, not verified. Anything that cannot be read counts as expired.

use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

/// The only claim the front-end cares about.
///
/// NumericDate may carry a fraction, so it is read as a float.
#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: Option<f64>,
}

/// Read the `exp` claim (Unix seconds) without verifying the signature.
pub fn token_expiry(token: &str) -> Option<i64> {
    let header = jsonwebtoken::decode_header(token).ok()?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()?
        .claims
        .exp
        .filter(|exp| exp.is_finite())
        .map(|exp| exp.trunc() as i64)
}

/// Whether the token is expired at `now` (Unix seconds). Fails closed.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match token_expiry(token) {
        Some(exp) => exp <= now,
        None => true,
    }
}

/// Whether the token is expired right now. Fails closed.
pub fn is_token_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    fn mint_token(sub: &str, exp: i64, key: &[u8]) -> jsonwebtoken::errors::Result<String> {
        #[derive(Serialize)]
        struct Claims<'a> {
            sub: &'a str,
            exp: i64,
        }

        encode(
            &Header::new(Algorithm::HS256),
            &Claims { sub, exp },
            &EncodingKey::from_secret(key),
        )
    }

    fn encode_segment(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    }

    const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

    #[test]
    fn test_fresh_token_not_expired() {
        let now = Utc::now().timestamp();
        let token = mint_token("u1", now + 3600, KEY).unwrap();
        assert!(!is_token_expired(&token));
        assert_eq!(token_expiry(&token), Some(now + 3600));
    }

    #[test]
    fn test_past_token_expired() {
        let now = Utc::now().timestamp();
        let token = mint_token("u1", now - 1, KEY).unwrap();
        assert!(is_token_expired(&token));
    }

    #[test]
    fn test_expiry_boundary() {
        let token = mint_token("u1", 1_000, KEY).unwrap();
        assert!(!is_expired_at(&token, 999));
        assert!(is_expired_at(&token, 1_000));
    }

    #[test]
    fn test_signature_is_not_checked() {
        let now = Utc::now().timestamp();
        let token = mint_token("u1", now + 3600, b"some other key entirely!!").unwrap();
        assert!(!is_token_expired(&token));
    }

    #[test]
    fn test_garbage_is_expired() {
        assert!(is_token_expired(""));
        assert!(is_token_expired("not-a-jwt"));
        assert!(is_token_expired("a.b.c"));
    }

    #[test]
    fn test_missing_exp_is_expired() {
        let header = encode_segment(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = encode_segment(r#"{"sub":"u1"}"#);
        let token = format!("{}.{}.sig", header, payload);
        assert_eq!(token_expiry(&token), None);
        assert!(is_token_expired(&token));
    }

    #[test]
    fn test_non_numeric_exp_is_expired() {
        let header = encode_segment(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = encode_segment(r#"{"sub":"u1","exp":"tomorrow"}"#);
        let token = format!("{}.{}.sig", header, payload);
        assert!(is_token_expired(&token));
    }

    #[test]
    fn test_fractional_exp_is_truncated() {
        let header = encode_segment(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = encode_segment(r#"{"sub":"u1","exp":4102444800.5}"#);
        let token = format!("{}.{}.sig", header, payload);
        assert_eq!(token_expiry(&token), Some(4_102_444_800));
        assert!(!is_expired_at(&token, 4_102_444_799));
        assert!(is_expired_at(&token, 4_102_444_800));
    }
}
