//! Bearer token expiry checks without a network round trip.
//!
//! The token is a JWT; only the payload's `exp` claim is read. The signature is
//! not verified here (the API does that on every request).

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: f64,
}

/// `exp` claim of `token` in Unix seconds, or `None` if the token is not a
/// well-formed JWT carrying one.
pub fn expiry(token: &str) -> Option<i64> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    // Some issuers pad; the URL-safe engine here does not accept it.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
    if !claim.exp.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(claim.exp.floor() as i64)
}

/// Whether `token` is well formed and expires strictly after `now` (Unix seconds).
pub fn is_valid_at(token: &str, now: i64) -> bool {
    expiry(token).is_some_and(|exp| exp > now)
}

/// Current wall-clock time in Unix seconds.
pub fn now_unix_secs() -> i64 {
    #[cfg(feature = "csr")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0).floor() as i64;
        secs
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}
