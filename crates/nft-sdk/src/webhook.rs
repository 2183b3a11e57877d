// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Webhook signature verification
//!
//! The platform signs each webhook body with HMAC-SHA256 under the
//! subscriber's secret and sends the digest as lowercase hex.

use alloy_primitives::hex;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(payload: &[u8], secret: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(payload);
    mac
}

/// Lowercase hex HMAC-SHA256 of `payload` under `secret`
pub fn compute_signature(payload: impl AsRef<[u8]>, secret: impl AsRef<[u8]>) -> String {
    hex::encode(mac_for(payload.as_ref(), secret.as_ref()).finalize().into_bytes())
}

/// Check `signature` against the HMAC-SHA256 of `payload` under `secret`
///
/// The signature is hex, optionally `0x`-prefixed, in either case. The
/// comparison runs in constant time. Malformed hex is reported as a mismatch.
pub fn verify_signature(
    payload: impl AsRef<[u8]>,
    signature: &str,
    secret: impl AsRef<[u8]>,
) -> bool {
    let Ok(expected) = hex::decode(signature.trim()) else {
        debug!("webhook signature is not valid hex");
        return false;
    };

    mac_for(payload.as_ref(), secret.as_ref())
        .verify_slice(&expected)
        .is_ok()
}
