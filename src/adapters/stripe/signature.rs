//! Stripe-Signature header parsing and HMAC verification.
//!
//! The header format is `t=<unix>,v1=<hex>[,v1=<hex>...][,v0=<hex>]`.
//! During secret rotation Stripe sends one `v1` entry per active secret, so
//! a match on any of them is accepted.
//!
//! The MAC is computed over the exact bytes `"<t>." ++ payload`; the payload
//! is never decoded as text before verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Clock skew tolerance for future timestamps (60 seconds).
pub const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Message used whenever no provided signature matches.
pub const NO_MATCHING_SIGNATURE: &str =
    "No signatures found matching the expected signature for payload";

// ════════════════════════════════════════════════════════════════════════════════
// Signature Parsing
// ════════════════════════════════════════════════════════════════════════════════

/// Error parsing the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureParseError {
    /// Header is empty or missing.
    #[error("No stripe-signature header value was provided")]
    MissingHeader,

    /// Missing timestamp component (t=...).
    #[error("Unable to extract timestamp and signatures from header")]
    MissingTimestamp,

    /// No v1 signature component.
    #[error("No signatures found with expected scheme")]
    MissingV1Signature,

    /// Invalid timestamp format.
    #[error("Invalid timestamp in signature header")]
    InvalidTimestamp,

    /// Invalid signature format (not valid hex).
    #[error("Invalid signature format (not valid hex)")]
    InvalidSignatureFormat,
}

/// Parsed Stripe-Signature header components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when Stripe signed the event.
    pub timestamp: i64,

    /// All v1 signatures (HMAC-SHA256, hex-decoded).
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parse a Stripe-Signature header into components.
    ///
    /// Unknown keys (including the legacy `v0`) are ignored.
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        let header = header.trim();
        if header.is_empty() {
            return Err(SignatureParseError::MissingHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or(SignatureParseError::MissingTimestamp)?;

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureParseError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    let bytes = hex::decode(value.trim())
                        .map_err(|_| SignatureParseError::InvalidSignatureFormat)?;
                    v1_signatures.push(bytes);
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureParseError::MissingTimestamp)?;
        if v1_signatures.is_empty() {
            return Err(SignatureParseError::MissingV1Signature);
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Verification
// ════════════════════════════════════════════════════════════════════════════════

/// Reasons a signed payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error(transparent)]
    Parse(#[from] SignatureParseError),

    #[error("Timestamp outside the tolerance zone ({age_secs} seconds old)")]
    TooOld { age_secs: i64 },

    #[error("Timestamp outside the tolerance zone (in the future)")]
    InFuture,

    #[error("No signatures found matching the expected signature for payload")]
    NoMatch,
}

/// HMAC-SHA256 of `"<timestamp>." ++ payload`.
pub fn compute_signature(secret: &[u8], timestamp: i64, payload: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Build a Stripe-Signature header value for a payload.
///
/// Used by the mock provider and in tests to produce deliveries that the
/// real verifier accepts.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let signature = compute_signature(secret.as_bytes(), timestamp, payload);
    format!("t={},v1={}", timestamp, hex::encode(signature))
}

/// Verify a parsed header against a payload.
///
/// `now` is the current Unix time; `tolerance_secs` bounds how old the
/// signature timestamp may be.
pub fn verify(
    secret: &str,
    payload: &[u8],
    header: &SignatureHeader,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), SignatureError> {
    // `t=` is untrusted and may sit anywhere in the i64 range.
    let age = now.saturating_sub(header.timestamp);

    if age > tolerance_secs {
        tracing::warn!(
            event_timestamp = header.timestamp,
            current_time = now,
            age_secs = age,
            "Webhook event too old - possible replay attack"
        );
        return Err(SignatureError::TooOld { age_secs: age });
    }

    if age < -MAX_FUTURE_TOLERANCE_SECS {
        tracing::warn!(
            event_timestamp = header.timestamp,
            current_time = now,
            "Webhook event from future - clock skew or manipulation"
        );
        return Err(SignatureError::InFuture);
    }

    let expected = compute_signature(secret.as_bytes(), header.timestamp, payload);

    // Evaluate every candidate so timing does not reveal which one matched.
    let matched = header
        .v1_signatures
        .iter()
        .fold(0u8, |acc, candidate| {
            acc | expected.as_slice().ct_eq(candidate.as_slice()).unwrap_u8()
        });

    if matched != 1 {
        tracing::warn!(
            candidates = header.v1_signatures.len(),
            "Invalid webhook signature"
        );
        return Err(SignatureError::NoMatch);
    }

    Ok(())
}

/// Parse and verify a raw header value in one step.
pub fn verify_header(
    secret: &str,
    payload: &[u8],
    header: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), SignatureError> {
    let parsed = SignatureHeader::parse(header)?;
    verify(secret, payload, &parsed, tolerance_secs, now)
}
