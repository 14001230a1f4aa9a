use crate::models::VlessNode;
use crate::utils::base64::base64_decode;
use log::{debug, warn};
use std::collections::HashSet;

use super::vless::{explode_vless, VLESS_SCHEME};

/// Subscription body after the Base64 heuristic has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionPayload {
    /// The whole body was Base64 and decoded to UTF-8 text.
    Decoded(String),
    /// The body was not Base64; it is used as-is.
    Plaintext(String),
}

impl SubscriptionPayload {
    pub fn content(&self) -> &str {
        match self {
            SubscriptionPayload::Decoded(s) | SubscriptionPayload::Plaintext(s) => s,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, SubscriptionPayload::Decoded(_))
    }
}

/// Try to Base64-decode a whole subscription body, falling back to the raw text
pub fn decode_subscription(raw: &str) -> SubscriptionPayload {
    match base64_decode(raw.trim(), true) {
        Some(decoded) => SubscriptionPayload::Decoded(decoded),
        None => SubscriptionPayload::Plaintext(raw.to_string()),
    }
}

/// Explode a subscription body into VLESS nodes
///
/// Lines that are empty or do not start with `vless://` are ignored. Lines
/// that fail to parse, and exact repeats of an earlier line, are dropped
/// with a warning. Input order is preserved.
pub fn explode_sub(raw: &str) -> Vec<VlessNode> {
    let payload = decode_subscription(raw);
    if payload.is_decoded() {
        debug!("Subscription body decoded from Base64");
    } else {
        debug!("Subscription body is not Base64, using it as plaintext");
    }

    let mut nodes = Vec::new();
    let mut seen = HashSet::new();
    let mut dropped = 0usize;

    for line in payload.content().lines() {
        let line = line.trim();
        if line.is_empty() || !line.starts_with(VLESS_SCHEME) {
            continue;
        }

        if !seen.insert(line) {
            warn!("Skipping duplicate link: {}", line);
            dropped += 1;
            continue;
        }

        match explode_vless(line) {
            Ok(node) => nodes.push(node),
            Err(e) => {
                warn!("Failed to parse VLESS link ({}): {}", e, line);
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!("Dropped {} of {} VLESS links", dropped, dropped + nodes.len());
    }

    nodes
}
