//! Display names for on-chain group ids.
//!
//! Named groups encode their name as a `bytes32` string packed into the
//! 256-bit group id. Ids that do not decode are shown as-is.

use alloy::primitives::U256;

/// Derive the display name of an on-chain group from its id.
pub fn parse_group_name(group_id: &str) -> String {
    decode_bytes32_string(group_id).unwrap_or_else(|| group_id.to_string())
}

fn decode_bytes32_string(group_id: &str) -> Option<String> {
    let value: U256 = group_id.trim().parse().ok()?;
    let bytes = value.to_be_bytes::<32>();

    // bytes32 strings are NUL-terminated
    if bytes[31] != 0 {
        return None;
    }

    let len = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    let text = std::str::from_utf8(&bytes[..len]).ok()?;

    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}
