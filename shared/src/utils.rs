//! # Address Display Helpers
//!
//! Formatting for 0x-prefixed EVM addresses shown in profiles and logs:
//! - [`format_address`] - first N and last M characters with an ellipsis
//! - [`truncate_address`] - `format_address` with the defaults the UI uses

/// Format an address by showing the first `prefix_len` and last `suffix_len`
/// characters. Returns the address unchanged when it is too short to
/// truncate meaningfully.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
/// assert_eq!(format_address(addr, 6, 4), "0x7099...79C8");
/// assert_eq!(format_address("0xabc", 6, 4), "0xabc");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Hex addresses are ASCII so byte slicing is safe, but guard the bounds.
    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format with the display defaults: `0x`-prefix plus four hex chars on each
/// side, the shape used for profile display names.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
        assert_eq!(format_address(addr, 6, 4), "0x7099...79C8");
        assert_eq!(format_address(addr, 10, 6), "0x70997970...dc79C8");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("0xabc", 6, 4), "0xabc");
        assert_eq!(format_address("", 6, 4), "");
    }

    #[test]
    fn test_truncate_address() {
        let addr = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
        assert_eq!(truncate_address(addr), "0x7099...79C8");
    }
}
