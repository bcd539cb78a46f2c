//! # Shared Utility Functions
//!
//! Common utility functions used by the wallet core and the browser crate.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - Alias for `format_address` with default parameters
//!
//! ## Amounts
//!
//! - [`parse_quantity`] - Parse a JSON-RPC hex quantity (`"0x1bc16d674ec80000"`)
//! - [`format_ether`] - Render a wei amount as a decimal ether string
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_address, format_ether, parse_quantity};
//!
//! let address = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
//! assert_eq!(format_address(address, 4, 4), "0x71C7...976F");
//!
//! let wei = parse_quantity("0x1bc16d674ec80000").unwrap();
//! assert_eq!(format_ether(wei), "2.0");
//! ```

/// Number of wei in one ether.
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// A leading `0x` is kept and not counted towards `prefix_len`. If the address is
/// shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Arguments
///
/// * `address` - The wallet address to format
/// * `prefix_len` - Number of characters to show after the `0x` prefix
/// * `suffix_len` - Number of characters to show at the end
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
/// assert_eq!(format_address(addr, 4, 4), "0x71C7...976F");
/// assert_eq!(format_address(addr, 6, 2), "0x71C765...6F");
/// assert_eq!(format_address("0xshort", 4, 4), "0xshort");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let (lead, body) = match address.strip_prefix("0x") {
        Some(rest) => ("0x", rest),
        None => ("", address),
    };
    let body_len = body.len();

    // Byte slicing below is only safe on ASCII input
    if !body.is_ascii() || body_len <= prefix_len + suffix_len {
        return address.to_string();
    }

    let prefix = &body[..prefix_len];
    let suffix = &body[body_len - suffix_len..];

    format!("{}{}...{}", lead, prefix, suffix)
}

/// Format a wallet address with default 4-character prefix and suffix.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
/// assert_eq!(truncate_address(addr), "0x71C7...976F");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}

/// Parse a JSON-RPC hex quantity into an integer.
///
/// Returns `None` when the prefix is missing, there are no digits, or the value
/// does not fit into a `u128`.
pub fn parse_quantity(quantity: &str) -> Option<u128> {
    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}

/// Format a wei amount as decimal ether.
///
/// Always keeps at least one fractional digit and trims trailing zeros, so
/// `1 ether` renders as `"1.0"` and `0` as `"0.0"`.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_ether;
///
/// assert_eq!(format_ether(1_500_000_000_000_000_000), "1.5");
/// assert_eq!(format_ether(1), "0.000000000000000001");
/// ```
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = wei % WEI_PER_ETHER;

    let digits = format!("{:018}", fraction);
    let trimmed = digits.trim_end_matches('0');
    let fraction_part = if trimmed.is_empty() { "0" } else { trimmed };

    format!("{}.{}", whole, fraction_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
        assert_eq!(format_address(addr, 4, 4), "0x71C7...976F");
        assert_eq!(format_address(addr, 2, 2), "0x71...6F");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("0xabc", 4, 4), "0xabc");
        assert_eq!(format_address("abc", 4, 4), "abc");
        assert_eq!(format_address("0xABCD...1234", 4, 4), "0xABCD...1234");
    }

    #[test]
    fn test_format_address_without_prefix() {
        assert_eq!(format_address("abcdefghijkl", 3, 3), "abc...jkl");
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0"), Some(0));
        assert_eq!(parse_quantity("0xde0b6b3a7640000"), Some(WEI_PER_ETHER));
        assert_eq!(parse_quantity("0X10"), Some(16));
        assert_eq!(parse_quantity("0x"), None);
        assert_eq!(parse_quantity("10"), None);
        assert_eq!(parse_quantity("0xzz"), None);
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(0), "0.0");
        assert_eq!(format_ether(WEI_PER_ETHER), "1.0");
        assert_eq!(format_ether(WEI_PER_ETHER / 2), "0.5");
        assert_eq!(format_ether(12 * WEI_PER_ETHER + 340_000_000_000_000_000), "12.34");
    }
}
