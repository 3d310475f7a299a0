//! Hex formatting helpers used across the voucher system.

/// Ensures a hex string carries a `0x` prefix.
pub fn with_0x_prefix(s: &str) -> String {
	if s.starts_with("0x") || s.starts_with("0X") {
		s.to_string()
	} else {
		format!("0x{}", s)
	}
}

/// Strips a leading `0x` prefix from a hex string if present.
pub fn without_0x_prefix(s: &str) -> &str {
	s.strip_prefix("0x")
		.or_else(|| s.strip_prefix("0X"))
		.unwrap_or(s)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_with_0x_prefix() {
		assert_eq!(with_0x_prefix("abcd"), "0xabcd");
		assert_eq!(with_0x_prefix("0xabcd"), "0xabcd");
	}

	#[test]
	fn test_without_0x_prefix() {
		assert_eq!(without_0x_prefix("0xabcd"), "abcd");
		assert_eq!(without_0x_prefix("abcd"), "abcd");
	}
}
