//! Voucher and signing-domain types for the lazy-minting system.
//!
//! This module defines the signed voucher artifact, the EIP-712 signing
//! domain it is bound to, and the primitive on-chain types (addresses and
//! signatures) shared across the workspace.

use crate::utils::without_0x_prefix;
use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte EVM account or contract address.
///
/// Serializes to a lowercase `0x`-prefixed hex string and deserializes from
/// hex with or without the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

/// Errors produced when parsing an [`Address`] from a hex string.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
	#[error("Invalid hex: {0}")]
	InvalidHex(String),
	#[error("Expected 20-byte address, got {0} bytes")]
	InvalidLength(usize),
}

impl Address {
	/// Returns the raw 20 bytes of the address.
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}
}

impl FromStr for Address {
	type Err = AddressError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let bytes =
			hex::decode(without_0x_prefix(s)).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
		if bytes.len() != 20 {
			return Err(AddressError::InvalidLength(bytes.len()));
		}
		let mut arr = [0u8; 20];
		arr.copy_from_slice(&bytes);
		Ok(Self(arr))
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl Serialize for Address {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

/// A raw signature produced by a signer capability.
///
/// Stored as raw bytes to stay agnostic of the signing curve; for the local
/// secp256k1 signer this is the 65-byte `r || s || v` form. Serializes as a
/// `0x`-prefixed hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<u8>);

impl Signature {
	/// Returns the raw signature bytes.
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Returns the signature length in bytes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when the signature carries no bytes.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

impl Serialize for Signature {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for Signature {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		let bytes = hex::decode(without_0x_prefix(&s)).map_err(serde::de::Error::custom)?;
		Ok(Self(bytes))
	}
}

/// The EIP-712 signing domain a voucher is bound to.
///
/// Resolved once per factory instance: the protocol name and version are
/// compile-time constants that must byte-match the verifying contract, the
/// contract address is fixed at factory construction, and the chain id is
/// fetched from the signer capability on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningDomain {
	/// Protocol identifier compiled into the verifying contract.
	pub name: &'static str,
	/// Protocol version compiled into the verifying contract.
	pub version: &'static str,
	/// Address of the contract instance vouchers are valid for.
	pub verifying_contract: Address,
	/// Chain the signer is operating on.
	pub chain_id: u64,
}

/// A signed lazy-minting voucher.
///
/// This is both the in-memory artifact returned by the voucher factory and
/// the wire/storage format consumed by a redemption transaction. The
/// signature covers exactly the three data fields, in declared order, under
/// the factory's signing domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftVoucher {
	/// Identifier of the not-yet-minted token.
	#[serde(rename = "tokenId", with = "u256_serde")]
	pub token_id: U256,
	/// Minimum price in the chain's smallest currency unit the signer will
	/// accept at redemption.
	#[serde(rename = "minPrice", with = "u256_serde")]
	pub min_price: U256,
	/// Location of the token's metadata; opaque to this system.
	pub uri: String,
	/// EIP-712 signature over all fields apart from the signature itself.
	pub signature: Signature,
}

/// Serde helpers for U256 values carried as decimal strings.
///
/// Serializes as a decimal string; accepts either a decimal string or a
/// plain JSON number on input, since both appear in persisted voucher
/// records.
pub mod u256_serde {
	use alloy_primitives::U256;
	use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

	pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		value.to_string().serialize(serializer)
	}

	#[derive(Deserialize)]
	#[serde(untagged)]
	enum StringOrNumber {
		Number(u64),
		String(String),
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
	where
		D: Deserializer<'de>,
	{
		match StringOrNumber::deserialize(deserializer)? {
			StringOrNumber::Number(n) => Ok(U256::from(n)),
			StringOrNumber::String(s) => U256::from_str_radix(&s, 10).map_err(D::Error::custom),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_address_roundtrip() {
		let addr: Address = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
			.parse()
			.unwrap();
		assert_eq!(
			addr.to_string(),
			"0xe7f1725e7734ce288f8367e1bb143e90bb3f0512"
		);

		let json = serde_json::to_string(&addr).unwrap();
		let back: Address = serde_json::from_str(&json).unwrap();
		assert_eq!(addr, back);
	}

	#[test]
	fn test_address_rejects_bad_length() {
		let result = "0xabcd".parse::<Address>();
		assert!(matches!(result, Err(AddressError::InvalidLength(2))));
	}

	#[test]
	fn test_signature_hex_display() {
		let sig = Signature(vec![0xde, 0xad, 0xbe, 0xef]);
		assert_eq!(sig.to_string(), "0xdeadbeef");
	}

	#[test]
	fn test_voucher_wire_format() {
		let voucher = NftVoucher {
			token_id: U256::from(1),
			min_price: U256::ZERO,
			uri: "ipfs://abc".to_string(),
			signature: Signature(vec![0xab; 65]),
		};

		let value = serde_json::to_value(&voucher).unwrap();
		assert_eq!(value["tokenId"], json!("1"));
		assert_eq!(value["minPrice"], json!("0"));
		assert_eq!(value["uri"], json!("ipfs://abc"));
		assert!(value["signature"]
			.as_str()
			.unwrap()
			.starts_with("0xabab"));

		let back: NftVoucher = serde_json::from_value(value).unwrap();
		assert_eq!(back, voucher);
	}

	#[test]
	fn test_voucher_accepts_numeric_token_id() {
		let value = json!({
			"tokenId": 7,
			"minPrice": "500000000000000000",
			"uri": "https://www.fake.com/7",
			"signature": "0x00",
		});

		let voucher: NftVoucher = serde_json::from_value(value).unwrap();
		assert_eq!(voucher.token_id, U256::from(7));
		assert_eq!(
			voucher.min_price,
			U256::from(500_000_000_000_000_000u64)
		);
	}
}
