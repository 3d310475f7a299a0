//! Configuration module for the voucher minting system.
//!
//! This module provides typed accessors over environment variables and the
//! assembled configuration the issuance service runs with. Required values
//! fail loudly, naming the missing variable; optional values carry
//! defaults. Protocol constants (domain name and version) are deliberately
//! NOT configuration: they live as compile-time constants next to the
//! voucher factory, since they must byte-match the verifying contract.

use alloy_primitives::U256;
use std::path::PathBuf;
use thiserror::Error;
use voucher_types::{Address, SecretString};

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs when a required environment variable is absent.
	#[error("Missing environment variable {0}")]
	MissingVar(String),
	/// Error that occurs when a value cannot be parsed as the requested type.
	#[error("Invalid value for {0}: {1}")]
	Invalid(String, String),
}

/// Reads a required string environment variable.
pub fn var(key: &str) -> Result<String, ConfigError> {
	std::env::var(key)
		.ok()
		.filter(|v| !v.is_empty())
		.ok_or_else(|| ConfigError::MissingVar(key.to_string()))
}

/// Reads a string environment variable, falling back to a default.
pub fn var_or(key: &str, default: &str) -> String {
	var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads a required numeric environment variable.
pub fn var_u64(key: &str) -> Result<u64, ConfigError> {
	let raw = var(key)?;
	raw.parse()
		.map_err(|_| ConfigError::Invalid(key.to_string(), raw))
}

/// Reads a numeric environment variable, falling back to a default.
/// A present but malformed value is still an error.
pub fn var_u64_or(key: &str, default: u64) -> Result<u64, ConfigError> {
	match var(key) {
		Ok(raw) => raw
			.parse()
			.map_err(|_| ConfigError::Invalid(key.to_string(), raw)),
		Err(_) => Ok(default),
	}
}

/// Reads a required boolean environment variable (`true` or `false`).
pub fn var_bool(key: &str) -> Result<bool, ConfigError> {
	let raw = var(key)?;
	match raw.as_str() {
		"true" => Ok(true),
		"false" => Ok(false),
		_ => Err(ConfigError::Invalid(key.to_string(), raw)),
	}
}

/// Configuration for a voucher issuance run.
#[derive(Debug)]
pub struct Config {
	/// Hex-encoded private key of the account authorized to mint.
	pub private_key: SecretString,
	/// Chain the signer operates on.
	pub chain_id: u64,
	/// Verifying contract address; when absent, the deployment record in
	/// storage is used instead.
	pub contract_address: Option<Address>,
	/// Base directory for the file storage backend.
	pub storage_path: PathBuf,
	/// First token id to issue a voucher for.
	pub token_start: u64,
	/// Number of consecutive token ids to issue vouchers for.
	pub token_count: u64,
	/// Minimum redemption price in the chain's smallest unit.
	pub min_price: U256,
	/// Base URI the token id is appended to for each voucher.
	pub uri_base: String,
	/// Attempts the caller-side retry wrapper makes per voucher.
	pub retry_attempts: u64,
}

impl Config {
	/// Assembles the configuration from environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		let contract_address = match var("VOUCHER_CONTRACT_ADDRESS") {
			Ok(raw) => Some(
				raw.parse::<Address>()
					.map_err(|e| ConfigError::Invalid("VOUCHER_CONTRACT_ADDRESS".to_string(), e.to_string()))?,
			),
			Err(_) => None,
		};

		let min_price_raw = var_or("VOUCHER_MIN_PRICE", "0");
		let min_price = U256::from_str_radix(&min_price_raw, 10)
			.map_err(|_| ConfigError::Invalid("VOUCHER_MIN_PRICE".to_string(), min_price_raw))?;

		Ok(Self {
			private_key: SecretString::new(var("VOUCHER_PRIVATE_KEY")?),
			chain_id: var_u64("VOUCHER_CHAIN_ID")?,
			contract_address,
			storage_path: PathBuf::from(var_or("VOUCHER_STORAGE_PATH", "./data/storage")),
			token_start: var_u64_or("VOUCHER_TOKEN_START", 0)?,
			token_count: var_u64_or("VOUCHER_TOKEN_COUNT", 10)?,
			min_price,
			uri_base: var("VOUCHER_URI_BASE")?,
			retry_attempts: var_u64_or("VOUCHER_RETRY_ATTEMPTS", 10)?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_var_names_the_variable() {
		let result = var("VOUCHER_TEST_DOES_NOT_EXIST");
		match result {
			Err(ConfigError::MissingVar(name)) => {
				assert_eq!(name, "VOUCHER_TEST_DOES_NOT_EXIST")
			}
			other => panic!("expected MissingVar, got {:?}", other),
		}
	}

	#[test]
	fn test_var_u64_parses_and_rejects() {
		std::env::set_var("VOUCHER_TEST_U64_OK", "31337");
		assert_eq!(var_u64("VOUCHER_TEST_U64_OK").unwrap(), 31337);

		std::env::set_var("VOUCHER_TEST_U64_BAD", "not-a-number");
		assert!(matches!(
			var_u64("VOUCHER_TEST_U64_BAD"),
			Err(ConfigError::Invalid(_, _))
		));
	}

	#[test]
	fn test_var_u64_or_defaults_but_rejects_garbage() {
		assert_eq!(var_u64_or("VOUCHER_TEST_U64_ABSENT", 10).unwrap(), 10);

		std::env::set_var("VOUCHER_TEST_U64_GARBAGE", "ten");
		assert!(var_u64_or("VOUCHER_TEST_U64_GARBAGE", 10).is_err());
	}

	#[test]
	fn test_var_bool() {
		std::env::set_var("VOUCHER_TEST_BOOL_T", "true");
		std::env::set_var("VOUCHER_TEST_BOOL_F", "false");
		std::env::set_var("VOUCHER_TEST_BOOL_BAD", "yes");

		assert!(var_bool("VOUCHER_TEST_BOOL_T").unwrap());
		assert!(!var_bool("VOUCHER_TEST_BOOL_F").unwrap());
		assert!(matches!(
			var_bool("VOUCHER_TEST_BOOL_BAD"),
			Err(ConfigError::Invalid(_, _))
		));
	}

	#[test]
	fn test_from_env() {
		std::env::set_var(
			"VOUCHER_PRIVATE_KEY",
			"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
		);
		std::env::set_var("VOUCHER_CHAIN_ID", "31337");
		std::env::set_var("VOUCHER_URI_BASE", "https://www.fake.com/");
		std::env::set_var("VOUCHER_MIN_PRICE", "500000000000000000");
		std::env::set_var(
			"VOUCHER_CONTRACT_ADDRESS",
			"0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
		);

		let config = Config::from_env().unwrap();
		assert_eq!(config.chain_id, 31337);
		assert_eq!(config.uri_base, "https://www.fake.com/");
		assert_eq!(config.min_price, U256::from(500_000_000_000_000_000u64));
		assert_eq!(config.token_start, 0);
		assert_eq!(config.token_count, 10);
		assert_eq!(config.retry_attempts, 10);
		assert!(config.contract_address.is_some());

		// Removing a required variable fails loudly.
		std::env::remove_var("VOUCHER_CHAIN_ID");
		assert!(matches!(
			Config::from_env(),
			Err(ConfigError::MissingVar(name)) if name == "VOUCHER_CHAIN_ID"
		));
		std::env::set_var("VOUCHER_CHAIN_ID", "31337");
	}
}
