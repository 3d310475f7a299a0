//! Generic EIP-712 utilities for the voucher system.
//!
//! These helpers provide:
//! - Domain hash computation over the voucher signing domain
//! - Struct hash computation over an ordered field schema
//! - Final digest computation (0x1901 || domainHash || structHash)
//! - A minimal ABI encoder for the static field types vouchers use
//!
//! They are consumed behind the signer capability boundary: the voucher
//! factory never hashes anything itself, it only supplies byte-identical
//! domain and schema values on every call.

use crate::voucher::SigningDomain;
use alloy_primitives::{keccak256, B256, U256};
use thiserror::Error;

/// EIP-712 domain type string, including the protocol version field.
/// Must match the domain layout hard-coded in the verifying contract.
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Errors produced while encoding typed data for hashing.
#[derive(Debug, Error)]
pub enum Eip712Error {
	/// The schema declares a different number of fields than values supplied.
	#[error("Schema declares {fields} fields but {values} values were supplied")]
	Arity { fields: usize, values: usize },
	/// A supplied value does not match the declared field type.
	#[error("Field `{field}` declared as {declared} does not match the supplied value")]
	TypeMismatch {
		field: &'static str,
		declared: &'static str,
	},
	/// The schema declares a field type this encoder does not support.
	#[error("Unsupported field type: {0}")]
	UnsupportedType(&'static str),
}

/// A value for a single typed-data field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
	/// An unsigned 256-bit integer field (`uint256`).
	Uint(U256),
	/// A dynamic string field (`string`), hashed before encoding.
	Str(String),
}

/// An EIP-712 message: a primary type, its ordered field schema, and the
/// values to hash.
///
/// The schema is an ordered list of `(fieldName, fieldType)` pairs and must
/// match the field declaration order the verifying contract hashes against;
/// callers pass it as a fixed constant, never derived from input.
#[derive(Debug, Clone)]
pub struct TypedData {
	/// Name of the struct being signed, e.g. `NFTVoucher`.
	pub primary_type: &'static str,
	/// Ordered `(fieldName, fieldType)` schema.
	pub fields: &'static [(&'static str, &'static str)],
	/// Field values, one per schema entry, in schema order.
	pub values: Vec<TypedValue>,
}

impl TypedData {
	/// Creates a typed message from a schema constant and its values.
	pub fn new(
		primary_type: &'static str,
		fields: &'static [(&'static str, &'static str)],
		values: Vec<TypedValue>,
	) -> Self {
		Self {
			primary_type,
			fields,
			values,
		}
	}

	/// Builds the canonical type string, e.g.
	/// `NFTVoucher(uint256 tokenId,uint256 minPrice,string uri)`.
	pub fn encode_type(&self) -> String {
		let fields = self
			.fields
			.iter()
			.map(|(name, kind)| format!("{} {}", kind, name))
			.collect::<Vec<_>>()
			.join(",");
		format!("{}({})", self.primary_type, fields)
	}

	/// Computes the EIP-712 struct hash:
	/// `keccak256(typeHash || encode(values...))`.
	pub fn struct_hash(&self) -> Result<B256, Eip712Error> {
		if self.fields.len() != self.values.len() {
			return Err(Eip712Error::Arity {
				fields: self.fields.len(),
				values: self.values.len(),
			});
		}

		let type_hash = keccak256(self.encode_type().as_bytes());
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&type_hash);

		for ((name, kind), value) in self.fields.iter().zip(self.values.iter()) {
			match (*kind, value) {
				("uint256", TypedValue::Uint(v)) => enc.push_u256(*v),
				("string", TypedValue::Str(s)) => enc.push_b256(&keccak256(s.as_bytes())),
				("uint256", _) | ("string", _) => {
					return Err(Eip712Error::TypeMismatch {
						field: name,
						declared: kind,
					})
				}
				(other, _) => return Err(Eip712Error::UnsupportedType(other)),
			}
		}

		Ok(keccak256(enc.finish()))
	}
}

/// Computes the EIP-712 domain hash:
/// `keccak256(abi.encode(typeHash, nameHash, versionHash, chainId, verifyingContract))`.
pub fn compute_domain_hash(domain: &SigningDomain) -> B256 {
	let domain_type_hash = keccak256(DOMAIN_TYPE.as_bytes());
	let name_hash = keccak256(domain.name.as_bytes());
	let version_hash = keccak256(domain.version.as_bytes());

	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&domain_type_hash);
	enc.push_b256(&name_hash);
	enc.push_b256(&version_hash);
	enc.push_u256(U256::from(domain.chain_id));
	enc.push_address_bytes(domain.verifying_contract.as_slice());
	keccak256(enc.finish())
}

/// Computes the final EIP-712 digest: `keccak256(0x1901 || domainHash || structHash)`.
pub fn compute_final_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Computes the digest a signer capability signs for `(domain, message)`.
pub fn signing_digest(domain: &SigningDomain, data: &TypedData) -> Result<B256, Eip712Error> {
	let domain_hash = compute_domain_hash(domain);
	let struct_hash = data.struct_hash()?;
	Ok(compute_final_digest(&domain_hash, &struct_hash))
}

/// Minimal ABI encoder for static types used in EIP-712 hashing.
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Default for Eip712AbiEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Eip712AbiEncoder {
	pub fn new() -> Self {
		Self { buf: Vec::new() }
	}

	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	/// Pushes a 20-byte address left-padded to a 32-byte word.
	pub fn push_address_bytes(&mut self, addr: &[u8]) {
		let mut word = [0u8; 32];
		word[32 - addr.len()..].copy_from_slice(addr);
		self.buf.extend_from_slice(&word);
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::voucher::Address;

	const TEST_SCHEMA: &[(&str, &str)] = &[
		("tokenId", "uint256"),
		("minPrice", "uint256"),
		("uri", "string"),
	];

	fn test_domain(contract: &str, chain_id: u64) -> SigningDomain {
		SigningDomain {
			name: "LazyNFT-Voucher",
			version: "1",
			verifying_contract: contract.parse::<Address>().unwrap(),
			chain_id,
		}
	}

	fn test_values(token_id: u64, min_price: u64, uri: &str) -> Vec<TypedValue> {
		vec![
			TypedValue::Uint(U256::from(token_id)),
			TypedValue::Uint(U256::from(min_price)),
			TypedValue::Str(uri.to_string()),
		]
	}

	#[test]
	fn test_domain_type_hash_matches_canonical_constant() {
		// keccak256 of the name/version domain layout, as hard-coded by
		// on-chain EIP-712 implementations.
		let expected =
			hex::decode("8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f")
				.unwrap();
		assert_eq!(keccak256(DOMAIN_TYPE.as_bytes()).as_slice(), &expected[..]);
	}

	#[test]
	fn test_encode_type() {
		let data = TypedData::new("NFTVoucher", TEST_SCHEMA, test_values(1, 0, "ipfs://abc"));
		assert_eq!(
			data.encode_type(),
			"NFTVoucher(uint256 tokenId,uint256 minPrice,string uri)"
		);
	}

	#[test]
	fn test_struct_hash_is_deterministic() {
		let a = TypedData::new("NFTVoucher", TEST_SCHEMA, test_values(1, 0, "ipfs://abc"));
		let b = TypedData::new("NFTVoucher", TEST_SCHEMA, test_values(1, 0, "ipfs://abc"));
		assert_eq!(a.struct_hash().unwrap(), b.struct_hash().unwrap());
	}

	#[test]
	fn test_struct_hash_binds_every_field() {
		let base = TypedData::new("NFTVoucher", TEST_SCHEMA, test_values(1, 0, "ipfs://abc"));
		let other_price = TypedData::new("NFTVoucher", TEST_SCHEMA, test_values(1, 1, "ipfs://abc"));
		let other_uri = TypedData::new("NFTVoucher", TEST_SCHEMA, test_values(1, 0, "ipfs://xyz"));

		let base_hash = base.struct_hash().unwrap();
		assert_ne!(base_hash, other_price.struct_hash().unwrap());
		assert_ne!(base_hash, other_uri.struct_hash().unwrap());
	}

	#[test]
	fn test_arity_mismatch_is_rejected() {
		let data = TypedData::new(
			"NFTVoucher",
			TEST_SCHEMA,
			vec![TypedValue::Uint(U256::from(1))],
		);
		assert!(matches!(
			data.struct_hash(),
			Err(Eip712Error::Arity {
				fields: 3,
				values: 1
			})
		));
	}

	#[test]
	fn test_type_mismatch_is_rejected() {
		let data = TypedData::new(
			"NFTVoucher",
			TEST_SCHEMA,
			vec![
				TypedValue::Str("1".to_string()),
				TypedValue::Uint(U256::ZERO),
				TypedValue::Str("ipfs://abc".to_string()),
			],
		);
		assert!(matches!(
			data.struct_hash(),
			Err(Eip712Error::TypeMismatch {
				field: "tokenId",
				..
			})
		));
	}

	#[test]
	fn test_digest_binds_to_domain() {
		let data = TypedData::new("NFTVoucher", TEST_SCHEMA, test_values(1, 0, "ipfs://abc"));

		let domain_a = test_domain("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512", 31337);
		let domain_b = test_domain("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0", 31337);
		let domain_c = test_domain("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512", 1);

		let digest_a = signing_digest(&domain_a, &data).unwrap();
		assert_ne!(digest_a, signing_digest(&domain_b, &data).unwrap());
		assert_ne!(digest_a, signing_digest(&domain_c, &data).unwrap());
	}

	#[test]
	fn test_encoder_emits_32_byte_words() {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_u256(U256::from(1));
		enc.push_address_bytes(&[0xff; 20]);
		let out = enc.finish();
		assert_eq!(out.len(), 64);
		// Address word is left-padded with zeros.
		assert_eq!(&out[32..44], &[0u8; 12]);
		assert_eq!(&out[44..64], &[0xff; 20]);
	}
}
