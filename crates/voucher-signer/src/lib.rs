//! Signer capability module for the voucher minting system.
//!
//! This module provides the abstraction the voucher factory signs through.
//! It defines a narrow interface with exactly the operations voucher
//! construction needs: reporting the chain the signer operates on and
//! producing a typed-data signature. The cryptographic hashing and curve
//! operations live entirely behind this boundary.

use async_trait::async_trait;
use thiserror::Error;
use voucher_types::{eip712::TypedData, Address, Signature, SigningDomain};

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during signer operations.
#[derive(Debug, Error)]
pub enum SignerError {
	/// Error that occurs when the signer cannot be reached or cannot
	/// report its chain.
	#[error("Signer unavailable: {0}")]
	Unavailable(String),
	/// Error that occurs when the signer declines to sign for the
	/// requested account.
	#[error("Unauthorized: {0}")]
	Unauthorized(String),
	/// Error that occurs when digest computation or the curve operation fails.
	#[error("Signing failed: {0}")]
	Signing(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Trait defining the interface for signer implementations.
///
/// This trait must be implemented by anything able to act as the signing
/// capability for voucher creation. Implementations perform the
/// domain-separated structural hash and the sign operation; callers only
/// supply the domain, schema and values.
#[async_trait]
pub trait SignerInterface: Send + Sync {
	/// Reports the numeric id of the chain this signer operates on.
	///
	/// May suspend on network I/O for remote signers and fail when the
	/// signer is disconnected.
	async fn chain_id(&self) -> Result<u64, SignerError>;

	/// Retrieves the address associated with this signer's account.
	async fn address(&self) -> Result<Address, SignerError>;

	/// Produces a typed-data signature over `(domain, schema, body)`.
	///
	/// The signature verifies on-chain only if the supplied domain and
	/// schema byte-match what the verifying contract hashes against.
	async fn sign_typed_data(
		&self,
		domain: &SigningDomain,
		data: &TypedData,
	) -> Result<Signature, SignerError>;
}

/// Service that manages signing operations.
///
/// This struct provides a high-level interface for signer access,
/// wrapping an underlying signer implementation.
pub struct SignerService {
	/// The underlying signer implementation.
	implementation: Box<dyn SignerInterface>,
}

impl SignerService {
	/// Creates a new SignerService with the specified implementation.
	pub fn new(implementation: Box<dyn SignerInterface>) -> Self {
		Self { implementation }
	}

	/// Reports the chain id of the managed signer.
	pub async fn chain_id(&self) -> Result<u64, SignerError> {
		self.implementation.chain_id().await
	}

	/// Retrieves the address associated with the managed signer.
	pub async fn get_address(&self) -> Result<Address, SignerError> {
		self.implementation.address().await
	}

	/// Signs a typed-data message using the managed signer.
	pub async fn sign_typed_data(
		&self,
		domain: &SigningDomain,
		data: &TypedData,
	) -> Result<Signature, SignerError> {
		self.implementation.sign_typed_data(domain, data).await
	}
}
