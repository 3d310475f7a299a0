//! Local private-key signer implementation.
//!
//! Signs voucher digests with an in-memory secp256k1 key. The chain id is
//! fixed at construction since a local key is not connected to any node;
//! callers configure it alongside the key.

use crate::{SignerError, SignerInterface};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use voucher_types::{
	eip712::{signing_digest, TypedData},
	Address, SecretString, Signature, SigningDomain,
};

/// Signer backed by a locally held private key.
pub struct LocalSigner {
	/// The in-memory secp256k1 signing key.
	signer: PrivateKeySigner,
	/// Chain this signer is configured to operate on.
	chain_id: u64,
}

impl LocalSigner {
	/// Creates a local signer from a hex-encoded private key and chain id.
	pub fn new(private_key: &SecretString, chain_id: u64) -> Result<Self, SignerError> {
		let signer = private_key
			.expose_secret()
			.parse::<PrivateKeySigner>()
			.map_err(|e| SignerError::InvalidKey(e.to_string()))?;
		Ok(Self { signer, chain_id })
	}
}

#[async_trait]
impl SignerInterface for LocalSigner {
	async fn chain_id(&self) -> Result<u64, SignerError> {
		Ok(self.chain_id)
	}

	async fn address(&self) -> Result<Address, SignerError> {
		Ok(Address(self.signer.address().into_array()))
	}

	async fn sign_typed_data(
		&self,
		domain: &SigningDomain,
		data: &TypedData,
	) -> Result<Signature, SignerError> {
		let digest =
			signing_digest(domain, data).map_err(|e| SignerError::Signing(e.to_string()))?;
		let signature = self
			.signer
			.sign_hash_sync(&digest)
			.map_err(|e| SignerError::Signing(e.to_string()))?;
		Ok(Signature(signature.as_bytes().to_vec()))
	}
}

/// Factory function to create a local signer from configuration values.
pub fn create_signer(
	private_key: &SecretString,
	chain_id: u64,
) -> Result<Box<dyn SignerInterface>, SignerError> {
	Ok(Box::new(LocalSigner::new(private_key, chain_id)?))
}
