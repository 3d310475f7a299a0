//! Voucher construction and signing for the lazy-minting system.
//!
//! This module builds signed [`NftVoucher`] records: it assembles the typed
//! voucher body from caller-supplied fields, resolves the EIP-712 signing
//! domain once per factory instance, and requests a signature over the
//! combination from the signer capability. Everything else (persistence,
//! retries, configuration) lives with the callers; the factory's only
//! responsibility is that each returned voucher is self-consistent with the
//! domain it was signed under.

use alloy_primitives::U256;
use std::sync::Arc;
use tokio::sync::OnceCell;
use voucher_signer::{SignerError, SignerService};
use voucher_types::{
	eip712::{TypedData, TypedValue},
	Address, NftVoucher, SigningDomain,
};

// These constants must match the ones used in the smart contract.
pub const SIGNING_DOMAIN_NAME: &str = "LazyNFT-Voucher";
pub const SIGNING_DOMAIN_VERSION: &str = "1";

/// Primary type name of the voucher schema.
const VOUCHER_PRIMARY_TYPE: &str = "NFTVoucher";

/// Ordered voucher field schema, matching the structure and order the
/// verifying contract's on-chain hashing expects. Fixed constant, never
/// derived from input.
const VOUCHER_SCHEMA: &[(&str, &str)] = &[
	("tokenId", "uint256"),
	("minPrice", "uint256"),
	("uri", "string"),
];

/// Factory that creates and signs vouchers for one deployed contract.
///
/// A factory instance is bound to a verifying contract address and a signer
/// capability. The signing domain is resolved lazily on the first `create`
/// call and reused for the instance's lifetime; the contract address and
/// the signer's chain are assumed fixed after construction.
pub struct VoucherFactory {
	/// Address of the deployed contract vouchers will be redeemed against.
	contract: Address,
	/// Signer capability whose account is authorized to mint.
	signer: Arc<SignerService>,
	/// Lazily resolved signing domain, at most one per instance.
	domain: OnceCell<SigningDomain>,
}

impl VoucherFactory {
	/// Creates a new factory targeting a deployed verifying contract.
	pub fn new(contract: Address, signer: Arc<SignerService>) -> Self {
		Self {
			contract,
			signer,
			domain: OnceCell::new(),
		}
	}

	/// Returns the verifying contract address this factory is bound to.
	pub fn contract(&self) -> &Address {
		&self.contract
	}

	/// Creates a signed voucher with a minimum price of zero.
	pub async fn create(
		&self,
		token_id: U256,
		uri: impl Into<String>,
	) -> Result<NftVoucher, SignerError> {
		self.create_with_price(token_id, uri, U256::ZERO).await
	}

	/// Creates a signed voucher for the given token id, metadata URI and
	/// minimum redemption price.
	///
	/// Token-id uniqueness is the verifying contract's responsibility at
	/// redemption time; no validation happens here. Failures from domain
	/// resolution or from the signer propagate unchanged, and no partial
	/// voucher is returned.
	pub async fn create_with_price(
		&self,
		token_id: U256,
		uri: impl Into<String>,
		min_price: U256,
	) -> Result<NftVoucher, SignerError> {
		let uri = uri.into();
		let domain = self.signing_domain().await?;

		// Body values in schema declaration order: tokenId, minPrice, uri.
		let message = TypedData::new(
			VOUCHER_PRIMARY_TYPE,
			VOUCHER_SCHEMA,
			vec![
				TypedValue::Uint(token_id),
				TypedValue::Uint(min_price),
				TypedValue::Str(uri.clone()),
			],
		);

		let signature = self.signer.sign_typed_data(domain, &message).await?;

		Ok(NftVoucher {
			token_id,
			min_price,
			uri,
			signature,
		})
	}

	/// Resolves the signing domain for this factory instance.
	///
	/// The first caller fetches the chain id from the signer capability;
	/// concurrent callers before that resolution completes await the same
	/// in-flight result instead of issuing duplicate lookups. A failed
	/// resolution leaves the cell empty, so a later call may resolve again.
	async fn signing_domain(&self) -> Result<&SigningDomain, SignerError> {
		self.domain
			.get_or_try_init(|| async {
				let chain_id = self.signer.chain_id().await?;
				tracing::debug!(chain_id, contract = %self.contract, "Resolved signing domain");
				Ok(SigningDomain {
					name: SIGNING_DOMAIN_NAME,
					version: SIGNING_DOMAIN_VERSION,
					verifying_contract: self.contract,
					chain_id,
				})
			})
			.await
	}
}
