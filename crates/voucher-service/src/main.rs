//! Main entry point for the voucher issuance service.
//!
//! This binary wires the collaborators around the voucher factory: it
//! loads configuration from the environment, builds a local signer and
//! file storage, binds a factory to the deployed verifying contract,
//! issues signed vouchers for the configured token-id range and persists
//! the batch for later redemption.
//!
//! # Environment Variables
//!
//! - `VOUCHER_PRIVATE_KEY` - hex private key of the minting account (required)
//! - `VOUCHER_CHAIN_ID` - chain the signer operates on (required)
//! - `VOUCHER_URI_BASE` - base URI token ids are appended to (required)
//! - `VOUCHER_CONTRACT_ADDRESS` - verifying contract; falls back to the
//!   deployment record in storage when unset
//! - `VOUCHER_STORAGE_PATH` - record directory (default: `./data/storage`)
//! - `VOUCHER_TOKEN_START` / `VOUCHER_TOKEN_COUNT` - token-id range (default: 0 / 10)
//! - `VOUCHER_MIN_PRICE` - minimum redemption price in wei (default: 0)
//! - `VOUCHER_RETRY_ATTEMPTS` - attempts per voucher (default: 10)
//! - `RUST_LOG` - tracing filter (default: `info`)

use std::sync::Arc;

use alloy_primitives::U256;
use voucher_config::Config;
use voucher_core::VoucherFactory;
use voucher_signer::implementations::local::create_signer;
use voucher_signer::SignerService;
use voucher_storage::implementations::file::create_storage;
use voucher_storage::records::{self, VoucherBatch};
use voucher_storage::{StorageError, StorageService};
use voucher_types::Address;

mod retry;

/// Main entry point for the voucher issuance service.
///
/// This function:
/// 1. Initializes logging infrastructure
/// 2. Loads configuration from the environment
/// 3. Builds the signer and storage collaborators
/// 4. Issues signed vouchers for the configured token-id range
/// 5. Persists the resulting batch
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	fmt().with_env_filter(env_filter).with_target(true).init();

	// Load a .env file if present, then the typed configuration.
	dotenvy::dotenv().ok();
	let config = Config::from_env()?;

	let signer = Arc::new(SignerService::new(create_signer(
		&config.private_key,
		config.chain_id,
	)?));
	let storage = StorageService::new(create_storage(config.storage_path.clone()));

	tracing::info!(
		address = %signer.get_address().await?,
		chain_id = config.chain_id,
		"Loaded signing account"
	);

	let contract = resolve_contract_address(&config, &storage).await?;
	tracing::info!(%contract, "Issuing vouchers");

	let factory = VoucherFactory::new(contract, signer);

	let mut batch = VoucherBatch::default();
	for token_id in config.token_start..config.token_start + config.token_count {
		let voucher = retry::with_retries("create voucher", config.retry_attempts, || {
			let uri = format!("{}{}", config.uri_base, token_id);
			factory.create_with_price(U256::from(token_id), uri, config.min_price)
		})
		.await?;

		tracing::info!(token_id, uri = %voucher.uri, "Signed voucher");
		batch.vouchers.push(voucher);
	}

	records::write_voucher_batch(&storage, &batch).await?;
	tracing::info!(count = batch.vouchers.len(), "Wrote voucher batch");

	Ok(())
}

/// Resolves the verifying contract address for this run.
///
/// An explicit environment override wins; otherwise the deployment record
/// persisted by the deploy workflow is used.
async fn resolve_contract_address(
	config: &Config,
	storage: &StorageService,
) -> Result<Address, Box<dyn std::error::Error>> {
	if let Some(address) = config.contract_address {
		return Ok(address);
	}

	match records::read_deploy_info(storage).await {
		Ok(info) => Ok(info.address),
		Err(StorageError::NotFound) => Err(
			"VOUCHER_CONTRACT_ADDRESS is not set and no deployment record was found in storage"
				.into(),
		),
		Err(e) => Err(e.into()),
	}
}
