//! Flat record types persisted by the voucher workflow.
//!
//! Two records exist: the deployment info written when the verifying
//! contract is deployed, and the batch of signed vouchers produced by an
//! issuance run. Both are plain keyed-field JSON with no schema versioning.

use crate::{StorageError, StorageService};
use serde::{Deserialize, Serialize};
use voucher_types::{Address, NftVoucher};

/// Storage key for the contract deployment record.
pub const DEPLOY_INFO_KEY: &str = "deploy_info";
/// Storage key for the issued voucher batch record.
pub const VOUCHER_INFO_KEY: &str = "voucher_info";

/// Deployment info for the verifying contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployInfo {
	/// On-chain address of the deployed contract instance.
	pub address: Address,
}

/// A batch of signed vouchers from one issuance run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherBatch {
	/// The signed vouchers, in issuance order.
	pub vouchers: Vec<NftVoucher>,
}

/// Reads the deployment record.
pub async fn read_deploy_info(storage: &StorageService) -> Result<DeployInfo, StorageError> {
	storage.retrieve(DEPLOY_INFO_KEY).await
}

/// Writes the deployment record.
pub async fn write_deploy_info(
	storage: &StorageService,
	info: &DeployInfo,
) -> Result<(), StorageError> {
	storage.store(DEPLOY_INFO_KEY, info).await
}

/// Reads the voucher batch record.
pub async fn read_voucher_batch(storage: &StorageService) -> Result<VoucherBatch, StorageError> {
	storage.retrieve(VOUCHER_INFO_KEY).await
}

/// Writes the voucher batch record.
pub async fn write_voucher_batch(
	storage: &StorageService,
	batch: &VoucherBatch,
) -> Result<(), StorageError> {
	storage.store(VOUCHER_INFO_KEY, batch).await
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::implementations::memory::MemoryStorage;
	use alloy_primitives::U256;
	use voucher_types::Signature;

	fn memory_service() -> StorageService {
		StorageService::new(Box::new(MemoryStorage::new()))
	}

	#[tokio::test]
	async fn test_deploy_info_roundtrip() {
		let storage = memory_service();
		let info = DeployInfo {
			address: "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512".parse().unwrap(),
		};

		write_deploy_info(&storage, &info).await.unwrap();
		let back = read_deploy_info(&storage).await.unwrap();
		assert_eq!(back, info);
	}

	#[tokio::test]
	async fn test_missing_deploy_info_is_not_found() {
		let storage = memory_service();
		let result = read_deploy_info(&storage).await;
		assert!(matches!(result, Err(StorageError::NotFound)));
	}

	#[tokio::test]
	async fn test_voucher_batch_roundtrip() {
		let storage = memory_service();
		let batch = VoucherBatch {
			vouchers: vec![NftVoucher {
				token_id: U256::from(1),
				min_price: U256::ZERO,
				uri: "ipfs://abc".to_string(),
				signature: Signature(vec![0xab; 65]),
			}],
		};

		write_voucher_batch(&storage, &batch).await.unwrap();
		let back = read_voucher_batch(&storage).await.unwrap();
		assert_eq!(back, batch);
	}

	#[tokio::test]
	async fn test_records_are_flat_keyed_json() {
		let storage = memory_service();
		let info = DeployInfo {
			address: "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512".parse().unwrap(),
		};
		write_deploy_info(&storage, &info).await.unwrap();

		let raw: serde_json::Value = storage.retrieve(DEPLOY_INFO_KEY).await.unwrap();
		assert_eq!(
			raw,
			serde_json::json!({
				"address": "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512"
			})
		);
	}
}
