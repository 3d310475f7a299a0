//! Common types module for the voucher minting system.
//!
//! This module defines the core data types and structures shared by the
//! voucher subsystem components. It provides a centralized location for
//! shared types to ensure consistency across all crates in the workspace.

/// EIP-712 typed-data encoding helpers.
pub mod eip712;
/// Secure string type for private keys and other secrets.
pub mod secret_string;
/// Utility functions for hex formatting.
pub mod utils;
/// Voucher, domain and primitive on-chain types.
pub mod voucher;

// Re-export all types for convenient access
pub use secret_string::SecretString;
pub use utils::{with_0x_prefix, without_0x_prefix};
pub use voucher::{Address, NftVoucher, Signature, SigningDomain};
