//! Re-exported types from external crates for convenience.
//!
//! These types are commonly used in this SDK and are re-exported here
//! so users don't need to add these dependencies to their `Cargo.toml`.

/// Ethereum address type and the [`address!`] macro for compile-time address literals.
/// [`U256`] holds ERC-721 token ids such as immutable and bundle ids.
/// [`B256`] is used for transaction hashes.
/// [`ChainId`] is a type alias for `u64` representing EVM chain IDs.
pub use alloy::primitives::{Address, B256, ChainId, U256, address};
/// Arbitrary precision decimal type for ether amounts and APRs.
pub use rust_decimal::Decimal;
/// Macro for creating [`Decimal`] literals at compile time.
///
/// # Example
/// ```
/// use nftfi_client_sdk::types::dec;
/// let principal = dec!(1.5);
/// ```
pub use rust_decimal_macros::dec;
