//! Immutable bundle client.
//!
//! An immutable is an ERC-721 token that seals a bundle of NFTs used as loan
//! collateral. Each immutable wraps exactly one bundle, fixed when it is minted.
//! Unsealing burns the immutable and transfers the bundle token to the caller.
//!
//! # Features
//!
//! - **Unseal**: burn an immutable and discover the released bundle id from the
//!   `Transfer` events of the withdraw transaction
//! - **Bundle lookup**: resolve the bundle wrapped by an immutable with a read-only
//!   contract call
//!
//! Both operations return a [`types::BundleResponse`] tagged with the configured
//! bundler contract name, after passing it through the configured
//! [`ResultMapper`](crate::mapper::ResultMapper). Failures go through the
//! [`ErrorMapper`](crate::mapper::ErrorMapper).
//!
//! # Lifecycle
//!
//! ```text
//! Sealed --unseal--> Released
//! ```
//!
//! Looking up the bundle is valid in both states; unsealing a released immutable
//! is rejected by the contract.

pub mod client;
pub mod contract;
mod error;
pub mod types;

pub use client::{Client, released_bundle};
pub use error::ImmutablesError;
