//! Contract configuration consumed by the SDK components.
//!
//! The layout mirrors the JSON configuration shipped with NFTfi deployments:
//!
//! ```json
//! {
//!   "immutable": { "v1": { "address": "0x..." } },
//!   "bundler": { "v1": { "name": "..." } }
//! }
//! ```
//!
//! Keys the SDK does not use (for example an embedded `abi`) are ignored, and
//! reported as warnings when the `tracing` feature is enabled.

use serde::Deserialize;

use crate::Result;
use crate::error::Error;
use crate::serde_helpers::deserialize_with_warnings;
use crate::types::Address;

/// Environment variable holding the JSON-RPC endpoint used by the demos.
pub const RPC_URL_VAR: &str = "NFTFI_RPC_URL";

/// Environment variable holding the hex private key used by the demos.
pub const PRIVATE_KEY_VAR: &str = "NFTFI_PRIVATE_KEY";

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// The immutable bundle contract, wrapping sealed bundles
    pub immutable: Versioned<ContractDescriptor>,
    /// The bundler contract, used to tag results for downstream routing
    pub bundler: Versioned<NamedContract>,
}

/// A contract entry keyed by protocol version.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Versioned<T> {
    pub v1: T,
}

/// Identifies a deployed contract. The contract interface itself is bound at
/// compile time, see [`crate::immutables::contract::IImmutableBundle`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ContractDescriptor {
    pub address: Address,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedContract {
    pub name: String,
}

impl Config {
    #[must_use]
    pub fn new<S: Into<String>>(immutable_address: Address, bundler_name: S) -> Self {
        Self {
            immutable: Versioned {
                v1: ContractDescriptor {
                    address: immutable_address,
                },
            },
            bundler: Versioned {
                v1: NamedContract {
                    name: bundler_name.into(),
                },
            },
        }
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let config: Self = deserialize_with_warnings(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that cannot address a real deployment.
    pub fn validate(&self) -> Result<()> {
        if self.immutable.v1.address.is_zero() {
            return Err(Error::validation(
                "immutable contract address must not be the zero address",
            ));
        }

        if self.bundler.v1.name.trim().is_empty() {
            return Err(Error::validation("bundler contract name must not be empty"));
        }

        Ok(())
    }

    #[must_use]
    pub fn immutable_address(&self) -> Address {
        self.immutable.v1.address
    }

    #[must_use]
    pub fn bundler_name(&self) -> &str {
        &self.bundler.v1.name
    }
}
