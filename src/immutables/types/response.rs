//! Response types for immutable bundle operations.

use serde::{Deserialize, Serialize};

use crate::types::U256;

/// A bundle released from, or wrapped by, an immutable.
///
/// Serializes as `{"bundle":{"id":"<decimal id>"},"nftfi":{"contract":{"name":"<bundler>"}}}`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleResponse {
    pub bundle: Bundle,
    /// Routing metadata: the bundler contract that owns `bundle`
    pub nftfi: NftfiMetadata,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Bundle token id in canonical decimal form
    pub id: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftfiMetadata {
    pub contract: ContractTag,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTag {
    pub name: String,
}

impl BundleResponse {
    #[must_use]
    pub fn new<S: Into<String>>(bundle_id: U256, contract_name: S) -> Self {
        Self {
            bundle: Bundle {
                id: bundle_id.to_string(),
            },
            nftfi: NftfiMetadata {
                contract: ContractTag {
                    name: contract_name.into(),
                },
            },
        }
    }
}
