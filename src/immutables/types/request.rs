//! Request types for immutable bundle operations.

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::serde_helpers::TokenIdFromAny;
use crate::types::U256;

/// Reference to an immutable token.
///
/// The id is passed through to the contract as-is; whether it exists or is owned by
/// the caller is decided on chain.
#[serde_as]
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Immutable {
    /// ERC-721 token id of the immutable
    #[serde_as(as = "TokenIdFromAny")]
    pub id: U256,
}

impl Immutable {
    #[must_use]
    pub const fn new(id: U256) -> Self {
        Self { id }
    }
}

impl From<U256> for Immutable {
    fn from(id: U256) -> Self {
        Self::new(id)
    }
}

/// Request to unseal an immutable, releasing its bundle to the caller.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct UnsealRequest {
    /// The immutable to burn
    #[builder(into)]
    pub immutable: Immutable,
}

/// Request to look up the bundle wrapped by an immutable.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct BundleRequest {
    /// The immutable to resolve
    #[builder(into)]
    pub immutable: Immutable,
}
