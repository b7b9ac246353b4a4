//! Resolution of the account that signs and receives on-chain calls.

use std::sync::Arc;

use alloy::signers::local::PrivateKeySigner;

use crate::types::Address;

/// Supplies the caller's address.
///
/// Components ask for the address on every call instead of caching it, so an
/// implementation may rotate accounts between calls.
pub trait AccountProvider: Send + Sync {
    fn address(&self) -> Address;
}

impl AccountProvider for Address {
    fn address(&self) -> Address {
        *self
    }
}

impl AccountProvider for PrivateKeySigner {
    fn address(&self) -> Address {
        PrivateKeySigner::address(self)
    }
}

impl<T: AccountProvider + ?Sized> AccountProvider for &T {
    fn address(&self) -> Address {
        (**self).address()
    }
}

impl<T: AccountProvider + ?Sized> AccountProvider for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }
}
