//! Immutables-specific error types.

use std::error::Error as StdError;
use std::fmt;

use alloy::providers::{PendingTransactionError, WatchTxError};

use super::contract::ContractFunction;
use crate::error::{Error, Kind};
use crate::types::{Address, B256, U256};

/// Immutables-specific errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum ImmutablesError {
    /// The node or transport rejected a contract call
    ContractCall {
        function: ContractFunction,
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
    /// The transaction was mined but reverted
    Reverted {
        function: ContractFunction,
        transaction_hash: B256,
    },
    /// `withdraw` succeeded but emitted no transfer of the bundle from the immutable
    /// contract to the caller
    MissingTransfer {
        immutable_id: U256,
        contract: Address,
        caller: Address,
    },
}

impl ImmutablesError {
    pub(crate) fn contract_call<E>(function: ContractFunction, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::ContractCall {
            function,
            source: Box::new(source),
        }
    }

    /// Whether the call gave up waiting for its transaction to be confirmed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::ContractCall { source, .. } => matches!(
                source.downcast_ref::<PendingTransactionError>(),
                Some(PendingTransactionError::TxWatcher(WatchTxError::Timeout))
            ),
            _ => false,
        }
    }
}

impl fmt::Display for ImmutablesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContractCall { function, source } => {
                write!(f, "immutable contract call {function} failed: {source}")
            }
            Self::Reverted {
                function,
                transaction_hash,
            } => write!(
                f,
                "immutable contract call {function} reverted in transaction {transaction_hash}"
            ),
            Self::MissingTransfer {
                immutable_id,
                contract,
                caller,
            } => write!(
                f,
                "withdraw of immutable {immutable_id} emitted no Transfer from {contract} to {caller}"
            ),
        }
    }
}

impl StdError for ImmutablesError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::ContractCall { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<ImmutablesError> for Error {
    fn from(err: ImmutablesError) -> Self {
        let kind = match &err {
            _ if err.is_timeout() => Kind::Timeout,
            ImmutablesError::ContractCall { .. } | ImmutablesError::Reverted { .. } => {
                Kind::Contract
            }
            ImmutablesError::MissingTransfer { .. } => Kind::Invariant,
        };

        Error::with_source(kind, err)
    }
}
