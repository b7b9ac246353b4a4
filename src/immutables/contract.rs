//! Binding to the deployed immutable bundle contract.
//!
//! [`ImmutableContract`] is the seam between the resolver and the chain. The
//! alloy-backed [`ProviderContract`] talks JSON-RPC through any [`Provider`]; tests and
//! alternative transports provide their own implementation.

#![allow(
    clippy::exhaustive_structs,
    clippy::exhaustive_enums,
    reason = "Alloy sol! macro generates code that triggers these lints"
)]

use std::sync::Arc;

use alloy::providers::Provider;
use alloy::rpc::types::Log;
use alloy::sol;
use async_trait::async_trait;
use bon::Builder;
use strum_macros::{Display, IntoStaticStr};

use super::error::ImmutablesError;
use crate::Result;
use crate::config::ContractDescriptor;
use crate::types::{Address, B256, U256};

// Immutable bundle contract interface
//
// An immutable is an ERC-721 wrapping a sealed bundle. `withdraw` burns the
// immutable and transfers the wrapped bundle token from the immutable contract to
// `to`; that transfer is the only place the released bundle id is reported.
// `bundleOfImmutable` is the read-only mapping fixed at mint time.
sol! {
    #[sol(rpc)]
    interface IImmutableBundle {
        /// ERC-721 transfer, emitted by both the immutable and the bundle token.
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);

        event Approval(address indexed owner, address indexed approved, uint256 indexed tokenId);

        event ApprovalForAll(address indexed owner, address indexed operator, bool approved);

        /// Burns the immutable and sends its bundle to `to`.
        function withdraw(uint256 immutableId, address to) external;

        /// Returns the bundle wrapped by an immutable.
        function bundleOfImmutable(uint256 immutableId) external view returns (uint256);
    }
}

/// Contract functions invoked by the SDK, named as in the contract ABI.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum ContractFunction {
    Withdraw,
    BundleOfImmutable,
}

/// ERC-721 `Transfer(from, to, tokenId)`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub token_id: U256,
}

impl TransferEvent {
    #[must_use]
    pub const fn new(from: Address, to: Address, token_id: U256) -> Self {
        Self { from, to, token_id }
    }
}

/// An event emitted while executing a contract call, decoded against
/// [`IImmutableBundle`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum ContractEvent {
    Transfer(TransferEvent),
    Approval {
        owner: Address,
        approved: Address,
        token_id: U256,
    },
    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },
    /// A log that matches none of the interface's events, such as an ERC-20
    /// `Transfer` whose token id is not indexed.
    Unknown {
        address: Address,
        topic0: Option<B256>,
    },
}

impl ContractEvent {
    /// The Solidity event name, e.g. `"Transfer"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub fn from_log(log: &Log) -> Self {
        if let Ok(decoded) = log.log_decode::<IImmutableBundle::Transfer>() {
            let transfer = decoded.inner.data;
            return Self::Transfer(TransferEvent::new(
                transfer.from,
                transfer.to,
                transfer.tokenId,
            ));
        }

        if let Ok(decoded) = log.log_decode::<IImmutableBundle::Approval>() {
            let approval = decoded.inner.data;
            return Self::Approval {
                owner: approval.owner,
                approved: approval.approved,
                token_id: approval.tokenId,
            };
        }

        if let Ok(decoded) = log.log_decode::<IImmutableBundle::ApprovalForAll>() {
            let approval = decoded.inner.data;
            return Self::ApprovalForAll {
                owner: approval.owner,
                operator: approval.operator,
                approved: approval.approved,
            };
        }

        Self::Unknown {
            address: log.address(),
            topic0: log.topics().first().copied(),
        }
    }
}

/// Outcome of a mined `withdraw` transaction.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct WithdrawReceipt {
    /// Transaction hash
    pub transaction_hash: B256,
    /// Block number where the transaction was mined, when the node reports it
    pub block_number: Option<u64>,
    /// Every event emitted by the transaction, in emission order
    #[builder(default)]
    pub events: Vec<ContractEvent>,
}

/// A handle on one deployed immutable contract.
#[async_trait]
pub trait ImmutableContract: Send + Sync {
    fn address(&self) -> Address;

    /// Sends `withdraw(immutable_id, to)` and waits for it to be mined.
    async fn withdraw(&self, immutable_id: U256, to: Address) -> Result<WithdrawReceipt>;

    /// Calls `bundleOfImmutable(immutable_id)` without a transaction.
    async fn bundle_of_immutable(&self, immutable_id: U256) -> Result<U256>;
}

#[async_trait]
impl<T: ImmutableContract + ?Sized> ImmutableContract for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn withdraw(&self, immutable_id: U256, to: Address) -> Result<WithdrawReceipt> {
        (**self).withdraw(immutable_id, to).await
    }

    async fn bundle_of_immutable(&self, immutable_id: U256) -> Result<U256> {
        (**self).bundle_of_immutable(immutable_id).await
    }
}

/// Creates [`ImmutableContract`] handles bound to a configured address.
pub trait ContractFactory {
    type Contract: ImmutableContract;

    fn create(&self, descriptor: &ContractDescriptor) -> Self::Contract;
}

/// [`ContractFactory`] for contracts reached through an alloy [`Provider`].
///
/// State-changing calls need a provider with a wallet attached, e.g.
/// `ProviderBuilder::new().wallet(signer).connect(url)`.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct ProviderFactory<P> {
    provider: P,
}

impl<P: Provider + Clone> ProviderFactory<P> {
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns a reference to the underlying provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Provider + Clone> ContractFactory for ProviderFactory<P> {
    type Contract = ProviderContract<P>;

    fn create(&self, descriptor: &ContractDescriptor) -> Self::Contract {
        ProviderContract {
            instance: IImmutableBundle::new(descriptor.address, self.provider.clone()),
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct ProviderContract<P: Provider> {
    instance: IImmutableBundle::IImmutableBundleInstance<P>,
}

#[async_trait]
impl<P: Provider + Clone> ImmutableContract for ProviderContract<P> {
    fn address(&self) -> Address {
        *self.instance.address()
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            contract = %self.instance.address(),
            immutable_id = %immutable_id,
            to = %to
        ))
    )]
    async fn withdraw(&self, immutable_id: U256, to: Address) -> Result<WithdrawReceipt> {
        let pending_tx = self
            .instance
            .withdraw(immutable_id, to)
            .send()
            .await
            .map_err(|e| ImmutablesError::contract_call(ContractFunction::Withdraw, e))?;

        let transaction_hash = *pending_tx.tx_hash();

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ImmutablesError::contract_call(ContractFunction::Withdraw, e))?;

        if !receipt.inner.status() {
            return Err(ImmutablesError::Reverted {
                function: ContractFunction::Withdraw,
                transaction_hash,
            }
            .into());
        }

        let events = receipt
            .inner
            .logs()
            .iter()
            .map(ContractEvent::from_log)
            .collect();

        Ok(WithdrawReceipt {
            transaction_hash,
            block_number: receipt.block_number,
            events,
        })
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            contract = %self.instance.address(),
            immutable_id = %immutable_id
        ))
    )]
    async fn bundle_of_immutable(&self, immutable_id: U256) -> Result<U256> {
        let bundle_id = self
            .instance
            .bundleOfImmutable(immutable_id)
            .call()
            .await
            .map_err(|e| ImmutablesError::contract_call(ContractFunction::BundleOfImmutable, e))?;

        Ok(bundle_id)
    }
}
