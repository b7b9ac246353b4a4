//! Immutable bundle resolver.
//!
//! # Operations
//!
//! - **Unseal**: burn an immutable and release its bundle to the caller
//! - **Bundle lookup**: resolve the bundle wrapped by an immutable, read-only
//!
//! # Example
//!
//! ```no_run
//! use alloy::providers::ProviderBuilder;
//! use nftfi_client_sdk::config::Config;
//! use nftfi_client_sdk::immutables::contract::ProviderFactory;
//! use nftfi_client_sdk::immutables::types::BundleRequest;
//! use nftfi_client_sdk::immutables::Client;
//! use nftfi_client_sdk::mapper::Passthrough;
//! use nftfi_client_sdk::types::{U256, address};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ProviderBuilder::new().connect("https://eth.llamarpc.com").await?;
//! let config = Config::new(address!("0x000000000000000000000000000000000000aaa1"), "v1.Bundler");
//! let caller = address!("0x000000000000000000000000000000000000bbb2");
//!
//! let client = Client::new(
//!     &config,
//!     caller,
//!     &ProviderFactory::new(provider),
//!     Passthrough,
//!     Passthrough,
//! )?;
//!
//! let request = BundleRequest::builder().immutable(U256::from(42)).build();
//! let response = client.bundle(&request).await?;
//! println!("bundle {}", response.bundle.id);
//! # Ok(())
//! # }
//! ```

use super::contract::{ContractEvent, ContractFactory, ImmutableContract};
use super::error::ImmutablesError;
use super::types::{BundleRequest, BundleResponse, UnsealRequest};
use crate::Result;
use crate::account::AccountProvider;
use crate::config::Config;
use crate::mapper::{ErrorMapper, Passthrough, ResultMapper};
use crate::types::{Address, U256};

/// Returns the id of the bundle released to `caller`.
///
/// Selects the first `Transfer` emitted from the immutable contract at `contract` to
/// `caller`, in emission order. Addresses compare by value, so the hex casing they
/// were parsed from is irrelevant.
#[must_use]
pub fn released_bundle(
    events: &[ContractEvent],
    contract: Address,
    caller: Address,
) -> Option<U256> {
    events.iter().find_map(|event| match event {
        ContractEvent::Transfer(transfer) if transfer.from == contract && transfer.to == caller => {
            Some(transfer.token_id)
        }
        _ => None,
    })
}

/// Client for unsealing immutables and resolving their bundles.
///
/// Holds no per-call state: any number of calls may run concurrently on a shared
/// reference. Every failure is handed to the error mapper before it is returned.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Client<C, A, R = Passthrough, E = Passthrough> {
    contract: C,
    bundler_name: String,
    account: A,
    result: R,
    error: E,
}

impl<C, A, R, E> Client<C, A, R, E>
where
    C: ImmutableContract,
    A: AccountProvider,
    R: ResultMapper,
    E: ErrorMapper,
{
    /// Creates a client bound to the immutable contract named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`Config::validate`].
    pub fn new<F>(config: &Config, account: A, factory: &F, result: R, error: E) -> Result<Self>
    where
        F: ContractFactory<Contract = C>,
    {
        config.validate()?;

        Ok(Self {
            contract: factory.create(&config.immutable.v1),
            bundler_name: config.bundler_name().to_owned(),
            account,
            result,
            error,
        })
    }

    /// Unseals an immutable, burning it and releasing its bundle to the caller.
    ///
    /// The caller is resolved from the account provider on every call. The bundle id
    /// is read from the `Transfer` of the bundle token from the bound contract handle's
    /// address to the caller.
    ///
    /// # Errors
    ///
    /// Returns the error mapper's rendition of:
    /// - a failed, rejected or reverted `withdraw` call, including unsealing an
    ///   immutable that was already unsealed
    /// - a [`Kind::Invariant`](crate::error::Kind::Invariant) error when `withdraw`
    ///   succeeded without a matching `Transfer`
    /// - a result mapper failure
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            immutable_id = %request.immutable.id,
            caller
        ))
    )]
    pub async fn unseal(&self, request: &UnsealRequest) -> Result<BundleResponse> {
        let outcome = self.try_unseal(request.immutable.id).await;
        self.settle(outcome).await
    }

    async fn try_unseal(&self, immutable_id: U256) -> Result<BundleResponse> {
        let caller = self.account.address();

        #[cfg(feature = "tracing")]
        tracing::Span::current().record("caller", tracing::field::display(caller));

        let contract = self.contract.address();
        let receipt = self.contract.withdraw(immutable_id, caller).await?;

        let Some(bundle_id) = released_bundle(&receipt.events, contract, caller) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                transaction_hash = %receipt.transaction_hash,
                events = receipt.events.len(),
                "withdraw emitted no matching Transfer"
            );

            return Err(ImmutablesError::MissingTransfer {
                immutable_id,
                contract,
                caller,
            }
            .into());
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            bundle_id = %bundle_id,
            transaction_hash = %receipt.transaction_hash,
            "immutable unsealed"
        );

        self.result.handle(self.tagged(bundle_id)).await
    }

    /// Looks up the bundle wrapped by an immutable without sending a transaction.
    ///
    /// # Errors
    ///
    /// Returns the error mapper's rendition of a failed `bundleOfImmutable` call or a
    /// result mapper failure.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            immutable_id = %request.immutable.id
        ))
    )]
    pub async fn bundle(&self, request: &BundleRequest) -> Result<BundleResponse> {
        let outcome = self.try_bundle(request.immutable.id).await;
        self.settle(outcome).await
    }

    async fn try_bundle(&self, immutable_id: U256) -> Result<BundleResponse> {
        let bundle_id = self.contract.bundle_of_immutable(immutable_id).await?;

        self.result.handle(self.tagged(bundle_id)).await
    }

    async fn settle<T>(&self, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => Ok(value),
            Err(error) => Err(self.error.handle(error).await),
        }
    }

    fn tagged(&self, bundle_id: U256) -> BundleResponse {
        BundleResponse::new(bundle_id, self.bundler_name.as_str())
    }

    /// Returns a reference to the bound contract handle.
    #[must_use]
    pub const fn contract(&self) -> &C {
        &self.contract
    }
}
