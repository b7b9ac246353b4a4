#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests, and https://github.com/rust-lang/rust-clippy/issues/13981"
)]
#![allow(
    unused,
    reason = "Not every test binary uses every fixture"
)]

use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr as _;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nftfi_client_sdk::Result;
use nftfi_client_sdk::account::AccountProvider;
use nftfi_client_sdk::config::{Config, ContractDescriptor};
use nftfi_client_sdk::error::{Error, Kind};
use nftfi_client_sdk::immutables::contract::{
    ContractEvent, ContractFactory, ImmutableContract, TransferEvent, WithdrawReceipt,
};
use nftfi_client_sdk::mapper::{ErrorMapper, ResultMapper};
use nftfi_client_sdk::types::{Address, B256, U256};
use serde::Serialize;

/// Immutable contract address, spelled in upper case to exercise address parsing
pub const CONTRACT: &str = "0x000000000000000000000000000000000000AAA1";
pub const CALLER: &str = "0x000000000000000000000000000000000000BBB2";
pub const OTHER: &str = "0x000000000000000000000000000000000000CCC3";

pub const BUNDLER_NAME: &str = "v1.Bundler";

#[must_use]
pub fn addr(hex: &str) -> Address {
    Address::from_str(hex).unwrap()
}

#[must_use]
pub fn config() -> Config {
    Config::from_json(&format!(
        r#"{{
            "immutable": {{ "v1": {{ "address": "{CONTRACT}", "abi": [] }} }},
            "bundler": {{ "v1": {{ "name": "{BUNDLER_NAME}" }} }}
        }}"#
    ))
    .unwrap()
}

#[must_use]
pub fn transfer(from: &str, to: &str, token_id: u64) -> ContractEvent {
    ContractEvent::Transfer(TransferEvent::new(
        addr(from),
        addr(to),
        U256::from(token_id),
    ))
}

/// What a node reports when the contract rejects a call.
#[derive(Debug)]
pub struct Revert(pub &'static str);

impl fmt::Display for Revert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execution reverted: {}", self.0)
    }
}

impl StdError for Revert {}

/// In-memory immutable contract.
///
/// Each sealed immutable wraps one bundle. A withdraw burns the immutable and emits
/// the burn followed by the bundle transfer, unless fixed receipt events are set.
#[derive(Debug, Default)]
pub struct FakeImmutables {
    address: Address,
    bundles: HashMap<U256, U256>,
    released: Mutex<HashSet<U256>>,
    receipt_events: Option<Vec<ContractEvent>>,
    pub withdrawals: Mutex<Vec<(U256, Address)>>,
}

impl FakeImmutables {
    #[must_use]
    pub fn new(bundles: &[(u64, u64)]) -> Self {
        Self {
            address: addr(CONTRACT),
            bundles: bundles
                .iter()
                .map(|&(immutable, bundle)| (U256::from(immutable), U256::from(bundle)))
                .collect(),
            ..Self::default()
        }
    }

    /// Deploys the fake at `address` instead of the configured contract.
    #[must_use]
    pub fn at(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Every withdraw reports exactly `events`.
    #[must_use]
    pub fn with_receipt_events(mut self, events: Vec<ContractEvent>) -> Self {
        self.receipt_events = Some(events);
        self
    }

    pub fn withdrawals(&self) -> Vec<(U256, Address)> {
        self.withdrawals.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImmutableContract for FakeImmutables {
    fn address(&self) -> Address {
        self.address
    }

    async fn withdraw(&self, immutable_id: U256, to: Address) -> Result<WithdrawReceipt> {
        self.withdrawals.lock().unwrap().push((immutable_id, to));

        let bundle_id = *self
            .bundles
            .get(&immutable_id)
            .ok_or_else(|| Error::with_source(Kind::Contract, Revert("nonexistent token")))?;

        if !self.released.lock().unwrap().insert(immutable_id) {
            return Err(Error::with_source(Kind::Contract, Revert("caller is not owner")));
        }

        let events = self.receipt_events.clone().unwrap_or_else(|| {
            vec![
                ContractEvent::Transfer(TransferEvent::new(to, Address::ZERO, immutable_id)),
                ContractEvent::Transfer(TransferEvent::new(self.address, to, bundle_id)),
            ]
        });

        Ok(WithdrawReceipt::builder()
            .transaction_hash(B256::with_last_byte(1))
            .block_number(1)
            .events(events)
            .build())
    }

    async fn bundle_of_immutable(&self, immutable_id: U256) -> Result<U256> {
        self.bundles
            .get(&immutable_id)
            .copied()
            .ok_or_else(|| Error::with_source(Kind::Contract, Revert("nonexistent token")))
    }
}

/// Hands out one shared [`FakeImmutables`] and checks it is bound to the configured address.
#[derive(Debug)]
pub struct FakeFactory(pub Arc<FakeImmutables>);

impl ContractFactory for FakeFactory {
    type Contract = Arc<FakeImmutables>;

    fn create(&self, descriptor: &ContractDescriptor) -> Self::Contract {
        assert_eq!(descriptor.address, self.0.address(), "bound to wrong contract");
        Arc::clone(&self.0)
    }
}

/// Hands out one shared [`FakeImmutables`] wherever it is deployed, as a factory
/// resolving the configured address through a proxy would.
#[derive(Debug)]
pub struct ProxyFactory(pub Arc<FakeImmutables>);

impl ContractFactory for ProxyFactory {
    type Contract = Arc<FakeImmutables>;

    fn create(&self, _descriptor: &ContractDescriptor) -> Self::Contract {
        Arc::clone(&self.0)
    }
}

/// Records the kind of every error it is handed, then returns it unchanged.
#[derive(Debug, Default)]
pub struct RecordingErrors {
    seen: Mutex<Vec<Kind>>,
}

impl RecordingErrors {
    pub fn seen(&self) -> Vec<Kind> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ErrorMapper for RecordingErrors {
    async fn handle(&self, error: Error) -> Error {
        self.seen.lock().unwrap().push(error.kind());
        error
    }
}

/// Counts payloads it is handed.
#[derive(Debug, Default)]
pub struct CountingResults {
    seen: Mutex<Vec<serde_json::Value>>,
}

impl CountingResults {
    pub fn seen(&self) -> Vec<serde_json::Value> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultMapper for CountingResults {
    async fn handle<T>(&self, payload: T) -> Result<T>
    where
        T: Serialize + Send + 'static,
    {
        self.seen
            .lock()
            .unwrap()
            .push(serde_json::to_value(&payload).unwrap());
        Ok(payload)
    }
}

/// Rejects every payload.
#[derive(Debug, Default)]
pub struct FailingResults;

#[async_trait]
impl ResultMapper for FailingResults {
    async fn handle<T>(&self, _payload: T) -> Result<T>
    where
        T: Serialize + Send + 'static,
    {
        Err(Error::mapping("payload rejected"))
    }
}

/// An account that can be switched between calls.
#[derive(Debug)]
pub struct RotatingAccount {
    current: Mutex<Address>,
}

impl RotatingAccount {
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            current: Mutex::new(address),
        }
    }

    pub fn rotate(&self, address: Address) {
        *self.current.lock().unwrap() = address;
    }
}

impl AccountProvider for RotatingAccount {
    fn address(&self) -> Address {
        *self.current.lock().unwrap()
    }
}
