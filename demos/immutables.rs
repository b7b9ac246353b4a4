#![allow(clippy::print_stdout, reason = "Fine for examples")]

//! Immutable bundle example.
//!
//! This example demonstrates how to:
//! - Load an NFTfi contract configuration
//! - Look up the bundle wrapped by an immutable
//! - Unseal the immutable, releasing the bundle to your wallet
//!
//! ## Usage
//!
//! For the read-only lookup:
//! ```sh
//! export NFTFI_RPC_URL="https://..."
//! cargo run --example immutables --features tracing -- nftfi.json 42
//! ```
//!
//! To unseal, you need the private key of the immutable's owner:
//! ```sh
//! export NFTFI_PRIVATE_KEY="your_private_key"
//! cargo run --example immutables --features tracing -- nftfi.json 42 --write
//! ```

use std::env;
use std::fs;
use std::str::FromStr as _;

use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context as _, Result};
use nftfi_client_sdk::config::{Config, PRIVATE_KEY_VAR, RPC_URL_VAR};
use nftfi_client_sdk::immutables::Client;
use nftfi_client_sdk::immutables::contract::ProviderFactory;
use nftfi_client_sdk::immutables::types::{BundleRequest, UnsealRequest};
use nftfi_client_sdk::mapper::Passthrough;
use nftfi_client_sdk::types::U256;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let write_mode = args.iter().any(|arg| arg == "--write");
    let config_path = args.get(1).context("usage: immutables <config.json> <immutable id>")?;
    let immutable_id = U256::from_str(args.get(2).context("missing immutable id")?)?;

    let config = Config::from_json(&fs::read_to_string(config_path)?)?;
    let rpc_url = env::var(RPC_URL_VAR).with_context(|| format!("{RPC_URL_VAR} must be set"))?;

    info!("=== Immutable Bundle Example ===");
    info!("Immutable contract: {}", config.immutable_address());
    info!("Bundler: {}", config.bundler_name());

    if !write_mode {
        let provider = ProviderBuilder::new().connect(&rpc_url).await?;
        // Reads need no wallet; any address works as the caller
        let client = Client::new(
            &config,
            config.immutable_address(),
            &ProviderFactory::new(provider),
            Passthrough,
            Passthrough,
        )?;

        let request = BundleRequest::builder().immutable(immutable_id).build();
        match client.bundle(&request).await {
            Ok(response) => info!("Immutable {immutable_id} wraps bundle {}", response.bundle.id),
            Err(e) => error!("Bundle lookup failed: {e}"),
        }

        info!("Run with --write to unseal the immutable");
        return Ok(());
    }

    let key = env::var(PRIVATE_KEY_VAR).with_context(|| format!("{PRIVATE_KEY_VAR} must be set"))?;
    let signer = PrivateKeySigner::from_str(&key)?;
    let provider = ProviderBuilder::new()
        .wallet(signer.clone())
        .connect(&rpc_url)
        .await?;

    let client = Client::new(
        &config,
        signer,
        &ProviderFactory::new(provider),
        Passthrough,
        Passthrough,
    )?;

    let bundle = client
        .bundle(&BundleRequest::builder().immutable(immutable_id).build())
        .await?;
    info!("Immutable {immutable_id} wraps bundle {}", bundle.bundle.id);

    let request = UnsealRequest::builder().immutable(immutable_id).build();
    let released = client.unseal(&request).await?;
    info!("→ Released bundle {}", released.bundle.id);

    println!("{}", serde_json::to_string_pretty(&released)?);

    Ok(())
}
