//! Benchmarks for unseal receipt processing
//!
//! - Decoding raw receipt logs into `ContractEvent`s
//! - Selecting the released bundle from large, mostly unrelated receipts

use std::hint::black_box;

use alloy::primitives::Log as PrimitiveLog;
use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent as _;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nftfi_client_sdk::immutables::contract::{ContractEvent, IImmutableBundle, TransferEvent};
use nftfi_client_sdk::immutables::released_bundle;
use nftfi_client_sdk::types::{Address, U256, address};

const CONTRACT: Address = address!("0x000000000000000000000000000000000000aaa1");
const CALLER: Address = address!("0x000000000000000000000000000000000000bbb2");
const OTHER: Address = address!("0x000000000000000000000000000000000000ccc3");

/// `len - 1` unrelated transfers followed by the bundle release.
fn receipt_events(len: usize) -> Vec<ContractEvent> {
    let mut events: Vec<ContractEvent> = (0..len.saturating_sub(1))
        .map(|i| ContractEvent::Transfer(TransferEvent::new(OTHER, CALLER, U256::from(i))))
        .collect();
    events.push(ContractEvent::Transfer(TransferEvent::new(
        CONTRACT,
        CALLER,
        U256::from(777),
    )));
    events
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_selection/released_bundle");

    for len in [2_usize, 64, 1_024] {
        let events = receipt_events(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &events, |b, events| {
            b.iter(|| released_bundle(black_box(events), CONTRACT, CALLER));
        });
    }

    group.finish();
}

fn bench_decoding(c: &mut Criterion) {
    let transfer = IImmutableBundle::Transfer {
        from: CONTRACT,
        to: CALLER,
        tokenId: U256::from(777),
    };
    let log = Log {
        inner: PrimitiveLog {
            address: CONTRACT,
            data: transfer.encode_log_data(),
        },
        ..Log::default()
    };

    c.bench_function("event_selection/decode_transfer", |b| {
        b.iter(|| ContractEvent::from_log(black_box(&log)));
    });
}

criterion_group!(benches, bench_selection, bench_decoding);
criterion_main!(benches);
