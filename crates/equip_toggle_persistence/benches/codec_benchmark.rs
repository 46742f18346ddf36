//! # Toggle Codec Benchmark
//!
//! Measures a full save and a full load of a populated store at a few
//! sizes. Both run under the store lock, so this is also the time equip
//! events stall during a host save.
//!
//! Run with: `cargo bench --package equip_toggle_persistence`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use equip_toggle_core::{ActorId, AutoToggleMap, BipedSlot, Perspective, SlotState};
use equip_toggle_persistence::{CoSaveReader, CoSaveWriter, IdentityResolver, SerializationCallbacks};
use std::sync::Arc;

fn populated(actors: u32) -> SerializationCallbacks {
    let store = Arc::new(AutoToggleMap::new());
    for actor in 0..actors {
        for slot in BipedSlot::ALL.iter().step_by(4) {
            store.add(ActorId(actor), *slot, SlotState::Show, Perspective::FirstPerson);
            store.add(ActorId(actor), *slot, SlotState::Hide, Perspective::ThirdPerson);
        }
    }
    SerializationCallbacks::new(store)
}

fn encode(callbacks: &SerializationCallbacks) -> Vec<u8> {
    let mut writer = CoSaveWriter::new();
    let _ = callbacks.save(&mut writer);
    writer.finish().unwrap_or_default()
}

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");
    for actors in [16u32, 256, 4096] {
        let callbacks = populated(actors);
        group.throughput(Throughput::Elements(u64::from(actors)));
        group.bench_with_input(BenchmarkId::from_parameter(actors), &callbacks, |b, callbacks| {
            b.iter(|| black_box(encode(callbacks)));
        });
    }
    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for actors in [16u32, 256, 4096] {
        let callbacks = populated(actors);
        let bytes = encode(&callbacks);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(actors), &bytes, |b, bytes| {
            b.iter(|| {
                let Ok(mut reader) = CoSaveReader::from_bytes(bytes.clone()) else {
                    return;
                };
                black_box(callbacks.load(&mut reader, &IdentityResolver));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_save, bench_load);
criterion_main!(benches);
