//! Benchmarks for the multi-reader ring buffer.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ringtap_buffer::RingBuffer;

fn bench_write_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_write_read");

    for capacity in [256usize, 4096, 65536].iter() {
        let block = vec![0.5f32; capacity / 4];

        group.bench_with_input(
            BenchmarkId::new("quarter_blocks", capacity),
            capacity,
            |b, &capacity| {
                let mut ring = RingBuffer::<f32>::new(&[capacity]).unwrap();
                b.iter(|| {
                    for _ in 0..4 {
                        ring.write(black_box(&block)).unwrap();
                        black_box(ring.read(None).unwrap());
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_fanout");

    for readers in [1usize, 4, 16].iter() {
        group.bench_with_input(
            BenchmarkId::new("readers", readers),
            readers,
            |b, &readers| {
                let mut ring = RingBuffer::<f32>::new(&[4096]).unwrap();
                let names: Vec<String> = (0..readers).map(|i| format!("r{}", i)).collect();
                for name in &names {
                    ring.set_read_index(name, 0);
                }
                let block = vec![0.5f32; 1024];

                b.iter(|| {
                    ring.write(black_box(&block)).unwrap();
                    black_box(ring.read(None).unwrap());
                    for name in &names {
                        black_box(ring.read_from(name, None).unwrap());
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_rebase(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_rebase");

    for capacity in [4096usize, 65536].iter() {
        group.bench_with_input(
            BenchmarkId::new("rotate", capacity),
            capacity,
            |b, &capacity| {
                let mut ring = RingBuffer::<f32>::new(&[capacity]).unwrap();
                let block = vec![0.5f32; capacity];
                b.iter(|| {
                    // Leave the cursors at an offset that forces a rotation.
                    ring.write(black_box(&block)).unwrap();
                    ring.read(Some(capacity - 1)).unwrap();
                    black_box(ring.rebase());
                    ring.read(None).unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_write_read, bench_fanout, bench_rebase);
criterion_main!(benches);
