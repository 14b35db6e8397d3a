use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shift_collections::ShiftBuffer;
use std::collections::VecDeque;

fn bench_shift_buffer(c: &mut Criterion) {
    let chunk: Vec<u8> = (0..=255).collect();
    {
        let mut group = c.benchmark_group("VecDeque vs ShiftBuffer (Write/Read 256 x 16)");
        group.bench_function("std::collections::VecDeque", |b| {
            let mut out = [0u8; 256];
            b.iter(|| {
                let mut d: VecDeque<u8> = VecDeque::with_capacity(256);
                for _ in 0..16 {
                    d.extend(black_box(&chunk).iter().copied());
                    for (slot, value) in out.iter_mut().zip(d.drain(..256)) {
                        *slot = value;
                    }
                }
                black_box(out[255])
            })
        });

        group.bench_function("ShiftBuffer<u8>", |b| {
            let mut out = [0u8; 256];
            b.iter(|| {
                let mut s: ShiftBuffer<u8> = ShiftBuffer::with_capacity(256);
                for _ in 0..16 {
                    s.write(black_box(&chunk)).unwrap();
                    s.read(&mut out).unwrap();
                }
                black_box(out[255])
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("VecDeque vs ShiftBuffer (Growth to 4096)");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d: VecDeque<String> = VecDeque::with_capacity(16);
                for i in 0..4096 {
                    d.push_back(black_box(i).to_string());
                }
                d
            })
        });

        group.bench_function("ShiftBuffer<String>", |b| {
            b.iter(|| {
                let mut s: ShiftBuffer<String> = ShiftBuffer::with_capacity(16);
                s.shove((0..4096).map(|i| black_box(i).to_string())).unwrap();
                s
            })
        });
        group.finish();
    }
}

criterion_group!(benches, bench_shift_buffer);
criterion_main!(benches);
