use criterion::{criterion_group, criterion_main, Criterion};
use seating::{read_layout, simulate, NeighborRule};

pub fn stabilize_benchmark(c: &mut Criterion) {
    let input_path = "test_inputs.txt";
    let layout = match read_layout(input_path) {
        Ok(v) => v,
        Err(e) => {
            eprintln!(
                "Failed to read seats layout from input file({}), get error({})",
                input_path, e
            );
            return;
        }
    };

    c.bench_function("stabilize adjacent", |b| {
        b.iter(|| simulate(&layout, NeighborRule::Adjacent))
    });
    c.bench_function("stabilize line of sight", |b| {
        b.iter(|| simulate(&layout, NeighborRule::LineOfSight))
    });
}

criterion_group!(seat_map_benches, stabilize_benchmark);
criterion_main!(seat_map_benches);
