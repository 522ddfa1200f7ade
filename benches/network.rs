use criterion::{black_box, criterion_group, criterion_main, Criterion};

use backprop_net::{Network, NetworkConfig};

fn forward_bench(c: &mut Criterion) {
    let network = Network::new(&NetworkConfig::new(784, 10, 300)).unwrap();
    let input = vec![0.1_f64; network.input_size()];

    c.bench_function("forward_784_300_10", |b| {
        b.iter(|| {
            let activations = network.forward(black_box(&input)).unwrap();
            black_box(activations);
        })
    });
}

fn train_one_bench(c: &mut Criterion) {
    let mut network = Network::new(&NetworkConfig::new(784, 10, 300)).unwrap();
    let input = vec![0.1_f64; network.input_size()];

    c.bench_function("train_one_784_300_10", |b| {
        b.iter(|| {
            let err = network.train_one(black_box(&input), 3, 0.5).unwrap();
            black_box(err);
        })
    });
}

criterion_group!(benches, forward_bench, train_one_bench);
criterion_main!(benches);
