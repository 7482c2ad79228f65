use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use extfile_utils::extsort::{Algorithm, FileSorterBuilder};
use rand::Rng;
use std::io::{Seek, Write};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    group.sample_size(30);

    let mut rng = rand::thread_rng();
    let input: Vec<u8> = (0..600).map(|_| rng.gen()).collect();

    for (name, algorithm) in [("bubble", Algorithm::Bubble), ("selection", Algorithm::Selection)] {
        let sorter = FileSorterBuilder::new().with_algorithm(algorithm).build();
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut file = tempfile::tempfile().unwrap();
                    file.write_all(&input).unwrap();
                    file.rewind().unwrap();
                    file
                },
                |mut file| sorter.sort_tri_bytes(&mut file).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
