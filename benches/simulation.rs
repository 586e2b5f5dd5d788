use criterion::{criterion_group, criterion_main, Criterion};
use grn_core::genome::scan;
use grn_core::{Genome, Grn, MatchingTable, Protein};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_simulation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let genome = Genome::random(1024, &mut rng);

    c.bench_function("scan_1024_words", |b| b.iter(|| scan(&genome)));

    let grn = Grn::from_genome(&genome).expect("default config is valid");
    c.bench_function("build_matching_table_1024_words", |b| {
        b.iter(|| {
            MatchingTable::build(
                grn.tf_genes().iter().chain(grn.p_genes()),
                grn.sensors(),
                1.0,
            )
        })
    });

    let inputs = vec![Protein::input(0x0000_FFFF, 0.1), Protein::input(0xFFFF_0000, 0.1)];
    c.bench_function("run_100_steps_1024_words", |b| {
        b.iter_batched(
            || Grn::new(&genome, inputs.clone(), Default::default()).expect("valid network"),
            |mut grn| grn.run(100),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_simulation);
criterion_main!(benches);
