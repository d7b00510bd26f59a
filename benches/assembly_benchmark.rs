use bempp_adapters::generator::{assemble_dense, assemble_dense_parallel};
use bempp_adapters::generators::{BoundaryOperatorGenerator, SubBlockGenerator};
use bempp_adapters::kernels::{KernelPointOperator, PointCloud, PointDofs};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

extern crate blas_src;
extern crate lapack_src;

fn random_cloud(npoints: usize) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(0);
    PointCloud::new(
        (0..npoints)
            .map(|_| [rng.gen(), rng.gen(), rng.gen()])
            .collect(),
    )
}

pub fn assembly_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");
    group.sample_size(20);

    for npoints in [200, 800] {
        let points = random_cloud(npoints);
        let dofs = PointDofs::new(&points);
        let operator = KernelPointOperator::<f64, _>::laplace(&points);

        let generator = BoundaryOperatorGenerator::new(&operator, &dofs);
        group.bench_function(
            format!("Serial assembly of {npoints}x{npoints} Laplace matrix"),
            |b| b.iter(|| black_box(assemble_dense(&generator))),
        );
        group.bench_function(
            format!("Parallel assembly of {npoints}x{npoints} Laplace matrix"),
            |b| b.iter(|| black_box(assemble_dense_parallel(&generator))),
        );

        let block_generator = SubBlockGenerator::new(&operator, &dofs);
        group.bench_function(
            format!("Block assembly of {npoints}x{npoints} Laplace matrix"),
            |b| b.iter(|| black_box(assemble_dense(&block_generator))),
        );
    }
    group.finish();
}

criterion_group!(benches, assembly_benchmark);
criterion_main!(benches);
