use {
    criterion::{criterion_group, criterion_main, Benchmark, Criterion},
    swe_plot::{
        grid::{Field, GridDescriptor, Staggering, Topology},
        loader::{assemble, load_tile_field},
        naming::Naming,
        parameters::MissingFilePolicy,
        utils::write_snapshot,
    },
    tempdir::TempDir,
};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench(
        "loader",
        Benchmark::new("load_tile_field_192", |b| {
            let dir = TempDir::new("swe-plot-bench").unwrap();
            let path = dir.path().join("tile.dat");
            let values = (0..192 * 192).map(|i| i as f64).collect::<Vec<_>>();
            write_snapshot(&path, &values).unwrap();

            b.iter(|| load_tile_field(&path, 192, 192).unwrap())
        }),
    );

    c.bench(
        "loader",
        Benchmark::new("assemble_cubed_sphere_48", |b| {
            let dir = TempDir::new("swe-plot-bench").unwrap();
            let grid =
                GridDescriptor::new(Topology::CubedSphere, 48, None, 0, Staggering::A).unwrap();
            let naming = Naming::new(7, None, grid);
            let timestamps = vec![0, 86400, 172_800, 259_200];
            let values = (0..48 * 48).map(|i| i as f64).collect::<Vec<_>>();

            for &timestamp in &timestamps {
                for tile in 0..6 {
                    write_snapshot(
                        dir.path()
                            .join(naming.snapshot_file(Field::H, timestamp, tile)),
                        &values,
                    )
                    .unwrap();
                }
            }

            b.iter(|| {
                assemble(
                    dir.path(),
                    &naming,
                    Field::H,
                    &timestamps,
                    MissingFilePolicy::Abort,
                )
                .unwrap()
            })
        })
        .sample_size(20),
    );
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
