use {
    criterion::{criterion_group, criterion_main, Benchmark, Criterion},
    ndarray::Array3,
    swe_plot::{
        colormap::{Colormap, ContourBands},
        colorscale::ColorScale,
        grid::Topology,
        png::encode_rgb,
        render::{draw_figure, ImageFormat, Plot, Projection},
    },
};

fn plot(topology: Topology, projection: Projection) -> Plot {
    Plot {
        topology,
        projection,
        title: "TC7 - h - time (days) = 0.0".to_owned(),
        bands: ContourBands::new(ColorScale::new(8800.0, 10500.0), Colormap::Jet),
        dpi: 100,
        format: ImageFormat::Png,
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench(
        "render",
        Benchmark::new("sphere_cubed_sphere_192", |b| {
            let snapshot =
                Array3::from_shape_fn((192, 192, 6), |(i, j, k)| 8800.0 + (i * j + k) as f64);
            let plot = plot(Topology::CubedSphere, Projection::Sphere);

            b.iter(|| draw_figure(&snapshot.view(), &plot).unwrap())
        })
        .sample_size(10),
    );

    c.bench(
        "render",
        Benchmark::new("mercator_lat_lon_128", |b| {
            let snapshot = Array3::from_shape_fn((128, 64, 1), |(i, j, _)| 8800.0 + (i * j) as f64);
            let plot = plot(Topology::LatLon, Projection::Mercator);

            b.iter(|| draw_figure(&snapshot.view(), &plot).unwrap())
        })
        .sample_size(10),
    );

    c.bench(
        "render",
        Benchmark::new("encode_png", |b| {
            let snapshot = Array3::from_elem((48, 48, 6), 9650.0);
            let image = draw_figure(
                &snapshot.view(),
                &plot(Topology::CubedSphere, Projection::Sphere),
            )
            .unwrap();

            b.iter(|| {
                encode_rgb(
                    image.as_raw(),
                    image.width() as usize,
                    image.height() as usize,
                    100,
                    &[("Title", "bench")],
                )
                .unwrap()
            })
        })
        .sample_size(20),
    );
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
