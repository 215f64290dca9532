use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use raster_proj::bounds::BoundedProjection;
use raster_proj::geom::Rectangle;
use raster_proj::graticule::{GraticuleConfig, GraticuleGenerator};
use raster_proj::proj::{AnyProjection, Projection, ProjectionKind};

fn view_windows(extent: f64) -> Vec<Rectangle> {
    // zoom levels around a few pan offsets, some straddling x = 0
    let mut rects = Vec::new();
    for &size in &[0.01, 0.1, 0.5, 1.5] {
        for &(cx, cy) in &[(0.0, 0.0), (0.3, 1.2), (-0.7, -0.4), (0.0, 2.2)] {
            let h = 0.5 * size * extent;
            rects.push(Rectangle::new(
                cx * extent / PI - h,
                cy * extent / PI - h,
                cx * extent / PI + h,
                cy * extent / PI + h,
            ));
        }
    }
    rects
}

fn bench_inverse_bounding_box(c: &mut Criterion) {
    for kind in [ProjectionKind::Aeqd, ProjectionKind::Laea, ProjectionKind::Tmerc] {
        let proj = AnyProjection::new(kind, 0.4, 0.6, 180).unwrap();
        let extent = proj.range().x2;
        let rects = view_windows(extent);

        c.bench_function(&format!("inverse_bbox_{}", kind.name()), |b| {
            b.iter(|| {
                for rect in &rects {
                    black_box(proj.inverse_bounding_box(black_box(rect)));
                }
            });
        });
    }
}

fn bench_inverse_bounding_box_div_n(c: &mut Criterion) {
    let rect = Rectangle::new(-0.4, 1.0, 0.6, 2.0);
    for &div_n in &[36, 180, 720] {
        let proj = AnyProjection::new(ProjectionKind::Aeqd, 0.0, 0.3, div_n).unwrap();
        c.bench_function(&format!("inverse_bbox_aeqd_div{div_n}"), |b| {
            b.iter(|| black_box(proj.inverse_bounding_box(black_box(&rect))));
        });
    }
}

fn bench_graticule(c: &mut Criterion) {
    for kind in [ProjectionKind::Aeqd, ProjectionKind::Laea, ProjectionKind::Tmerc] {
        let proj = AnyProjection::new(kind, 0.4, 0.6, 180).unwrap();
        let e = proj.range().x2;
        let generator = GraticuleGenerator::new(&proj, GraticuleConfig::default()).unwrap();

        c.bench_function(&format!("graticule_full_{}", kind.name()), |b| {
            b.iter(|| {
                black_box(
                    generator
                        .generate(&Rectangle::new(-e, -e, e, e), 10.0)
                        .unwrap(),
                )
            });
        });

        let view = Rectangle::new(-0.1 * e, 0.2 * e, 0.1 * e, 0.35 * e);
        c.bench_function(&format!("graticule_zoomed_{}", kind.name()), |b| {
            b.iter(|| black_box(generator.generate(&view, 1.0).unwrap()));
        });
    }
}

fn bench_graticule_thread_scaling(c: &mut Criterion) {
    let proj = AnyProjection::new(ProjectionKind::Laea, 0.0, 0.9, 180).unwrap();
    let config = GraticuleConfig {
        threshold: 0.01,
        ..Default::default()
    };
    let generator = GraticuleGenerator::new(&proj, config).unwrap();
    let view = Rectangle::new(-2.0, -2.0, 2.0, 2.0);

    for &threads in &[1, 2, 4, 8] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();

        c.bench_function(&format!("graticule_threads_{threads}_laea"), |b| {
            b.iter(|| black_box(pool.install(|| generator.generate(&view, 5.0).unwrap())));
        });
    }
}

criterion_group!(
    benches,
    bench_inverse_bounding_box,
    bench_inverse_bounding_box_div_n,
    bench_graticule,
    bench_graticule_thread_scaling
);
criterion_main!(benches);
