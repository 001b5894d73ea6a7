use criterion::{
    criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion, PlotConfiguration,
    Throughput,
};
use glam::Vec2;
use rp_geometry::LineSegment;
use rp_obstacles::ObstacleRegistry;
use rp_test_utils::{load_points, NumPoints};

const FIELD_SIZE: f32 = 6000.;

fn create_registry(num_points: &NumPoints) -> ObstacleRegistry {
    let mut registry = ObstacleRegistry::new();
    let points = load_points(num_points, FIELD_SIZE);
    for (i, chunk) in points.chunks_exact(4).enumerate() {
        match i % 4 {
            0 => registry.add_circle(chunk[0], 90., "robot", 1),
            1 => registry.add_rect(chunk[0], chunk[0] + Vec2::splat(200.), "box", 2),
            2 => registry.add_triangle(chunk[0], chunk[1], chunk[2], 10., "wedge", 0),
            _ => registry.add_line(chunk[0], chunk[3], 20., "line", 3),
        };
    }
    registry
}

fn worst_violation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("worst_violation");
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    group.plot_config(plot_config);

    let points = load_points(&NumPoints::OneHundredThousand, FIELD_SIZE);
    let mut index = 0;

    for num_points in [
        NumPoints::OneHundred,
        NumPoints::OneThousand,
        NumPoints::TenThousand,
    ] {
        let registry = create_registry(&num_points);
        let view = registry.collect();

        group.throughput(Throughput::Elements(1));
        group.bench_function(BenchmarkId::from_parameter(view.len()), |b| {
            b.iter(|| {
                let start = points[index];
                index = (index + 1) % points.len();
                let end = points[index];
                index = (index + 1) % points.len();
                view.worst_violation(&LineSegment::new(start, end), 90.);
            });
        });
    }
}

fn movement_allowed_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_movement_allowed");
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    group.plot_config(plot_config);

    let points = load_points(&NumPoints::OneHundredThousand, FIELD_SIZE);
    let mut index = 0;

    for num_points in [
        NumPoints::OneHundred,
        NumPoints::OneThousand,
        NumPoints::TenThousand,
    ] {
        let registry = create_registry(&num_points);
        let view = registry.collect();

        group.throughput(Throughput::Elements(1));
        group.bench_function(BenchmarkId::from_parameter(view.len()), |b| {
            b.iter(|| {
                let start = points[index];
                index = (index + 1) % points.len();
                let end = points[index];
                index = (index + 1) % points.len();
                view.is_movement_allowed(&LineSegment::new(start, end), 90.);
            });
        });
    }
}

criterion_group!(benches, worst_violation_benchmark, movement_allowed_benchmark);
criterion_main!(benches);
