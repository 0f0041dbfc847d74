use criterion::{Criterion, black_box, criterion_group, criterion_main};
use edgegauge::{
    EdgeCandidate, Image, PipelineConfig, RefineConfig, bilateral_filter, compute_gradients,
    non_max_suppression, refine_edges, run, trace_hysteresis,
};

fn build_slanted_box(width: usize, height: usize) -> Image<u8> {
    let theta = 8.0f32.to_radians();
    let (s, c) = theta.sin_cos();
    let (cx, cy) = (0.5 * width as f32, 0.5 * height as f32);
    let (hw, hh) = (0.35 * width as f32, 0.3 * height as f32);

    Image::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let u = c * dx + s * dy;
        let v = -s * dx + c * dy;
        let jitter = ((x * 7 + y * 13) % 9) as i32 - 4;
        let base = if u.abs() <= hw && v.abs() <= hh { 190 } else { 45 };
        (base + jitter) as u8
    })
}

fn bench_stages(c: &mut Criterion) {
    let img = build_slanted_box(640, 480);
    let view = img.as_view();

    c.bench_function("bilateral_640x480", |b| {
        b.iter(|| black_box(bilateral_filter(black_box(&view), 1.5, 25.0)));
    });

    let smoothed = bilateral_filter(&view, 1.5, 25.0);
    let field = compute_gradients(&smoothed.as_view());
    let suppressed = non_max_suppression(&field);
    let candidates: Vec<EdgeCandidate> = trace_hysteresis(&suppressed, &field, 50.0, 150.0);

    c.bench_function("gradients_nms_hysteresis_640x480", |b| {
        b.iter(|| {
            let field = compute_gradients(black_box(&smoothed.as_view()));
            let suppressed = non_max_suppression(&field);
            black_box(trace_hysteresis(&suppressed, &field, 50.0, 150.0).len());
        });
    });

    let refine_cfg = RefineConfig::default();
    c.bench_function("zernike_refine_640x480", |b| {
        b.iter(|| black_box(refine_edges(black_box(&candidates), &view, &refine_cfg).len()));
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let img = build_slanted_box(1280, 1024);
    let view = img.as_view();
    let cfg = PipelineConfig::default();

    c.bench_function("pipeline_1280x1024", |b| {
        b.iter(|| {
            let out = run(black_box(&view), black_box(&cfg)).expect("valid config");
            black_box(out.edges.len());
        });
    });
}

criterion_group!(benches, bench_stages, bench_pipeline);
criterion_main!(benches);
