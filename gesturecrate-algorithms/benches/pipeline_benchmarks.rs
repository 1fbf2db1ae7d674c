use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gesturecrate_algorithms::{GestureClassifier, InteractionController, RenderedTransform};
use gesturecrate_core::{
    GestureConfig, GestureSet, InterpolationConfig, Landmark, Observation, TransformState,
    LANDMARK_COUNT,
};

const FRAME_COUNTS: [usize; 3] = [60, 600, 6000];

/// An upright open hand drifting sideways, one observation per frame
fn drifting_hand(frames: usize) -> Vec<Option<Observation>> {
    (0..frames)
        .map(|i| {
            if i % 97 == 0 {
                return None;
            }
            let t = i as f32 / frames as f32;
            let mut points = [Landmark::default(); LANDMARK_COUNT];
            for (j, p) in points.iter_mut().enumerate() {
                let finger = j.saturating_sub(1) / 4;
                let joint = j.saturating_sub(1) % 4;
                *p = Landmark::new(
                    0.4 + 0.2 * t + finger as f32 * 0.03,
                    0.8 - joint as f32 * 0.06 - if j == 0 { 0.0 } else { 0.04 },
                    0.0,
                );
            }
            Some(Observation::new(points))
        })
        .collect()
}

fn pipeline(c: &mut Criterion) {
    let mut g = c.benchmark_group("classify and tick");

    for set in [GestureSet::Basic, GestureSet::Extended] {
        let config = GestureConfig::for_gesture_set(set);
        for frames in FRAME_COUNTS {
            let input = drifting_hand(frames);
            g.throughput(Throughput::Elements(frames as u64));
            g.bench_with_input(
                BenchmarkId::new(format!("{set:?}"), frames),
                &(config, input),
                |b, (config, input)| {
                    b.iter(|| {
                        let mut classifier = GestureClassifier::new(config.classifier).unwrap();
                        let mut controller = InteractionController::new(config.controller).unwrap();
                        let mut rendered = RenderedTransform::new();
                        for observation in input {
                            let gesture = classifier.classify(observation.as_ref());
                            let target = controller.tick(&gesture);
                            rendered.advance(
                                target,
                                gesture.is_hand_present(),
                                1.0 / 60.0,
                                &config.interpolation,
                            );
                        }
                        std::hint::black_box(rendered)
                    });
                },
            );
        }
    }

    g.finish();
}

fn interpolation(c: &mut Criterion) {
    let config = InterpolationConfig::default();
    let target = TransformState::default();

    c.bench_function("rendered transform advance", |b| {
        let mut rendered = RenderedTransform::new();
        b.iter(|| rendered.advance(std::hint::black_box(&target), false, 1.0 / 60.0, &config));
    });
}

criterion_group!(benches, pipeline, interpolation);
criterion_main!(benches);
