//! End-to-end tests: recordings replayed through a tracking session

use approx::assert_relative_eq;
use gesturecrate_core::*;
use gesturecrate_io::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::PathBuf;

const FINGER_X: [f32; 4] = [-0.04, -0.01, 0.02, 0.05];

/// Upright synthetic hand with the wrist at (x, y)
fn hand(x: f32, y: f32, thumb: bool, fingers: [bool; 4]) -> Observation {
    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[WRIST] = Landmark::new(x, y, 0.0);
    for (finger, &x_off) in FINGER_X.iter().enumerate() {
        let base = INDEX_MCP + finger * 4;
        let fx = x + x_off;
        points[base] = Landmark::new(fx, y - 0.10, 0.0);
        points[base + 1] = Landmark::new(fx, y - 0.16, 0.0);
        if fingers[finger] {
            points[base + 2] = Landmark::new(fx, y - 0.20, 0.0);
            points[base + 3] = Landmark::new(fx, y - 0.24, 0.0);
        } else {
            points[base + 2] = Landmark::new(fx, y - 0.12, -0.02);
            points[base + 3] = Landmark::new(fx, y - 0.09, -0.03);
        }
    }
    points[THUMB_CMC] = Landmark::new(x - 0.05, y - 0.03, 0.0);
    points[THUMB_MCP] = Landmark::new(x - 0.08, y - 0.06, 0.0);
    points[THUMB_IP] = Landmark::new(x - 0.10, y - 0.08, 0.0);
    points[THUMB_TIP] = if thumb {
        Landmark::new(x - 0.14, y - 0.11, 0.0)
    } else {
        Landmark::new(x + 0.02, y - 0.05, -0.02)
    };
    Observation::new(points)
}

fn open_hand(x: f32, y: f32) -> Observation {
    hand(x, y, true, [true; 4])
}

fn fist() -> Observation {
    hand(0.5, 0.8, false, [false; 4])
}

fn reset_sign() -> Observation {
    let mut points = *hand(0.5, 0.8, false, [true, true, true, false]).landmarks();
    let pinky_tip = points[PINKY_TIP];
    points[THUMB_TIP] = Landmark::new(pinky_tip.x - 0.01, pinky_tip.y, pinky_tip.z);
    Observation::new(points)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gesturecrate_{}_{}.landmarks", name, std::process::id()))
}

fn session_for(recording: &Recording) -> TrackingSession<ReplaySource> {
    let source = ReplaySource::from_recording(recording);
    let mut session = TrackingSession::new(source, GestureConfig::default()).unwrap();
    session.start().unwrap();
    session
}

/// Pump every frame, ticking once after each
fn run(session: &mut TrackingSession<ReplaySource>) {
    while session.pump().unwrap().is_some() {
        session.tick(1.0 / 30.0);
    }
}

#[test]
fn test_rotate_freeze_reset_through_session() {
    let mut recording: Recording = (0..10)
        .map(|i| Some(open_hand(0.4 + i as f32 * 0.01, 0.8)))
        .collect();
    let mut session = session_for(&recording);
    run(&mut session);

    let rotated = *session.target();
    assert!(rotated.rotation.y < 0.0, "moving right spins about -y");
    assert_relative_eq!(rotated.rotation.x, 0.0, epsilon = 1e-6);

    recording = Recording::from_frames(vec![Some(fist()), Some(fist())]);
    *session.source_mut() = ReplaySource::from_recording(&recording);
    session.source_mut().start().unwrap();
    run(&mut session);
    assert!(session.target().is_frozen());
    assert_relative_eq!(session.target().rotation, rotated.rotation);

    recording = Recording::from_frames(vec![Some(reset_sign())]);
    *session.source_mut() = ReplaySource::from_recording(&recording);
    session.source_mut().start().unwrap();
    run(&mut session);
    assert_eq!(*session.target(), TransformState::default());
}

#[test]
fn test_no_spike_across_tracking_gap() {
    let frames = vec![
        Some(open_hand(0.40, 0.8)),
        Some(open_hand(0.41, 0.8)),
        None,
        // the hand comes back far from where it was lost
        Some(open_hand(0.80, 0.5)),
        Some(open_hand(0.80, 0.5)),
    ];
    let mut session = session_for(&Recording::from_frames(frames));

    session.pump().unwrap();
    session.tick(0.0);
    session.pump().unwrap();
    session.tick(0.0);
    let before = session.target().rotation;

    session.pump().unwrap();
    assert!(!session.gesture().is_hand_present());
    session.tick(0.0);

    let resumed = session.pump().unwrap().unwrap();
    assert_eq!(resumed.rotation_delta, Vector2::zeros());
    session.tick(0.0);
    assert_relative_eq!(session.target().rotation, before);
}

#[test]
fn test_stop_keeps_targets_and_clears_gesture() {
    let recording: Recording = (0..5)
        .map(|i| Some(open_hand(0.4 + i as f32 * 0.02, 0.8)))
        .collect();
    let mut session = session_for(&recording);
    run(&mut session);
    let target = *session.target();
    assert!(session.gesture().is_hand_present());

    session.stop();
    session.stop();
    assert_eq!(session.status(), TrackingStatus::Stopped);
    assert!(!session.source().is_running());
    assert!(!session.gesture().is_hand_present());
    assert_eq!(*session.target(), target);
    assert_eq!(session.pump().unwrap(), None);
}

#[test]
fn test_rendered_eases_and_idles_without_hand() {
    let mut session = session_for(&Recording::from_frames(vec![None]));
    session.pump().unwrap();
    for _ in 0..30 {
        session.tick(0.1);
    }
    // no hand: the rendered object spins, the target does not
    assert!(session.rendered().rotation.y > 0.0);
    assert_eq!(session.target().rotation, Vector2::zeros());
    assert_relative_eq!(session.rendered().scale, 1.0);
}

#[test]
fn test_recording_file_replay() {
    let path = temp_path("replay");
    let recording = Recording::from_frames(vec![Some(open_hand(0.5, 0.8)), None, Some(fist())]);
    write_recording(&recording, &path).unwrap();

    let loaded = read_recording(&path).unwrap();
    assert_eq!(loaded, recording);

    let mut session =
        TrackingSession::new(ReplaySource::from_file(&path), GestureConfig::default()).unwrap();
    session.start().unwrap();
    let first = session.pump().unwrap().unwrap();
    assert_eq!(first.active, Some(GestureKind::OpenHand));
    let second = session.pump().unwrap().unwrap();
    assert_eq!(second.active, None);
    let third = session.pump().unwrap().unwrap();
    assert_eq!(third.active, Some(GestureKind::Fist));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_recording_fails_start() {
    let mut session = TrackingSession::new(
        ReplaySource::from_file(temp_path("missing")),
        GestureConfig::default(),
    )
    .unwrap();
    assert!(matches!(session.start(), Err(Error::SourceUnavailable(_))));
    assert_eq!(session.status(), TrackingStatus::Stopped);
}

#[test]
fn test_malformed_recording_reports_line() {
    let path = temp_path("malformed");
    std::fs::write(&path, "# header\n-\n0.1 0.2 0.3\n").unwrap();
    match read_recording(&path) {
        Err(Error::Recording(message)) => assert!(message.contains("line 3"), "{}", message),
        other => panic!("unexpected result: {:?}", other),
    }
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_random_landmarks_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    let frames: Vec<Option<Observation>> = (0..500)
        .map(|_| {
            if rng.gen_bool(0.1) {
                return None;
            }
            let mut points = [Landmark::default(); LANDMARK_COUNT];
            for p in points.iter_mut() {
                *p = Landmark::new(rng.gen(), rng.gen(), rng.gen_range(-0.1..0.1));
            }
            Some(Observation::new(points))
        })
        .collect();

    let mut session = session_for(&Recording::from_frames(frames));
    let limits = session.config().controller.limits;
    while let Some(gesture) = session.pump().unwrap() {
        assert!(gesture.pinch_distance >= 0.0);
        assert_eq!(
            gesture.flags.pinch,
            gesture.is_hand_present() && gesture.pinch_distance < 0.05
        );
        if let Some(active) = gesture.active {
            assert!(gesture.flags.get(active));
        }
        for _ in 0..rng.gen_range(1..4) {
            session.tick(1.0 / 60.0);
            assert!(limits.contains_position(&session.target().position));
            assert!(limits.contains_scale(session.target().scale));
        }
    }
}
