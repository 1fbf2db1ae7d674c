//! Replay Session Demo
//!
//! Replays a landmark recording through a tracking session and prints the
//! active gesture and the interaction transform as they change.
//!
//! Usage:
//!   replay_session <recording>
//!   replay_session <recording> --write-demo      # write a synthetic recording first
//!   RUST_LOG=gesturecrate_algorithms=debug replay_session <recording>

use anyhow::{bail, Context};
use clap::Parser;
use gesturecrate_core::*;
use gesturecrate_io::{write_recording, Recording, ReplaySource, TrackingSession};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "replay_session",
    about = "Replay a hand landmark recording through the gesture pipeline"
)]
struct Cli {
    /// Landmark recording to replay
    recording: PathBuf,

    /// Gesture set: basic or extended
    #[arg(long, default_value = "extended")]
    gesture_set: String,

    /// Render ticks per landmark frame
    #[arg(long, default_value_t = 2)]
    ticks_per_frame: u32,

    /// Render rate in ticks per second
    #[arg(long, default_value_t = 60.0)]
    render_fps: f32,

    /// Consecutive fist frames before the object freezes
    #[arg(long, default_value_t = 1)]
    freeze_hold_frames: u32,

    /// Replay the recording this many times
    #[arg(long, default_value_t = 1)]
    passes: u32,

    /// Overwrite the recording with a generated demo sequence before replaying
    #[arg(long)]
    write_demo: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "replay_session=info,gesturecrate_io=info".into()),
        )
        .init();

    let set = match cli.gesture_set.as_str() {
        "basic" => GestureSet::Basic,
        "extended" => GestureSet::Extended,
        other => bail!("Unknown gesture set: {other}. Use: basic or extended"),
    };

    if cli.write_demo {
        let recording = demo_recording();
        write_recording(&recording, &cli.recording)
            .with_context(|| format!("writing {}", cli.recording.display()))?;
        info!("Wrote {} demo frames to {}", recording.len(), cli.recording.display());
    }

    let mut config = GestureConfig::for_gesture_set(set);
    config.controller.freeze_hold_frames = cli.freeze_hold_frames;

    let dt = 1.0 / cli.render_fps;
    let mut session = TrackingSession::new(ReplaySource::from_file(&cli.recording), config)
        .context("invalid configuration")?;

    for pass in 0..cli.passes {
        session
            .start()
            .with_context(|| format!("starting replay of {}", cli.recording.display()))?;
        info!("Pass {} of {}", pass + 1, cli.passes);

        let mut last_label = None;
        let mut frames = 0;
        while let Some(gesture) = session.pump().context("classifying frame")? {
            frames += 1;
            for _ in 0..cli.ticks_per_frame {
                session.tick(dt);
            }

            let label = gesture.active.map(|kind| kind.label(set));
            if label != last_label {
                let target = session.target();
                println!(
                    "frame {:>5}  {:<8}  rot ({:+.2}, {:+.2})  pos ({:+.2}, {:+.2})  scale {:.2}{}",
                    frames,
                    label.unwrap_or("-"),
                    target.rotation.x,
                    target.rotation.y,
                    target.position.x,
                    target.position.y,
                    target.scale,
                    if target.is_frozen() { "  [frozen]" } else { "" },
                );
                last_label = label;
            }
        }
        session.stop();
    }

    let rendered = session.rendered();
    println!();
    println!("Final rendered transform:");
    println!("  rotation: ({:+.3}, {:+.3})", rendered.rotation.x, rendered.rotation.y);
    println!("  position: ({:+.3}, {:+.3})", rendered.position.x, rendered.position.y);
    println!("  scale:    {:.3}", rendered.scale);
    let origin = rendered.transform().transform_point(&Point3::origin());
    println!("  origin maps to ({:+.3}, {:+.3}, {:+.3})", origin.x, origin.y, origin.z);

    Ok(())
}

/// An upright hand with the wrist at (x, y) and the given digits extended
fn synthetic_hand(x: f32, y: f32, thumb: bool, fingers: [bool; 4]) -> Observation {
    const FINGER_X: [f32; 4] = [-0.04, -0.01, 0.02, 0.05];

    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[WRIST] = Landmark::new(x, y, 0.0);
    for (finger, &x_off) in FINGER_X.iter().enumerate() {
        let base = INDEX_MCP + finger * 4;
        let fx = x + x_off;
        points[base] = Landmark::new(fx, y - 0.10, 0.0);
        points[base + 1] = Landmark::new(fx, y - 0.16, 0.0);
        let (dip, tip) = if fingers[finger] {
            (Landmark::new(fx, y - 0.20, 0.0), Landmark::new(fx, y - 0.24, 0.0))
        } else {
            (Landmark::new(fx, y - 0.12, -0.02), Landmark::new(fx, y - 0.09, -0.03))
        };
        points[base + 2] = dip;
        points[base + 3] = tip;
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

/// Rotate, pan, zoom, freeze, lose the hand, then reset
fn demo_recording() -> Recording {
    let mut recording = Recording::new();
    for i in 0..30 {
        let t = i as f32 / 30.0;
        recording.push(Some(synthetic_hand(0.35 + 0.3 * t, 0.8 - 0.1 * t, true, [true; 4])));
    }
    for i in 0..20 {
        let t = i as f32 / 20.0;
        recording.push(Some(synthetic_hand(0.5 + 0.1 * t, 0.8, false, [true, true, false, false])));
    }
    for _ in 0..20 {
        recording.push(Some(synthetic_hand(0.6, 0.8, true, [true, false, false, false])));
    }
    for _ in 0..10 {
        recording.push(Some(synthetic_hand(0.6, 0.8, false, [false; 4])));
    }
    for _ in 0..10 {
        recording.push(None);
    }
    let mut reset = *synthetic_hand(0.5, 0.8, false, [true, true, true, false]).landmarks();
    let pinky_tip = reset[PINKY_TIP];
    reset[THUMB_TIP] = Landmark::new(pinky_tip.x - 0.01, pinky_tip.y, pinky_tip.z);
    for _ in 0..5 {
        recording.push(Some(Observation::new(reset)));
    }
    recording
}
