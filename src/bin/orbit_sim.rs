//! Orbit Sim - Headless Rig Walkthrough
//!
//! Drives an orbit rig through a scripted few seconds of play in a small box
//! level: walk toward a wall, strafe, jump, tap, double tap and swipe. Camera
//! corrections, gestures and body positions are logged as they happen.
//!
//! Run with: `cargo run --bin orbit_sim [config.json]`
//!
//! Set `RUST_LOG=debug` to see every avoidance decision.

use std::sync::mpsc;

use glam::{Vec2, Vec3};

use reactive_orbit_engine::camera::{AvoidanceAction, CameraTransform, OrbitMotion};
use reactive_orbit_engine::input::{
    GestureEvent, InputSnapshot, LoggingGestureListener, PointerEvent,
};
use reactive_orbit_engine::physics::{BoxCollider, FlatGroundBody, LayerMask, StaticBoxWorld};
use reactive_orbit_engine::{ConfigError, RigBuilder, RigConfig};

const FRAME_TIME: f32 = 1.0 / 60.0;
const DURATION: f32 = 7.0;
const REPORT_EVERY: u32 = 30;

fn level(layer: u8) -> StaticBoxWorld {
    StaticBoxWorld::with_colliders(vec![
        // Wall behind the start position, between the player and the camera
        BoxCollider::new(Vec3::new(-6.0, 0.0, 3.0), Vec3::new(6.0, 4.0, 3.5), layer),
        // Pillar ahead
        BoxCollider::from_center(Vec3::new(2.0, 1.5, -6.0), Vec3::new(0.5, 1.5, 0.5), layer),
        // Low overhang to the right
        BoxCollider::new(Vec3::new(3.0, 2.5, -3.0), Vec3::new(8.0, 3.0, 3.0), layer),
    ])
}

/// Stick and jump input for the scripted timeline, written over last
/// frame's snapshot.
fn scripted_input(t: f32, input: &mut InputSnapshot) {
    input.reset();
    match t {
        t if t < 2.0 => input.set_axis("Vertical", 1.0),
        t if t < 3.0 => input.set_axis("Horizontal", 1.0),
        t if t < 3.1 => input.set_button("Jump", true),
        t if t < 4.5 => {
            input.set_axis("Vertical", -0.7);
            input.set_axis("Horizontal", -0.7);
        }
        _ => {}
    }
}

fn down(x: f32, y: f32, time: f64) -> PointerEvent {
    PointerEvent::Down {
        position: Vec2::new(x, y),
        time,
    }
}

fn up(x: f32, y: f32, time: f64) -> PointerEvent {
    PointerEvent::Up {
        position: Vec2::new(x, y),
        time,
    }
}

/// Pointer events falling inside the frame starting at `t`.
fn scripted_pointer(t: f64, dt: f64) -> Vec<PointerEvent> {
    let script = [
        // single tap
        down(200.0, 300.0, 1.0),
        up(201.0, 300.0, 1.08),
        // double tap
        down(400.0, 300.0, 4.0),
        up(400.0, 300.0, 4.05),
        down(401.0, 301.0, 4.12),
        up(401.0, 301.0, 4.17),
        // swipe left
        down(600.0, 300.0, 5.5),
        up(480.0, 310.0, 5.62),
    ];
    script
        .into_iter()
        .filter(|event| event.time() >= t && event.time() < t + dt)
        .collect()
}

fn run() -> Result<(), ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => RigConfig::load(path)?,
        None => RigConfig::default(),
    };

    let layer = config.camera.probe_layer;
    let (gesture_tx, gesture_rx) = mpsc::channel::<GestureEvent>();

    let mut rig = RigBuilder::new(config.clone())
        .world(level(layer))
        .perspective_projector()
        .listener(Box::new(LoggingGestureListener::new("hud")))
        .listener(Box::new(gesture_tx))
        .build()?;

    let mut body = FlatGroundBody::new(Vec3::ZERO, 0.0).with_obstacles(
        level(layer),
        LayerMask::from_layer(layer),
        0.4,
    );

    // Spectator camera circling the level on its own
    let mut showcase = OrbitMotion::new(config.orbit)?;
    let mut showcase_camera = CameraTransform::looking_at(
        Vec3::new(0.0, 4.0, config.orbit.orbit_radius),
        Vec3::ZERO,
    );

    log::info!("simulating {DURATION:.1}s at {:.0} Hz", 1.0 / FRAME_TIME);

    let mut corrections = 0u32;
    let mut rollbacks = 0u32;
    let mut frame_index = 0u32;
    let mut t = 0.0f32;
    let mut input = InputSnapshot::new();

    while t < DURATION {
        let now = f64::from(t);
        scripted_input(t, &mut input);
        let pointer = scripted_pointer(now, f64::from(FRAME_TIME));

        let frame = rig.frame(FRAME_TIME, now, &input, &mut body, &pointer);
        showcase.tick(&mut showcase_camera, Vec3::ZERO, FRAME_TIME);

        match frame.camera.action {
            AvoidanceAction::EscapeWall | AvoidanceAction::PitchUp | AvoidanceAction::PitchDown => {
                corrections += 1;
            }
            AvoidanceAction::EaseRolledBack => rollbacks += 1,
            AvoidanceAction::Hold | AvoidanceAction::EaseCommitted => {}
        }

        if frame_index % REPORT_EVERY == 0 {
            let coords = rig.camera().coords();
            log::info!(
                "t={t:.2} body=({:.2}, {:.2}, {:.2}) cam yaw={:.1} pitch={:.1} r={:.2} {:?}{}",
                frame.body_position.x,
                frame.body_position.y,
                frame.body_position.z,
                coords.yaw,
                coords.pitch,
                coords.radius,
                frame.camera.action,
                if frame.camera.zoomed { " (zoomed)" } else { "" },
            );
        }

        frame_index += 1;
        t += FRAME_TIME;
    }

    let gestures: Vec<GestureEvent> = gesture_rx.try_iter().collect();
    log::info!(
        "done: {frame_index} frames, {corrections} corrections, {rollbacks} rolled-back eases"
    );
    log::info!(
        "gestures {gestures:?}, player facing {:.1} deg",
        rig.locomotion().facing_yaw()
    );
    log::info!(
        "showcase camera ended at ({:.2}, {:.2}, {:.2}), theta {:.1}",
        showcase_camera.position.x,
        showcase_camera.position.y,
        showcase_camera.position.z,
        showcase.theta()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
