use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use approx::assert_relative_eq;
use nalgebra::Vector2;

use pendsim::graph::integrationscheme::IntegrationScheme;
use pendsim::physics::animatedbody::AnimatedBody;
use pendsim::physics::body::PhysicsBody;
use pendsim::physics::bodyreplay::BodyReplay;
use pendsim::physics::corrections::{
    LockDistance,
    ResetVelocity
};
use pendsim::physics::gravity::Gravity;
use pendsim::physics::pendulum::Pendulum;
use pendsim::physics::pendulumtension::PendulumTension;

const EARTH_MASS: f64 = 5.9722e24;
const EARTH_RADIUS: f64 = 6.371e6;

fn released_pendulum(dt: f64, length: f64, release_degrees: f64) -> Pendulum {
    let pivot = Vector2::new(0.0, 0.0);
    let release_angle = (release_degrees - 90.0).to_radians();
    let initial = Vector2::new(release_angle.cos(), release_angle.sin()) * length;

    let mut pendulum = Pendulum::new(0.1, dt, pivot, length);
    pendulum.
        set_state(0.0, 0.0, initial.x, initial.y, IntegrationScheme::RungeKutta4).
        unwrap();
    pendulum.add_force(Rc::new(Gravity::new(EARTH_MASS, EARTH_RADIUS))).unwrap();
    pendulum.add_force(Rc::new(PendulumTension::new())).unwrap();
    pendulum.add_post_step(Rc::new(LockDistance::new(0.01, 0.1)));
    pendulum.add_post_step(Rc::new(ResetVelocity::new(0.01)));

    pendulum
}

#[test]
fn pendulum_swings_back_and_forth_through_the_vertical() {
    let dt = 5e-4;
    let mut pendulum = released_pendulum(dt, 0.1476, 60.0);

    let release_angle = (60.0f64 - 90.0).to_radians();
    let amplitude = release_angle + FRAC_PI_2;

    let mut min_angle = release_angle;
    let mut max_angle = release_angle;
    let steps = (dt.recip() * 2.0) as usize;
    for _ in 0..steps {
        pendulum.step().unwrap();
        let angle = pendulum.angle_from_pivot().unwrap();
        min_angle = min_angle.min(angle);
        max_angle = max_angle.max(angle);
    }

    // Bounded by the release angle and its mirror across the vertical,
    // with slack for the per-step correction hooks.
    let slack = 0.05;
    assert!(max_angle <= release_angle + slack,
            "swung past the release angle: {max_angle}");
    assert!(min_angle >= -FRAC_PI_2 - amplitude - slack,
            "swung past the mirror angle: {min_angle}");

    // It must actually cross the vertical, not hang near release.
    assert!(min_angle < -FRAC_PI_2,
            "never crossed the vertical: {min_angle}");
}

#[test]
fn period_grows_with_release_amplitude() {
    // time from release to the first vertical crossing is a quarter
    // period; a wider swing takes measurably longer than the
    // small-angle limit predicts
    fn quarter_period(release_degrees: f64) -> f64 {
        let dt = 5e-4;
        let mut pendulum = released_pendulum(dt, 0.1476, release_degrees);
        for _ in 0..((dt.recip() * 1.0) as usize) {
            pendulum.step().unwrap();
            if pendulum.angle_from_pivot().unwrap() <= -FRAC_PI_2 {
                return pendulum.time();
            }
        }
        panic!("pendulum released at {release_degrees} degrees never crossed the vertical");
    }

    let narrow = quarter_period(20.0);
    let wide = quarter_period(80.0);
    assert!(wide > narrow * 1.05,
            "quarter periods: {narrow} (20 degrees) vs {wide} (80 degrees)");
}

#[test]
fn rope_length_is_held_throughout_the_swing() {
    let dt = 5e-4;
    let mut pendulum = released_pendulum(dt, 0.1476, 60.0);
    assert_eq!(pendulum.length(), 0.1476);

    for _ in 0..((dt.recip() * 1.0) as usize) {
        pendulum.step().unwrap();
        let distance = pendulum.distance_from_pivot().unwrap();
        assert!((distance - pendulum.length()).abs() < 0.02,
                "rope stretched to {distance}");
    }
}

#[test]
fn saved_trajectory_replays_frame_by_frame() {
    let dt = 1e-3;
    let framerate = 100;
    let mut pendulum = released_pendulum(dt, 0.1476, 45.0);

    let steps = 1000;
    for _ in 0..steps {
        pendulum.step().unwrap();
    }

    let path = std::env::temp_dir().join("pendulum_roundtrip.json");
    pendulum.save(&path, framerate).unwrap();

    let mut replay = BodyReplay::load(&path).unwrap();

    // frame interval = (1/dt)/framerate = 10, so 1001 samples -> 101 frames
    assert_eq!(replay.position().x().len(), 101);
    assert_eq!(replay.time(), 0.0);

    let (position, _, _) = replay.state().unwrap();
    let (recorded, _) = pendulum.position().seek(0).unwrap();
    assert_relative_eq!(position.0.y(), recorded.y(), epsilon = 1e-12);

    let mut frames = 1;
    while replay.step() {
        frames += 1;
    }
    assert_eq!(frames, 101);
    assert_relative_eq!(replay.time(), 100.0);

    // the final frame matches the final simulated sample
    let (position, velocity, _) = replay.state().unwrap();
    let (x_last, y_last) = pendulum.position().seek(-1).unwrap();
    assert_relative_eq!(position.0.y(), x_last.y(), epsilon = 1e-12);
    assert_relative_eq!(position.1.y(), y_last.y(), epsilon = 1e-12);
    let (vx_last, _) = pendulum.velocity().seek(-1).unwrap();
    assert_relative_eq!(velocity.0.y(), vx_last.y(), epsilon = 1e-12);
}
