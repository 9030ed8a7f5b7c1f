use std::path::Path;
use std::rc::Rc;

use nalgebra::Vector2;

use pendsim::graph::integrationscheme::IntegrationScheme;
use pendsim::physics::animatedbody::AnimatedBody;
use pendsim::physics::body::PhysicsBody;
use pendsim::physics::corrections::{
    LockDistance,
    ResetVelocity
};
use pendsim::physics::gravity::Gravity;
use pendsim::physics::pendulum::Pendulum;
use pendsim::physics::pendulumtension::PendulumTension;

const MASS: f64 = 0.1;
const DT: f64 = 5e-4;
const ROPE_LENGTH: f64 = 0.1476;
const EARTH_MASS: f64 = 5.9722e24;
const EARTH_RADIUS: f64 = 6.371e6;
const RELEASE_DEGREES: f64 = 60.0;
const SECONDS: f64 = 3.0;
const FRAMERATE: u32 = 60;
const OUTPUT_PATH: &'static str = "trajectory.json";

fn main() {
    tracing_subscriber::fmt::init();

    let pivot = Vector2::new(0.0, 0.0);
    let release_angle = (RELEASE_DEGREES - 90.0).to_radians();
    let initial = pivot + Vector2::new(release_angle.cos(), release_angle.sin()) * ROPE_LENGTH;

    let mut pendulum = Pendulum::new(MASS, DT, pivot, ROPE_LENGTH);
    pendulum.
        set_state(0.0, 0.0, initial.x, initial.y, IntegrationScheme::RungeKutta4).
        unwrap();
    pendulum.
        add_force(Rc::new(Gravity::new(EARTH_MASS, EARTH_RADIUS))).
        unwrap();
    pendulum.
        add_force(Rc::new(PendulumTension::new())).
        unwrap();
    pendulum.add_post_step(Rc::new(LockDistance::new(0.01, 0.1)));
    pendulum.add_post_step(Rc::new(ResetVelocity::new(0.01)));

    let steps_per_second = DT.recip() as usize;
    let total_steps = (DT.recip() * SECONDS) as usize;
    for i in 1..=total_steps {
        pendulum.step().unwrap();
        if i % steps_per_second == 0 {
            println!("simulated {} of {} seconds, angle {:.4} rad",
                     i / steps_per_second,
                     SECONDS,
                     pendulum.angle_from_pivot().unwrap());
        }
    }

    pendulum.
        save(Path::new(OUTPUT_PATH), FRAMERATE).
        unwrap();
    println!("trajectory written to {}", OUTPUT_PATH);
}
