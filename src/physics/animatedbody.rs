use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::rc::Rc;

use tracing::info;

use crate::graph::integrationscheme::IntegrationScheme;
use crate::physics::body::PhysicsBody;
use crate::physics::physicserror::PhysicsError;
use crate::physics::trajectoryrecord::TrajectoryRecord;

/// A correction hook run around every step. Hooks adjust only the
/// trailing samples of the body's trajectory functions, never
/// historical data, so monotonic time is preserved. Stateful hooks
/// keep their internal state in a `RefCell`.
pub trait Correction {
    fn apply(&self, body: &mut dyn AnimatedBody) -> Result<(), PhysicsError>;
}

/// Stepping state of an animated body: the fixed time step, the
/// current time and the ordered correction hooks.
pub struct Animation {
    dt: f64,
    time: f64,
    pre_step: Vec<Rc<dyn Correction>>,
    post_step: Vec<Rc<dyn Correction>>
}

impl Animation {
    pub fn new(dt: f64) -> Animation {
        Animation {
            dt,
            time: 0.0,
            pre_step: Vec::new(),
            post_step: Vec::new()
        }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    fn advance(&mut self) {
        self.time += self.dt;
    }
}

/// A body driven forward through time in fixed steps.
///
/// The lower dt is, the more accurate each step, at a higher cost per
/// simulated second. Stepping is done on demand by the driver, which
/// also decides when to stop.
pub trait AnimatedBody: PhysicsBody {
    fn animation(&self) -> &Animation;

    fn animation_mut(&mut self) -> &mut Animation;

    fn dt(&self) -> f64 {
        self.animation().dt
    }

    fn time(&self) -> f64 {
        self.animation().time
    }

    fn add_pre_step(&mut self, hook: Rc<dyn Correction>) {
        self.animation_mut().pre_step.push(hook);
    }

    fn add_post_step(&mut self, hook: Rc<dyn Correction>) {
        self.animation_mut().post_step.push(hook);
    }

    /// Seeds the state at time 0: inserts the initial acceleration
    /// sample (zero while no forces are attached) and integrates it
    /// twice to seed velocity and position. Must be called exactly
    /// once, before any [`step`](AnimatedBody::step).
    fn set_state(&mut self,
                 v_ix: f64,
                 v_iy: f64,
                 x_i: f64,
                 y_i: f64,
                 scheme: IntegrationScheme) -> Result<(), PhysicsError> where
        Self: Sized {
        let acceleration = self.generate_acceleration()?;
        self.acceleration().insert(0.0, acceleration.x, acceleration.y)?;

        let velocity = self.acceleration().integrate(0.0, v_ix, v_iy, scheme)?;
        let position = velocity.integrate(0.0, x_i, y_i, scheme)?;

        self.body_mut().set_velocity(velocity);
        self.body_mut().set_position(position);

        Ok(())
    }

    /// Advances time by dt and updates the trajectory: pre-step hooks,
    /// then a trailing acceleration insert (which cascades one new
    /// velocity and position sample through the integral caches), then
    /// post-step hooks.
    fn step(&mut self) -> Result<(), PhysicsError> where
        Self: Sized {
        let hooks = self.animation().pre_step.clone();
        for hook in hooks {
            hook.apply(self)?;
        }

        self.animation_mut().advance();

        let acceleration = self.generate_acceleration()?;
        let time = self.time();
        self.acceleration().insert(time, acceleration.x, acceleration.y)?;

        let hooks = self.animation().post_step.clone();
        for hook in hooks {
            hook.apply(self)?;
        }

        Ok(())
    }

    /// Writes the trajectory to a JSON file, subsampled at the frame
    /// interval `round((1/dt) / framerate)` (at least every sample).
    fn save(&self, path: &Path, framerate: u32) -> Result<(), PhysicsError> {
        let frame_interval = (self.dt().recip() / f64::from(framerate)).round().max(1.0) as usize;
        let record = TrajectoryRecord::sample(
            self.position(),
            self.velocity(),
            self.acceleration(),
            frame_interval
        );

        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &record)?;
        info!(path = %path.display(), frame_interval, "saved trajectory");

        Ok(())
    }
}
