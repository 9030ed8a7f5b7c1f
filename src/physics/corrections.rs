use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;

use crate::physics::animatedbody::{
    AnimatedBody,
    Correction
};
use crate::physics::physicserror::PhysicsError;

/// Post-step hook that keeps the distance from the pivot constant.
///
/// Integration error lets the body spiral slowly off the rope circle.
/// Once the outward drift reaches `tolerance` while the body is within
/// `window` of the pivot's vertical axis, the trailing position sample
/// is re-inserted on the circle at the current angle.
pub struct LockDistance {
    tolerance: f64,
    window: f64
}

impl LockDistance {
    pub fn new(tolerance: f64, window: f64) -> LockDistance {
        LockDistance { tolerance, window }
    }
}

impl Correction for LockDistance {
    fn apply(&self, body: &mut dyn AnimatedBody) -> Result<(), PhysicsError> {
        let length = body.rope_length().ok_or_else(
            || PhysicsError::MissingDependency("LockDistance requires a rope length".to_owned())
        )?;
        let pivot = body.pivot().ok_or_else(
            || PhysicsError::MissingDependency("LockDistance requires a pivot".to_owned())
        )?;

        let drift = body.distance_from_pivot()? - length;
        let lateral = body.position().x().seek(-1)?.y() - pivot.x;
        if drift < self.tolerance || lateral.abs() > self.window {
            return Ok(());
        }

        let angle = body.angle_from_pivot()?;
        let time = body.time();
        body.position().pop(-1)?;
        body.position().insert(time,
                               pivot.x + angle.cos() * length,
                               pivot.y + angle.sin() * length)?;

        Ok(())
    }
}

/// Post-step hook that pins the speed at the pendulum's lowest point.
///
/// The base speed is learned from the first crossing of the base angle
/// (-π/2); every later crossing re-inserts the trailing x-velocity
/// sample with the learned magnitude and the integrated sign, stopping
/// the slow energy gain discretization would otherwise feed in.
pub struct ResetVelocity {
    angle_tolerance: f64,
    base_velocity: RefCell<Option<f64>>
}

impl ResetVelocity {
    pub fn new(angle_tolerance: f64) -> ResetVelocity {
        ResetVelocity { angle_tolerance, base_velocity: RefCell::new(None) }
    }
}

impl Correction for ResetVelocity {
    fn apply(&self, body: &mut dyn AnimatedBody) -> Result<(), PhysicsError> {
        if (body.angle_from_pivot()? + FRAC_PI_2).abs() > self.angle_tolerance {
            return Ok(());
        }

        let learned = *self.base_velocity.borrow();
        match learned {
            Some(base) => {
                let mut x = body.velocity().x_mut();
                let popped = x.pop(-1)?;
                let restored = if popped.y() > 0.0 { base } else { -base };
                x.insert(popped.x(), restored, false)?;
            }
            None => {
                let speed = body.velocity().x().seek(-1)?.y().abs();
                *self.base_velocity.borrow_mut() = Some(speed);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    use super::*;
    use crate::physics::body::PhysicsBody;
    use crate::physics::pendulum::Pendulum;

    fn pendulum_at(x: f64, y: f64) -> Pendulum {
        let pendulum = Pendulum::new(0.1, 0.001, Vector2::new(0.0, 0.0), 1.0);
        pendulum.position().insert(0.0, x, y).unwrap();
        pendulum
    }

    #[test]
    fn lock_distance_snaps_the_body_back_onto_the_circle() {
        let mut pendulum = pendulum_at(0.02, -1.05);
        let hook = LockDistance::new(0.01, 0.1);

        hook.apply(&mut pendulum).unwrap();

        assert_relative_eq!(pendulum.distance_from_pivot().unwrap(), 1.0,
                            max_relative = 1e-12);
        assert_eq!(pendulum.position().x().len(), 1);
    }

    #[test]
    fn lock_distance_ignores_small_drift() {
        let mut pendulum = pendulum_at(0.0, -1.005);
        let hook = LockDistance::new(0.01, 0.1);

        hook.apply(&mut pendulum).unwrap();

        assert_relative_eq!(pendulum.position().y().seek(-1).unwrap().y(), -1.005);
    }

    #[test]
    fn lock_distance_only_corrects_near_the_vertical_axis() {
        let mut pendulum = pendulum_at(0.5, -1.05);
        let hook = LockDistance::new(0.01, 0.1);

        hook.apply(&mut pendulum).unwrap();

        // lateral offset beyond the window: left untouched
        assert_relative_eq!(pendulum.position().x().seek(-1).unwrap().y(), 0.5);
    }

    #[test]
    fn reset_velocity_learns_then_clamps_the_base_speed() {
        let mut pendulum = pendulum_at(0.0, -1.0);
        pendulum.velocity().insert(0.0, 0.8, 0.0).unwrap();
        let hook = ResetVelocity::new(0.01);

        // first crossing: learn the base speed, leave the sample alone
        hook.apply(&mut pendulum).unwrap();
        assert_relative_eq!(pendulum.velocity().x().seek(-1).unwrap().y(), 0.8);

        // faster crossing in the opposite direction gets clamped
        pendulum.velocity().x_mut().pop(-1).unwrap();
        pendulum.velocity().x_mut().insert(0.0, -0.95, false).unwrap();
        hook.apply(&mut pendulum).unwrap();
        assert_relative_eq!(pendulum.velocity().x().seek(-1).unwrap().y(), -0.8);
    }

    #[test]
    fn reset_velocity_ignores_other_angles() {
        let mut pendulum = pendulum_at(0.7, -0.7);
        pendulum.velocity().insert(0.0, 1.0, 0.0).unwrap();
        let hook = ResetVelocity::new(0.01);

        hook.apply(&mut pendulum).unwrap();
        assert!(hook.base_velocity.borrow().is_none());
    }
}
