use crate::physics::body::PhysicsBody;
use crate::physics::force::{
    Force,
    ForceKind
};
use crate::physics::physicserror::PhysicsError;

/// Rope tension on a pendulum-shaped body.
///
/// Unlike a general tension force this assumes circular motion around
/// a pivot: the magnitude combines the component of gravity along the
/// rope with the centripetal force required by the current speed. It
/// therefore only attaches to bodies that expose a pivot, a rope
/// length and a Gravity force.
pub struct PendulumTension;

impl PendulumTension {
    pub fn new() -> PendulumTension {
        PendulumTension
    }
}

impl Default for PendulumTension {
    fn default() -> PendulumTension {
        PendulumTension::new()
    }
}

impl Force for PendulumTension {
    fn kind(&self) -> ForceKind {
        ForceKind::PendulumTension
    }

    fn magnitude(&self, body: &dyn PhysicsBody) -> Result<f64, PhysicsError> {
        let gravity = body.force(ForceKind::Gravity)?;
        let gravitational_tension = gravity.magnitude(body)? * self.direction(body)?.sin();

        let (vx, vy) = body.velocity().seek(-1)?;
        let speed_squared = vx.y() * vx.y() + vy.y() * vy.y();
        let centripetal_tension = body.mass() * speed_squared / body.distance_from_pivot()?;

        Ok(gravitational_tension + centripetal_tension)
    }

    fn direction(&self, body: &dyn PhysicsBody) -> Result<f64, PhysicsError> {
        let pivot = body.pivot().ok_or_else(
            || PhysicsError::MissingDependency("PendulumTension requires a pivot".to_owned())
        )?;
        let (x, y) = body.position().seek(-1)?;

        Ok((pivot.y - y.y()).atan2(pivot.x - x.y()))
    }

    fn validate(&self, body: &dyn PhysicsBody) -> Result<(), PhysicsError> {
        body.force(ForceKind::Gravity)?;
        if body.pivot().is_none() || body.rope_length().is_none() {
            return Err(PhysicsError::MissingDependency(
                "PendulumTension requires a pivot and a rope length".to_owned()
            ));
        }
        Ok(())
    }
}
