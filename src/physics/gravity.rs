use std::f64::consts::FRAC_PI_2;

use crate::physics::body::PhysicsBody;
use crate::physics::force::{
    Force,
    ForceKind
};
use crate::physics::physicserror::PhysicsError;

pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

/// A near-constant downward pull from an external mass.
///
/// True gravity points at the center of the attracting body; for this
/// simulation it always points straight down, with a magnitude that
/// follows the inverse-square law against the body's current height
/// above the source radius.
pub struct Gravity {
    source_mass: f64,
    source_radius: f64
}

impl Gravity {
    pub fn new(source_mass: f64, source_radius: f64) -> Gravity {
        Gravity { source_mass, source_radius }
    }
}

impl Force for Gravity {
    fn kind(&self) -> ForceKind {
        ForceKind::Gravity
    }

    fn magnitude(&self, body: &dyn PhysicsBody) -> Result<f64, PhysicsError> {
        let height = body.position().y().seek(-1)?.y();
        let freefall_acceleration = GRAVITATIONAL_CONSTANT * self.source_mass
            / (self.source_radius + height).powi(2);

        Ok(body.mass() * freefall_acceleration)
    }

    fn direction(&self, _body: &dyn PhysicsBody) -> Result<f64, PhysicsError> {
        Ok(-FRAC_PI_2)
    }
}
