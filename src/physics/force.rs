use std::fmt;

use crate::physics::body::PhysicsBody;
use crate::physics::physicserror::PhysicsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceKind {
    Gravity,
    PendulumTension
}

impl fmt::Display for ForceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForceKind::Gravity => write!(f, "Gravity"),
            ForceKind::PendulumTension => write!(f, "PendulumTension")
        }
    }
}

/// A force applied to a body, expressed as a magnitude and a direction
/// in radians (0 pointing right/east).
///
/// A force never owns the body it acts on; it observes the current
/// state through the argument instead. The default magnitude and
/// direction fail with `UnimplementedCapability`; every concrete force
/// supplies both.
pub trait Force {
    fn kind(&self) -> ForceKind;

    fn magnitude(&self, _body: &dyn PhysicsBody) -> Result<f64, PhysicsError> {
        Err(PhysicsError::UnimplementedCapability("magnitude"))
    }

    fn direction(&self, _body: &dyn PhysicsBody) -> Result<f64, PhysicsError> {
        Err(PhysicsError::UnimplementedCapability("direction"))
    }

    /// Called when the force is attached to a body. Forces that depend
    /// on other forces or on the body's shape reject unsuitable bodies
    /// here instead of failing mid-simulation.
    fn validate(&self, _body: &dyn PhysicsBody) -> Result<(), PhysicsError> {
        Ok(())
    }
}
