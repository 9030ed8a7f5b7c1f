use std::collections::HashMap;
use std::rc::Rc;

use nalgebra::Vector2;

use crate::graph::vectorfunction::VectorFunction;
use crate::physics::force::{
    Force,
    ForceKind
};
use crate::physics::physicserror::PhysicsError;

/// State shared by everything affected by physics: an immutable mass,
/// the attached forces keyed by kind, and the position/velocity/
/// acceleration trajectory functions.
pub struct Body {
    mass: f64,
    forces: HashMap<ForceKind, Rc<dyn Force>>,
    position: VectorFunction,
    velocity: VectorFunction,
    acceleration: VectorFunction
}

impl Body {
    pub fn new(mass: f64) -> Body {
        Body {
            mass,
            forces: HashMap::new(),
            position: VectorFunction::new(),
            velocity: VectorFunction::new(),
            acceleration: VectorFunction::new()
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn forces(&self) -> &HashMap<ForceKind, Rc<dyn Force>> {
        &self.forces
    }

    pub(crate) fn set_velocity(&mut self, velocity: VectorFunction) {
        self.velocity = velocity;
    }

    pub(crate) fn set_position(&mut self, position: VectorFunction) {
        self.position = position;
    }
}

/// Behavior every body-shaped type provides. Specialized bodies hand
/// out their [`Body`] state and optionally expose a constraint shape
/// (pivot and rope length); everything else is derived here.
pub trait PhysicsBody {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    fn pivot(&self) -> Option<Vector2<f64>> {
        None
    }

    fn rope_length(&self) -> Option<f64> {
        None
    }

    fn mass(&self) -> f64 {
        self.body().mass
    }

    fn position(&self) -> &VectorFunction {
        &self.body().position
    }

    fn velocity(&self) -> &VectorFunction {
        &self.body().velocity
    }

    fn acceleration(&self) -> &VectorFunction {
        &self.body().acceleration
    }

    fn force(&self, kind: ForceKind) -> Result<Rc<dyn Force>, PhysicsError> {
        self.body().forces.get(&kind).cloned().ok_or_else(
            || PhysicsError::MissingDependency(format!("force {kind} is not attached"))
        )
    }

    /// Angle from the pivot to the latest position sample, in radians.
    /// 0 means the body sits to the right of the pivot.
    fn angle_from_pivot(&self) -> Result<f64, PhysicsError> {
        let pivot = self.pivot().ok_or_else(
            || PhysicsError::MissingDependency("body has no pivot".to_owned())
        )?;
        let (x, y) = self.position().seek(-1)?;

        Ok((y.y() - pivot.y).atan2(x.y() - pivot.x))
    }

    /// Euclidean distance from the latest position sample to the pivot.
    fn distance_from_pivot(&self) -> Result<f64, PhysicsError> {
        let pivot = self.pivot().ok_or_else(
            || PhysicsError::MissingDependency("body has no pivot".to_owned())
        )?;
        let (x, y) = self.position().seek(-1)?;

        Ok((Vector2::new(x.y(), y.y()) - pivot).norm())
    }

    /// Attaches a force after letting it validate the body. Re-adding
    /// a force of the same kind replaces the previous instance.
    fn add_force(&mut self, force: Rc<dyn Force>) -> Result<(), PhysicsError> where
        Self: Sized {
        force.validate(self)?;
        self.body_mut().forces.insert(force.kind(), force);
        Ok(())
    }

    /// Vector sum of every attached force.
    fn net_force(&self) -> Result<Vector2<f64>, PhysicsError> where
        Self: Sized {
        let mut net = Vector2::zeros();

        for force in self.body().forces.values() {
            let magnitude = force.magnitude(self)?;
            let direction = force.direction(self)?;
            net += Vector2::new(direction.cos(), direction.sin()) * magnitude;
        }

        Ok(net)
    }

    /// Newton's second law: acceleration from net force and mass.
    fn generate_acceleration(&self) -> Result<Vector2<f64>, PhysicsError> where
        Self: Sized {
        Ok(self.net_force()? / self.mass())
    }
}

impl PhysicsBody for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}
