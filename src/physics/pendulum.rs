use nalgebra::Vector2;

use crate::physics::animatedbody::{
    AnimatedBody,
    Animation
};
use crate::physics::body::{
    Body,
    PhysicsBody
};

/// A body bound to an immovable pivot by a hypothetical rigid rope.
///
/// The rope length is nominal: discretization lets the integrated
/// position drift slightly off the circle, and a post-step correction
/// pulls it back (see [`LockDistance`](crate::physics::corrections::LockDistance)).
pub struct Pendulum {
    body: Body,
    animation: Animation,
    pivot: Vector2<f64>,
    length: f64
}

impl Pendulum {
    pub fn new(mass: f64, dt: f64, pivot: Vector2<f64>, length: f64) -> Pendulum {
        Pendulum {
            body: Body::new(mass),
            animation: Animation::new(dt),
            pivot,
            length
        }
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

impl PhysicsBody for Pendulum {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn pivot(&self) -> Option<Vector2<f64>> {
        Some(self.pivot)
    }

    fn rope_length(&self) -> Option<f64> {
        Some(self.length)
    }
}

impl AnimatedBody for Pendulum {
    fn animation(&self) -> &Animation {
        &self.animation
    }

    fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }
}
