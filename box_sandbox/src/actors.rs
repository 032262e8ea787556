//! Sandbox object kinds built on the engine's bodies

use rect_engine::objects::{Collider, Commands, GameObject, PhysicsObject, StaticBody};
use rect_engine::physics::{PhysicsBody, ResolutionPolicy};
use rect_engine::render::{Appearance, Surface};

/// Horizontal speed kept after bouncing off a wall
const RESTITUTION: f32 = 0.5;

/// Physics box pulled down by gravity
///
/// Landing on something cancels vertical speed, hitting something sideways
/// reverses and damps horizontal speed.
pub struct FallingBox {
    inner: PhysicsObject,
    gravity: f32,
}

impl FallingBox {
    /// Box at rest; push-out follows the registry's default policy
    pub fn new(collider: Collider, gravity: f32) -> Self {
        Self {
            inner: PhysicsObject::new(collider),
            gravity,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, vel_x: f32, vel_y: f32) -> Self {
        self.inner.set_velocity(vel_x, vel_y);
        self
    }

    #[cfg(test)]
    fn velocity(&self) -> rect_engine::foundation::math::Vec2 {
        self.inner.velocity()
    }
}

impl GameObject for FallingBox {
    fn collider(&self) -> &Collider {
        &self.inner.collider
    }

    fn collider_mut(&mut self) -> &mut Collider {
        &mut self.inner.collider
    }

    fn update(&mut self, delta_time: f32, commands: &mut Commands) {
        self.inner.body.velocity.y += self.gravity * delta_time;
        self.inner.update(delta_time, commands);
    }

    fn on_collision(&mut self, other: &Collider, commands: &mut Commands) {
        let before = self.inner.collider.entity.position;
        self.inner.on_collision(other, commands);
        let moved = self.inner.collider.entity.position - before;

        if moved.y.abs() > f32::EPSILON {
            self.inner.body.velocity.y = 0.0;
        }
        if moved.x.abs() > f32::EPSILON {
            self.inner.body.velocity.x *= -RESTITUTION;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.inner.render(surface);
    }

    fn body(&self) -> Option<&PhysicsBody> {
        self.inner.body()
    }

    fn resolution_policy(&self) -> Option<ResolutionPolicy> {
        self.inner.resolution_policy()
    }

    fn adopt_default_policy(&mut self, policy: ResolutionPolicy) {
        self.inner.adopt_default_policy(policy);
    }
}

/// Pickup that disappears when a box touches it
pub struct Coin {
    inner: StaticBody,
}

impl Coin {
    /// Coin drawn with `appearance`
    pub fn new(collider: Collider, appearance: Appearance) -> Self {
        Self {
            inner: StaticBody::new(collider).with_appearance(appearance),
        }
    }
}

impl GameObject for Coin {
    fn collider(&self) -> &Collider {
        &self.inner.collider
    }

    fn collider_mut(&mut self) -> &mut Collider {
        &mut self.inner.collider
    }

    fn on_collision(&mut self, other: &Collider, commands: &mut Commands) {
        if let Some(id) = self.inner.collider.id() {
            log::info!("{} picked up {}", other.entity.name(), self.inner.collider.entity.name());
            commands.remove(id);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.inner.render(surface);
    }
}
