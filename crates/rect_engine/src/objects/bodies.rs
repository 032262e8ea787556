//! Ready-made object kinds
//!
//! [`StaticBody`] never moves on its own: walls, floors, pickups, sprites.
//! [`PhysicsObject`] integrates its velocity and corrects its position when
//! it runs into anything its mask accepts.

use super::collider::Collider;
use super::game_object::{Commands, GameObject};
use crate::foundation::math::Vec2;
use crate::physics::{resolve, PhysicsBody, ResolutionPolicy};
use crate::render::{Appearance, Surface};

/// Immovable collider with an appearance
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBody {
    /// Identity, bounds and mask
    pub collider: Collider,
    /// How the body is drawn
    pub appearance: Appearance,
}

impl StaticBody {
    /// Outlined static body
    pub fn new(collider: Collider) -> Self {
        Self {
            collider,
            appearance: Appearance::Outline,
        }
    }

    /// Replace the appearance
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl GameObject for StaticBody {
    fn collider(&self) -> &Collider {
        &self.collider
    }

    fn collider_mut(&mut self) -> &mut Collider {
        &mut self.collider
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.appearance.draw(self.collider.bounds(), surface);
    }
}

/// Moving collider resolved by positional correction
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsObject {
    /// Identity, bounds and mask
    pub collider: Collider,
    /// Velocity and pre-motion snapshot
    pub body: PhysicsBody,
    policy: Option<ResolutionPolicy>,
    /// How the object is drawn
    pub appearance: Appearance,
}

impl PhysicsObject {
    /// Outlined physics object at rest
    ///
    /// Without [`PhysicsObject::with_policy`] the object takes the registry's
    /// default policy when it is added.
    pub fn new(collider: Collider) -> Self {
        let body = PhysicsBody::new(collider.entity.position);
        Self {
            collider,
            body,
            policy: None,
            appearance: Appearance::Outline,
        }
    }

    /// Set the initial velocity in units per second
    pub fn with_velocity(mut self, vel_x: f32, vel_y: f32) -> Self {
        self.body.velocity = Vec2::new(vel_x, vel_y);
        self
    }

    /// Choose the resolution policy
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// How the two axis corrections combine
    pub fn policy(&self) -> ResolutionPolicy {
        self.policy.unwrap_or_default()
    }

    /// Replace the appearance
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, vel_x: f32, vel_y: f32) {
        self.body.velocity = Vec2::new(vel_x, vel_y);
    }
}

impl GameObject for PhysicsObject {
    fn collider(&self) -> &Collider {
        &self.collider
    }

    fn collider_mut(&mut self) -> &mut Collider {
        &mut self.collider
    }

    fn update(&mut self, delta_time: f32, _commands: &mut Commands) {
        self.body.step(&mut self.collider.entity.position, delta_time);
    }

    fn on_collision(&mut self, other: &Collider, _commands: &mut Commands) {
        let size = self.collider.size();
        let policy = self.policy();
        let axes = resolve(
            &mut self.collider.entity.position,
            size,
            self.body.old_position(),
            &other.bounds(),
            policy,
        );
        if axes.is_empty() {
            log::trace!(
                "{} overlaps {} without a previous-frame axis overlap; left unresolved",
                self.collider.entity.name(),
                other.entity.name()
            );
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.appearance.draw(self.collider.bounds(), surface);
    }

    fn body(&self) -> Option<&PhysicsBody> {
        Some(&self.body)
    }

    fn resolution_policy(&self) -> Option<ResolutionPolicy> {
        Some(self.policy())
    }

    fn adopt_default_policy(&mut self, policy: ResolutionPolicy) {
        self.policy.get_or_insert(policy);
    }
}
