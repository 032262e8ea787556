//! Full ticks through the registry with real objects
//!
//! These drive the registry the way a game loop would and check what the
//! objects saw, phase by phase.

use approx::assert_relative_eq;
use crate::foundation::math::{Transform2D, Vec2};
use crate::foundation::time::{ClockUnit, ManualClock};
use crate::objects::{Collider, Commands, EntityId, GameObject, PhysicsObject, StaticBody};
use crate::physics::{CollisionPair, ResolutionPolicy, TagSet};
use crate::render::{CommandSurface, DrawCommand, Surface};
use crate::scene::{ObjectRegistry, RegistryError};
use std::cell::RefCell;
use std::rc::Rc;

type Journal = Rc<RefCell<Vec<String>>>;

fn tags() -> TagSet {
    TagSet::new(["box", "wall", "pickup"])
}

/// Records every callback it receives
struct Recorder {
    collider: Collider,
    journal: Journal,
    remove_self_on_hit: bool,
    spawn_on_hit: Option<Collider>,
}

impl Recorder {
    fn new(collider: Collider, journal: &Journal) -> Self {
        Self {
            collider,
            journal: Rc::clone(journal),
            remove_self_on_hit: false,
            spawn_on_hit: None,
        }
    }
}

impl GameObject for Recorder {
    fn collider(&self) -> &Collider {
        &self.collider
    }

    fn collider_mut(&mut self) -> &mut Collider {
        &mut self.collider
    }

    fn update(&mut self, _delta_time: f32, _commands: &mut Commands) {
        self.journal
            .borrow_mut()
            .push(format!("update {}", self.collider.entity.name()));
    }

    fn on_collision(&mut self, other: &Collider, commands: &mut Commands) {
        self.journal.borrow_mut().push(format!(
            "hit {} -> {}",
            self.collider.entity.name(),
            other.entity.name()
        ));
        if self.remove_self_on_hit {
            if let Some(id) = self.collider.id() {
                commands.remove(id);
            }
        }
        if let Some(spawn) = self.spawn_on_hit.take() {
            commands.spawn(StaticBody::new(spawn));
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw_rect_outline(self.collider.bounds());
    }
}

/// Forgets to pop what it pushes
struct Leaky {
    collider: Collider,
}

impl GameObject for Leaky {
    fn collider(&self) -> &Collider {
        &self.collider
    }

    fn collider_mut(&mut self) -> &mut Collider {
        &mut self.collider
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.push_transform(Transform2D::from_translation(Vec2::new(1.0, 1.0)));
        surface.push_transform(Transform2D::identity());
    }
}

fn physics_box(x: f32, y: f32, vel_x: f32, vel_y: f32) -> PhysicsObject {
    PhysicsObject::new(
        Collider::new(x, y, 10.0, 10.0, &tags())
            .with_tag("box")
            .colliding_with(&["box"]),
    )
    .with_velocity(vel_x, vel_y)
}

#[test]
fn test_mover_pushed_out_of_resting_box() {
    let mut registry = ObjectRegistry::new(tags());
    let a = registry
        .add_object(physics_box(0.0, 0.0, 5.0, 0.0).with_policy(ResolutionPolicy::Exclusive))
        .unwrap();
    let b = registry.add_object(physics_box(8.0, 0.0, 0.0, 0.0)).unwrap();

    let stats = registry.step(1.0).clone();

    let mover = registry.get(a).unwrap();
    assert_relative_eq!(mover.body().unwrap().old_position().x, 0.0);
    assert_relative_eq!(mover.collider().entity.x(), -2.0);
    assert_relative_eq!(mover.collider().entity.y(), 0.0);

    // B ran its own scan after A was already pushed clear.
    let resting = registry.get(b).unwrap();
    assert_relative_eq!(resting.collider().entity.x(), 8.0);
    assert_eq!(stats.collisions, 1);
    assert!(registry.collisions().current().contains(&CollisionPair::new(a, b)));
}

#[test]
fn test_independent_policy_snaps_both_axes() {
    let mut registry = ObjectRegistry::new(tags());
    let a = registry.add_object(physics_box(0.0, 0.0, 5.0, 0.0)).unwrap();
    registry.add_object(physics_box(8.0, 0.0, 0.0, 0.0)).unwrap();

    registry.step(1.0);

    // Old extents overlapped on both axes; centers tie vertically.
    let mover = registry.get(a).unwrap().collider();
    assert_relative_eq!(mover.entity.x(), -2.0);
    assert_relative_eq!(mover.entity.y(), -10.0);
}

#[test]
fn test_clock_drives_delta_time() {
    let clock = ManualClock::new(ClockUnit::Milliseconds);
    let mut registry = ObjectRegistry::new(tags());
    let a = registry.add_object(physics_box(0.0, 0.0, 10.0, 0.0)).unwrap();

    registry.start(&clock);
    clock.advance(500.0);
    let stats = registry.update(&clock).clone();

    assert_relative_eq!(stats.delta_time, 0.5);
    assert_eq!(stats.tick, 1);
    assert_relative_eq!(registry.get(a).unwrap().collider().entity.x(), 5.0);
}

#[test]
fn test_masks_are_one_sided() {
    let journal = Journal::default();
    let mut registry = ObjectRegistry::new(tags());
    let seeker = Collider::new(0.0, 0.0, 4.0, 4.0, &tags())
        .with_name("seeker")
        .with_tag("box")
        .colliding_with(&["pickup"]);
    let coin = Collider::new(1.0, 1.0, 2.0, 2.0, &tags())
        .with_name("coin")
        .with_tag("pickup");
    registry.add_object(Recorder::new(seeker, &journal)).unwrap();
    registry.add_object(Recorder::new(coin, &journal)).unwrap();

    registry.step(0.0);

    let hits: Vec<_> = journal
        .borrow()
        .iter()
        .filter(|entry| entry.starts_with("hit"))
        .cloned()
        .collect();
    assert_eq!(hits, vec!["hit seeker -> coin".to_string()]);
}

#[test]
fn test_phases_run_in_order() {
    let journal = Journal::default();
    let mut registry = ObjectRegistry::new(tags());
    for name in ["first", "second"] {
        let collider = Collider::new(0.0, 0.0, 4.0, 4.0, &tags())
            .with_name(name)
            .colliding_with(&["default"]);
        registry.add_object(Recorder::new(collider, &journal)).unwrap();
    }

    registry.step(0.1);

    assert_eq!(
        *journal.borrow(),
        vec![
            "update first".to_string(),
            "update second".to_string(),
            "hit first -> second".to_string(),
            "hit second -> first".to_string(),
        ]
    );
}

#[test]
fn test_removal_is_deferred_to_end_of_tick() {
    let journal = Journal::default();
    let mut registry = ObjectRegistry::new(tags());

    let mut doomed = Recorder::new(
        Collider::new(0.0, 0.0, 4.0, 4.0, &tags())
            .with_name("doomed")
            .colliding_with(&["default"]),
        &journal,
    );
    doomed.remove_self_on_hit = true;
    let doomed = registry.add_object(doomed).unwrap();

    let witness = Collider::new(1.0, 1.0, 4.0, 4.0, &tags())
        .with_name("witness")
        .colliding_with(&["default"]);
    let witness = registry.add_object(Recorder::new(witness, &journal)).unwrap();

    let stats = registry.step(0.0).clone();

    // The witness still collided with the doomed object during the scan.
    assert!(journal
        .borrow()
        .contains(&"hit witness -> doomed".to_string()));
    assert_eq!(stats.removed, 1);
    assert!(!registry.contains(doomed));
    assert_eq!(registry.ids(), vec![witness]);
    assert!(registry.pending_removals().is_empty());
    assert!(registry.collisions().current().iter().all(|pair| !pair.involves(doomed)));
}

#[test]
fn test_removed_object_is_gone_next_tick() {
    let journal = Journal::default();
    let mut registry = ObjectRegistry::new(tags());
    let gone = registry
        .add_object(Recorder::new(
            Collider::new(0.0, 0.0, 1.0, 1.0, &tags()).with_name("gone"),
            &journal,
        ))
        .unwrap();
    registry.remove_object(gone).unwrap();

    registry.step(0.0);
    journal.borrow_mut().clear();
    registry.step(0.0);

    assert!(journal.borrow().is_empty());
    assert_eq!(registry.remove_object(gone), Err(RegistryError::NotFound(gone)));
}

#[test]
fn test_spawns_join_after_removals() {
    let journal = Journal::default();
    let mut registry = ObjectRegistry::new(tags());

    let mut parent = Recorder::new(
        Collider::new(0.0, 0.0, 4.0, 4.0, &tags())
            .with_name("parent")
            .colliding_with(&["wall"]),
        &journal,
    );
    parent.spawn_on_hit = Some(Collider::new(50.0, 50.0, 1.0, 1.0, &tags()).with_name("child"));
    let parent = registry.add_object(parent).unwrap();
    registry
        .add_object(StaticBody::new(
            Collider::new(2.0, 2.0, 4.0, 4.0, &tags()).with_tag("wall"),
        ))
        .unwrap();

    let stats = registry.step(0.0).clone();

    assert_eq!(stats.spawned, 1);
    assert_eq!(registry.len(), 3);
    let child = registry.find_by_name("child").unwrap();
    assert!(child.id().unwrap() > parent);
    assert_eq!(registry.ids().last().copied(), child.id());
}

#[test]
fn test_unknown_spawn_tag_is_dropped() {
    let journal = Journal::default();
    let mut registry = ObjectRegistry::new(tags());
    let mut parent = Recorder::new(
        Collider::new(0.0, 0.0, 4.0, 4.0, &tags()).colliding_with(&["default"]),
        &journal,
    );
    parent.spawn_on_hit = Some(Collider::new(0.0, 0.0, 1.0, 1.0, &tags()).with_tag("ghost"));
    registry.add_object(parent).unwrap();
    registry
        .add_object(StaticBody::new(Collider::new(0.0, 0.0, 4.0, 4.0, &tags())))
        .unwrap();

    let stats = registry.step(0.0).clone();
    assert_eq!(stats.spawned, 0);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_render_order_is_stable_across_ticks() {
    let mut registry = ObjectRegistry::new(tags());
    let positions = [30.0, 10.0, 20.0];
    for x in positions {
        registry
            .add_object(StaticBody::new(Collider::new(x, 0.0, 1.0, 1.0, &tags())))
            .unwrap();
    }

    let mut surface = CommandSurface::new(100.0, 100.0);
    for _ in 0..3 {
        registry.step(0.016);
        registry.render(&mut surface);
        let drawn: Vec<f32> = surface
            .take_commands()
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::RectOutline { rect, .. } => Some(rect.x),
                _ => None,
            })
            .collect();
        assert_eq!(drawn, positions.to_vec());
    }
}

#[test]
fn test_render_restores_leaked_transforms() {
    let mut registry = ObjectRegistry::new(tags());
    registry
        .add_object(Leaky {
            collider: Collider::new(0.0, 0.0, 1.0, 1.0, &tags()),
        })
        .unwrap();
    registry
        .add_object(StaticBody::new(Collider::new(5.0, 5.0, 1.0, 1.0, &tags())))
        .unwrap();

    let mut surface = CommandSurface::new(20.0, 20.0);
    registry.render(&mut surface);

    assert_eq!(surface.transform_depth(), 0);
    let last = surface.commands().last().cloned();
    assert!(matches!(
        last,
        Some(DrawCommand::RectOutline { transform, .. }) if transform == Transform2D::identity()
    ));
}

#[test]
fn test_external_removal_of_unknown_id() {
    let mut registry = ObjectRegistry::new(tags());
    assert_eq!(
        registry.remove_object(EntityId::from_raw(42)),
        Err(RegistryError::NotFound(EntityId::from_raw(42)))
    );
}

#[test]
fn test_registry_default_policy_applies_on_add() {
    let mut registry = ObjectRegistry::new(tags()).with_default_policy(ResolutionPolicy::Exclusive);
    let a = registry.add_object(physics_box(0.0, 0.0, 5.0, 0.0)).unwrap();
    registry.add_object(physics_box(8.0, 0.0, 0.0, 0.0)).unwrap();

    registry.step(1.0);

    // Same layout as the independent case; only x is corrected.
    let mover = registry.get(a).unwrap();
    assert_eq!(mover.resolution_policy(), Some(ResolutionPolicy::Exclusive));
    assert_relative_eq!(mover.collider().entity.x(), -2.0);
    assert_relative_eq!(mover.collider().entity.y(), 0.0);
}
