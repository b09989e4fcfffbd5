use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// The player character
    Player = 0b0000_0010,

    /// Snot balls
    Projectile = 0b0000_0100,

    /// Static ground, platforms and walls
    Platform = 0b0000_1000,

    /// Walking enemies (sensor volumes)
    Enemy = 0b0001_0000,

    /// Explosion debris (cosmetic, only hits the level and itself)
    Debris = 0b0010_0000,
}

impl CollisionGroups {
    fn bits(self) -> u32 {
        self as u32
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        use CollisionGroups::*;

        let memberships = Group::from_bits_truncate(self.bits());
        let filter = match self {
            Player => Group::from_bits_truncate(Platform.bits() | Enemy.bits()),
            Projectile => Group::from_bits_truncate(
                Platform.bits() | Enemy.bits() | Projectile.bits(),
            ),
            Platform => Group::from_bits_truncate(
                Player.bits() | Projectile.bits() | Platform.bits() | Debris.bits(),
            ),
            Enemy => Group::from_bits_truncate(Player.bits() | Projectile.bits()),
            Debris => Group::from_bits_truncate(Platform.bits() | Debris.bits()),
            Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Collision event reported to game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching (or a sensor started overlapping)
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },
}

impl CollisionEvent {
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            Self::Started {
                collider1,
                collider2,
                ..
            }
            | Self::Stopped {
                collider1,
                collider2,
                ..
            } => (collider1, collider2),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    /// Whether a sensor took part (an overlap rather than a contact)
    pub fn is_sensor(&self) -> bool {
        match *self {
            Self::Started { sensor, .. } | Self::Stopped { sensor, .. } => sensor,
        }
    }
}

/// Queue filled by rapier during a physics step.
///
/// Rapier requires `EventHandler: Send + Sync`, so the buffer sits behind a mutex.
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Take all events collected so far
    pub fn drain(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let sensor = event.sensor();
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                    sensor,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                    sensor,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
