use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    ccd: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType) -> Self {
        let dynamic = body_type == RigidBodyType::Dynamic;
        Self {
            body_type,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: if dynamic { 1.0 } else { 0.0 },
            can_sleep: dynamic,
            ccd: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic)
    }

    /// Kinematic position-based body (moved by gameplay code)
    pub fn new_kinematic_position_based() -> Self {
        Self::with_type(RigidBodyType::KinematicPositionBased)
    }

    /// Fixed (static) body
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed)
    }

    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Continuous collision detection for small fast bodies
    pub fn ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    pub fn build(self) -> RigidBody {
        let mut body = RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .ccd_enabled(self.ccd)
            .locked_axes(self.locked_axes)
            .build();

        if self.body_type == RigidBodyType::Dynamic {
            body.set_linear_damping(0.1);
            body.set_angular_damping(1.0);
        }

        body
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    is_sensor: bool,
    friction: Real,
    restitution: Real,
    density: Option<Real>,
    mass: Option<Real>,
    active_events: ActiveEvents,
    active_collision_types: ActiveCollisionTypes,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            density: Some(1.0),
            mass: None,
            active_events: ActiveEvents::COLLISION_EVENTS,
            active_collision_types: ActiveCollisionTypes::default(),
        }
    }

    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    pub fn circle(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    /// Vertical capsule (good for characters)
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        Self::with_shape(SharedShape::capsule_y(half_height, radius))
    }

    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Detect overlaps without a physical response
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = Some(mass);
        self.density = None;
        self
    }

    /// Also report kinematic-vs-kinematic contacts (two gameplay-driven bodies)
    pub fn detect_kinematic(mut self) -> Self {
        self.active_collision_types |= ActiveCollisionTypes::KINEMATIC_KINEMATIC;
        self
    }

    pub fn build(self) -> Collider {
        let mut builder = rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(self.restitution)
            .active_events(self.active_events)
            .active_collision_types(self.active_collision_types);

        if let Some(mass) = self.mass {
            builder = builder.mass(mass);
        } else if let Some(density) = self.density {
            builder = builder.density(density);
        }

        builder.build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;

    /// Player body: kinematic, moved through the character controller
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_kinematic_position_based()
            .position(x, y)
            .lock_rotation()
            .build()
    }

    /// Player collider (capsule fitted into width x height)
    pub fn player_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = ((height / 2.0) - radius).max(0.0);

        ColliderBuilder2D::capsule(half_height, radius)
            .collision_groups(CollisionGroups::Player)
            .friction(0.0)
            .detect_kinematic()
            .build()
    }

    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    pub fn platform_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Platform)
            .friction(0.3)
            .build()
    }

    /// Snot ball body: dynamic, affected by gravity, never sleeps mid-flight
    pub fn projectile_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .can_sleep(false)
            .ccd(true)
            .build()
    }

    pub fn projectile_collider(radius: Real, mass: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .collision_groups(CollisionGroups::Projectile)
            .friction(0.2)
            .restitution(0.6)
            .mass(mass)
            .build()
    }

    /// Enemy body: kinematic, walked by gameplay code
    pub fn enemy_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_kinematic_position_based()
            .position(x, y)
            .lock_rotation()
            .build()
    }

    /// Enemy trigger volume
    pub fn enemy_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Enemy)
            .sensor(true)
            .detect_kinematic()
            .build()
    }

    pub fn debris_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic().position(x, y).build()
    }

    pub fn debris_collider(half_size: Real, mass: Real) -> Collider {
        ColliderBuilder2D::box_shape(half_size, half_size)
            .collision_groups(CollisionGroups::Debris)
            .restitution(0.3)
            .mass(mass)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic()
            .position(10.0, 20.0)
            .linvel(5.0, 0.0)
            .build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
        assert_eq!(body.linvel().x, 5.0);
    }

    #[test]
    fn test_player_preset_is_kinematic() {
        let body = presets::player_body(0.0, 0.0);
        let collider = presets::player_collider(1.0, 2.0);

        assert_eq!(body.body_type(), RigidBodyType::KinematicPositionBased);
        assert!(body.locked_axes().contains(LockedAxes::ROTATION_LOCKED));
        assert!(!collider.is_sensor());
        assert!(collider
            .active_collision_types()
            .contains(ActiveCollisionTypes::KINEMATIC_KINEMATIC));
    }

    #[test]
    fn test_enemy_collider_is_sensor() {
        let collider = presets::enemy_collider(1.0, 1.0);
        assert!(collider.is_sensor());
        assert_eq!(
            collider.collision_groups(),
            CollisionGroups::Enemy.to_interaction_groups()
        );
    }

    #[test]
    fn test_projectile_uses_explicit_mass() {
        let collider = presets::projectile_collider(0.25, 1.0);
        assert!((collider.mass() - 1.0).abs() < 1e-5);
        assert_eq!(collider.restitution(), 0.6);
    }
}
