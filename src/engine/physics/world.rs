use rapier2d::control::{CharacterLength, KinematicCharacterController};
use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Result of a character move request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMove {
    /// Translation actually applied after collisions
    pub translation: Vector<Real>,
    /// Whether the character ended the move standing on something
    pub grounded: bool,
}

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    /// Query pipeline used by character moves
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Collision events from the last step
    collision_event_queue: CollisionEventQueue,

    /// Kinematic character controller shared by every walking body
    character_controller: KinematicCharacterController,

    /// Collider handle -> game entity id
    collider_to_entity: HashMap<ColliderHandle, u64>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / 60.0;

        let character_controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(0.02),
            snap_to_ground: Some(CharacterLength::Absolute(0.1)),
            ..KinematicCharacterController::default()
        };

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            character_controller,
            collider_to_entity: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    /// Rebuild the query acceleration structure without stepping.
    /// Needed when colliders were added and a query runs before the next step.
    pub fn refresh_queries(&mut self) {
        self.query_pipeline
            .update(&self.rigid_body_set, &self.collider_set);
    }

    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body, its colliders and their entity mappings
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.rigid_body_set.get(handle) {
            for collider in body.colliders() {
                self.collider_to_entity.remove(collider);
            }
        }

        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Associate a game entity id with a collider
    pub fn set_entity_mapping(&mut self, collider: ColliderHandle, entity_id: u64) {
        self.collider_to_entity.insert(collider, entity_id);
    }

    /// Entity id associated with a collider
    pub fn entity_for(&self, collider: ColliderHandle) -> Option<u64> {
        self.collider_to_entity.get(&collider).copied()
    }

    /// World-space translation of a body
    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vector<Real>> {
        self.rigid_body_set.get(handle).map(|body| *body.translation())
    }

    /// World-space translation of a collider
    pub fn collider_translation(&self, handle: ColliderHandle) -> Option<Vector<Real>> {
        self.collider_set
            .get(handle)
            .map(|collider| collider.position().translation.vector)
    }

    /// Give a body a one-step impulse as its new velocity (`impulse / mass`).
    /// Works before the body's first step, when rapier has not yet computed
    /// its mass properties.
    pub fn launch(&mut self, handle: RigidBodyHandle, impulse: Vector<Real>, mass: Real) {
        if mass <= 0.0 {
            return;
        }
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(impulse / mass, true);
        }
    }

    /// Move a kinematic body straight to a position on the next step
    pub fn set_next_translation(&mut self, handle: RigidBodyHandle, translation: Vector<Real>) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(translation);
        }
    }

    /// Character move primitive: slide a kinematic body's collider by
    /// `desired` against the level and schedule the result for the next step.
    ///
    /// Returns `None` when the body or collider no longer exists.
    pub fn move_character(
        &mut self,
        body_handle: RigidBodyHandle,
        collider_handle: ColliderHandle,
        desired: Vector<Real>,
        dt: Real,
    ) -> Option<CharacterMove> {
        let position = *self.rigid_body_set.get(body_handle)?.position();
        let collider = self.collider_set.get(collider_handle)?;
        let shape = collider.shape();

        // Sensors (enemies) and the character's own body must not block the move
        let filter = QueryFilter::default()
            .exclude_sensors()
            .exclude_rigid_body(body_handle)
            .groups(collider.collision_groups());

        let movement = self.character_controller.move_shape(
            dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            shape,
            &position,
            desired,
            filter,
            |_| {},
        );

        let target = position.translation.vector + movement.translation;
        if let Some(body) = self.rigid_body_set.get_mut(body_handle) {
            body.set_next_kinematic_translation(target);
        }

        Some(CharacterMove {
            translation: movement.translation,
            grounded: movement.grounded,
        })
    }

    /// Take the collision events produced by the last step
    pub fn drain_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.drain()
    }

    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::body::presets;
    use super::*;

    fn world_with_ground() -> PhysicsWorld {
        let mut physics = PhysicsWorld::new();
        let ground = physics.add_rigid_body(presets::platform_body(0.0, -0.5));
        physics.add_collider(presets::platform_collider(40.0, 1.0), ground);
        physics.refresh_queries();
        physics
    }

    #[test]
    fn test_character_lands_on_ground() {
        let mut physics = world_with_ground();
        let body = physics.add_rigid_body(presets::player_body(0.0, 1.5));
        let collider = physics.add_collider(presets::player_collider(1.0, 2.0), body);
        physics.refresh_queries();

        let mut grounded = false;
        for _ in 0..120 {
            let result = physics
                .move_character(body, collider, vector![0.0, -0.2], 1.0 / 60.0)
                .expect("body exists");
            grounded = result.grounded;
            physics.step();
        }

        assert!(grounded);
        let y = physics.translation(body).expect("body exists").y;
        // Capsule half height is 1.0, ground top is at 0.0
        assert!(y > 0.9 && y < 1.2, "unexpected resting height {}", y);
    }

    #[test]
    fn test_character_in_air_not_grounded() {
        let mut physics = world_with_ground();
        let body = physics.add_rigid_body(presets::player_body(0.0, 10.0));
        let collider = physics.add_collider(presets::player_collider(1.0, 2.0), body);
        physics.refresh_queries();

        let result = physics
            .move_character(body, collider, vector![0.1, 0.0], 1.0 / 60.0)
            .expect("body exists");
        assert!(!result.grounded);
        assert!((result.translation.x - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_move_missing_body_returns_none() {
        let mut physics = world_with_ground();
        let body = physics.add_rigid_body(presets::player_body(0.0, 3.0));
        let collider = physics.add_collider(presets::player_collider(1.0, 2.0), body);
        physics.remove_rigid_body(body);

        assert!(physics
            .move_character(body, collider, vector![0.0, -1.0], 1.0 / 60.0)
            .is_none());
    }

    #[test]
    fn test_remove_body_drops_entity_mapping() {
        let mut physics = PhysicsWorld::new();
        let body = physics.add_rigid_body(presets::enemy_body(0.0, 0.0));
        let collider = physics.add_collider(presets::enemy_collider(1.0, 1.0), body);
        physics.set_entity_mapping(collider, 7);
        assert_eq!(physics.entity_for(collider), Some(7));

        physics.remove_rigid_body(body);
        assert_eq!(physics.entity_for(collider), None);
        assert_eq!(physics.rigid_body_set.len(), 0);
    }

    #[test]
    fn test_launch_sets_velocity_from_impulse() {
        let mut physics = PhysicsWorld::with_gravity(vector![0.0, 0.0]);
        let body = physics.add_rigid_body(presets::projectile_body(0.0, 0.0));
        physics.add_collider(presets::projectile_collider(0.25, 2.0), body);

        physics.launch(body, vector![4.0, -2.0], 2.0);
        let vel = *physics.rigid_body_set[body].linvel();
        assert!((vel.x - 2.0).abs() < 1e-5);
        assert!((vel.y + 1.0).abs() < 1e-5);

        physics.step();
        let x = physics.translation(body).expect("body exists").x;
        assert!(x > 0.0);
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut physics = PhysicsWorld::new();
        let body = physics.add_rigid_body(presets::debris_body(0.0, 10.0));
        physics.add_collider(presets::debris_collider(0.1, 1.0), body);

        for _ in 0..30 {
            physics.step();
        }
        assert!(physics.translation(body).expect("body exists").y < 10.0);
    }
}
