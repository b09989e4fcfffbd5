// Player character entity

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::engine::audio::{random_pitch, AudioConfig, AudioSource, SoundBank, SoundClip};
use crate::engine::input::ControlFrame;
use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, RigidBodyHandle, Vector};
use crate::game::effects::ParticleEmitter;
use crate::game::projectiles::{ProjectileLauncher, ProjectileSettings, ProjectileSpawn};

use super::animation::{events, AnimationNames, AnimationPlayer, HEAD_BONE, TAIL_BONE};
use super::state::{
    LocomotionFrame, LocomotionInput, LocomotionState, LocomotionStateMapper, ParticleCommand,
    SideEffect, SoundCue,
};
use super::stats::ControllerSettings;

/// Clips the character can play
#[derive(Debug, Clone)]
pub struct CharacterSounds {
    pub walk: SoundClip,
    pub jump: SoundClip,
    pub farts: SoundBank,
    pub sneezes: SoundBank,
    pub pitch_variance: f32,
}

impl CharacterSounds {
    pub fn from_config(config: &AudioConfig) -> Self {
        Self {
            walk: SoundClip::new(&config.walk),
            jump: SoundClip::new(&config.jump),
            farts: SoundBank::from_names(&config.farts),
            sneezes: SoundBank::from_names(&config.sneezes),
            pitch_variance: config.pitch_variance,
        }
    }
}

/// What one tick of the character asks of the world
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterTick {
    pub frame: LocomotionFrame,
    /// Strongest shake requested this tick as (amount, duration)
    pub shake: Option<(f32, f32)>,
    pub projectile: Option<ProjectileSpawn>,
}

/// The player-controlled snot character
#[derive(Debug)]
pub struct Character {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,

    mapper: LocomotionStateMapper,
    animation: AnimationPlayer,
    animation_names: AnimationNames,
    audio: AudioSource,
    sounds: CharacterSounds,
    launcher: ProjectileLauncher,
    particles: ParticleEmitter,

    /// Velocity carried between ticks
    velocity: Vec2,
    /// Grounded status reported by the last move
    grounded: bool,
}

impl Character {
    /// Create the character and add its body to the physics world
    pub fn new(
        settings: ControllerSettings,
        animation_names: AnimationNames,
        sounds: CharacterSounds,
        projectiles: &ProjectileSettings,
        physics: &mut PhysicsWorld,
        spawn: Vec2,
    ) -> Self {
        let body_handle = physics.add_rigid_body(presets::player_body(spawn.x, spawn.y));
        let collider = presets::player_collider(settings.width, settings.height);
        let collider_handle = physics.add_collider(collider, body_handle);

        Self {
            body_handle,
            collider_handle,
            mapper: LocomotionStateMapper::new(settings),
            animation: AnimationPlayer::with_character_animations(&animation_names),
            animation_names,
            audio: AudioSource::default(),
            sounds,
            launcher: ProjectileLauncher::new(projectiles),
            particles: ParticleEmitter::new(),
            velocity: Vec2::ZERO,
            grounded: false,
        }
    }

    /// Run one tick: map input, move, animate and play effects
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        controls: &ControlFrame,
        physics: &mut PhysicsWorld,
        rng: &mut R,
        dt: f32,
    ) -> CharacterTick {
        let input = LocomotionInput {
            horizontal: controls.horizontal,
            vertical: controls.vertical,
            jump_pressed: controls.jump_pressed,
            jump_released: controls.jump_released,
            grounded: self.grounded,
            vertical_velocity: self.velocity.y,
            fart_pressed: controls.fart_held,
            sneeze_pressed: controls.sneeze_held,
        };
        let frame = self.mapper.evaluate(&input, dt);

        self.velocity = frame.velocity;
        let displacement = frame.velocity * dt;
        if let Some(movement) = physics.move_character(
            self.body_handle,
            self.collider_handle,
            Vector::new(displacement.x, displacement.y),
            dt,
        ) {
            self.grounded = movement.grounded;
            if self.grounded && self.velocity.y <= 0.0 {
                self.velocity.y = self.mapper.settings().resting_velocity(dt);
            }
        }

        // Bones follow where the body will be after this tick's move
        let origin = self.position(physics).unwrap_or_default() + displacement;

        self.animation.set_animation(
            frame.state.animation_name(&self.animation_names),
            frame.looping,
        );
        self.animation.set_flip_x(!frame.facing_right);

        let mut shake: Option<(f32, f32)> = None;
        let mut projectile = None;

        for effect in &frame.effects {
            match *effect {
                SideEffect::PlaySound(cue) => self.play_cue(cue, rng),
                SideEffect::Shake { amount, duration } => {
                    if shake.map_or(true, |(current, _)| amount >= current) {
                        shake = Some((amount, duration));
                    }
                }
                SideEffect::Particles(ParticleCommand::Play) => {
                    if let Some(tail) = self.animation.bone_world_position(TAIL_BONE, origin) {
                        self.particles.set_origin(tail);
                    }
                    self.particles.play();
                }
                SideEffect::Particles(ParticleCommand::Stop) => self.particles.stop(),
                SideEffect::FireProjectile { facing_right } => {
                    let head = self
                        .animation
                        .bone_world_position(HEAD_BONE, origin)
                        .unwrap_or(origin);
                    let scale = self.mapper.settings().scale;
                    projectile = self.launcher.fire(facing_right, head, scale, dt);
                }
            }
        }

        for event in self.animation.update(dt) {
            if events::is_footstep(&event) {
                self.play_cue(SoundCue::Footstep, rng);
            }
        }

        CharacterTick {
            frame,
            shake,
            projectile,
        }
    }

    fn play_cue<R: Rng + ?Sized>(&mut self, cue: SoundCue, rng: &mut R) {
        let clip = match cue {
            SoundCue::Jump => Some(&self.sounds.jump),
            SoundCue::Footstep => Some(&self.sounds.walk),
            SoundCue::Fart => self.sounds.farts.pick(rng),
            SoundCue::Sneeze => self.sounds.sneezes.pick(rng),
        };

        let Some(clip) = clip else {
            debug!("No clip for {:?}", cue);
            return;
        };
        let pitch = random_pitch(rng, self.sounds.pitch_variance);
        self.audio.play(clip, pitch);
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics
            .translation(self.body_handle)
            .map(|t| Vec2::new(t.x, t.y))
    }

    pub fn state(&self) -> LocomotionState {
        self.mapper.state()
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing_right(&self) -> bool {
        self.mapper.facing_right()
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    pub fn audio(&self) -> &AudioSource {
        &self.audio
    }

    pub fn particles(&self) -> &ParticleEmitter {
        &self.particles
    }

    /// Remove the character's body from the world
    pub fn despawn(&self, physics: &mut PhysicsWorld) {
        physics.remove_rigid_body(self.body_handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::PlatformSpec;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (Character, PhysicsWorld, ChaCha8Rng) {
        let mut physics = PhysicsWorld::new();
        let ground = PlatformSpec::new(0.0, -0.5, 40.0, 1.0);
        let body = physics.add_rigid_body(presets::platform_body(
            ground.position.x,
            ground.position.y,
        ));
        physics.add_collider(presets::platform_collider(ground.width, ground.height), body);

        let character = Character::new(
            ControllerSettings::default(),
            AnimationNames::default(),
            CharacterSounds::from_config(&AudioConfig::default()),
            &ProjectileSettings::default(),
            &mut physics,
            Vec2::new(0.0, 1.2),
        );
        physics.refresh_queries();
        (character, physics, ChaCha8Rng::seed_from_u64(5))
    }

    fn run(
        character: &mut Character,
        physics: &mut PhysicsWorld,
        rng: &mut ChaCha8Rng,
        controls: ControlFrame,
        ticks: usize,
    ) -> CharacterTick {
        let mut last = None;
        for _ in 0..ticks {
            last = Some(character.update(&controls, physics, rng, DT));
            physics.step();
        }
        last.expect("at least one tick")
    }

    #[test]
    fn test_settles_on_ground_idle() {
        let (mut character, mut physics, mut rng) = setup();
        let tick = run(&mut character, &mut physics, &mut rng, ControlFrame::default(), 60);

        assert!(character.is_grounded());
        assert_eq!(tick.frame.state, LocomotionState::Idle);
        assert_eq!(character.animation().current_animation(), "standing");
    }

    #[test]
    fn test_running_moves_and_plays_footsteps() {
        let (mut character, mut physics, mut rng) = setup();
        run(&mut character, &mut physics, &mut rng, ControlFrame::default(), 30);
        let start = character.position(&physics).unwrap();

        let controls = ControlFrame {
            horizontal: 1.0,
            ..Default::default()
        };
        let tick = run(&mut character, &mut physics, &mut rng, controls, 60);

        assert_eq!(tick.frame.state, LocomotionState::Run);
        assert_eq!(character.animation().current_animation(), "running");
        let moved = character.position(&physics).unwrap().x - start.x;
        assert!(moved > 8.0 && moved < 11.0, "moved {}", moved);
        assert_eq!(
            character.audio().clip().map(|c| c.name.as_str()),
            Some("footstep.wav")
        );
    }

    #[test]
    fn test_jump_leaves_ground() {
        let (mut character, mut physics, mut rng) = setup();
        run(&mut character, &mut physics, &mut rng, ControlFrame::default(), 30);
        let ground_y = character.position(&physics).unwrap().y;

        run(
            &mut character,
            &mut physics,
            &mut rng,
            ControlFrame {
                jump_pressed: true,
                ..Default::default()
            },
            1,
        );
        assert_eq!(character.audio().clip().map(|c| c.name.as_str()), Some("jump.wav"));

        let tick = run(&mut character, &mut physics, &mut rng, ControlFrame::default(), 10);
        assert!(!character.is_grounded());
        assert_eq!(tick.frame.state, LocomotionState::Jump);
        assert!(character.position(&physics).unwrap().y > ground_y + 1.0);
        assert_eq!(character.animation().current_animation(), "jumping");
    }

    #[test]
    fn test_fart_requests_shake_and_particles() {
        let (mut character, mut physics, mut rng) = setup();
        let tick = run(
            &mut character,
            &mut physics,
            &mut rng,
            ControlFrame {
                fart_held: true,
                ..Default::default()
            },
            1,
        );

        assert_eq!(tick.shake, Some((2.0, 0.25)));
        assert!(character.particles().is_playing());
        let clip = character.audio().clip().map(|c| c.name.clone()).unwrap();
        assert!(clip.starts_with("fart"));
        let pitch = character.audio().pitch();
        assert!((0.8..=1.2).contains(&pitch));
    }

    #[test]
    fn test_sneeze_spawns_projectile_after_delay() {
        let (mut character, mut physics, mut rng) = setup();
        // Turn left, then sneeze standing still
        let turn = ControlFrame {
            horizontal: -0.1,
            ..Default::default()
        };
        run(&mut character, &mut physics, &mut rng, turn, 1);
        let controls = ControlFrame {
            sneeze_held: true,
            ..Default::default()
        };

        let mut spawns = Vec::new();
        for _ in 0..40 {
            let tick = character.update(&controls, &mut physics, &mut rng, DT);
            physics.step();
            spawns.extend(tick.projectile);
        }

        assert_eq!(spawns.len(), 1);
        assert_eq!(spawns[0].force, Vec2::new(-1000.0, -600.0));
        assert!(!character.particles().is_playing());
        assert!(!character.facing_right());
        // Head bone is mirrored to the left of the body
        let body = character.position(&physics).unwrap();
        assert!(spawns[0].position.x < body.x);
    }

    #[test]
    fn test_projectiles_carry_character_scale() {
        let mut physics = PhysicsWorld::new();
        let settings = ControllerSettings {
            scale: 2.0,
            ..Default::default()
        };
        let mut character = Character::new(
            settings,
            AnimationNames::default(),
            CharacterSounds::from_config(&AudioConfig::default()),
            &ProjectileSettings::default(),
            &mut physics,
            Vec2::ZERO,
        );
        physics.refresh_queries();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let sneeze = ControlFrame {
            sneeze_held: true,
            ..Default::default()
        };

        let spawn = (0..40)
            .find_map(|_| {
                character
                    .update(&sneeze, &mut physics, &mut rng, DT)
                    .projectile
            })
            .expect("sneezing fires a ball");
        assert_eq!(spawn.scale, 2.0);
    }

    #[test]
    fn test_sneeze_delay_pauses_while_released() {
        let (mut character, mut physics, mut rng) = setup();
        let sneeze = ControlFrame {
            sneeze_held: true,
            ..Default::default()
        };

        for _ in 0..20 {
            let tick = character.update(&sneeze, &mut physics, &mut rng, DT);
            assert!(tick.projectile.is_none());
            physics.step();
        }
        // Released for longer than the whole delay
        for _ in 0..60 {
            let tick = character.update(&ControlFrame::default(), &mut physics, &mut rng, DT);
            assert!(tick.projectile.is_none());
            physics.step();
        }

        let mut held = 0;
        let mut fired = false;
        while !fired && held < 60 {
            held += 1;
            fired = character
                .update(&sneeze, &mut physics, &mut rng, DT)
                .projectile
                .is_some();
            physics.step();
        }
        // 20 + 11 held ticks cross the 0.5 s delay
        assert!(fired);
        assert!((11..=13).contains(&held), "fired after {} more ticks", held);
    }

    #[test]
    fn test_empty_fart_bank_is_silent() {
        let mut physics = PhysicsWorld::new();
        let sounds = CharacterSounds::from_config(&AudioConfig {
            farts: Vec::new(),
            ..Default::default()
        });
        let mut character = Character::new(
            ControllerSettings::default(),
            AnimationNames::default(),
            sounds,
            &ProjectileSettings::default(),
            &mut physics,
            Vec2::ZERO,
        );
        physics.refresh_queries();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let tick = character.update(
            &ControlFrame {
                fart_held: true,
                ..Default::default()
            },
            &mut physics,
            &mut rng,
            DT,
        );
        assert_eq!(tick.frame.state, LocomotionState::Fart);
        assert_eq!(character.audio().play_count(), 0);
    }
}
