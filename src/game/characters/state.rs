// Locomotion state mapping
//
// Turns one tick of player input plus grounded/velocity status into the
// locomotion state to show, the velocity to move with and the side effects
// (sounds, shake, particles, projectile) to trigger.

use glam::Vec2;
use log::trace;

use super::animation::AnimationNames;
use super::stats::ControllerSettings;
use crate::core::math::{move_towards, sign};

/// Represents the current locomotion state of the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocomotionState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving slowly on ground
    Walk,
    /// Moving fast on ground
    Run,
    /// In the air, moving upward
    Jump,
    /// In the air, moving downward
    Fall,
    /// Fart button held
    Fart,
    /// Sneeze button held (fires snot balls)
    Sneeze,
}

impl LocomotionState {
    /// Whether the state's animation loops
    pub fn looping(&self) -> bool {
        match self {
            Self::Idle | Self::Walk | Self::Run | Self::Fart => true,
            Self::Jump | Self::Fall | Self::Sneeze => false,
        }
    }

    /// Get the animation name for this state. Jump and Fall share one clip.
    pub fn animation_name<'a>(&self, names: &'a AnimationNames) -> &'a str {
        match self {
            Self::Idle => &names.idle,
            Self::Walk => &names.walk,
            Self::Run => &names.run,
            Self::Jump | Self::Fall => &names.jump,
            Self::Fart => &names.fart,
            Self::Sneeze => &names.sneeze,
        }
    }
}

/// One tick of input for the mapper
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionInput {
    /// Horizontal axis in [-1, 1]
    pub horizontal: f32,
    /// Vertical axis in [-1, 1]
    pub vertical: f32,
    pub jump_pressed: bool,
    pub jump_released: bool,
    /// Grounded status reported by the last move
    pub grounded: bool,
    /// Vertical velocity carried over from the last tick
    pub vertical_velocity: f32,
    pub fart_pressed: bool,
    pub sneeze_pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Fart,
    Sneeze,
    Footstep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleCommand {
    Play,
    Stop,
}

/// Fire-and-forget request produced by a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SideEffect {
    Shake { amount: f32, duration: f32 },
    PlaySound(SoundCue),
    FireProjectile { facing_right: bool },
    Particles(ParticleCommand),
}

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionFrame {
    pub state: LocomotionState,
    pub looping: bool,
    pub effects: Vec<SideEffect>,
    /// Velocity to move with this tick
    pub velocity: Vec2,
    pub facing_right: bool,
}

pub const FART_SHAKE: SideEffect = SideEffect::Shake {
    amount: 2.0,
    duration: 0.25,
};

pub const SNEEZE_SHAKE: SideEffect = SideEffect::Shake {
    amount: 1.0,
    duration: 0.5,
};

/// Maps input to locomotion state.
///
/// The only state carried between ticks is the jump window, the interrupt
/// flag, facing and the clock the window is measured on.
#[derive(Debug)]
pub struct LocomotionStateMapper {
    settings: ControllerSettings,
    /// Seconds since creation
    clock: f32,
    jump_end_time: f32,
    jump_interrupt: bool,
    facing_right: bool,
    current_state: LocomotionState,
}

impl Default for LocomotionStateMapper {
    fn default() -> Self {
        Self::new(ControllerSettings::default())
    }
}

impl LocomotionStateMapper {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            clock: 0.0,
            jump_end_time: 0.0,
            jump_interrupt: false,
            facing_right: true,
            current_state: LocomotionState::Idle,
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// Whether a jump release would still cut the current jump short
    pub fn jump_window_open(&self) -> bool {
        self.clock < self.jump_end_time
    }

    /// State chosen by the last evaluation
    pub fn state(&self) -> LocomotionState {
        self.current_state
    }

    pub fn evaluate(&mut self, input: &LocomotionInput, dt: f32) -> LocomotionFrame {
        let settings = self.settings;
        let mut effects = Vec::new();
        let x = input.horizontal;

        self.clock += dt;

        if x > 0.0 {
            self.facing_right = true;
        } else if x < 0.0 {
            self.facing_right = false;
        }

        let vx = if x == 0.0 {
            0.0
        } else if x.abs() > settings.run_threshold {
            settings.run_speed * sign(x)
        } else {
            settings.walk_speed * sign(x)
        };

        let mut vy = input.vertical_velocity - settings.gravity * dt;
        if input.grounded {
            vy = settings.resting_velocity(dt);
            self.jump_interrupt = false;
        }

        if input.jump_pressed && input.grounded {
            vy = settings.jump_speed;
            self.jump_end_time = self.clock + settings.jump_duration;
            effects.push(SideEffect::PlaySound(SoundCue::Jump));
        } else if self.jump_window_open() && input.jump_released {
            self.jump_interrupt = true;
        }

        if self.jump_interrupt {
            if vy > 0.0 {
                vy = move_towards(vy, 0.0, settings.jump_interrupt_factor * dt);
            } else {
                self.jump_interrupt = false;
            }
        }

        let state = if input.fart_pressed {
            effects.push(FART_SHAKE);
            effects.push(SideEffect::PlaySound(SoundCue::Fart));
            effects.push(SideEffect::Particles(ParticleCommand::Play));
            LocomotionState::Fart
        } else if input.sneeze_pressed {
            effects.push(SNEEZE_SHAKE);
            effects.push(SideEffect::FireProjectile {
                facing_right: self.facing_right,
            });
            effects.push(SideEffect::PlaySound(SoundCue::Sneeze));
            effects.push(SideEffect::Particles(ParticleCommand::Stop));
            LocomotionState::Sneeze
        } else if input.grounded {
            if x == 0.0 {
                LocomotionState::Idle
            } else if x.abs() > settings.run_threshold {
                LocomotionState::Run
            } else {
                LocomotionState::Walk
            }
        } else if vy > 0.0 {
            LocomotionState::Jump
        } else {
            LocomotionState::Fall
        };

        if state != self.current_state {
            trace!(
                "{:?} -> {:?} at axes ({:.2}, {:.2})",
                self.current_state,
                state,
                input.horizontal,
                input.vertical
            );
        }
        self.current_state = state;

        LocomotionFrame {
            state,
            looping: state.looping(),
            effects,
            velocity: Vec2::new(vx, vy),
            facing_right: self.facing_right,
        }
    }
}
