// Camera shake and particle emitter state
//
// Both only hold state for a renderer to read; nothing is drawn here.

use glam::Vec2;
use rand::Rng;

use crate::core::math::{clamp, lerp};

/// Screen shake driven by fire-and-forget requests
#[derive(Debug, Clone, Default)]
pub struct CameraShake {
    amount: f32,
    duration: f32,
    remaining: f32,
    offset: Vec2,
}

impl CameraShake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a shake. A weaker request never cuts a stronger one short.
    pub fn shake(&mut self, amount: f32, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        if !self.is_active() || amount >= self.amount {
            self.amount = amount;
            self.duration = duration;
            self.remaining = duration;
        }
    }

    /// Advance the shake and return the camera offset for this tick
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Vec2 {
        if !self.is_active() {
            self.offset = Vec2::ZERO;
            return self.offset;
        }

        // Fades out linearly over the request's duration
        let strength = lerp(0.0, self.amount, clamp(self.remaining / self.duration, 0.0, 1.0));
        self.offset = Vec2::new(
            rng.gen_range(-1.0..=1.0) * strength,
            rng.gen_range(-1.0..=1.0) * strength,
        );
        self.remaining -= dt;
        self.offset
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

}

/// Particle emitter attached to a bone
#[derive(Debug, Clone, Default)]
pub struct ParticleEmitter {
    playing: bool,
    origin: Vec2,
    bursts: u32,
}

impl ParticleEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start emitting; already-playing emitters keep going
    pub fn play(&mut self) {
        if !self.playing {
            self.bursts += 1;
        }
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Number of times emission has been started
    pub fn bursts(&self) -> u32 {
        self.bursts
    }
}
