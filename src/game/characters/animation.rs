// Character animation system
//
// Clips are timelines with named events. The player tracks one clip at a
// time, a loop flag, horizontal flip and a set of named bones whose world
// positions follow the flip.

use glam::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Animation names used by the character, overridable from config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationNames {
    pub walk: String,
    pub run: String,
    pub idle: String,
    pub jump: String,
    pub fart: String,
    pub sneeze: String,
}

impl Default for AnimationNames {
    fn default() -> Self {
        Self {
            walk: "walking".to_string(),
            run: "running".to_string(),
            idle: "standing".to_string(),
            jump: "jumping".to_string(),
            fart: "farting".to_string(),
            sneeze: "sneezing".to_string(),
        }
    }
}

/// Frame event names fired by the character clips
pub mod events {
    pub const WALKING_STEP: &str = "walking-step";
    pub const RUNNING_STEP: &str = "running-step";
    pub const JUMP_LANDING: &str = "jump-landing";
    pub const JUMP_PEAK: &str = "jump-peak";
    pub const FARTING_TOOT: &str = "farting-toot";
    pub const SNEEZE: &str = "sneeze";

    /// Events that should play a footstep
    pub fn is_footstep(name: &str) -> bool {
        name == WALKING_STEP || name == RUNNING_STEP
    }
}

/// Butt bone: particle origin
pub const TAIL_BONE: &str = "Tail";
/// Projectile origin
pub const HEAD_BONE: &str = "Head";

/// Event at a point on a clip's timeline
#[derive(Debug, Clone, PartialEq)]
pub struct ClipEvent {
    pub time: f32,
    pub name: String,
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Length of one cycle in seconds
    pub duration: f32,
    /// Sorted by time
    events: Vec<ClipEvent>,
}

impl AnimationClip {
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration,
            events: Vec::new(),
        }
    }

    /// Add an event; times outside the clip are clamped onto it
    pub fn with_event(mut self, time: f32, name: &str) -> Self {
        self.events.push(ClipEvent {
            time: time.clamp(0.0, self.duration),
            name: name.to_string(),
        });
        self.events.sort_by(|a, b| a.time.total_cmp(&b.time));
        self
    }

    /// Event names with `from < time <= to` (or `from <= time` when `inclusive_start`)
    fn events_between(&self, from: f32, to: f32, inclusive_start: bool, out: &mut Vec<String>) {
        for event in &self.events {
            let after_start = if inclusive_start {
                event.time >= from
            } else {
                event.time > from
            };
            if after_start && event.time <= to {
                out.push(event.name.clone());
            }
        }
    }
}

/// Manages animation playback for a character
#[derive(Debug)]
pub struct AnimationPlayer {
    animations: HashMap<String, AnimationClip>,
    current_animation: String,
    time: f32,
    looping: bool,
    playing: bool,
    flip_x: bool,
    /// Bone offsets from the character origin, unflipped
    bones: HashMap<String, Vec2>,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current_animation: String::new(),
            time: 0.0,
            looping: true,
            playing: false,
            flip_x: false,
            bones: HashMap::new(),
        }
    }

    /// Player with the clips, events and bones of the snot character
    pub fn with_character_animations(names: &AnimationNames) -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::new(&names.idle, 1.0));
        player.add_animation(
            AnimationClip::new(&names.walk, 0.8)
                .with_event(0.2, events::WALKING_STEP)
                .with_event(0.6, events::WALKING_STEP),
        );
        player.add_animation(
            AnimationClip::new(&names.run, 0.5)
                .with_event(0.1, events::RUNNING_STEP)
                .with_event(0.35, events::RUNNING_STEP),
        );
        player.add_animation(
            AnimationClip::new(&names.jump, 0.8)
                .with_event(0.3, events::JUMP_PEAK)
                .with_event(0.7, events::JUMP_LANDING),
        );
        player.add_animation(
            AnimationClip::new(&names.fart, 0.6).with_event(0.1, events::FARTING_TOOT),
        );
        player.add_animation(AnimationClip::new(&names.sneeze, 0.5).with_event(0.2, events::SNEEZE));

        player.set_bone(TAIL_BONE, Vec2::new(-0.45, -0.2));
        player.set_bone(HEAD_BONE, Vec2::new(0.35, 0.6));

        player.set_animation(&names.idle, true);
        player
    }

    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Switch clip. Restarts only when the name changes; the loop flag always applies.
    /// Unknown names leave the current clip playing.
    pub fn set_animation(&mut self, name: &str, looping: bool) {
        self.looping = looping;

        if self.current_animation == name {
            return;
        }
        if !self.has_animation(name) {
            warn!("Unknown animation '{}', keeping '{}'", name, self.current_animation);
            return;
        }

        self.current_animation = name.to_string();
        self.time = 0.0;
        self.playing = true;
    }

    pub fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }

    pub fn set_bone(&mut self, name: &str, offset: Vec2) {
        self.bones.insert(name.to_string(), offset);
    }

    /// World position of a bone for a character at `origin`
    pub fn bone_world_position(&self, name: &str, origin: Vec2) -> Option<Vec2> {
        let offset = self.bones.get(name)?;
        let x = if self.flip_x { -offset.x } else { offset.x };
        Some(origin + Vec2::new(x, offset.y))
    }

    /// Advance playback, returning the events crossed in order
    pub fn update(&mut self, dt: f32) -> Vec<String> {
        let mut fired = Vec::new();
        if !self.playing {
            return fired;
        }
        let Some(clip) = self.animations.get(&self.current_animation) else {
            return fired;
        };
        if clip.duration <= 0.0 {
            return fired;
        }

        let mut remaining = dt;
        let mut inclusive_start = false;

        while remaining > 0.0 {
            let end = self.time + remaining;
            if end < clip.duration {
                clip.events_between(self.time, end, inclusive_start, &mut fired);
                self.time = end;
                break;
            }

            clip.events_between(self.time, clip.duration, inclusive_start, &mut fired);
            remaining = end - clip.duration;

            if !self.looping {
                self.time = clip.duration;
                self.playing = false;
                break;
            }
            self.time = 0.0;
            inclusive_start = true;
        }

        fired
    }

    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stepper() -> AnimationPlayer {
        let mut player = AnimationPlayer::new();
        player.add_animation(
            AnimationClip::new("walk", 1.0)
                .with_event(0.25, "step")
                .with_event(0.75, "step"),
        );
        player.add_animation(AnimationClip::new("poke", 0.5).with_event(0.4, "hit"));
        player.set_animation("walk", true);
        player
    }

    #[test]
    fn test_standard_animations_exist() {
        let names = AnimationNames::default();
        let player = AnimationPlayer::with_character_animations(&names);
        for name in ["standing", "walking", "running", "jumping", "farting", "sneezing"] {
            assert!(player.has_animation(name), "missing {}", name);
        }
        assert_eq!(player.current_animation(), "standing");
    }

    #[test]
    fn test_set_same_animation_does_not_restart() {
        let mut player = stepper();
        player.update(0.3);
        player.set_animation("walk", true);
        assert_relative_eq!(player.time, 0.3);

        player.set_animation("poke", false);
        assert_eq!(player.time, 0.0);
        assert_eq!(player.current_animation(), "poke");
    }

    #[test]
    fn test_unknown_animation_keeps_current() {
        let mut player = stepper();
        player.update(0.1);
        player.set_animation("moonwalk", true);
        assert_eq!(player.current_animation(), "walk");
        assert_relative_eq!(player.time, 0.1);
    }

    #[test]
    fn test_events_fire_once_when_crossed() {
        let mut player = stepper();
        assert!(player.update(0.2).is_empty());
        assert_eq!(player.update(0.1), vec!["step".to_string()]);
        assert!(player.update(0.1).is_empty());
    }

    #[test]
    fn test_looping_wraps_and_repeats_events() {
        let mut player = stepper();
        // 0 -> 1.3 crosses 0.25, 0.75 and 0.25 again
        let fired = player.update(1.3);
        assert_eq!(fired.len(), 3);
        assert!(player.playing);
        assert_relative_eq!(player.time, 0.3, epsilon = 1e-5);
    }

    #[test]
    fn test_one_shot_stops_at_end() {
        let mut player = stepper();
        player.set_animation("poke", false);
        assert_eq!(player.update(1.0), vec!["hit".to_string()]);
        assert!(!player.playing);
        assert_relative_eq!(player.time, 0.5);
        assert!(player.update(1.0).is_empty());
    }

    #[test]
    fn test_bone_positions_follow_flip() {
        let player = AnimationPlayer::with_character_animations(&AnimationNames::default());
        let origin = Vec2::new(10.0, 2.0);

        let head = player.bone_world_position(HEAD_BONE, origin).unwrap();
        assert!(head.x > origin.x);

        let mut flipped = player;
        flipped.set_flip_x(true);
        let head_flipped = flipped.bone_world_position(HEAD_BONE, origin).unwrap();
        assert_relative_eq!(head_flipped.x, origin.x - (head.x - origin.x));
        assert_relative_eq!(head_flipped.y, head.y);

        assert!(flipped.bone_world_position("Wing", origin).is_none());
    }

    #[test]
    fn test_footstep_events() {
        assert!(events::is_footstep(events::WALKING_STEP));
        assert!(events::is_footstep(events::RUNNING_STEP));
        assert!(!events::is_footstep(events::FARTING_TOOT));
    }
}
