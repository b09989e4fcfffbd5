// Audio playback
//
// Mixing is not done here: an `AudioSource` is a single voice that forwards
// stop/play requests to an `AudioSink`. The default sink only logs them.

use crate::engine::assets::{AssetLoader, AssetType, SoundHandle};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A named sound clip
#[derive(Debug, Clone, PartialEq)]
pub struct SoundClip {
    pub name: String,
    pub handle: SoundHandle,
}

impl SoundClip {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            handle: SoundHandle::from_path(&AssetLoader::asset_key(AssetType::Sound, name)),
        }
    }
}

/// A set of interchangeable clips, one picked at random per play
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    clips: Vec<SoundClip>,
}

impl SoundBank {
    pub fn new(clips: Vec<SoundClip>) -> Self {
        Self { clips }
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(names.iter().map(|n| SoundClip::new(n.as_ref())).collect())
    }

    /// Uniform pick over every clip; `None` for an empty bank
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&SoundClip> {
        if self.clips.is_empty() {
            return None;
        }
        self.clips.get(rng.gen_range(0..self.clips.len()))
    }
}

/// Pitch in `[1 - max_offset, 1 + max_offset]`
pub fn random_pitch<R: Rng + ?Sized>(rng: &mut R, max_offset: f32) -> f32 {
    let max_offset = max_offset.abs();
    1.0 + rng.gen_range(-max_offset..=max_offset)
}

/// Clip names used by the player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub walk: String,
    pub jump: String,
    pub farts: Vec<String>,
    pub sneezes: Vec<String>,
    /// Maximum pitch offset applied to every play
    pub pitch_variance: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            walk: "footstep.wav".to_string(),
            jump: "jump.wav".to_string(),
            farts: vec![
                "fart1.wav".to_string(),
                "fart2.wav".to_string(),
                "fart3.wav".to_string(),
            ],
            sneezes: vec!["sneeze1.wav".to_string(), "sneeze2.wav".to_string()],
            pitch_variance: 0.2,
        }
    }
}

/// Backend receiving playback requests
pub trait AudioSink {
    fn play(&mut self, clip: &SoundClip, pitch: f32);
    fn stop(&mut self);
}

/// Sink that only logs requests
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, clip: &SoundClip, pitch: f32) {
        debug!(
            "Playing {} ({:?}) at pitch {:.2}",
            clip.name,
            clip.handle.id(),
            pitch
        );
    }

    fn stop(&mut self) {}
}

/// Single voice: every play cuts off whatever was playing before
pub struct AudioSource {
    sink: Box<dyn AudioSink>,
    clip: Option<SoundClip>,
    pitch: f32,
    plays: u64,
}

impl AudioSource {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            clip: None,
            pitch: 1.0,
            plays: 0,
        }
    }

    /// Stop, swap clip and pitch, play
    pub fn play(&mut self, clip: &SoundClip, pitch: f32) {
        self.sink.stop();
        self.clip = Some(clip.clone());
        self.pitch = pitch;
        self.sink.play(clip, pitch);
        self.plays += 1;
    }

    pub fn clip(&self) -> Option<&SoundClip> {
        self.clip.as_ref()
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Number of play requests so far
    pub fn play_count(&self) -> u64 {
        self.plays
    }
}

impl Default for AudioSource {
    fn default() -> Self {
        Self::new(Box::new(LogSink))
    }
}

impl std::fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSource")
            .field("clip", &self.clip)
            .field("pitch", &self.pitch)
            .field("plays", &self.plays)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Call {
        Play(String, f32),
        Stop,
    }

    struct RecordingSink(Rc<RefCell<Vec<Call>>>);

    impl AudioSink for RecordingSink {
        fn play(&mut self, clip: &SoundClip, pitch: f32) {
            self.0.borrow_mut().push(Call::Play(clip.name.clone(), pitch));
        }

        fn stop(&mut self) {
            self.0.borrow_mut().push(Call::Stop);
        }
    }

    #[test]
    fn test_bank_pick_reaches_every_clip() {
        let bank = SoundBank::from_names(&["a.wav", "b.wav", "c.wav"]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let picked: HashSet<String> = (0..200)
            .filter_map(|_| bank.pick(&mut rng).map(|c| c.name.clone()))
            .collect();

        assert_eq!(picked.len(), 3, "last clip must be reachable");
    }

    #[test]
    fn test_single_clip_bank() {
        let bank = SoundBank::from_names(&["only.wav"]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(bank.pick(&mut rng).map(|c| c.name.as_str()), Some("only.wav"));
    }

    #[test]
    fn test_empty_bank_picks_nothing() {
        let bank = SoundBank::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(bank.pick(&mut rng).is_none());
    }

    #[test]
    fn test_random_pitch_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let pitch = random_pitch(&mut rng, 0.2);
            assert!((0.8..=1.2).contains(&pitch), "pitch {} out of range", pitch);
        }
        assert_eq!(random_pitch(&mut rng, 0.0), 1.0);
    }

    #[test]
    fn test_source_stops_before_each_play() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut source = AudioSource::new(Box::new(RecordingSink(calls.clone())));

        source.play(&SoundClip::new("jump.wav"), 1.1);
        source.play(&SoundClip::new("fart1.wav"), 0.9);

        assert_eq!(
            *calls.borrow(),
            vec![
                Call::Stop,
                Call::Play("jump.wav".to_string(), 1.1),
                Call::Stop,
                Call::Play("fart1.wav".to_string(), 0.9),
            ]
        );
        assert_eq!(source.clip().map(|c| c.name.as_str()), Some("fart1.wav"));
        assert_eq!(source.pitch(), 0.9);
        assert_eq!(source.play_count(), 2);
    }

    #[test]
    fn test_audio_config_partial_json() {
        let config: AudioConfig = serde_json::from_str(r#"{ "farts": [] }"#).unwrap();
        assert!(config.farts.is_empty());
        assert_eq!(config.jump, "jump.wav");
    }
}
