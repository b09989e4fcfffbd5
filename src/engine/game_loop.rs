/// Game loop timing and control system
///
/// Fixed timestep scheduler: the window event loop reports how much wall time
/// has passed, and the scheduler answers with how many simulation ticks to run.
/// Every gameplay update happens inside one of those explicit ticks.
use std::time::{Duration, Instant};

/// Target simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the simulation is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total ticks executed
    tick_count: u64,

    /// Simulated time in seconds (sum of executed ticks)
    sim_time: f64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            sim_time: 0.0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame measured against the wall clock.
    /// Returns the number of fixed ticks to run.
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Feed an explicit frame duration into the scheduler.
    /// Returns the number of fixed ticks to run.
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        // Paused time is dropped, not banked
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Anything beyond the tick cap is discarded so a long stall can't snowball
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!(
                "Dropping {:.1}ms of backlog after {} ticks",
                self.accumulator.as_secs_f32() * 1000.0,
                ticks
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        self.sim_time += ticks as f64 * FIXED_TIMESTEP as f64;
        ticks
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Simulated seconds since start (excludes paused time)
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Get total number of ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Check if the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent a tick burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count, 0);
        assert_eq!(game_loop.tick_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_fixed_timestep() {
        let seconds = FIXED_TIMESTEP_DURATION.as_secs_f32();
        assert!((seconds - FIXED_TIMESTEP).abs() < 0.0001);
    }

    #[test]
    fn test_one_tick_per_timestep() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(FIXED_TIMESTEP_DURATION), 1);
        assert_eq!(game_loop.advance(FIXED_TIMESTEP_DURATION * 3), 3);
        assert_eq!(game_loop.tick_count(), 4);
    }

    #[test]
    fn test_partial_frames_accumulate() {
        let mut game_loop = GameLoop::new();
        let half = FIXED_TIMESTEP_DURATION / 2;
        assert_eq!(game_loop.advance(half), 0);
        assert_eq!(game_loop.accumulator, half);
        assert_eq!(game_loop.advance(half + Duration::from_micros(1)), 1);
    }

    #[test]
    fn test_tick_cap_drops_backlog() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(Duration::from_millis(300)), MAX_TICKS_PER_FRAME);
        // The stall is not replayed on the next frame
        assert_eq!(game_loop.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_paused_no_ticks() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();
        assert_eq!(game_loop.advance(Duration::from_millis(50)), 0);
        assert_eq!(game_loop.sim_time(), 0.0);
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());
        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_resume_clears_accumulator() {
        let mut game_loop = GameLoop::new();
        game_loop.advance(FIXED_TIMESTEP_DURATION / 2);
        game_loop.pause();
        game_loop.resume();
        assert_eq!(game_loop.accumulator, Duration::ZERO);
    }

    #[test]
    fn test_sim_time_tracks_ticks() {
        let mut game_loop = GameLoop::new();
        game_loop.advance(FIXED_TIMESTEP_DURATION * 2);
        assert!((game_loop.sim_time() - 2.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_fps_updates_every_ten_frames() {
        let mut game_loop = GameLoop::new();
        for _ in 0..10 {
            game_loop.advance(Duration::from_millis(20));
        }
        assert!((game_loop.fps() - 50.0).abs() < 0.5);
    }
}
