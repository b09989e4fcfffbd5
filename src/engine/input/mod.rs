// Input handling system
//
// Turns winit keyboard and mouse events into one `ControlFrame` per simulation
// tick: smoothed horizontal/vertical axes, jump press/release edges and the
// held state of the two ability buttons.
//
// ## Architecture
//
// - `action`: Game actions and default key bindings
// - `axis`: Virtual axes ramped from pairs of digital actions
// - `player`: Pressed/edge state and per-tick sampling
// - `config`: Remappable bindings
// - `manager`: Event entry point used by the window loop
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::default();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // Once per fixed tick
// let controls = input.sample(FIXED_TIMESTEP);
// world.tick(&controls, FIXED_TIMESTEP);
// ```

pub mod action;
pub mod axis;
pub mod config;
pub mod manager;
pub mod player;

pub use action::Action;
pub use axis::AxisSettings;
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::ControlFrame;
