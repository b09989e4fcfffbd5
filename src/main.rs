use anyhow::{Context, Result};
use log::{debug, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use engine::input::{Action, InputConfig, InputManager};
use game::config::world_seed;
use game::{GameConfig, GameEvent, GameWorld, Scene};

/// Ticks between debug snapshots (one simulated second)
const SNAPSHOT_INTERVAL: u64 = 60;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Snotball...");

    let config = GameConfig::load().context("Failed to load game config")?;

    let mut input_config = InputConfig::default();
    input_config.set_axis_settings(config.input);
    let mut input = InputManager::new(input_config);

    let seed = world_seed();
    info!("World seed: {}", seed);
    let mut world = GameWorld::new(config, seed);
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Snotball")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut title = String::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => input.process_keyboard_event(&event),
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => input.process_mouse_button(button, state),
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => input.reset(),
            Event::AboutToWait => {
                for action in input.drain_meta_actions() {
                    match action {
                        Action::Pause => game_loop.toggle_pause(),
                        Action::Menu => {
                            info!("Starting a new round");
                            world.restart();
                        }
                        _ => {}
                    }
                }

                let ticks = game_loop.begin_frame();
                for _ in 0..ticks {
                    let controls = input.sample(FIXED_TIMESTEP);
                    for event in world.tick(&controls, FIXED_TIMESTEP) {
                        match event {
                            GameEvent::Scored { total } => info!("Score: {}", total),
                            GameEvent::PlayerCaught => info!("Caught! Press Escape to play again"),
                            other => debug!("{:?}", other),
                        }
                    }
                }
                if ticks > 0 && game_loop.tick_count() % SNAPSHOT_INTERVAL < ticks as u64 {
                    log_snapshot(&world, &game_loop);
                }

                let status = match (world.scene(), world.player_state()) {
                    (Scene::Playing, Some(state)) => format!("{:?}", state),
                    _ => "Menu".to_string(),
                };
                let paused = if game_loop.is_paused() { " [paused]" } else { "" };
                let next_title = format!(
                    "Snotball - score {} (best {}) - {}{} - {:.0} fps",
                    world.score().points(),
                    world.score().best(),
                    status,
                    paused,
                    game_loop.fps()
                );
                if next_title != title {
                    window.set_title(&next_title);
                    title = next_title;
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

/// Debug dump of what a renderer would draw this frame
fn log_snapshot(world: &GameWorld, game_loop: &GameLoop) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    debug!(
        "t={:.1}s tick {}: {} enemies, {} balls, {} debris, camera {:?}",
        game_loop.sim_time(),
        game_loop.tick_count(),
        world.enemy_count(),
        world.ball_count(),
        world.debris_count(),
        world.camera_offset()
    );

    let Some(player) = world.player() else {
        return;
    };
    let audio = player.audio();
    let particles = player.particles();
    debug!(
        "Player at {:?} moving {:?}, grounded {}, facing {}, playing '{}'",
        world.player_position(),
        player.velocity(),
        player.is_grounded(),
        if player.facing_right() { "right" } else { "left" },
        player.animation().current_animation()
    );
    debug!(
        "Last sound {:?} at pitch {:.2} ({} plays), particles {} at {:?} ({} bursts)",
        audio.clip().map(|c| c.name.as_str()),
        audio.pitch(),
        audio.play_count(),
        if particles.is_playing() { "on" } else { "off" },
        particles.origin(),
        particles.bursts()
    );
}
