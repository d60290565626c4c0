use anyhow::Result;
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::InputState;
use game::config::GameConfig;
use game::player::PowerupKind;
use game::Game;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Plumber...");

    let mut game = Game::new(GameConfig::default())?;

    // A short demo level: two pickups and a hazard along the ground
    game.spawn_powerup(8.0, 0.9, PowerupKind::Mushroom);
    game.spawn_powerup(16.0, 0.9, PowerupKind::FireFlower);
    game.spawn_hazard(24.0, 0.95);

    let mut input = InputState::new();
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Plumber")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput {
                        event: key_event, ..
                    },
                    ..
                } => {
                    input.process_key_event(&key_event);
                }
                Event::WindowEvent {
                    event: WindowEvent::Resized(physical_size),
                    ..
                } => {
                    info!("Window resized to {:?}", physical_size);
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    ..
                } => {
                    window.request_redraw();
                }
                Event::AboutToWait => {
                    // Fixed-timestep simulation, then ask for another frame
                    let updates = game_loop.begin_frame();
                    for _ in 0..updates {
                        game.update(&mut input);
                    }
                    if game.game_over() {
                        info!("Game over after {} updates", game_loop.update_count());
                        elwt.exit();
                    }
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
