//! Strider - headless locomotion and enemy behavior simulation
//!
//! Runs a scripted session through the same input adapter a windowed host
//! would feed, at a fixed timestep, and logs what the characters do.

mod settings;
mod simulation;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use strider_core::{GameTime, TimeConfig};
use strider_game::InputHandler;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use simulation::Simulation;

/// Command line options
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Gameplay settings file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 8.0)]
    seconds: f32,

    /// Number of enemies to spawn
    #[arg(short, long, default_value_t = 3)]
    enemies: usize,

    /// Characters falling below this height are respawned
    #[arg(long, default_value_t = simulation::DEFAULT_KILL_HEIGHT, allow_hyphen_values = true)]
    kill_height: f32,

    /// Seed for enemy placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Write the default settings to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

/// Feed the scripted session's raw events for `tick` into `input`
fn script(tick: u64, input: &mut InputHandler) {
    let key = |input: &mut InputHandler, code: KeyCode, state: ElementState| {
        input.handle_keyboard(PhysicalKey::Code(code), state);
    };

    match tick {
        0 => key(input, KeyCode::KeyW, ElementState::Pressed),
        60 | 300 => key(input, KeyCode::Space, ElementState::Pressed),
        61 | 301 => key(input, KeyCode::Space, ElementState::Released),
        90..=119 => input.handle_mouse_motion((8.0, -2.0)),
        150 => input.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0)),
        180 => key(input, KeyCode::KeyD, ElementState::Pressed),
        210 => {
            key(input, KeyCode::KeyW, ElementState::Released);
            key(input, KeyCode::KeyD, ElementState::Released);
        }
        240 => key(input, KeyCode::Escape, ElementState::Pressed),
        241 => key(input, KeyCode::Escape, ElementState::Released),
        // Ignored: the cursor is released
        242..=260 => input.handle_mouse_motion((20.0, 0.0)),
        270 => input.handle_mouse_button(MouseButton::Left, ElementState::Pressed),
        271 => input.handle_mouse_button(MouseButton::Left, ElementState::Released),
        _ => {}
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if args.write_default_config {
        let path = match args.config.clone().or_else(settings::default_path) {
            Some(path) => path,
            None => anyhow::bail!("could not determine config directory"),
        };
        settings::save(&Default::default(), &path)?;
        return Ok(());
    }

    let config = settings::load(args.config.as_deref());
    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    info!("Starting Strider...");

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut sim = Simulation::new(&config, args.enemies, &mut rng);
    sim.kill_height = args.kill_height;
    let mut input = InputHandler::new();

    let mut time = GameTime::new(TimeConfig {
        fixed_timestep: 1.0 / 60.0,
        ..Default::default()
    });
    let dt = time.fixed_dt();

    // Frames arrive at an uneven rate; the fixed tick keeps the simulation stable
    let frame_deltas = [1.0 / 60.0, 1.0 / 45.0, 1.0 / 90.0, 1.0 / 30.0];
    let mut frame = 0usize;
    let mut tick = 0u64;

    while time.total_time < args.seconds as f64 {
        time.update(frame_deltas[frame % frame_deltas.len()]);
        frame += 1;

        for _ in 0..time.fixed_steps() {
            script(tick, &mut input);
            let report = sim.tick(&input.snapshot(), dt);
            input.end_frame();

            if tick % 60 == 0 {
                info!(
                    tick,
                    position = ?report.position,
                    animation = ?report.animation,
                    vertical = ?report.vertical,
                    "player"
                );
            }
            tick += 1;
        }
    }

    let player = sim.player();
    info!(
        ticks = time.tick_count,
        seconds = time.total_time,
        position = ?player.position(),
        yaw = player.camera.yaw(),
        pitch = player.camera.pitch(),
        fov = player.camera.fov(),
        "session finished"
    );
    for (i, (decision, position)) in sim
        .enemy_decisions()
        .into_iter()
        .zip(sim.enemy_positions())
        .enumerate()
    {
        info!(enemy = i, ?decision, ?position, "enemy");
    }
    if let Some(view) = sim.view() {
        info!(?view, "final camera");
    }

    Ok(())
}
