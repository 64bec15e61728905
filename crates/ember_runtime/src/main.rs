//! Ember Engine Runtime
//!
//! Headless binary: loads settings, builds a registry, spins a triangle for
//! a fixed number of frames and reports timing.

mod systems;

use anyhow::{Context, Result};
use ember_core::ecs::Registry;
use ember_core::scene::{Mesh, Transform};
use ember_core::spawn;
use ember_core::time::SimulationTime;
use ember_metrics::FrameTimer;
use ember_services::Settings;
use std::path::PathBuf;
use systems::{RenderSubmit, Spin};
use tracing_subscriber::EnvFilter;

const DEFAULT_SETTINGS_PATH: &str = "ember.json";

fn main() -> Result<()> {
    let settings_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = Settings::load(&settings_path)
        .with_context(|| format!("loading {}", settings_path.display()))?;

    // RUST_LOG wins over the settings file
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Ember Engine v{}", ember_core::VERSION);
    run(&settings)
}

fn run(settings: &Settings) -> Result<()> {
    let window = &settings.window;
    tracing::info!(
        title = %window.title,
        width = window.width,
        height = window.height,
        aspect = window.aspect_ratio(),
        "headless viewport"
    );

    let mut registry = Registry::with_config(settings.simulation.registry);

    registry.add_system(Spin::new(std::f32::consts::FRAC_PI_2))?;
    let submit = registry.add_late_system(RenderSubmit::new(window.width, window.height))?;

    let triangle = spawn!(*registry.world_mut(), Transform::default(), Mesh::triangle())?;
    tracing::info!(%triangle, "spawned triangle");

    let mut time = SimulationTime::with_tick_rate(settings.simulation.tick_rate_hz);
    let mut timer = FrameTimer::new(120);
    for _ in 0..settings.simulation.frames {
        timer.begin();
        registry.update(time.tick_seconds());
        time.advance_tick();
        timer.end();
    }

    let stats = timer.stats();
    tracing::info!(
        frames = registry.frame(),
        simulated_secs = time.total_time().as_secs_f64(),
        wall_secs = stats.total.as_secs_f64(),
        avg = ?stats.average,
        window_min = ?stats.window_min,
        window_max = ?stats.window_max,
        worst = ?stats.worst,
        fps = stats.fps,
        "simulation finished"
    );
    if ember_metrics::ENABLED {
        for (name, elapsed) in registry.scheduler().last_frame_timings() {
            tracing::info!(system = name, ?elapsed, "last frame");
        }
    }
    if let Some(submit) = registry.system::<RenderSubmit>(submit) {
        tracing::info!(draws = submit.submitted(), "draw commands submitted");
    }
    if let Ok(entity) = registry.entity(triangle) {
        if let Some(transform) = entity.get_component::<Transform>() {
            tracing::info!(rotation_y = transform.rot.y, "final triangle rotation");
        }
    }

    registry.clear();
    tracing::info!("shut down");
    Ok(())
}
