//! Space Tennis entry point
//!
//! Runs the match headless: fixed-timestep simulation with the self-playing
//! idle input, score updates printed as they happen, draw calls routed into
//! the null renderer. A real frontend would swap in its own [`DrawContext`]
//! and feed real key state into [`TickInput`].

use space_tennis::Settings;
use space_tennis::consts::SIM_DT;
use space_tennis::render::NullRenderer;
use space_tennis::sim::{GameEvent, GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let settings = match std::fs::read_to_string("settings.json") {
        Ok(text) => match Settings::from_json(&text) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("settings.json ignored: {e}");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };

    log::info!("Space Tennis starting with seed {}", settings.seed);

    let mut state = GameState::new(settings.seed, &settings.score_label, settings.aspect_ratio);
    let mut renderer = NullRenderer::default();

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let total_ticks = (settings.demo_seconds / SIM_DT) as u64;
    for _ in 0..total_ticks {
        tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            match event {
                GameEvent::PointScored { title, .. } => println!("{title}"),
                GameEvent::MatchOver { title } => println!("game over - {title}"),
            }
        }
        state.draw(&mut renderer);
    }

    log::info!(
        "demo finished after {} ticks and {} draw calls",
        state.time_ticks,
        renderer.draws
    );
}
