//! Silent Salt's Journey: a level-based 2D exploration game
//!
//! Walk left and right through four small worlds and talk to the one
//! character living in each:
//! - Fixed 16 ms movement ticks, side-scrolling camera
//! - Proximity-triggered, line-by-line dialogue
//! - Chapters unlock in order; meeting everyone in the last one ends the journey
//! - Keyboard, gamepad (native) and touch joystick input

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;
mod ui;
mod world;

use std::time::Duration;

use macroquad::prelude::*;

use game::GameLoop;
use input::InputBindings;
use ui::{Layout, Presenter};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Silent Salt's Journey v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        // Start windowed on all platforms (WASM: browser handles sizing)
        #[cfg(not(target_arch = "wasm32"))]
        fullscreen: false,
        ..Default::default()
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: info for this crate)
#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("silent_salt=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    init_logging();

    let (catalog, config) = match world::load_for_config(config::load_or_default()) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "level catalog is unusable");
            return;
        }
    };
    tracing::info!(version = VERSION, levels = catalog.len(), "=== Silent Salt's Journey ===");

    let half_extent = config.viewport_half_extent;
    let mut game = GameLoop::new(catalog, config);
    let mut bindings = InputBindings::new();
    let mut presenter = Presenter::new();
    let mut snapshot = game.snapshot();

    loop {
        let dt = get_frame_time();
        let layout = Layout::new(screen_width(), screen_height(), half_extent);

        for event in bindings.poll(&layout, &snapshot) {
            game.send(event);
        }
        game.update(Duration::from_secs_f32(dt.max(0.0)));

        snapshot = game.snapshot();
        presenter.observe(&game.events, &snapshot);
        presenter.draw(&snapshot, &layout, &bindings.joystick, dt);

        game.events.clear_all();
        next_frame().await
    }
}
