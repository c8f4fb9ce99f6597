//! Headless animation driver.
//!
//! Loads settings and animation definitions, spawns a small demo scene and
//! runs the fixed tick loop: the tick schedule resolves every animation, then
//! the render phase collects overlay draws. Cue sounds go to the background
//! audio thread.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --ticks 300 --save
//! cargo run -- --load
//! ```

use std::path::PathBuf;

use animatedcomp::game;
use animatedcomp::resources::animateddefs::AnimatedDefs;
use animatedcomp::resources::audio::{setup_audio, shutdown_audio};
use animatedcomp::resources::gameconfig::GameConfig;
use animatedcomp::resources::tickmanager::TickManager;
use animatedcomp::savegame;
use animatedcomp::systems::animation::animated_tick;
use animatedcomp::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use animatedcomp::systems::render::collect_overlay_draws;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{debug, error, info, warn};

/// Animated frame cycling on a fixed tick clock
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Animation definitions (JSON). Overrides the config file.
    #[arg(long, value_name = "PATH")]
    defs: Option<PathBuf>,

    /// Number of ticks to simulate. Overrides the config file.
    #[arg(long)]
    ticks: Option<u64>,

    /// Restore animation state from the save file before running.
    #[arg(long)]
    load: bool,

    /// Write animation state to the save file after running.
    #[arg(long)]
    save: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("Config not loaded, using defaults: {}", e);
    }
    if let Some(defs) = cli.defs {
        config.defs_path = defs;
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }

    let defs = match AnimatedDefs::load_from_file(&config.defs_path) {
        Ok(defs) => defs,
        Err(e) => {
            warn!("Definitions not loaded, using demo set: {}", e);
            game::demo_defs()
        }
    };

    let mut world = game::setup_world(&config, defs);
    if let Err(e) = setup_audio(&mut world) {
        error!("{}", e);
        std::process::exit(1);
    }
    game::spawn_demo_entities(&mut world);

    if cli.load {
        match savegame::load_from_file(&config.save_path) {
            Ok(save) => {
                savegame::restore(&mut world, &save);
            }
            Err(e) => {
                error!("Failed to load {:?}: {}", config.save_path, e);
                shutdown_audio(&mut world);
                std::process::exit(1);
            }
        }
    }

    let mut tick = game::tick_schedule();
    tick.add_systems(
        // audio systems must be together
        (
            forward_audio_cmds,
            update_bevy_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
        )
            .chain()
            .after(animated_tick),
    );
    let mut render = game::render_schedule();

    info!("Running {} ticks", config.ticks);
    for _ in 0..config.ticks {
        tick.run(&mut world);
        render.run(&mut world);

        let overlays = collect_overlay_draws(&mut world);
        let clock = *world.resource::<TickManager>();
        if clock.ticks_game % i64::from(clock.ticks_per_second) == 0 {
            for draw in &overlays {
                debug!(
                    "tick {}: {:?} draws '{}' at ({:.1}, {:.1})",
                    clock.ticks_game, draw.entity, draw.frame.path, draw.position.x, draw.position.y
                );
            }
        }
        world.clear_trackers();
    }

    if cli.save {
        let save = savegame::snapshot(&mut world);
        if let Err(e) = savegame::save_to_file(&save, &config.save_path) {
            error!("Failed to save {:?}: {}", config.save_path, e);
            shutdown_audio(&mut world);
            std::process::exit(1);
        }
    }

    info!(
        "Finished at tick {}",
        world.resource::<TickManager>().ticks_game
    );
    shutdown_audio(&mut world);
}
