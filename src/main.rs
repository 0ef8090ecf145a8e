use std::path::{Path, PathBuf};

use clap::Parser;
use isle_geom::Vec3;
use isle_sim::{InputIntent, SimConfig, SimEvent, Simulation, load_config_from_path};
use log::{LevelFilter, info, warn};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

#[derive(Parser, Debug)]
#[command(name = "isle", version, about = "Headless run of the island simulation")]
struct Args {
    /// Seed for terrain noise and every spawn roll.
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Frames to simulate before stopping.
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Fixed frame step in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// TOML config; defaults are used when the file is missing.
    #[arg(long, default_value = "config/isle.toml")]
    config: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    let level = args.log_level.parse().unwrap_or(LevelFilter::Info);
    let log_cfg = ConfigBuilder::new().set_target_level(LevelFilter::Error).build();
    if let Err(e) = TermLogger::init(level, log_cfg, TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("isle: logger init failed: {e}");
    }

    let cfg = load_config(&args.config);
    let mut sim = Simulation::new(cfg, args.seed);
    let mut pilot = Pilot::default();

    for _ in 0..args.frames {
        let input = pilot.drive(&sim);
        sim.step(args.dt, &input);
        for env in sim.drain_events() {
            match env.kind {
                SimEvent::ScoreChanged { delta, total } => {
                    info!("[tick {}] +{} score={}", env.tick, delta, total)
                }
                SimEvent::LivesChanged { lives } => info!("[tick {}] lives={}", env.tick, lives),
                _ => {}
            }
        }
        if sim.is_game_over() {
            break;
        }
    }

    let run = sim.run_state();
    info!(
        "finished t={:.1}s score={} lives={} ammo={} pirates={} game_over={}",
        sim.clock(),
        run.score,
        run.lives,
        run.ammo,
        sim.crew().pirates.len(),
        run.game_over
    );
}

fn load_config(path: &Path) -> SimConfig {
    if !path.exists() {
        info!("{} not found; using built-in defaults", path.display());
        return SimConfig::default();
    }
    match load_config_from_path(path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            warn!("failed to load {}: {}; using defaults", path.display(), e);
            SimConfig::default()
        }
    }
}

/// Scripted stand-in for a human: walks to the nearest collectible and fires
/// when a pirate is roughly ahead.
#[derive(Default)]
struct Pilot {
    wander: f32,
}

impl Pilot {
    fn drive(&mut self, sim: &Simulation) -> InputIntent {
        let me = sim.player().pos;
        let target = sim
            .collectibles()
            .items
            .iter()
            .map(|c| c.pos)
            .min_by(|a, b| me.horizontal_distance_sq(*a).total_cmp(&me.horizontal_distance_sq(*b)));

        let dir = match target {
            Some(t) if me.horizontal_distance_sq(t) > 1e-4 => (t - me).horizontal().normalized(),
            _ => {
                self.wander += 0.01;
                Vec3::from_heading(self.wander)
            }
        };

        let facing = sim.player().facing();
        let reach = sim.config().beam.length;
        let threat = sim.crew().alive().any(|p| {
            let to = (p.pos - me).horizontal();
            let d2 = to.length_sq();
            d2 > 1e-4 && d2 <= reach * reach && to.normalized().dot(facing) > 0.9
        });

        InputIntent {
            forward: true,
            attack: threat,
            camera_forward: dir,
            ..InputIntent::default()
        }
    }
}
