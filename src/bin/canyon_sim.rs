//! Headless endless-runner simulation
//!
//! Drives a full run without a renderer: builds a demo tile catalog,
//! wires the game loop to the bookkeeping scene registry, and steers the
//! player with a tiny autopilot that commits every turn it reaches and
//! hops now and then. Useful for watching the spawner's placement and
//! recycling behavior in the log.
//!
//! Usage:
//!
//! ```text
//! canyon-sim [config.json] [seed]
//! ```

use anyhow::{Context, Result};
use glam::Vec3;
use log::info;

use canyon_run_engine::game::{RunConfig, RunnerGame};
use canyon_run_engine::input::{Intent, IntentBindings, KeyCode};
use canyon_run_engine::physics::CollisionQuery;
use canyon_run_engine::player::TURN_PROBE_RADIUS;
use canyon_run_engine::track::{SegmentTemplate, TileCatalog, TurnKind};
use canyon_run_engine::world::{InstanceRegistry, PrefabId};

const TICK_RATE: f32 = 60.0;
const MAX_SIM_SECONDS: f32 = 120.0;

/// Tile set matching the shipped art: one straight tile, the three turn
/// tiles, and a couple of obstacle variants.
fn demo_catalog() -> Result<TileCatalog> {
    let straight = SegmentTemplate::straight(PrefabId(0), Vec3::new(4.0, 0.5, 4.0));
    let turn_footprint = Vec3::new(4.0, 0.5, 4.0);
    // Symmetric turn art: the pivot sits at the tile origin
    let turn_pivot = Vec3::ZERO;

    TileCatalog::new(
        straight,
        vec![
            SegmentTemplate::turn(PrefabId(1), TurnKind::Left, turn_footprint, turn_pivot),
            SegmentTemplate::turn(PrefabId(2), TurnKind::Right, turn_footprint, turn_pivot),
            SegmentTemplate::turn(PrefabId(3), TurnKind::Sideways, turn_footprint, turn_pivot),
        ],
        vec![
            SegmentTemplate::straight(PrefabId(10), Vec3::new(1.0, 1.0, 1.0)),
            SegmentTemplate::straight(PrefabId(11), Vec3::new(2.0, 0.8, 1.0)),
        ],
    )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            RunConfig::from_json(&json)?
        }
        None => RunConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok());

    let catalog = demo_catalog()?;
    let mut game = match seed {
        Some(seed) => RunnerGame::with_seed(config, catalog, InstanceRegistry::new(), seed)?,
        None => RunnerGame::new(config, catalog, InstanceRegistry::new())?,
    };

    // The keys a host would feed us; the autopilot presses them directly
    let bindings = IntentBindings::new();

    let dt = 1.0 / TICK_RATE;
    let mut turns_committed = 0u32;
    let mut last_direction = game.player().movement_direction();
    let mut last_pivot: Option<Vec3> = None;

    let total_ticks = (MAX_SIM_SECONDS * TICK_RATE) as u32;
    let mut ticks_run = 0;
    for tick in 0..total_ticks {
        ticks_run = tick + 1;
        // Autopilot: press the matching turn key whenever a fresh turn
        // tile is underfoot, and hop every couple of seconds for variety.
        // Intents reach the core already debounced, so one press per tile.
        let turn_layer = game.player().config().turn_layer;
        let contact = game.spawner().overlap_point(
            game.player().position(),
            TURN_PROBE_RADIUS,
            turn_layer,
        );
        if let Some(contact) = contact {
            let fresh = last_pivot.is_none_or(|p| (p - contact.pivot).length() > 0.5);
            if fresh {
                let key = match contact.kind {
                    TurnKind::Left => KeyCode::A,
                    TurnKind::Right => KeyCode::D,
                    TurnKind::Sideways if tick % 2 == 0 => KeyCode::A,
                    TurnKind::Sideways => KeyCode::D,
                };
                if let Some(intent) = bindings.intent_for(key) {
                    game.queue_intent(intent);
                    last_pivot = Some(contact.pivot);
                }
            }
        }
        if tick % (TICK_RATE as u32 * 2) == 90 {
            game.queue_intent(Intent::Jump);
        }

        game.tick(dt);

        let direction = game.player().movement_direction();
        if direction != last_direction {
            turns_committed += 1;
            last_direction = direction;
            info!(
                "turn #{turns_committed}: now heading {:?}, {} segments live",
                direction,
                game.spawner().segments().len()
            );
        }

        if !game.is_on_track() {
            info!("ran off the track after {:.1}s", tick as f32 * dt);
            break;
        }
    }

    let player = game.player();
    println!(
        "simulated {:.1}s: {} turns committed, final position {:?}, {} live instances, {} recycled",
        ticks_run as f32 * dt,
        turns_committed,
        player.position(),
        game.spawner().scene().len(),
        game.spawner().scene().destroyed_count(),
    );

    Ok(())
}
