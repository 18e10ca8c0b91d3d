#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Room Crawl experience.
//!
//! The adapter owns frame pacing: rendered frame deltas accumulate into a
//! capped reservoir that is drained in fixed 1/60 s steps, so the world
//! advances deterministically no matter how the display paces frames.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use room_crawl_core::{Command, Event, MovementIntent, FIXED_STEP, TILE_LENGTH};
use room_crawl_rendering::{
    AttackPresentation, Color, EnemyPresentation, PlayerPresentation, Presentation,
    RenderingBackend, RoomPalette, RoomPresentation, Scene,
};
use room_crawl_rendering_macroquad::MacroquadBackend;
use room_crawl_system_bootstrap::Bootstrap;
use room_crawl_system_player_control::{ControlFrame, PlayerControl};
use room_crawl_world::{
    self as world, query, World, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
};

const WINDOW_TITLE: &str = "Room Crawl";
const CLEAR_COLOR: Color = Color::from_rgb_u8(8, 8, 12);
const PLAYER_COLOR: Color = Color::from_rgb_u8(0, 200, 0);
const ENEMY_COLOR: Color = Color::from_rgb_u8(180, 40, 40);
const ATTACK_COLOR: Color = Color::new(1.0, 1.0, 0.0, 0.7);

/// Cap on accumulated frame time so a stalled frame cannot trigger a
/// spiral of catch-up steps.
const MAX_FRAME_ACCUMULATION: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(name = "room-crawl", about = "Fixed-timestep dungeon room crawler")]
struct Args {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    height: u32,

    /// Render as fast as possible instead of syncing to the display.
    #[arg(long)]
    no_vsync: bool,

    /// Print frame rate metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Run the simulation for the given number of fixed steps without
    /// opening a window, then print a run summary.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

/// Entry point for the Room Crawl command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let mut world = World::new();
    let bootstrap = Bootstrap::default();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureCamera {
            width: args.width,
            height: args.height,
        },
        &mut events,
    );

    println!("{}", bootstrap.welcome_banner(&world));

    if let Some(ticks) = args.headless {
        run_headless(&mut world, ticks);
        return Ok(());
    }

    let scene = build_scene(&world, &bootstrap)?;
    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, scene);

    let mut control = PlayerControl::new();
    let mut accumulator = Duration::ZERO;

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |frame_dt, input, scene| {
        control.register_frame(ControlFrame::new(input.intent, input.attack_pressed));

        accumulator = (accumulator + frame_dt).min(MAX_FRAME_ACCUMULATION);
        while accumulator >= FIXED_STEP {
            accumulator -= FIXED_STEP;
            let mut events = Vec::new();
            step_world(&mut world, &mut control, &mut events);
        }

        populate_scene(&world, scene);
    })
}

/// Runs one fixed step: the control system's command batch followed by the
/// tick itself.
fn step_world(world: &mut World, control: &mut PlayerControl, events: &mut Vec<Event>) {
    let mut commands = Vec::new();
    control.emit_step_commands(&mut commands);
    commands.push(Command::Tick { dt: FIXED_STEP });
    for command in commands {
        world::apply(world, command, events);
    }
}

/// Drives the simulation without a window: the player marches north with an
/// opening attack, crossing into the next room and pressing against the
/// world edge.
fn run_headless(world: &mut World, ticks: u64) {
    let mut control = PlayerControl::new();
    let mut events = Vec::new();
    let march_north = MovementIntent::new(true, false, false, false);

    for tick in 0..ticks {
        control.register_frame(ControlFrame::new(march_north, tick == 0));
        step_world(world, &mut control, &mut events);
    }

    let room = query::current_room_coord(world);
    let player = query::player_snapshot(world);
    let enemy = query::enemy_snapshot(world);
    let transitions = events
        .iter()
        .filter(|event| matches!(event, Event::RoomChanged { .. }))
        .count();

    println!("ran {} fixed steps", query::tick_index(world));
    println!(
        "room ({}, {}), player at ({:.1}, {:.1})",
        room.column(),
        room.row(),
        player.position.x(),
        player.position.y(),
    );
    println!(
        "{} room transitions, enemy hp {}",
        transitions,
        enemy.health.get(),
    );
}

fn build_scene(world: &World, bootstrap: &Bootstrap) -> Result<Scene> {
    let grid = bootstrap.tile_grid(world);
    let room = RoomPresentation::new(
        grid.columns().get(),
        grid.rows().get(),
        TILE_LENGTH as f32,
        grid.tiles().to_vec(),
        RoomPalette::for_tag(bootstrap.room_tag(world)),
    )?;

    let player = query::player_snapshot(world);
    let mut scene = Scene::new(
        room,
        bootstrap.camera(world),
        PlayerPresentation {
            position: Vec2::new(player.position.x(), player.position.y()),
            size: Vec2::new(player.bounds.width() as f32, player.bounds.height() as f32),
            color: PLAYER_COLOR,
            attacking: player.attacking,
        },
        None,
        Vec::new(),
    );
    populate_scene(world, &mut scene);
    Ok(scene)
}

/// Refreshes the scene from world queries after the frame's fixed steps.
fn populate_scene(world: &World, scene: &mut Scene) {
    let grid = query::tile_grid(world);
    scene.room.columns = grid.columns().get();
    scene.room.rows = grid.rows().get();
    scene.room.tiles.clear();
    scene.room.tiles.extend_from_slice(grid.tiles());
    scene.room.palette = RoomPalette::for_tag(query::room_tag(world));

    scene.camera = query::camera_snapshot(world);

    let player = query::player_snapshot(world);
    scene.player.position = Vec2::new(player.position.x(), player.position.y());
    scene.player.size = Vec2::new(player.bounds.width() as f32, player.bounds.height() as f32);
    scene.player.attacking = player.attacking;

    let enemy = query::enemy_snapshot(world);
    scene.enemy = enemy.alive.then(|| EnemyPresentation {
        position: Vec2::new(enemy.position.x(), enemy.position.y()),
        size: Vec2::new(enemy.bounds.width() as f32, enemy.bounds.height() as f32),
        color: ENEMY_COLOR,
    });

    scene.attacks.clear();
    scene.attacks.extend(
        query::attack_view(world)
            .iter()
            .map(|attack| AttackPresentation {
                rect: attack.rect,
                color: ATTACK_COLOR,
            }),
    );
}
