#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Room Crawl.
//!
//! The world owns the room graph, the player, the enemy, the transient
//! attack list, and the camera. All mutation flows through [`apply`], which
//! executes one [`Command`] at a time and reports what happened through
//! [`Event`] values. Every operation is total: malformed room layouts fail
//! closed, out-of-range queries resolve to solid tiles, and steps past the
//! world edge are silently absorbed.

mod rooms;

pub use rooms::{Room, RoomGraph, TileGrid};

use room_crawl_core::{
    Command, Direction, Event, Health, MovementIntent, PixelRect, RoomCoord, TileCoord,
    WorldPoint, TILE_LENGTH, WELCOME_BANNER,
};

const DEFAULT_GRID_COLUMNS: u32 = 2;
const DEFAULT_GRID_ROWS: u32 = 2;
const DEFAULT_ROOM_COLUMNS: TileCoord = TileCoord::new(10);
const DEFAULT_ROOM_ROWS: TileCoord = TileCoord::new(8);

/// Default viewport width adopted until a camera is configured.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 640;
/// Default viewport height adopted until a camera is configured.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 480;

const PLAYER_WIDTH: i32 = 16;
const PLAYER_HEIGHT: i32 = 16;
const PLAYER_SPEED: f32 = 80.0;
const PLAYER_SPAWN: WorldPoint = WorldPoint::new(64.0, 64.0);

const ENEMY_WIDTH: i32 = 16;
const ENEMY_HEIGHT: i32 = 16;
const ENEMY_SPAWN: WorldPoint = WorldPoint::new(128.0, 96.0);
const ENEMY_START_HEALTH: Health = Health::new(3);

const ATTACK_SIZE: i32 = 12;
const ATTACK_REACH: i32 = 18;
const ATTACK_LIFETIME_SECS: f32 = 0.15;
const ATTACK_COOLDOWN_SECS: f32 = 0.3;

// Timers whose durations are exact multiples of the fixed step must not
// linger an extra tick on accumulated float residue.
const TIMER_EPSILON: f32 = 1e-4;

/// Order in which door triggers are evaluated; the first hit wins.
const DOOR_PRIORITY: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// Represents the authoritative Room Crawl world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rooms: RoomGraph,
    player: Player,
    enemy: Enemy,
    attacks: Vec<Attack>,
    camera: Camera,
    tick_index: u64,
}

impl World {
    /// Creates the reference dungeon ready for simulation: a 2×2 graph of
    /// 10×8-tile rooms with doorways carved into every edge.
    #[must_use]
    pub fn new() -> Self {
        let rooms = rooms::build_rooms(
            DEFAULT_GRID_COLUMNS,
            DEFAULT_GRID_ROWS,
            DEFAULT_ROOM_COLUMNS,
            DEFAULT_ROOM_ROWS,
            Vec::new(),
        );
        let graph = RoomGraph::new(
            DEFAULT_GRID_COLUMNS,
            DEFAULT_GRID_ROWS,
            rooms,
            RoomCoord::new(0, DEFAULT_GRID_ROWS - 1),
        );
        let mut world = Self {
            banner: WELCOME_BANNER,
            rooms: graph,
            player: Player::at(PLAYER_SPAWN),
            enemy: Enemy::at(ENEMY_SPAWN),
            attacks: Vec::new(),
            camera: Camera::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            tick_index: 0,
        };
        world.sync_camera();
        world
    }

    fn reset_entities(&mut self) {
        self.player = Player::at(PLAYER_SPAWN);
        self.enemy = Enemy::at(ENEMY_SPAWN);
        self.attacks.clear();
    }

    fn sync_camera(&mut self) {
        let grid = self.rooms.current_grid();
        let room_width = grid.width_px();
        let room_height = grid.height_px();
        self.camera
            .follow(self.player.center(), room_width, room_height);
    }

    fn move_player(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let (vx, vy) = self.player.velocity();
        let dx = vx * dt;
        let dy = vy * dt;
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let before = self.player.position;
        let grid = self.rooms.current_grid();

        if dx != 0.0 {
            let new_x = self.player.position.x() + dx;
            let probe = Player::bounds_at(new_x, self.player.position.y());
            if !grid.rect_collides_solid(&probe) {
                self.player.position = WorldPoint::new(new_x, self.player.position.y());
            }
        }

        if dy != 0.0 {
            let new_y = self.player.position.y() + dy;
            let probe = Player::bounds_at(self.player.position.x(), new_y);
            if !grid.rect_collides_solid(&probe) {
                self.player.position = WorldPoint::new(self.player.position.x(), new_y);
            }
        }

        if self.player.position != before {
            out_events.push(Event::PlayerMoved {
                from: before,
                to: self.player.position,
            });
        }
    }

    fn handle_room_transition(&mut self, out_events: &mut Vec<Event>) {
        let grid = self.rooms.current_grid();
        let columns = grid.columns();
        let rows = grid.rows();
        let player_rect = self.player.bounds();

        for direction in DOOR_PRIORITY {
            let trigger = rooms::door_trigger(columns, rows, direction);
            if !player_rect.intersects(&trigger) {
                continue;
            }

            let from = self.rooms.current_coord();
            if self.rooms.step(direction) {
                let to = self.rooms.current_coord();
                self.enter_room_through(direction);
                out_events.push(Event::RoomChanged {
                    direction,
                    from,
                    to,
                });
            }
            // One transition per tick: the first trigger hit short-circuits
            // the remaining checks even when the step was absorbed.
            return;
        }
    }

    fn enter_room_through(&mut self, direction: Direction) {
        let grid = self.rooms.current_grid();
        let columns = grid.columns();
        let rows = grid.rows();
        let room_width = grid.width_px();
        let room_height = grid.height_px();

        let doorway_x = doorway_spawn_x(columns);
        let doorway_y = doorway_spawn_y(rows);
        let entry_margin = (2 * TILE_LENGTH) as f32;

        self.player.position = match direction {
            Direction::North => WorldPoint::new(doorway_x, room_height as f32 - entry_margin),
            Direction::South => WorldPoint::new(doorway_x, entry_margin),
            Direction::West => WorldPoint::new(room_width as f32 - entry_margin, doorway_y),
            Direction::East => WorldPoint::new(entry_margin, doorway_y),
        };

        // Recompute immediately so the same-frame render uses the new room.
        self.camera
            .follow(self.player.center(), room_width, room_height);
    }

    fn update_cooldown(&mut self, dt: f32) {
        if self.player.attack_cooldown > 0.0 {
            let remaining = self.player.attack_cooldown - dt;
            if remaining <= TIMER_EPSILON {
                self.player.attack_cooldown = 0.0;
                self.player.attacking = false;
            } else {
                self.player.attack_cooldown = remaining;
            }
        }
    }

    fn update_attacks(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        for attack in &mut self.attacks {
            attack.remaining -= dt;
        }

        self.attacks.retain(|attack| {
            if attack.remaining > TIMER_EPSILON {
                true
            } else {
                out_events.push(Event::AttackExpired { rect: attack.rect });
                false
            }
        });
    }

    fn resolve_combat(&mut self, out_events: &mut Vec<Event>) {
        if !self.enemy.alive() {
            return;
        }

        let enemy_bounds = self.enemy.bounds();
        for attack in &self.attacks {
            if attack.rect.intersects(&enemy_bounds) {
                self.enemy.health = self.enemy.health.damaged();
                out_events.push(Event::EnemyDamaged {
                    remaining: self.enemy.health,
                });
                if self.enemy.health.is_zero() {
                    out_events.push(Event::EnemyDied);
                }
                // At most one hit per enemy per tick.
                break;
            }
        }
    }

    fn press_attack(&mut self, out_events: &mut Vec<Event>) {
        if self.player.attack_cooldown > 0.0 {
            return;
        }

        self.player.attacking = true;
        self.player.attack_cooldown = ATTACK_COOLDOWN_SECS;

        let rect = self.player.attack_rect();
        self.attacks.push(Attack {
            rect,
            remaining: ATTACK_LIFETIME_SECS,
        });
        out_events.push(Event::AttackSpawned { rect });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureRooms {
            grid_columns,
            grid_rows,
            room_columns,
            room_rows,
            layouts,
        } => {
            let rooms =
                rooms::build_rooms(grid_columns, grid_rows, room_columns, room_rows, layouts);
            let start_row = grid_rows.max(1) - 1;
            world.rooms = RoomGraph::new(
                grid_columns,
                grid_rows,
                rooms,
                RoomCoord::new(0, start_row),
            );
            world.reset_entities();
            world.sync_camera();
        }
        Command::ConfigureCamera { width, height } => {
            world.camera.resize(width, height);
            world.sync_camera();
        }
        Command::SetMovementIntent { intent } => {
            world.player.intent = intent;
        }
        Command::PressAttack => {
            world.press_attack(out_events);
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            let dt = dt.as_secs_f32();
            world.move_player(dt, out_events);
            world.handle_room_transition(out_events);
            world.update_cooldown(dt);
            world.update_attacks(dt, out_events);
            world.resolve_combat(out_events);
            world.sync_camera();
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use room_crawl_core::{
        AttackSnapshot, AttackView, CameraSnapshot, EnemySnapshot, PlayerSnapshot, RoomCoord,
        RoomTag,
    };

    use super::{RoomGraph, TileGrid, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the room graph.
    #[must_use]
    pub fn room_graph(world: &World) -> &RoomGraph {
        &world.rooms
    }

    /// Coordinate of the room the player currently occupies.
    #[must_use]
    pub fn current_room_coord(world: &World) -> RoomCoord {
        world.rooms.current_coord()
    }

    /// Tile grid of the active room, shared by reference.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        world.rooms.current_grid()
    }

    /// Visual tag of the active room.
    #[must_use]
    pub fn room_tag(world: &World) -> RoomTag {
        world.rooms.current_room().tag()
    }

    /// Pixel dimensions of the active room.
    #[must_use]
    pub fn room_pixel_size(world: &World) -> (i32, i32) {
        let grid = world.rooms.current_grid();
        (grid.width_px(), grid.height_px())
    }

    /// Captures a read-only snapshot of the player.
    #[must_use]
    pub fn player_snapshot(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            bounds: world.player.bounds(),
            intent: world.player.intent,
            attack_cooldown: world.player.attack_cooldown,
            attacking: world.player.attacking,
        }
    }

    /// Captures a read-only snapshot of the enemy.
    #[must_use]
    pub fn enemy_snapshot(world: &World) -> EnemySnapshot {
        EnemySnapshot {
            position: world.enemy.position,
            bounds: world.enemy.bounds(),
            health: world.enemy.health,
            alive: world.enemy.alive(),
        }
    }

    /// Captures a read-only view of the active attack hitboxes.
    #[must_use]
    pub fn attack_view(world: &World) -> AttackView {
        let snapshots = world
            .attacks
            .iter()
            .map(|attack| AttackSnapshot {
                rect: attack.rect,
                remaining: attack.remaining,
            })
            .collect();
        AttackView::from_snapshots(snapshots)
    }

    /// Captures the camera's clamped viewport.
    #[must_use]
    pub fn camera_snapshot(world: &World) -> CameraSnapshot {
        CameraSnapshot {
            x: world.camera.x(),
            y: world.camera.y(),
            width: world.camera.width(),
            height: world.camera.height(),
        }
    }

    /// Number of fixed steps the world has executed.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

/// Viewport derivation that tracks a target point within room bounds.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    width: u32,
    height: u32,
    x: f32,
    y: f32,
}

impl Camera {
    /// Creates a camera with the provided viewport dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Horizontal position of the viewport's top-left corner.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical position of the viewport's top-left corner.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Viewport width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Viewport height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Centers the viewport on the target point, clamped so the view never
    /// leaves `[0, room_width_px] × [0, room_height_px]`.
    ///
    /// When the room is smaller than the viewport on an axis the clamp
    /// collapses to zero and the renderer centers the undersized room.
    pub fn follow(&mut self, target: WorldPoint, room_width_px: i32, room_height_px: i32) {
        let half_width = self.width as f32 * 0.5;
        let half_height = self.height as f32 * 0.5;

        let max_x = (room_width_px as f32 - self.width as f32).max(0.0);
        let max_y = (room_height_px as f32 - self.height as f32).max(0.0);

        self.x = (target.x() - half_width).clamp(0.0, max_x);
        self.y = (target.y() - half_height).clamp(0.0, max_y);
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: WorldPoint,
    intent: MovementIntent,
    attack_cooldown: f32,
    attacking: bool,
}

impl Player {
    fn at(position: WorldPoint) -> Self {
        Self {
            position,
            intent: MovementIntent::default(),
            attack_cooldown: 0.0,
            attacking: false,
        }
    }

    fn bounds(&self) -> PixelRect {
        Self::bounds_at(self.position.x(), self.position.y())
    }

    fn bounds_at(x: f32, y: f32) -> PixelRect {
        PixelRect::new(x as i32, y as i32, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn center(&self) -> WorldPoint {
        WorldPoint::new(
            self.position.x() + PLAYER_WIDTH as f32 * 0.5,
            self.position.y() + PLAYER_HEIGHT as f32 * 0.5,
        )
    }

    /// Velocity in pixels per second derived from the intent flags.
    ///
    /// The intent vector is normalized to unit length when its magnitude
    /// exceeds one so diagonal movement is never faster than axial movement.
    fn velocity(&self) -> (f32, f32) {
        let mut vx = 0.0_f32;
        let mut vy = 0.0_f32;

        if self.intent.up {
            vy -= 1.0;
        }
        if self.intent.down {
            vy += 1.0;
        }
        if self.intent.left {
            vx -= 1.0;
        }
        if self.intent.right {
            vx += 1.0;
        }

        let magnitude = (vx * vx + vy * vy).sqrt();
        if magnitude > 1.0 {
            vx /= magnitude;
            vy /= magnitude;
        }

        (vx * PLAYER_SPEED, vy * PLAYER_SPEED)
    }

    /// Hitbox for a new attack, offset in the prioritized intent direction
    /// and falling back to below the player when no direction is held.
    fn attack_rect(&self) -> PixelRect {
        let mut ax = self.position.x() as i32;
        let mut ay = self.position.y() as i32;

        if self.intent.up {
            ay -= ATTACK_REACH;
        } else if self.intent.down {
            ay += PLAYER_HEIGHT;
        } else if self.intent.left {
            ax -= ATTACK_REACH;
        } else if self.intent.right {
            ax += PLAYER_WIDTH;
        } else {
            ay += PLAYER_HEIGHT;
        }

        PixelRect::new(ax, ay, ATTACK_SIZE, ATTACK_SIZE)
    }
}

#[derive(Clone, Copy, Debug)]
struct Enemy {
    position: WorldPoint,
    health: Health,
}

impl Enemy {
    fn at(position: WorldPoint) -> Self {
        Self {
            position,
            health: ENEMY_START_HEALTH,
        }
    }

    fn alive(&self) -> bool {
        !self.health.is_zero()
    }

    fn bounds(&self) -> PixelRect {
        PixelRect::new(
            self.position.x() as i32,
            self.position.y() as i32,
            ENEMY_WIDTH,
            ENEMY_HEIGHT,
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct Attack {
    rect: PixelRect,
    remaining: f32,
}

fn doorway_spawn_x(columns: TileCoord) -> f32 {
    let door_x = rooms::horizontal_door_start(columns) as i32 * TILE_LENGTH;
    let span = rooms::DOOR_TILES_HORIZONTAL as i32 * TILE_LENGTH;
    (door_x + (span - PLAYER_WIDTH) / 2) as f32
}

fn doorway_spawn_y(rows: TileCoord) -> f32 {
    let door_y = rooms::vertical_door_start(rows) as i32 * TILE_LENGTH;
    let span = rooms::DOOR_TILES_VERTICAL as i32 * TILE_LENGTH;
    (door_y + (span - PLAYER_HEIGHT) / 2) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_crawl_core::{RoomLayout, TileKind, FIXED_STEP};

    fn tick(world: &mut World, events: &mut Vec<Event>) {
        apply(world, Command::Tick { dt: FIXED_STEP }, events);
    }

    fn set_intent(world: &mut World, up: bool, down: bool, left: bool, right: bool) {
        let mut events = Vec::new();
        apply(
            world,
            Command::SetMovementIntent {
                intent: MovementIntent::new(up, down, left, right),
            },
            &mut events,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn new_world_starts_in_the_bottom_left_room() {
        let world = World::new();
        assert_eq!(query::current_room_coord(&world), RoomCoord::new(0, 1));
        assert_eq!(query::room_pixel_size(&world), (160, 128));
    }

    #[test]
    fn unobstructed_axial_move_advances_by_speed_times_dt() {
        let mut world = World::new();
        let mut events = Vec::new();
        set_intent(&mut world, false, false, false, true);

        tick(&mut world, &mut events);

        let player = query::player_snapshot(&world);
        assert!((player.position.x() - 65.333_34).abs() < 1e-3);
        assert_eq!(player.position.y(), 64.0);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::PlayerMoved { .. })));
    }

    // 10×8 all-floor layout with a solid interior wall along tile column 5,
    // directly in the path of a player standing at (64, 64).
    fn walled_layouts() -> Vec<RoomLayout> {
        let mut tiles = vec![TileKind::Floor; 80];
        for y in 0..8 {
            tiles[y * 10 + 5] = TileKind::Wall;
        }
        vec![RoomLayout::new(tiles); 4]
    }

    #[test]
    fn move_into_wall_is_rejected_on_that_axis_only() {
        let columns = TileCoord::new(10);
        let rows = TileCoord::new(8);
        let layouts = walled_layouts();

        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureRooms {
                grid_columns: 2,
                grid_rows: 2,
                room_columns: columns,
                room_rows: rows,
                layouts,
            },
            &mut events,
        );

        set_intent(&mut world, false, false, false, true);
        tick(&mut world, &mut events);

        let player = query::player_snapshot(&world);
        assert_eq!(player.position.x(), 64.0);
        assert_eq!(player.position.y(), 64.0);
    }

    #[test]
    fn diagonal_move_slides_along_the_blocked_axis() {
        let columns = TileCoord::new(10);
        let rows = TileCoord::new(8);
        let layouts = walled_layouts();

        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureRooms {
                grid_columns: 2,
                grid_rows: 2,
                room_columns: columns,
                room_rows: rows,
                layouts,
            },
            &mut events,
        );

        set_intent(&mut world, true, false, false, true);
        tick(&mut world, &mut events);

        let player = query::player_snapshot(&world);
        assert_eq!(player.position.x(), 64.0, "x axis blocked by the wall");
        assert!(player.position.y() < 64.0, "y axis slides freely");
    }

    #[test]
    fn diagonal_speed_never_exceeds_axial_speed() {
        let world = World::new();
        let mut player = world.player;
        player.intent = MovementIntent::new(true, false, false, true);

        let (vx, vy) = player.velocity();
        let speed = (vx * vx + vy * vy).sqrt();
        assert!(speed <= PLAYER_SPEED + 1e-3);
        assert!((speed - PLAYER_SPEED).abs() < 1e-3);
    }

    #[test]
    fn attack_spawns_only_when_cooldown_is_ready() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::PressAttack, &mut events);
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::AttackSpawned { .. }))
                .count(),
            1
        );

        apply(&mut world, Command::PressAttack, &mut events);
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::AttackSpawned { .. }))
                .count(),
            1,
            "second press during cooldown is ignored"
        );

        let player = query::player_snapshot(&world);
        assert!(player.attacking);
        assert!((player.attack_cooldown - ATTACK_COOLDOWN_SECS).abs() < f32::EPSILON);
    }

    #[test]
    fn attack_expires_on_the_ninth_tick() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::PressAttack, &mut events);

        for _ in 0..8 {
            tick(&mut world, &mut events);
        }
        assert_eq!(query::attack_view(&world).len(), 1);

        tick(&mut world, &mut events);
        assert!(query::attack_view(&world).is_empty());
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::AttackExpired { .. })));
    }

    #[test]
    fn attacking_flag_clears_when_the_cooldown_expires() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::PressAttack, &mut events);

        // 0.3 s cooldown spans 18 fixed steps.
        for _ in 0..17 {
            tick(&mut world, &mut events);
        }
        assert!(query::player_snapshot(&world).attacking);

        tick(&mut world, &mut events);
        let player = query::player_snapshot(&world);
        assert!(!player.attacking);
        assert_eq!(player.attack_cooldown, 0.0);
    }

    #[test]
    fn downward_attack_is_the_idle_fallback() {
        let world = World::new();
        let rect = world.player.attack_rect();
        assert_eq!(rect, PixelRect::new(64, 64 + PLAYER_HEIGHT, 12, 12));
    }

    #[test]
    fn enemy_takes_one_hit_per_tick_at_most() {
        let mut world = World::new();
        let mut events = Vec::new();

        // Two overlapping attacks placed directly on the enemy.
        world.attacks.push(Attack {
            rect: world.enemy.bounds(),
            remaining: 1.0,
        });
        world.attacks.push(Attack {
            rect: world.enemy.bounds(),
            remaining: 1.0,
        });

        tick(&mut world, &mut events);
        assert_eq!(query::enemy_snapshot(&world).health, Health::new(2));

        tick(&mut world, &mut events);
        assert_eq!(query::enemy_snapshot(&world).health, Health::new(1));
    }

    #[test]
    fn dead_enemy_never_changes_again() {
        let mut world = World::new();
        let mut events = Vec::new();
        world.attacks.push(Attack {
            rect: world.enemy.bounds(),
            remaining: 10.0,
        });

        for _ in 0..3 {
            tick(&mut world, &mut events);
        }

        let enemy = query::enemy_snapshot(&world);
        assert!(!enemy.alive);
        assert!(enemy.health.is_zero());
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::EnemyDied))
                .count(),
            1
        );

        tick(&mut world, &mut events);
        let enemy = query::enemy_snapshot(&world);
        assert!(enemy.health.is_zero());
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::EnemyDied))
                .count(),
            1,
            "death is announced exactly once"
        );
    }

    #[test]
    fn expired_attacks_never_strike() {
        let mut world = World::new();
        let mut events = Vec::new();
        world.attacks.push(Attack {
            rect: world.enemy.bounds(),
            remaining: 0.001,
        });

        tick(&mut world, &mut events);

        // The attack expired during this tick's lifetime update, which runs
        // before combat resolution.
        assert!(query::attack_view(&world).is_empty());
        assert_eq!(query::enemy_snapshot(&world).health, ENEMY_START_HEALTH);
    }

    #[test]
    fn north_transition_repositions_just_inside_the_south_wall() {
        let mut world = World::new();
        let mut events = Vec::new();
        assert_eq!(query::current_room_coord(&world), RoomCoord::new(0, 1));

        // Place the player inside the north door trigger.
        world.player.position = WorldPoint::new(64.0, 2.0);
        tick(&mut world, &mut events);

        assert_eq!(query::current_room_coord(&world), RoomCoord::new(0, 0));
        let player = query::player_snapshot(&world);
        assert_eq!(player.position.x(), 64.0);
        assert_eq!(player.position.y(), 128.0 - 2.0 * TILE_LENGTH as f32);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::RoomChanged {
                direction: Direction::North,
                ..
            }
        )));
    }

    #[test]
    fn absorbed_transition_leaves_the_player_in_place() {
        let mut world = World::new();
        let mut events = Vec::new();

        // Move to the top-left room, then press into its north trigger.
        world.player.position = WorldPoint::new(64.0, 2.0);
        tick(&mut world, &mut events);
        assert_eq!(query::current_room_coord(&world), RoomCoord::new(0, 0));

        world.player.position = WorldPoint::new(64.0, 2.0);
        events.clear();
        tick(&mut world, &mut events);

        assert_eq!(query::current_room_coord(&world), RoomCoord::new(0, 0));
        let player = query::player_snapshot(&world);
        assert_eq!(player.position, WorldPoint::new(64.0, 2.0));
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::RoomChanged { .. })));
    }

    #[test]
    fn camera_clamps_to_room_bounds() {
        let mut camera = Camera::new(100, 80);

        camera.follow(WorldPoint::new(10.0, 10.0), 160, 128);
        assert_eq!((camera.x(), camera.y()), (0.0, 0.0));

        camera.follow(WorldPoint::new(155.0, 125.0), 160, 128);
        assert_eq!((camera.x(), camera.y()), (60.0, 48.0));

        camera.follow(WorldPoint::new(80.0, 64.0), 160, 128);
        assert_eq!((camera.x(), camera.y()), (30.0, 24.0));
    }

    #[test]
    fn camera_pins_to_origin_for_undersized_rooms() {
        let mut camera = Camera::new(640, 480);
        camera.follow(WorldPoint::new(150.0, 120.0), 160, 128);
        assert_eq!((camera.x(), camera.y()), (0.0, 0.0));
    }

    #[test]
    fn configure_rooms_fails_closed_on_malformed_layouts() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureRooms {
                grid_columns: 1,
                grid_rows: 1,
                room_columns: TileCoord::new(6),
                room_rows: TileCoord::new(5),
                layouts: vec![RoomLayout::new(vec![TileKind::Wall; 7])],
            },
            &mut events,
        );

        let grid = query::tile_grid(&world);
        assert_eq!(grid.tiles().len(), 30);
        assert!(grid.tiles().iter().all(|tile| *tile == TileKind::Floor));
    }
}
