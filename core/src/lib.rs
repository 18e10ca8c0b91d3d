#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Room Crawl engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Systems consume input snapshots and immutable views and
//! respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Room Crawl.";

/// Edge length of a single square tile measured in room pixels.
pub const TILE_LENGTH: i32 = 16;

/// Duration of one fixed simulation step (1/60 s).
pub const FIXED_STEP: Duration = Duration::from_nanos(16_666_667);

/// Classification of a single room tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Passable ground the player may occupy.
    Floor,
    /// Solid masonry that blocks movement.
    Wall,
}

impl TileKind {
    /// Reports whether the tile blocks movement.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Index within a room measured in whole tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord(u32);

impl TileCoord {
    /// Creates a new tile coordinate wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying tile index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position of a room within the room graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomCoord {
    column: u32,
    row: u32,
}

impl RoomCoord {
    /// Creates a new room coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column of the room within the graph.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row of the room within the graph.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Cardinal directions used for room traversal and doorways.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

/// Axis-aligned rectangle expressed in room-pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl PixelRect {
    /// Creates a new rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal position of the left edge.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical position of the top edge.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Width of the rectangle in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height of the rectangle in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Horizontal position one past the right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Vertical position one past the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Reports whether two rectangles overlap with strictly positive area.
    #[must_use]
    pub const fn intersects(&self, other: &PixelRect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }

        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Continuous position expressed in room-local pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point from pixel coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Hit points carried by a damageable entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the remaining hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the health reduced by one point, saturating at zero.
    #[must_use]
    pub const fn damaged(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

/// Movement flags supplied by the input collaborator once per tick.
///
/// The flags are non-exclusive; diagonal intent is valid and normalized by
/// the world before it is scaled to a velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MovementIntent {
    /// Intent to move toward decreasing y.
    pub up: bool,
    /// Intent to move toward increasing y.
    pub down: bool,
    /// Intent to move toward decreasing x.
    pub left: bool,
    /// Intent to move toward increasing x.
    pub right: bool,
}

impl MovementIntent {
    /// Creates an intent from the four movement flags.
    #[must_use]
    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Reports whether no movement flag is held.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Opaque visual tag attached to a room for presentation purposes only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomTag(u8);

impl RoomTag {
    /// Creates a new room tag.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the underlying tag value.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Tile layout supplied for a single room at configuration time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomLayout {
    tiles: Vec<TileKind>,
}

impl RoomLayout {
    /// Creates a layout from a row-major tile sequence.
    #[must_use]
    pub fn new(tiles: Vec<TileKind>) -> Self {
        Self { tiles }
    }

    /// Row-major tile sequence backing the layout.
    #[must_use]
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    /// Consumes the layout, yielding the underlying tile sequence.
    #[must_use]
    pub fn into_tiles(self) -> Vec<TileKind> {
        self.tiles
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the room graph from per-room tile layouts.
    ConfigureRooms {
        /// Number of room columns in the graph.
        grid_columns: u32,
        /// Number of room rows in the graph.
        grid_rows: u32,
        /// Number of tile columns in every room.
        room_columns: TileCoord,
        /// Number of tile rows in every room.
        room_rows: TileCoord,
        /// Row-major per-room layouts; malformed entries fail closed.
        layouts: Vec<RoomLayout>,
    },
    /// Fixes the camera viewport to the provided pixel dimensions.
    ConfigureCamera {
        /// Viewport width in pixels.
        width: u32,
        /// Viewport height in pixels.
        height: u32,
    },
    /// Replaces the player's movement intent for subsequent ticks.
    SetMovementIntent {
        /// Movement flags captured by the input collaborator.
        intent: MovementIntent,
    },
    /// Attack-input edge; ignored while the attack cooldown is running.
    PressAttack,
    /// Advances the simulation clock by one fixed step.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player's position changed during a tick.
    PlayerMoved {
        /// Position the player occupied before the tick.
        from: WorldPoint,
        /// Position the player occupies after the tick.
        to: WorldPoint,
    },
    /// Announces that the player crossed a doorway into another room.
    RoomChanged {
        /// Doorway the player exited through.
        direction: Direction,
        /// Room occupied before the transition.
        from: RoomCoord,
        /// Room occupied after the transition.
        to: RoomCoord,
    },
    /// Confirms that a melee attack hitbox was spawned.
    AttackSpawned {
        /// Absolute room-pixel hitbox fixed for the attack's lifetime.
        rect: PixelRect,
    },
    /// Reports that an attack hitbox expired and was removed.
    AttackExpired {
        /// Hitbox the attack occupied while active.
        rect: PixelRect,
    },
    /// Reports that the enemy was struck by an attack.
    EnemyDamaged {
        /// Hit points remaining after the strike.
        remaining: Health,
    },
    /// Announces that the enemy's hit points reached zero.
    EnemyDied,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Room-local position of the player's top-left corner.
    pub position: WorldPoint,
    /// Integer hitbox derived from the position and fixed player size.
    pub bounds: PixelRect,
    /// Movement flags active for the current tick.
    pub intent: MovementIntent,
    /// Seconds remaining before another attack may be triggered.
    pub attack_cooldown: f32,
    /// Indicates whether the player is inside an attack recovery window.
    pub attacking: bool,
}

/// Immutable representation of the enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Room-local position of the enemy's top-left corner.
    pub position: WorldPoint,
    /// Integer hitbox derived from the position and fixed enemy size.
    pub bounds: PixelRect,
    /// Hit points remaining.
    pub health: Health,
    /// Indicates whether the enemy still participates in combat.
    pub alive: bool,
}

/// Immutable representation of a single active attack hitbox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackSnapshot {
    /// Absolute room-pixel hitbox fixed at spawn time.
    pub rect: PixelRect,
    /// Seconds remaining before the attack expires.
    pub remaining: f32,
}

/// Read-only view over the attacks active during the current tick.
#[derive(Clone, Debug, Default)]
pub struct AttackView {
    snapshots: Vec<AttackSnapshot>,
}

impl AttackView {
    /// Creates a new attack view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<AttackSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured attack snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &AttackSnapshot> {
        self.snapshots.iter()
    }

    /// Number of attacks captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no attacks are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AttackSnapshot> {
        self.snapshots
    }
}

/// Immutable description of the camera's clamped viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSnapshot {
    /// Horizontal position of the viewport's top-left corner.
    pub x: f32,
    /// Vertical position of the viewport's top-left corner.
    pub y: f32,
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
}

impl CameraSnapshot {
    /// Integer view rectangle consumed by renderers.
    #[must_use]
    pub fn view_rect(&self) -> PixelRect {
        PixelRect::new(self.x as i32, self.y as i32, self.width as i32, self.height as i32)
    }
}
