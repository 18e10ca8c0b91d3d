#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Room Crawl adapters.
//!
//! Backends receive a [`Scene`] snapshot and an update closure; the closure
//! runs the simulation and repopulates the scene, so backends never touch
//! the world directly.

use anyhow::Result as AnyResult;
use glam::Vec2;
use room_crawl_core::{CameraSnapshot, MovementIntent, PixelRect, RoomTag, TileKind};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Movement flags held while the frame was gathered.
    pub intent: MovementIntent,
    /// Whether the adapter detected an attack press on this frame.
    pub attack_pressed: bool,
    /// Whether the adapter detected a quit request on this frame.
    pub quit_requested: bool,
}

/// Floor and wall fill colors used when drawing a room.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomPalette {
    /// Fill used for passable floor tiles.
    pub floor: Color,
    /// Fill used for solid wall tiles.
    pub wall: Color,
}

impl RoomPalette {
    const BASE_FLOOR: Color = Color::from_rgb_u8(20, 20, 28);
    const BASE_WALL: Color = Color::from_rgb_u8(40, 60, 100);

    /// Derives a palette from a room's opaque visual tag.
    ///
    /// Adjacent rooms receive slightly different floor shades so crossing a
    /// doorway reads as a change of place.
    #[must_use]
    pub fn for_tag(tag: RoomTag) -> Self {
        let step = f32::from(tag.get() % 4) * 0.05;
        Self {
            floor: Self::BASE_FLOOR.lighten(step),
            wall: Self::BASE_WALL.lighten(step * 0.5),
        }
    }
}

/// Describes the active room's tile geometry for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomPresentation {
    /// Number of tile columns in the room.
    pub columns: u32,
    /// Number of tile rows in the room.
    pub rows: u32,
    /// Side length of a single square tile in pixels.
    pub tile_length: f32,
    /// Row-major tile kinds for the whole room.
    pub tiles: Vec<TileKind>,
    /// Fill colors derived from the room's visual tag.
    pub palette: RoomPalette,
}

impl RoomPresentation {
    /// Creates a new room descriptor.
    ///
    /// Returns an error when `tile_length` is not strictly positive.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        tiles: Vec<TileKind>,
        palette: RoomPalette,
    ) -> Result<Self, RenderingError> {
        if tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            tiles,
            palette,
        })
    }

    /// Total width of the room in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the room in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }
}

/// Player rendered as a filled rectangle at its room-local position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Room-local pixel position of the top-left corner.
    pub position: Vec2,
    /// Hitbox size in pixels.
    pub size: Vec2,
    /// Fill color of the player's body.
    pub color: Color,
    /// Whether the player is inside an attack recovery window.
    pub attacking: bool,
}

/// Enemy rendered as a filled rectangle while it remains alive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Room-local pixel position of the top-left corner.
    pub position: Vec2,
    /// Hitbox size in pixels.
    pub size: Vec2,
    /// Fill color of the enemy's body.
    pub color: Color,
}

/// Active melee strike rendered as a translucent rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackPresentation {
    /// Absolute room-pixel hitbox of the strike.
    pub rect: PixelRect,
    /// Fill color of the strike.
    pub color: Color,
}

/// Scene description combining the active room and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile geometry of the active room.
    pub room: RoomPresentation,
    /// Camera viewport clamped by the simulation.
    pub camera: CameraSnapshot,
    /// Player rendered every frame.
    pub player: PlayerPresentation,
    /// Enemy rendered while alive; `None` once dead.
    pub enemy: Option<EnemyPresentation>,
    /// Melee strikes active during the current tick.
    pub attacks: Vec<AttackPresentation>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        room: RoomPresentation,
        camera: CameraSnapshot,
        player: PlayerPresentation,
        enemy: Option<EnemyPresentation>,
        attacks: Vec<AttackPresentation>,
    ) -> Self {
        Self {
            room,
            camera,
            player,
            enemy,
            attacks,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Offset that centers an undersized room inside the viewport.
///
/// The camera clamp collapses to zero on an axis where the room is smaller
/// than the viewport; the renderer applies this offset so the room sits
/// centered rather than pinned to the window corner.
#[must_use]
pub fn view_offset(room_width: f32, room_height: f32, viewport: &CameraSnapshot) -> Vec2 {
    let spare_x = viewport.width as f32 - room_width;
    let spare_y = viewport.height as f32 - room_height;

    Vec2::new(
        if spare_x > 0.0 { spare_x * 0.5 } else { 0.0 },
        if spare_y > 0.0 { spare_y * 0.5 } else { 0.0 },
    )
}

/// Rendering backend capable of presenting Room Crawl scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the rendered frame
    /// delta and per-frame input captured by the adapter, and may mutate the
    /// scene before it is drawn. Returning from the closure never stops the
    /// loop; backends exit on their own quit signals.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile length must be positive to avoid zero-sized rooms.
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
        }
    }
}

impl Error for RenderingError {}
