//! Tile grids and the bounded room graph backing the dungeon.

use room_crawl_core::{
    Direction, PixelRect, RoomCoord, RoomLayout, RoomTag, TileCoord, TileKind, TILE_LENGTH,
};

/// Number of doorway tiles carved into the north and south walls.
pub(crate) const DOOR_TILES_HORIZONTAL: u32 = 3;

/// Number of doorway tiles carved into the west and east walls.
pub(crate) const DOOR_TILES_VERTICAL: u32 = 2;

/// Depth in pixels that door triggers extend past the room boundary.
const DOOR_TRIGGER_APRON: i32 = 8;

/// Immutable-per-room grid of tile kinds with bounds-aware solidity queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    columns: TileCoord,
    rows: TileCoord,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Builds a grid from a row-major tile sequence.
    ///
    /// Fails closed: a sequence whose length differs from `columns × rows`
    /// is replaced with an all-floor sequence of the correct length.
    #[must_use]
    pub fn load(columns: TileCoord, rows: TileCoord, tiles: Vec<TileKind>) -> Self {
        let expected_u64 = u64::from(columns.get()) * u64::from(rows.get());
        let expected = usize::try_from(expected_u64).unwrap_or(0);
        let tiles = if tiles.len() == expected {
            tiles
        } else {
            vec![TileKind::Floor; expected]
        };

        Self {
            columns,
            rows,
            tiles,
        }
    }

    /// Number of tile columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> TileCoord {
        self.columns
    }

    /// Number of tile rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> TileCoord {
        self.rows
    }

    /// Total width of the room measured in pixels.
    #[must_use]
    pub const fn width_px(&self) -> i32 {
        self.columns.get() as i32 * TILE_LENGTH
    }

    /// Total height of the room measured in pixels.
    #[must_use]
    pub const fn height_px(&self) -> i32 {
        self.rows.get() as i32 * TILE_LENGTH
    }

    /// Row-major tile sequence backing the grid.
    #[must_use]
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    /// Returns the tile kind at the provided tile coordinates.
    ///
    /// Any query outside `[0, columns) × [0, rows)` resolves to [`TileKind::Wall`],
    /// the closed-world safety boundary.
    #[must_use]
    pub fn tile_at(&self, tx: i32, ty: i32) -> TileKind {
        if tx < 0 || ty < 0 || tx >= self.columns.get() as i32 || ty >= self.rows.get() as i32 {
            return TileKind::Wall;
        }

        let index = ty as usize * self.columns.get() as usize + tx as usize;
        self.tiles.get(index).copied().unwrap_or(TileKind::Wall)
    }

    /// Tests a pixel-space rectangle against all tiles it covers.
    ///
    /// The rectangle is converted to an inclusive tile-index range by integer
    /// division with [`TILE_LENGTH`]; the rectangle is solid if any covered
    /// tile is solid.
    #[must_use]
    pub fn rect_collides_solid(&self, rect: &PixelRect) -> bool {
        let left_tile = rect.x() / TILE_LENGTH;
        let right_tile = (rect.x() + rect.width() - 1) / TILE_LENGTH;
        let top_tile = rect.y() / TILE_LENGTH;
        let bottom_tile = (rect.y() + rect.height() - 1) / TILE_LENGTH;

        for ty in top_tile..=bottom_tile {
            for tx in left_tile..=right_tile {
                if self.tile_at(tx, ty).is_solid() {
                    return true;
                }
            }
        }

        false
    }
}

/// Single cell of the room graph: a tile grid plus its visual tag.
#[derive(Clone, Debug)]
pub struct Room {
    grid: TileGrid,
    tag: RoomTag,
}

impl Room {
    /// Creates a room from a loaded grid and its presentation tag.
    #[must_use]
    pub fn new(grid: TileGrid, tag: RoomTag) -> Self {
        Self { grid, tag }
    }

    /// Tile grid describing the room's geometry.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Opaque visual tag surfaced to renderers.
    #[must_use]
    pub const fn tag(&self) -> RoomTag {
        self.tag
    }
}

/// Arena-style fixed 2D array of rooms addressed by [`RoomCoord`].
///
/// The current-room coordinate is the sole identity of "current room" and
/// changes only through the cardinal step operations, which silently absorb
/// steps that would leave the graph bounds.
#[derive(Clone, Debug)]
pub struct RoomGraph {
    columns: u32,
    rows: u32,
    rooms: Vec<Room>,
    current: RoomCoord,
}

impl RoomGraph {
    /// Builds a graph from a row-major room sequence.
    ///
    /// The starting coordinate is clamped into bounds so the graph always
    /// exposes a valid current room.
    #[must_use]
    pub(crate) fn new(columns: u32, rows: u32, rooms: Vec<Room>, start: RoomCoord) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let current = RoomCoord::new(
            start.column().min(columns - 1),
            start.row().min(rows - 1),
        );
        Self {
            columns,
            rows,
            rooms,
            current,
        }
    }

    /// Number of room columns in the graph.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of room rows in the graph.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Coordinate of the room the player currently occupies.
    #[must_use]
    pub const fn current_coord(&self) -> RoomCoord {
        self.current
    }

    /// Returns the room stored at the provided coordinate, if it exists.
    #[must_use]
    pub fn room_at(&self, coord: RoomCoord) -> Option<&Room> {
        self.index(coord).and_then(|index| self.rooms.get(index))
    }

    /// Active room referenced by the current coordinate.
    #[must_use]
    pub fn current_room(&self) -> &Room {
        self.room_at(self.current)
            .unwrap_or_else(|| &self.rooms[0])
    }

    /// Tile grid of the active room, shared by reference.
    #[must_use]
    pub fn current_grid(&self) -> &TileGrid {
        self.current_room().grid()
    }

    /// Steps one room toward decreasing rows; absorbed at the top edge.
    pub fn step_north(&mut self) -> bool {
        if self.current.row() > 0 {
            self.current = RoomCoord::new(self.current.column(), self.current.row() - 1);
            true
        } else {
            false
        }
    }

    /// Steps one room toward increasing rows; absorbed at the bottom edge.
    pub fn step_south(&mut self) -> bool {
        if self.current.row() + 1 < self.rows {
            self.current = RoomCoord::new(self.current.column(), self.current.row() + 1);
            true
        } else {
            false
        }
    }

    /// Steps one room toward decreasing columns; absorbed at the left edge.
    pub fn step_west(&mut self) -> bool {
        if self.current.column() > 0 {
            self.current = RoomCoord::new(self.current.column() - 1, self.current.row());
            true
        } else {
            false
        }
    }

    /// Steps one room toward increasing columns; absorbed at the right edge.
    pub fn step_east(&mut self) -> bool {
        if self.current.column() + 1 < self.columns {
            self.current = RoomCoord::new(self.current.column() + 1, self.current.row());
            true
        } else {
            false
        }
    }

    /// Dispatches a cardinal step, reporting whether the coordinate changed.
    pub fn step(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.step_north(),
            Direction::South => self.step_south(),
            Direction::West => self.step_west(),
            Direction::East => self.step_east(),
        }
    }

    fn index(&self, coord: RoomCoord) -> Option<usize> {
        if coord.column() < self.columns && coord.row() < self.rows {
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// First doorway tile column in the north and south walls.
pub(crate) fn horizontal_door_start(columns: TileCoord) -> u32 {
    columns.get().saturating_sub(DOOR_TILES_HORIZONTAL) / 2
}

/// First doorway tile row in the west and east walls.
pub(crate) fn vertical_door_start(rows: TileCoord) -> u32 {
    rows.get().saturating_sub(DOOR_TILES_VERTICAL) / 2
}

/// Door-trigger rectangle for one edge of the provided room dimensions.
///
/// Triggers sit at the midpoint of each edge and extend a few pixels past
/// the room boundary so fast movement cannot skip over them in a single
/// fixed step.
pub(crate) fn door_trigger(columns: TileCoord, rows: TileCoord, direction: Direction) -> PixelRect {
    let width_px = columns.get() as i32 * TILE_LENGTH;
    let height_px = rows.get() as i32 * TILE_LENGTH;
    let door_x = horizontal_door_start(columns) as i32 * TILE_LENGTH;
    let door_y = vertical_door_start(rows) as i32 * TILE_LENGTH;
    let horizontal_span = DOOR_TILES_HORIZONTAL as i32 * TILE_LENGTH;
    let vertical_span = DOOR_TILES_VERTICAL as i32 * TILE_LENGTH;

    match direction {
        Direction::North => PixelRect::new(
            door_x,
            -DOOR_TRIGGER_APRON,
            horizontal_span,
            2 * DOOR_TRIGGER_APRON,
        ),
        Direction::South => PixelRect::new(
            door_x,
            height_px - TILE_LENGTH,
            horizontal_span,
            TILE_LENGTH + DOOR_TRIGGER_APRON,
        ),
        Direction::West => PixelRect::new(
            -DOOR_TRIGGER_APRON,
            door_y,
            2 * DOOR_TRIGGER_APRON,
            vertical_span,
        ),
        Direction::East => PixelRect::new(
            width_px - TILE_LENGTH,
            door_y,
            TILE_LENGTH + DOOR_TRIGGER_APRON,
            vertical_span,
        ),
    }
}

/// Default room layout: a solid wall border with a centered doorway carved
/// into every edge.
pub(crate) fn carved_room_tiles(columns: TileCoord, rows: TileCoord) -> Vec<TileKind> {
    let column_count = columns.get();
    let row_count = rows.get();
    let capacity_u64 = u64::from(column_count) * u64::from(row_count);
    let capacity = usize::try_from(capacity_u64).unwrap_or(0);

    let mut tiles = vec![TileKind::Floor; capacity];
    if column_count == 0 || row_count == 0 {
        return tiles;
    }

    for x in 0..column_count {
        tiles[x as usize] = TileKind::Wall;
        tiles[(x + (row_count - 1) * column_count) as usize] = TileKind::Wall;
    }
    for y in 0..row_count {
        tiles[(y * column_count) as usize] = TileKind::Wall;
        tiles[(column_count - 1 + y * column_count) as usize] = TileKind::Wall;
    }

    let door_x = horizontal_door_start(columns);
    for dx in 0..DOOR_TILES_HORIZONTAL.min(column_count) {
        let x = door_x + dx;
        tiles[x as usize] = TileKind::Floor;
        tiles[(x + (row_count - 1) * column_count) as usize] = TileKind::Floor;
    }

    let door_y = vertical_door_start(rows);
    for dy in 0..DOOR_TILES_VERTICAL.min(row_count) {
        let y = door_y + dy;
        tiles[(y * column_count) as usize] = TileKind::Floor;
        tiles[(column_count - 1 + y * column_count) as usize] = TileKind::Floor;
    }

    tiles
}

/// Builds the row-major room sequence for a graph configuration.
///
/// Layouts are consumed in row-major graph order; a missing layout falls
/// back to the default carved room, and malformed layouts fail closed inside
/// [`TileGrid::load`]. Each room receives a distinct visual tag.
pub(crate) fn build_rooms(
    grid_columns: u32,
    grid_rows: u32,
    room_columns: TileCoord,
    room_rows: TileCoord,
    layouts: Vec<RoomLayout>,
) -> Vec<Room> {
    let room_count_u64 = u64::from(grid_columns.max(1)) * u64::from(grid_rows.max(1));
    let room_count = usize::try_from(room_count_u64).unwrap_or(1);

    let mut layouts = layouts.into_iter();
    let mut rooms = Vec::with_capacity(room_count);
    for index in 0..room_count {
        let tiles = match layouts.next() {
            Some(layout) => layout.into_tiles(),
            None => carved_room_tiles(room_columns, room_rows),
        };
        let grid = TileGrid::load(room_columns, room_rows, tiles);
        rooms.push(Room::new(grid, RoomTag::new(index as u8)));
    }

    rooms
}
