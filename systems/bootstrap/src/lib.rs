#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Room Crawl experience.

use room_crawl_core::{CameraSnapshot, RoomTag};
use room_crawl_world::{query, TileGrid, World};

/// Produces data required to greet the player and open the first view.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the starting room's tile grid required for rendering.
    #[must_use]
    pub fn tile_grid<'world>(&self, world: &'world World) -> &'world TileGrid {
        query::tile_grid(world)
    }

    /// Exposes the starting room's visual tag for palette selection.
    #[must_use]
    pub fn room_tag(&self, world: &World) -> RoomTag {
        query::room_tag(world)
    }

    /// Exposes the camera viewport valid for the first rendered frame.
    #[must_use]
    pub fn camera(&self, world: &World) -> CameraSnapshot {
        query::camera_snapshot(world)
    }
}
