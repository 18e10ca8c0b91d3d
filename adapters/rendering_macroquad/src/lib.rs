#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Room Crawl.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use room_crawl_core::MovementIntent;
use room_crawl_rendering::{
    view_offset, Color, FrameInput, Presentation, RenderingBackend, Scene,
};
use std::time::Duration;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame rate metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.camera.width as i32,
            window_height: scene.camera.height as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let background = to_macroquad_color(clear_color);
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();

            loop {
                let input = gather_frame_input();
                if input.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                update_scene(frame_dt, input, &mut scene);
                draw_scene(&scene);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn gather_frame_input() -> FrameInput {
    let intent = MovementIntent::new(
        is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
        is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
    );

    FrameInput {
        intent,
        attack_pressed: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::J),
        quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
    }
}

fn draw_scene(scene: &Scene) {
    let room = &scene.room;
    let camera_shift = Vec2::new(scene.camera.x, scene.camera.y);
    let offset = view_offset(room.width(), room.height(), &scene.camera) - camera_shift;

    for ty in 0..room.rows {
        for tx in 0..room.columns {
            let index = (ty * room.columns + tx) as usize;
            let Some(tile) = room.tiles.get(index) else {
                continue;
            };
            let fill = if tile.is_solid() {
                room.palette.wall
            } else {
                room.palette.floor
            };

            macroquad::shapes::draw_rectangle(
                tx as f32 * room.tile_length + offset.x,
                ty as f32 * room.tile_length + offset.y,
                room.tile_length,
                room.tile_length,
                to_macroquad_color(fill),
            );
        }
    }

    if let Some(enemy) = &scene.enemy {
        macroquad::shapes::draw_rectangle(
            enemy.position.x + offset.x,
            enemy.position.y + offset.y,
            enemy.size.x,
            enemy.size.y,
            to_macroquad_color(enemy.color),
        );
    }

    for attack in &scene.attacks {
        macroquad::shapes::draw_rectangle(
            attack.rect.x() as f32 + offset.x,
            attack.rect.y() as f32 + offset.y,
            attack.rect.width() as f32,
            attack.rect.height() as f32,
            to_macroquad_color(attack.color),
        );
    }

    let player = &scene.player;
    let fill = if player.attacking {
        player.color.lighten(0.35)
    } else {
        player.color
    };
    macroquad::shapes::draw_rectangle(
        player.position.x + offset.x,
        player.position.y + offset.y,
        player.size.x,
        player.size.y,
        to_macroquad_color(fill),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second average once one
    /// second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        let frames = std::mem::take(&mut self.frames);
        if seconds <= f32::EPSILON {
            return None;
        }

        Some(frames as f32 / seconds)
    }
}
