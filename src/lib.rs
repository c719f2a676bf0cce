//! Prisms - a chain-reaction bubble popping game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bubble lifecycle, collision, round control)
//! - `engine`: Boundary traits for sprites/audio/input plus a headless implementation
//! - `flow`: Cut-screen and level progression state machine
//! - `session`: Glue layer driving the simulation against the engine surfaces
//! - `catalog`: Media palette consumed during round setup

pub mod catalog;
pub mod engine;
pub mod flow;
pub mod session;
pub mod settings;
pub mod sim;

pub use catalog::Catalog;
pub use flow::{Flow, Screen};
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield width in pixels
    pub const SCREEN_WIDTH: i32 = 640;
    /// Playfield height in pixels
    pub const SCREEN_HEIGHT: i32 = 480;
    /// Frame-loop cap, ticks per second
    pub const REFRESH_RATE: u32 = 60;

    /// Levels in one full run
    pub const LEVELS: usize = 12;
    /// Bubbles spawned per level (index = level - 1)
    pub const LEVEL_BUBBLES: [u32; LEVELS] = [5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60];
    /// Points needed to clear each level (index = level - 1)
    pub const GOAL_POINTS: [u32; LEVELS] = [1, 2, 3, 5, 7, 10, 15, 21, 27, 33, 44, 55];
    /// Every popped bubble scores one point, so the ceiling is the bubble total
    pub const TOTAL_POSSIBLE_POINTS: u32 = 390;

    /// Bubble radius at spawn (sprites are 24 px wide)
    pub const SPAWN_RADIUS: i32 = 12;
    /// How far past its spawn radius a popping bubble expands
    pub const POP_GROWTH: i32 = 40;
    /// Ticks a popping bubble holds its max radius (~1.5 s at 60 Hz)
    pub const HOLD_TICKS: u32 = 90;
    /// Sprite alpha forced for the whole pop cycle
    pub const POP_ALPHA: u8 = 140;
    /// Sprite alpha outside a pop cycle
    pub const FULL_ALPHA: u8 = 255;
    /// Length of the win fade in ticks; overlay alpha tracks the tick count
    pub const FADE_TICKS: u32 = 60;
    /// Linear motion per tick, pixels
    pub const MOVE_SPEED: f32 = 1.0;

    /// Lower spawn heading bound, degrees; headings are drawn from 30..=340
    pub const SPAWN_HEADING_MIN: i32 = 30;
    /// Upper spawn heading bound, inclusive
    pub const SPAWN_HEADING_MAX: i32 = 340;
}

/// Normalize a heading in degrees to [0, 360)
#[inline]
pub fn normalize_heading(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Unit vector for a heading: 0 degrees moves +x, 90 moves +y (screen-down)
#[inline]
pub fn heading_vec(degrees: i32) -> Vec2 {
    let rad = (degrees as f32).to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
