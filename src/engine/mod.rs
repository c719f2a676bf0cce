//! Engine boundary: the surfaces the game shell drives
//!
//! The simulation stores opaque handles and emits events; it never calls
//! these traits itself. The session layer resolves handles against whichever
//! implementation is plugged in ([`HeadlessEngine`] for tests and the demo
//! binary).

pub mod diag;
pub mod headless;

pub use diag::DiagnosticLog;
pub use headless::HeadlessEngine;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque sprite handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Opaque image handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub u32);

/// Opaque sound handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

/// Mouse snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    /// Left button down this frame
    pub clicked: bool,
    pub x: i32,
    pub y: i32,
}

/// Sprite and image surface
///
/// Operations on handles nothing is loaded under are no-ops; callers guard
/// with the existence checks and log-and-continue.
pub trait Sprites {
    /// Load an image file under `image`; a missing file loads nothing
    fn load_image(&mut self, path: &str, image: ImageId);
    /// Whether an image is loaded under this handle
    fn image_exists(&self, image: ImageId) -> bool;
    /// Create the sprite if needed and move it so its center sits at `center`
    fn place(&mut self, sprite: SpriteId, image: ImageId, center: Vec2);
    fn resize(&mut self, sprite: SpriteId, width: i32, height: i32);
    fn rotate(&mut self, sprite: SpriteId, degrees: i32);
    /// Alpha 0 (transparent) to 255 (opaque); out-of-range coerces to 0
    fn set_alpha(&mut self, sprite: SpriteId, alpha: i32);
    fn show(&mut self, sprite: SpriteId);
    fn hide(&mut self, sprite: SpriteId);
    fn sprite_exists(&self, sprite: SpriteId) -> bool;
    fn delete_sprite(&mut self, sprite: SpriteId);
    fn delete_image(&mut self, image: ImageId);
}

/// Sound surface
pub trait Audio {
    fn file_exists(&self, path: &str) -> bool;
    /// Load a sound file under `sound`; a missing file loads nothing
    fn load(&mut self, path: &str, sound: SoundId);
    fn sound_exists(&self, sound: SoundId) -> bool;
    /// Play from the start; a missing sound is a no-op
    fn play(&mut self, sound: SoundId);
    fn delete(&mut self, sound: SoundId);
}

/// Input surface, sampled once per frame; no event queue
pub trait Input {
    fn mouse(&mut self) -> MouseState;
    fn escape(&mut self) -> bool;
}
