//! In-memory engine for tests and the demo binary
//!
//! Records every sprite mutation and sound play so tests can assert against
//! them. Paths can be marked missing to exercise the degraded-media paths.

use std::collections::{HashMap, HashSet, VecDeque};

use glam::Vec2;

use super::{Audio, ImageId, Input, MouseState, SoundId, SpriteId, Sprites};

/// Recorded state of one placed sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteState {
    pub image: ImageId,
    pub center: Vec2,
    pub width: i32,
    pub height: i32,
    pub degrees: i32,
    pub alpha: u8,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct HeadlessEngine {
    missing_paths: HashSet<String>,
    images: HashMap<ImageId, String>,
    sounds: HashMap<SoundId, String>,
    sprites: HashMap<SpriteId, SpriteState>,
    play_counts: HashMap<SoundId, u32>,
    mouse_script: VecDeque<MouseState>,
    escape_pending: bool,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `path` as absent from disk for all later loads
    pub fn mark_missing(&mut self, path: &str) {
        self.missing_paths.insert(path.to_string());
    }

    /// Queue a left click for the next [`Input::mouse`] sample
    pub fn queue_click(&mut self, x: i32, y: i32) {
        self.mouse_script.push_back(MouseState {
            clicked: true,
            x,
            y,
        });
    }

    pub fn press_escape(&mut self) {
        self.escape_pending = true;
    }

    pub fn sprite(&self, sprite: SpriteId) -> Option<&SpriteState> {
        self.sprites.get(&sprite)
    }

    /// How many times a sound has been played; survives deletion
    pub fn plays(&self, sound: SoundId) -> u32 {
        self.play_counts.get(&sound).copied().unwrap_or(0)
    }

    pub fn loaded_sounds(&self) -> usize {
        self.sounds.len()
    }

    pub fn loaded_sprites(&self) -> usize {
        self.sprites.len()
    }
}

impl Sprites for HeadlessEngine {
    fn load_image(&mut self, path: &str, image: ImageId) {
        if self.missing_paths.contains(path) {
            return;
        }
        self.images.insert(image, path.to_string());
    }

    fn image_exists(&self, image: ImageId) -> bool {
        self.images.contains_key(&image)
    }

    fn place(&mut self, sprite: SpriteId, image: ImageId, center: Vec2) {
        let state = self.sprites.entry(sprite).or_insert(SpriteState {
            image,
            center,
            width: 0,
            height: 0,
            degrees: 0,
            alpha: 255,
            visible: true,
        });
        state.image = image;
        state.center = center;
    }

    fn resize(&mut self, sprite: SpriteId, width: i32, height: i32) {
        if let Some(state) = self.sprites.get_mut(&sprite) {
            state.width = width;
            state.height = height;
        }
    }

    fn rotate(&mut self, sprite: SpriteId, degrees: i32) {
        if let Some(state) = self.sprites.get_mut(&sprite) {
            state.degrees = degrees;
        }
    }

    fn set_alpha(&mut self, sprite: SpriteId, alpha: i32) {
        if let Some(state) = self.sprites.get_mut(&sprite) {
            state.alpha = if (0..=255).contains(&alpha) {
                alpha as u8
            } else {
                0
            };
        }
    }

    fn show(&mut self, sprite: SpriteId) {
        if let Some(state) = self.sprites.get_mut(&sprite) {
            state.visible = true;
        }
    }

    fn hide(&mut self, sprite: SpriteId) {
        if let Some(state) = self.sprites.get_mut(&sprite) {
            state.visible = false;
        }
    }

    fn sprite_exists(&self, sprite: SpriteId) -> bool {
        self.sprites.contains_key(&sprite)
    }

    fn delete_sprite(&mut self, sprite: SpriteId) {
        self.sprites.remove(&sprite);
    }

    fn delete_image(&mut self, image: ImageId) {
        self.images.remove(&image);
    }
}

impl Audio for HeadlessEngine {
    fn file_exists(&self, path: &str) -> bool {
        !self.missing_paths.contains(path)
    }

    fn load(&mut self, path: &str, sound: SoundId) {
        if self.missing_paths.contains(path) {
            return;
        }
        self.sounds.insert(sound, path.to_string());
    }

    fn sound_exists(&self, sound: SoundId) -> bool {
        self.sounds.contains_key(&sound)
    }

    fn play(&mut self, sound: SoundId) {
        if self.sounds.contains_key(&sound) {
            *self.play_counts.entry(sound).or_default() += 1;
        }
    }

    fn delete(&mut self, sound: SoundId) {
        self.sounds.remove(&sound);
    }
}

impl Input for HeadlessEngine {
    fn mouse(&mut self) -> MouseState {
        self.mouse_script.pop_front().unwrap_or_default()
    }

    fn escape(&mut self) -> bool {
        std::mem::take(&mut self.escape_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_coerces_out_of_range_to_zero() {
        let mut engine = HeadlessEngine::new();
        engine.place(SpriteId(1), ImageId(1), Vec2::new(10.0, 10.0));

        engine.set_alpha(SpriteId(1), 140);
        assert_eq!(engine.sprite(SpriteId(1)).unwrap().alpha, 140);

        engine.set_alpha(SpriteId(1), 300);
        assert_eq!(engine.sprite(SpriteId(1)).unwrap().alpha, 0);

        engine.set_alpha(SpriteId(1), -1);
        assert_eq!(engine.sprite(SpriteId(1)).unwrap().alpha, 0);
    }

    #[test]
    fn test_hide_and_show_toggle_visibility() {
        let mut engine = HeadlessEngine::new();
        engine.place(SpriteId(1), ImageId(1), Vec2::new(10.0, 10.0));
        assert!(engine.sprite(SpriteId(1)).unwrap().visible);

        engine.hide(SpriteId(1));
        assert!(!engine.sprite(SpriteId(1)).unwrap().visible);

        engine.show(SpriteId(1));
        assert!(engine.sprite(SpriteId(1)).unwrap().visible);

        // Unknown handles are ignored, same as the other mutators
        engine.hide(SpriteId(9));
        assert!(!engine.sprite_exists(SpriteId(9)));
    }

    #[test]
    fn test_missing_path_never_loads() {
        let mut engine = HeadlessEngine::new();
        engine.mark_missing("media/user_bubble.png");
        engine.mark_missing("media/note1.wav");

        engine.load_image("media/user_bubble.png", ImageId(1000));
        assert!(!engine.image_exists(ImageId(1000)));

        assert!(!engine.file_exists("media/note1.wav"));
        engine.load("media/note1.wav", SoundId(1));
        assert!(!engine.sound_exists(SoundId(1)));

        engine.load("media/note2.wav", SoundId(2));
        assert!(engine.sound_exists(SoundId(2)));
    }

    #[test]
    fn test_play_counts_missing_sound_noop() {
        let mut engine = HeadlessEngine::new();
        engine.load("media/note1.wav", SoundId(1));

        engine.play(SoundId(1));
        engine.play(SoundId(1));
        engine.play(SoundId(9));

        assert_eq!(engine.plays(SoundId(1)), 2);
        assert_eq!(engine.plays(SoundId(9)), 0);

        // Counts survive deletion so teardown can still be asserted against
        engine.delete(SoundId(1));
        assert!(!engine.sound_exists(SoundId(1)));
        assert_eq!(engine.plays(SoundId(1)), 2);
    }

    #[test]
    fn test_mouse_script_pops_then_defaults() {
        let mut engine = HeadlessEngine::new();
        engine.queue_click(320, 240);

        let first = engine.mouse();
        assert!(first.clicked);
        assert_eq!((first.x, first.y), (320, 240));

        let second = engine.mouse();
        assert!(!second.clicked);
    }

    #[test]
    fn test_escape_reads_once() {
        let mut engine = HeadlessEngine::new();
        assert!(!engine.escape());
        engine.press_escape();
        assert!(engine.escape());
        assert!(!engine.escape());
    }
}
