//! Session: wires the simulation to the engine surfaces
//!
//! Owns the engine, the media catalog, the screen flow and the live round.
//! Per frame: poll escape, sample the mouse, route the click by screen, run
//! the simulation tick, play the sounds its events name, then sync every
//! sprite from sim state. Missing media is never fatal: the operation is
//! skipped and one diagnostic line records it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::catalog::Catalog;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, SPAWN_RADIUS, TOTAL_POSSIBLE_POINTS};
use crate::engine::{
    Audio, DiagnosticLog, ImageId, Input, MouseState, SoundId, SpriteId, Sprites,
};
use crate::flow::{Flow, Screen};
use crate::sim::{seed_round, tick, Bubble, RoundState, TickEvent, TickInput, UserSpawn};

/// Engine handles for session-owned resources. Bubble handles count up from
/// 1 in spawn order; these stay clear of that range.
const USER_BUBBLE_SPRITE: SpriteId = SpriteId(1000);
const USER_BUBBLE_IMAGE: ImageId = ImageId(1000);
const SUCCESS_SOUND: SoundId = SoundId(1000);
const OVERLAY_SPRITE: SpriteId = SpriteId(1011);
const OVERLAY_IMAGE: ImageId = ImageId(1011);

const OVERLAY_IMAGE_PATH: &str = "media/graphics/backgrounds/white_overlay.bmp";

/// One game run against an engine: screens, rounds, resources
pub struct Session<E> {
    engine: E,
    catalog: Catalog,
    flow: Flow,
    round: RoundState,
    diag: DiagnosticLog,
    base_seed: u64,
    overlay_ready: bool,
}

impl<E: Sprites + Audio + Input> Session<E> {
    pub fn new(engine: E, catalog: Catalog, flow: Flow, base_seed: u64, diag: DiagnosticLog) -> Self {
        let mut session = Self {
            engine,
            catalog,
            flow,
            round: RoundState::new(0),
            diag,
            base_seed,
            overlay_ready: false,
        };
        session.load_components();
        session
    }

    /// Session-level media: the success jingle and the win-fade overlay
    fn load_components(&mut self) {
        if self.engine.file_exists(&self.catalog.success_sound) {
            self.engine.load(&self.catalog.success_sound, SUCCESS_SOUND);
        } else {
            self.diag.line(&format!(
                "sound {} missing; win jingle disabled",
                self.catalog.success_sound
            ));
        }

        self.engine.load_image(OVERLAY_IMAGE_PATH, OVERLAY_IMAGE);
        if self.engine.image_exists(OVERLAY_IMAGE) {
            let center = Vec2::new(SCREEN_WIDTH as f32 / 2.0, SCREEN_HEIGHT as f32 / 2.0);
            self.engine.place(OVERLAY_SPRITE, OVERLAY_IMAGE, center);
            self.engine.resize(OVERLAY_SPRITE, SCREEN_WIDTH, SCREEN_HEIGHT);
            self.engine.set_alpha(OVERLAY_SPRITE, 0);
            self.overlay_ready = true;
        } else {
            self.diag.line(&format!(
                "image {OVERLAY_IMAGE_PATH} missing; win fade will be invisible"
            ));
        }
    }

    /// One frame: returns false once the player has quit
    pub fn frame(&mut self) -> bool {
        if self.engine.escape() {
            self.shutdown();
            return false;
        }
        let mouse = self.engine.mouse();
        match self.flow.screen {
            Screen::Intro => {
                if mouse.clicked {
                    self.flow.start_pressed();
                }
            }
            Screen::LevelStart => {
                if mouse.clicked {
                    self.begin_round();
                }
            }
            Screen::Playing => self.play_frame(mouse),
            Screen::Retry => {
                if mouse.clicked {
                    self.flow.retry_pressed();
                }
            }
            Screen::WonGame => {
                if mouse.clicked {
                    self.flow.play_again_pressed();
                }
            }
        }
        true
    }

    fn begin_round(&mut self) {
        self.flow.play_pressed();
        self.build_round();
    }

    /// Spawn and load a fresh round for the current level
    ///
    /// Seeds come from one RNG per round so a level attempt replays exactly
    /// from `base_seed + round_index`. A bubble whose image or note file is
    /// missing is skipped: the round just runs with fewer bubbles.
    fn build_round(&mut self) {
        self.release_round();
        self.round = RoundState::new(self.flow.goal_points());
        if self.overlay_ready {
            self.engine.set_alpha(OVERLAY_SPRITE, 0);
        }

        let count = self.flow.bubble_count() as usize;
        let mut rng = Pcg32::seed_from_u64(self.base_seed.wrapping_add(self.flow.round_index()));
        let seeds = seed_round(
            &mut rng,
            count,
            self.catalog.bubble_images.len(),
            self.catalog.notes.len(),
        );

        for (i, seed) in seeds.bubbles.iter().enumerate() {
            let id = i as u32 + 1;
            let (sprite, image, sound) = (SpriteId(id), ImageId(id), SoundId(id));
            let image_path = &self.catalog.bubble_images[seed.image];
            let note_path = &self.catalog.notes[seed.note];

            self.engine.load_image(image_path, image);
            if !self.engine.image_exists(image) {
                self.diag.line(&format!("image {image_path} missing; bubble skipped"));
                continue;
            }
            if !self.engine.file_exists(note_path) {
                self.diag.line(&format!("sound {note_path} missing; bubble skipped"));
                self.engine.delete_image(image);
                continue;
            }
            self.engine.load(note_path, sound);

            self.round.bubbles.push(Bubble::drifting(
                seed.center,
                SPAWN_RADIUS,
                seed.heading,
                sprite,
                image,
                sound,
            ));
        }

        self.provision_user_bubble(seeds.user_note, count as u32 + 1);

        log::info!(
            "level {} started: {} bubbles, {} to pop",
            self.flow.level(),
            self.round.bubbles.len(),
            self.round.goal_points
        );
    }

    /// Load the user bubble's media up front so the click spawn needs no I/O.
    /// If anything is missing the round still runs; clicks just do nothing.
    fn provision_user_bubble(&mut self, note: usize, sound_id: u32) {
        self.engine.load_image(&self.catalog.user_image, USER_BUBBLE_IMAGE);
        let note_path = self.catalog.notes.get(note);

        let loadable = self.engine.image_exists(USER_BUBBLE_IMAGE)
            && note_path.is_some_and(|path| self.engine.file_exists(path));
        if !loadable {
            self.diag.line("user bubble media missing; click spawn disabled");
            // The image may have loaded before the note check failed
            self.engine.delete_image(USER_BUBBLE_IMAGE);
            self.round.user_spawn = None;
            return;
        }

        let sound = SoundId(sound_id);
        if let Some(path) = note_path {
            self.engine.load(path, sound);
        }
        self.round.user_spawn = Some(UserSpawn {
            sprite: USER_BUBBLE_SPRITE,
            image: USER_BUBBLE_IMAGE,
            sound,
        });
    }

    fn play_frame(&mut self, mouse: MouseState) {
        let input = TickInput {
            click: mouse
                .clicked
                .then(|| Vec2::new(mouse.x as f32, mouse.y as f32)),
        };

        let mut events = Vec::new();
        tick(&mut self.round, &input, &mut events);

        let mut outcome = None;
        for event in events {
            match event {
                TickEvent::PopStarted { sound } => self.play_sound(sound),
                TickEvent::FadeStarted => {
                    log::info!("goal reached on level {}", self.flow.level());
                }
                TickEvent::RoundOver { won } => outcome = Some(won),
            }
        }

        self.sync_sprites();

        if let Some(won) = outcome {
            self.finish_round(won);
        }
    }

    fn finish_round(&mut self, won: bool) {
        let points = self.round.level_points;
        log::info!(
            "level {} {}: {} of {} points",
            self.flow.level(),
            if won { "won" } else { "lost" },
            points,
            self.round.goal_points
        );

        self.flow.round_over(won, points);
        self.release_round();

        if self.flow.screen == Screen::WonGame {
            log::info!(
                "game won with {} of {} possible points",
                self.flow.total_points(),
                TOTAL_POSSIBLE_POINTS
            );
            self.play_sound(SUCCESS_SOUND);
        }
    }

    fn play_sound(&mut self, sound: SoundId) {
        if self.engine.sound_exists(sound) {
            self.engine.play(sound);
        } else {
            self.diag.line(&format!("sound {} missing at play time", sound.0));
        }
    }

    /// Push sim state at the engine: every bubble's sprite and the overlay.
    /// A contracted bubble keeps its sprite but is hidden until round cleanup.
    fn sync_sprites(&mut self) {
        for bubble in &self.round.bubbles {
            let diameter = bubble.circle.diameter();
            self.engine
                .place(bubble.sprite, bubble.image, bubble.circle.center);
            self.engine.resize(bubble.sprite, diameter, diameter);
            self.engine.rotate(bubble.sprite, bubble.heading());
            self.engine.set_alpha(bubble.sprite, bubble.alpha as i32);
            if diameter == 0 {
                self.engine.hide(bubble.sprite);
            } else {
                self.engine.show(bubble.sprite);
            }
        }
        if self.overlay_ready {
            self.engine
                .set_alpha(OVERLAY_SPRITE, self.round.fade.overlay_alpha() as i32);
        }
    }

    /// Release every engine resource the current round loaded
    fn release_round(&mut self) {
        let bubbles = std::mem::take(&mut self.round.bubbles);
        for bubble in &bubbles {
            if self.engine.sound_exists(bubble.sound) {
                self.engine.delete(bubble.sound);
            } else {
                self.diag
                    .line(&format!("sound {} already gone at cleanup", bubble.sound.0));
            }
            if self.engine.sprite_exists(bubble.sprite) {
                self.engine.delete_sprite(bubble.sprite);
            }
            self.engine.delete_image(bubble.image);
        }
        // Provisioned but never spawned by a click
        if let Some(user) = self.round.user_spawn.take() {
            self.engine.delete_image(user.image);
            if self.engine.sound_exists(user.sound) {
                self.engine.delete(user.sound);
            }
        }
    }

    /// Orderly teardown: round media, session media, closing log line
    pub fn shutdown(&mut self) {
        self.release_round();
        if self.engine.sound_exists(SUCCESS_SOUND) {
            self.engine.delete(SUCCESS_SOUND);
        }
        if self.overlay_ready {
            self.engine.delete_sprite(OVERLAY_SPRITE);
            self.engine.delete_image(OVERLAY_IMAGE);
            self.overlay_ready = false;
        }
        self.diag.close();
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn screen(&self) -> Screen {
        self.flow.screen
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
