//! Round state: bubble registry, chain counter, points, win fade
//!
//! One `RoundState` covers one level attempt, from spawn to the win/loss
//! decision. The controller in `tick` mutates it in a fixed per-frame order;
//! nothing here touches the engine.

use serde::{Deserialize, Serialize};

use super::bubble::Bubble;
use crate::consts::FADE_TICKS;
use crate::engine::{ImageId, SoundId, SpriteId};

/// Count of bubbles currently mid-pop, shared across one round
///
/// Replaces the usual global-counter shape: it lives in round state and is
/// passed `&mut` into the bubble drivers, so the shared dependency is
/// explicit and testable in isolation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChainReaction {
    popping_now: u32,
    started: bool,
}

impl ChainReaction {
    /// A bubble entered Expanding
    pub fn bubble_started(&mut self) {
        self.popping_now += 1;
    }

    /// A contracting bubble reached radius zero
    pub fn bubble_finished(&mut self) {
        self.popping_now = self.popping_now.saturating_sub(1);
    }

    /// Flag that the user's click set the chain off
    pub fn mark_started(&mut self) {
        self.started = true;
    }

    /// Bubbles currently in Expanding/Holding/Contracting
    #[inline]
    pub fn popping_now(&self) -> u32 {
        self.popping_now
    }

    #[inline]
    pub fn started(&self) -> bool {
        self.started
    }

    /// The chain ran and every participant has finished
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.started && self.popping_now == 0
    }
}

/// Win-fade overlay: a fixed 60-tick fade once the goal is reached
///
/// The overlay alpha tracks the tick count and stays parked at 60 after
/// completion until the next round resets it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Fade {
    running: bool,
    ticks: u32,
    complete: bool,
}

impl Fade {
    /// Start fading; harmless to call again while running
    pub fn begin(&mut self) {
        if !self.complete {
            self.running = true;
        }
    }

    /// One fade tick per frame while running
    pub fn step(&mut self) {
        if self.running {
            self.ticks += 1;
            if self.ticks >= FADE_TICKS {
                self.complete = true;
                self.running = false;
            }
        }
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn complete(&self) -> bool {
        self.complete
    }

    /// Alpha for the white overlay sprite
    #[inline]
    pub fn overlay_alpha(&self) -> u8 {
        self.ticks.min(FADE_TICKS) as u8
    }
}

/// Engine handles provisioned at round setup for the click-spawned user
/// bubble, so the spawn itself needs no I/O
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserSpawn {
    pub sprite: SpriteId,
    pub image: ImageId,
    pub sound: SoundId,
}

/// Everything one level attempt tracks frame to frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// Live bubbles in creation order; the round owns them outright
    pub bubbles: Vec<Bubble>,
    pub chain: ChainReaction,
    pub level_points: u32,
    pub goal_points: u32,
    pub fade: Fade,
    /// The finished chain has paused everything
    pub chain_reaction_done: bool,
    /// Every leftover bubble has contracted to zero
    pub remaining_contracted: bool,
    /// `Some` until the user bubble spawns (or from the start `None` when
    /// its media was missing at setup; clicks are then ignored)
    pub user_spawn: Option<UserSpawn>,
}

impl RoundState {
    pub fn new(goal_points: u32) -> Self {
        Self {
            bubbles: Vec::new(),
            chain: ChainReaction::default(),
            level_points: 0,
            goal_points,
            fade: Fade::default(),
            chain_reaction_done: false,
            remaining_contracted: false,
            user_spawn: None,
        }
    }

    pub fn has_user_bubble(&self) -> bool {
        self.bubbles.iter().any(|b| b.is_user)
    }

    pub fn user_bubble_index(&self) -> Option<usize> {
        self.bubbles.iter().position(|b| b.is_user)
    }

    /// All radii at zero (vacuously true for an empty registry)
    pub fn all_contracted(&self) -> bool {
        self.bubbles.iter().all(|b| b.circle.radius() == 0)
    }

    pub fn pause_all(&mut self) {
        for bubble in &mut self.bubbles {
            bubble.paused = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPAWN_RADIUS;
    use crate::engine::{ImageId, SoundId, SpriteId};
    use glam::Vec2;

    fn test_bubble(x: f32) -> Bubble {
        Bubble::drifting(
            Vec2::new(x, 100.0),
            SPAWN_RADIUS,
            90,
            SpriteId(1),
            ImageId(1),
            SoundId(1),
        )
    }

    #[test]
    fn test_chain_completion_requires_start() {
        let mut chain = ChainReaction::default();
        assert!(!chain.is_complete());

        chain.mark_started();
        chain.bubble_started();
        assert!(!chain.is_complete());

        chain.bubble_finished();
        assert!(chain.is_complete());
    }

    #[test]
    fn test_fade_runs_sixty_ticks_and_parks() {
        let mut fade = Fade::default();
        assert_eq!(fade.overlay_alpha(), 0);

        fade.begin();
        for expected in 1..=60 {
            fade.step();
            assert_eq!(fade.overlay_alpha() as u32, expected.min(60));
        }
        assert!(fade.complete());
        assert!(!fade.running());

        // Further steps leave the overlay parked
        fade.step();
        assert_eq!(fade.overlay_alpha(), 60);
    }

    #[test]
    fn test_fade_cannot_restart_after_completion() {
        let mut fade = Fade::default();
        fade.begin();
        for _ in 0..60 {
            fade.step();
        }
        fade.begin();
        assert!(!fade.running());
    }

    #[test]
    fn test_pause_all_and_contraction_queries() {
        let mut state = RoundState::new(3);
        state.bubbles.push(test_bubble(100.0));
        state.bubbles.push(test_bubble(200.0));

        assert!(!state.all_contracted());
        state.pause_all();
        assert!(state.bubbles.iter().all(|b| b.paused));

        for bubble in &mut state.bubbles {
            bubble.circle.set_radius(0);
        }
        assert!(state.all_contracted());
    }

    #[test]
    fn test_user_bubble_lookup() {
        let mut state = RoundState::new(1);
        state.bubbles.push(test_bubble(100.0));
        assert!(!state.has_user_bubble());
        assert_eq!(state.user_bubble_index(), None);

        state.bubbles.push(Bubble::user(
            Vec2::new(10.0, 10.0),
            SPAWN_RADIUS,
            SpriteId(2),
            ImageId(2),
            SoundId(2),
        ));
        assert!(state.has_user_bubble());
        assert_eq!(state.user_bubble_index(), Some(1));
    }
}
