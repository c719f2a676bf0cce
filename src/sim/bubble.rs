//! Bubble state and the pop state machine
//!
//! A bubble drifts in a straight line until collision logic or a user click
//! starts its pop cycle: expand one pixel per tick to max radius, hold there
//! for 90 ticks, contract back to zero. The chain counter is passed into the
//! drivers explicitly so the shared dependency stays visible and testable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::round::ChainReaction;
use crate::consts::{FULL_ALPHA, HOLD_TICKS, MOVE_SPEED, POP_ALPHA, POP_GROWTH};
use crate::engine::{ImageId, SoundId, SpriteId};
use crate::{heading_vec, normalize_heading};

/// Pop cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopPhase {
    /// Drifting; also the terminal state once a cycle has run (radius 0
    /// keeps a finished bubble out of the contact sweep)
    Idle,
    /// Radius grows one pixel per tick toward `max_radius`
    Expanding,
    /// Radius parked at `max_radius` while `hold_ticks` runs up to 90
    Holding,
    /// Radius shrinks one pixel per tick down to zero
    Contracting,
}

/// One bubble on the playfield
///
/// User and normal bubbles are the same type; they differ only in the
/// constructor configuration (the user bubble spawns paused and the round
/// controller immediately starts its pop cycle). The sprite/image/sound
/// handles are opaque here; the session layer resolves them against the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bubble {
    pub circle: Circle,
    heading: i32,
    /// Radius where expansion stops: spawn radius + 40
    pub max_radius: i32,
    pub phase: PopPhase,
    /// Ticks spent holding at max radius, 0..=90
    pub hold_ticks: u32,
    /// Paused bubbles keep ticking their pop machine but do not move
    pub paused: bool,
    pub is_user: bool,
    /// Alpha the renderer should apply; forced to 140 for the whole pop cycle
    pub alpha: u8,
    pub sprite: SpriteId,
    pub image: ImageId,
    pub sound: SoundId,
}

impl Bubble {
    /// A level bubble: drifting, unpaused, pop cycle idle
    pub fn drifting(
        center: Vec2,
        radius: i32,
        heading: i32,
        sprite: SpriteId,
        image: ImageId,
        sound: SoundId,
    ) -> Self {
        let circle = Circle::new(center, radius);
        Self {
            circle,
            heading: normalize_heading(heading),
            max_radius: circle.radius() + POP_GROWTH,
            phase: PopPhase::Idle,
            hold_ticks: 0,
            paused: false,
            is_user: false,
            alpha: FULL_ALPHA,
            sprite,
            image,
            sound,
        }
    }

    /// The player's bubble: spawned at the click point, paused for life
    pub fn user(
        center: Vec2,
        radius: i32,
        sprite: SpriteId,
        image: ImageId,
        sound: SoundId,
    ) -> Self {
        let mut bubble = Self::drifting(center, radius, 0, sprite, image, sound);
        bubble.is_user = true;
        bubble.paused = true;
        bubble
    }

    /// Motion heading in degrees, always in [0, 360)
    #[inline]
    pub fn heading(&self) -> i32 {
        self.heading
    }

    /// Set the heading, normalized into [0, 360)
    #[inline]
    pub fn set_heading(&mut self, degrees: i32) {
        self.heading = normalize_heading(degrees);
    }

    /// Whether this bubble is anywhere in its pop cycle
    #[inline]
    pub fn is_popping(&self) -> bool {
        self.phase != PopPhase::Idle
    }

    /// Begin the pop cycle: pause motion, enter Expanding, count it into the
    /// chain. The machine is not ticked here, so the first expand step lands
    /// on the next `step_pop` call.
    pub fn start_pop(&mut self, chain: &mut ChainReaction) {
        self.paused = true;
        self.phase = PopPhase::Expanding;
        chain.bubble_started();
    }

    /// One tick of the pop machine; safe to call every frame in any state
    ///
    /// Written as an if-ladder so the Expanding→Holding and
    /// Holding→Contracting handoffs run in the same tick they trigger: a
    /// bubble at max radius flips to Holding before the expand branch is
    /// consulted, and the first contract step shares the tick that finishes
    /// the hold.
    pub fn step_pop(&mut self, chain: &mut ChainReaction) {
        if self.phase == PopPhase::Idle {
            return;
        }
        // Semi-transparent for the entire cycle
        self.alpha = POP_ALPHA;

        if self.phase == PopPhase::Expanding && self.circle.radius() == self.max_radius {
            self.phase = PopPhase::Holding;
        }
        if self.phase == PopPhase::Expanding && self.circle.radius() < self.max_radius {
            self.circle.set_radius(self.circle.radius() + 1);
        }
        if self.phase == PopPhase::Holding {
            if self.hold_ticks < HOLD_TICKS {
                self.hold_ticks += 1;
            } else {
                self.phase = PopPhase::Contracting;
            }
        }
        if self.phase == PopPhase::Contracting && self.circle.radius() > 0 {
            self.contract(chain);
        }
    }

    /// Shrink one pixel; completes the pop cycle when the radius hits zero.
    ///
    /// Also called directly by the round controller to clear leftover bubbles
    /// after the chain reaction ends. Those are not mid-cycle, so only a
    /// Contracting bubble reaching zero decrements the counter.
    pub fn contract(&mut self, chain: &mut ChainReaction) {
        self.circle.set_radius(self.circle.radius() - 1);
        if self.circle.radius() == 0 && self.phase == PopPhase::Contracting {
            self.phase = PopPhase::Idle;
            chain.bubble_finished();
        }
    }

    /// Advance linear motion one step along the heading, unless paused
    pub fn advance(&mut self) {
        if !self.paused {
            self.circle.center += heading_vec(self.heading) * MOVE_SPEED;
        }
    }
}
