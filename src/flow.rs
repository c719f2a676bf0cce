//! Screen flow and level progression
//!
//! Sequences the cut-screens around each round and keeps the cross-round
//! score. Pure data; the session decides when to build rounds and what to
//! draw. Points earned in a round stay readable after the round ends so the
//! retry and level-start screens can report them, and only reset when the
//! next round actually begins.

use serde::{Deserialize, Serialize};

use crate::consts::{GOAL_POINTS, LEVELS, LEVEL_BUBBLES};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Intro,
    LevelStart,
    Playing,
    Retry,
    WonGame,
}

/// Cut-screen sequencing and score bookkeeping across rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub screen: Screen,
    level: u32,
    level_points: u32,
    total_points: u32,
    won_level: bool,
    round_index: u64,
}

impl Default for Flow {
    fn default() -> Self {
        Self::new()
    }
}

impl Flow {
    pub fn new() -> Self {
        Self {
            screen: Screen::Intro,
            level: 1,
            level_points: 0,
            total_points: 0,
            won_level: false,
            round_index: 0,
        }
    }

    /// Start a run part-way in; out-of-range levels clamp into range
    pub fn starting_at(level: u32) -> Self {
        let mut flow = Self::new();
        flow.level = level.clamp(1, LEVELS as u32);
        flow
    }

    /// Current level, 1-based
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_points(&self) -> u32 {
        self.level_points
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Whether the previous round won its level; drives the level-start banner
    pub fn won_level(&self) -> bool {
        self.won_level
    }

    /// Pops needed to win the current level
    pub fn goal_points(&self) -> u32 {
        GOAL_POINTS[(self.level - 1) as usize]
    }

    /// Drifting bubbles spawned for the current level
    pub fn bubble_count(&self) -> u32 {
        LEVEL_BUBBLES[(self.level - 1) as usize]
    }

    /// Counts every round build; offsets the round seed
    pub fn round_index(&self) -> u64 {
        self.round_index
    }

    /// Intro screen's play button
    pub fn start_pressed(&mut self) {
        if self.screen == Screen::Intro {
            self.screen = Screen::LevelStart;
        }
    }

    /// Level-start screen's play button; the round begins now
    pub fn play_pressed(&mut self) {
        if self.screen != Screen::LevelStart {
            return;
        }
        self.level_points = 0;
        self.won_level = false;
        self.round_index += 1;
        self.screen = Screen::Playing;
    }

    /// Round outcome with the points it earned
    pub fn round_over(&mut self, won: bool, points: u32) {
        if self.screen != Screen::Playing {
            return;
        }
        self.level_points = points;

        if !won {
            self.screen = Screen::Retry;
            return;
        }

        self.total_points += points;
        if self.level == LEVELS as u32 {
            self.level = 1;
            self.screen = Screen::WonGame;
        } else {
            self.won_level = true;
            self.level += 1;
            self.screen = Screen::LevelStart;
        }
    }

    /// Retry screen's retry button; same level again
    pub fn retry_pressed(&mut self) {
        if self.screen == Screen::Retry {
            self.screen = Screen::LevelStart;
        }
    }

    /// Won-game screen's play-again button; a fresh run from the intro
    pub fn play_again_pressed(&mut self) {
        if self.screen != Screen::WonGame {
            return;
        }
        self.total_points = 0;
        self.level_points = 0;
        self.won_level = false;
        self.screen = Screen::Intro;
    }
}
