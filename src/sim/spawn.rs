//! Level spawn: deterministic placement and media assignment
//!
//! Each round shuffles the image palette and the note list once, then deals
//! one placement per bubble. Bubble `i` takes the `i`-th shuffled image, so
//! no two bubbles in a round share a color; notes are drawn with repeats.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{SPAWN_HEADING_MAX, SPAWN_HEADING_MIN, SPAWN_RADIUS};

// Placement field, inset from the screen edges so new bubbles never start
// inside a wall
const FIELD_WIDTH: i32 = 600;
const FIELD_HEIGHT: i32 = 440;
const FIELD_MARGIN: i32 = 5;

/// Placement and media assignment for one drifting bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleSeed {
    pub center: Vec2,
    /// Initial drift heading in degrees
    pub heading: i32,
    /// Index into the image palette
    pub image: usize,
    /// Index into the note list
    pub note: usize,
}

/// Everything random a round needs, resolved up front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSeeds {
    pub bubbles: Vec<BubbleSeed>,
    /// Note assigned to the user bubble this round
    pub user_note: usize,
}

/// Deal placements for `count` bubbles from a `palette_size`-image palette
/// and a `note_count`-note list
pub fn seed_round(
    rng: &mut Pcg32,
    count: usize,
    palette_size: usize,
    note_count: usize,
) -> RoundSeeds {
    if palette_size == 0 || note_count == 0 {
        return RoundSeeds {
            bubbles: Vec::new(),
            user_note: 0,
        };
    }

    let mut palette: Vec<usize> = (0..palette_size).collect();
    palette.shuffle(rng);

    let mut notes: Vec<usize> = (0..note_count).collect();
    notes.shuffle(rng);

    let bubbles = (0..count)
        .map(|i| BubbleSeed {
            center: random_center(rng),
            heading: rng.random_range(SPAWN_HEADING_MIN..=SPAWN_HEADING_MAX),
            image: palette[i % palette_size],
            note: notes[rng.random_range(0..note_count)],
        })
        .collect();

    RoundSeeds {
        bubbles,
        user_note: notes[0],
    }
}

fn random_center(rng: &mut Pcg32) -> Vec2 {
    let x = rng.random_range(0..=FIELD_WIDTH - 2 * SPAWN_RADIUS) + SPAWN_RADIUS + FIELD_MARGIN;
    let y = rng.random_range(0..=FIELD_HEIGHT - 2 * SPAWN_RADIUS) + SPAWN_RADIUS + FIELD_MARGIN;
    Vec2::new(x as f32, y as f32)
}
