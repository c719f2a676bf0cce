//! Media catalog
//!
//! Path palette for everything a round can load: drifting-bubble images,
//! the one-note pop sounds, the user bubble image and the success jingle.
//! The stock catalog carries the full sixty-image palette; tests build
//! smaller ones by hand.

const BUBBLE_DIR: &str = "media/graphics/bubbles";
const SOUND_DIR: &str = "media/audio/sound_effects";

/// Color families in the stock palette and how many variants each has
const PALETTE: [(&str, u32); 10] = [
    ("red", 7),
    ("purple", 4),
    ("blue", 10),
    ("green", 9),
    ("brown", 4),
    ("orange", 8),
    ("yellow", 7),
    ("tan", 4),
    ("gray", 1),
    ("pink", 6),
];

const NOTE_COUNT: u32 = 6;

/// Media paths consumed by round setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub bubble_images: Vec<String>,
    pub notes: Vec<String>,
    pub user_image: String,
    pub success_sound: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::stock()
    }
}

impl Catalog {
    /// The shipped palette: one path per bubble variant, one per note
    pub fn stock() -> Self {
        let mut bubble_images = Vec::with_capacity(60);
        for (color, variants) in PALETTE {
            for n in 1..=variants {
                bubble_images.push(format!("{BUBBLE_DIR}/{color}{n}.png"));
            }
        }
        let notes = (1..=NOTE_COUNT)
            .map(|n| format!("{SOUND_DIR}/note{n}.wav"))
            .collect();
        Self {
            bubble_images,
            notes,
            user_image: format!("{BUBBLE_DIR}/user_bubble.png"),
            success_sound: format!("{SOUND_DIR}/success.wav"),
        }
    }
}
