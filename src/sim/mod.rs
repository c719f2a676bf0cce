//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod bubble;
pub mod circle;
pub mod collision;
pub mod round;
pub mod spawn;
pub mod tick;

pub use bubble::{Bubble, PopPhase};
pub use circle::Circle;
pub use collision::{circles_overlap, reflect_heading, wall_contact, WallContact};
pub use round::{ChainReaction, Fade, RoundState, UserSpawn};
pub use spawn::{seed_round, BubbleSeed, RoundSeeds};
pub use tick::{tick, TickEvent, TickInput};
