//! Fixed timestep round tick
//!
//! Advances one frame of a round deterministically, in a fixed order:
//!
//! 1. The round's first click spawns the user bubble (paused, already
//!    popping).
//! 2. Wall bounce for drifting bubbles.
//! 3. The user bubble's pop machine ticks.
//! 4. Every popping bubble's machine ticks; the user bubble ticks a second
//!    time here, so its cycle runs at twice the per-frame rate.
//! 5. Linear motion for unpaused bubbles.
//! 6. Contact sweep: popping bubbles convert whatever they touch.
//! 7. Win fade once the level goal is met.
//! 8. Chain-reaction completion: pause everything, contract leftovers,
//!    report the outcome.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bubble::Bubble;
use super::collision::{circles_overlap, reflect_heading, wall_contact};
use super::round::RoundState;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, SPAWN_RADIUS};
use crate::engine::SoundId;

/// Input state sampled once per tick (deterministic)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Pointer position while the left button is down this tick
    pub click: Option<Vec2>,
}

/// Things a tick decides that the shell must act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    /// A bubble entered its pop cycle; play its note
    PopStarted { sound: SoundId },
    /// The win fade began this tick
    FadeStarted,
    /// The round has been decided; emitted exactly once per round
    RoundOver { won: bool },
}

/// Advance the round state by one fixed timestep
pub fn tick(state: &mut RoundState, input: &TickInput, events: &mut Vec<TickEvent>) {
    spawn_user_bubble(state, input, events);
    bounce_off_walls(state);
    tick_user_pop(state);
    tick_pops(state);
    advance_motion(state);
    sweep_contacts(state, events);
    update_fade(state, events);
    finish_chain(state, events);
}

/// Step 1. `user_spawn` empties on the first spawn, and never held handles
/// at all when the user-bubble media was missing at setup, so later clicks
/// fall through here.
fn spawn_user_bubble(state: &mut RoundState, input: &TickInput, events: &mut Vec<TickEvent>) {
    let Some(click) = input.click else { return };
    let Some(spawn) = state.user_spawn.take() else {
        return;
    };

    let mut bubble = Bubble::user(click, SPAWN_RADIUS, spawn.sprite, spawn.image, spawn.sound);
    bubble.start_pop(&mut state.chain);
    state.chain.mark_started();
    state.bubbles.push(bubble);
    events.push(TickEvent::PopStarted { sound: spawn.sound });
}

/// Step 2. Popping bubbles are paused and the user bubble never drifts, so
/// neither takes part in wall bounces.
fn bounce_off_walls(state: &mut RoundState) {
    for bubble in &mut state.bubbles {
        if bubble.is_user || bubble.is_popping() {
            continue;
        }
        let contact = wall_contact(bubble.circle, SCREEN_WIDTH, SCREEN_HEIGHT);
        if contact.any() {
            bubble.set_heading(reflect_heading(bubble.heading(), contact));
        }
    }
}

/// Step 3
fn tick_user_pop(state: &mut RoundState) {
    if let Some(idx) = state.user_bubble_index() {
        if state.bubbles[idx].is_popping() {
            let bubble = &mut state.bubbles[idx];
            bubble.step_pop(&mut state.chain);
        }
    }
}

/// Step 4
fn tick_pops(state: &mut RoundState) {
    let chain = &mut state.chain;
    for bubble in &mut state.bubbles {
        if bubble.is_popping() {
            bubble.step_pop(chain);
        }
    }
}

/// Step 5
fn advance_motion(state: &mut RoundState) {
    for bubble in &mut state.bubbles {
        bubble.advance();
    }
}

/// Step 6. The sweep mutates in place: a bubble converted earlier in the
/// pass is already popping when the outer loop reaches it, so a chain can
/// propagate through several bubbles within one tick. Finished bubbles sit
/// at radius zero and never rejoin the sweep.
fn sweep_contacts(state: &mut RoundState, events: &mut Vec<TickEvent>) {
    for i in 0..state.bubbles.len() {
        if !state.bubbles[i].is_popping() {
            continue;
        }
        for j in 0..state.bubbles.len() {
            if state.bubbles[j].is_popping() || state.bubbles[j].circle.radius() == 0 {
                continue;
            }
            if circles_overlap(state.bubbles[i].circle, state.bubbles[j].circle) {
                state.bubbles[j].start_pop(&mut state.chain);
                state.level_points += 1;
                events.push(TickEvent::PopStarted {
                    sound: state.bubbles[j].sound,
                });
            }
        }
    }
}

/// Step 7
fn update_fade(state: &mut RoundState, events: &mut Vec<TickEvent>) {
    if state.level_points >= state.goal_points && !state.fade.complete() && !state.fade.running() {
        state.fade.begin();
        events.push(TickEvent::FadeStarted);
    }
    state.fade.step();
}

/// Step 8
fn finish_chain(state: &mut RoundState, events: &mut Vec<TickEvent>) {
    if state.chain.is_complete() && !state.chain_reaction_done {
        state.chain_reaction_done = true;
        state.pause_all();
    }
    if !state.chain_reaction_done || state.remaining_contracted {
        return;
    }

    // One pixel per tick off every leftover; no counter effect for these
    for i in 0..state.bubbles.len() {
        if state.bubbles[i].circle.radius() > 0 {
            let bubble = &mut state.bubbles[i];
            bubble.contract(&mut state.chain);
        }
    }

    if state.all_contracted() {
        state.remaining_contracted = true;
        let won = state.level_points >= state.goal_points;
        events.push(TickEvent::RoundOver { won });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ImageId, SpriteId};
    use crate::sim::round::UserSpawn;
    use crate::sim::PopPhase;

    fn drifting(x: f32, y: f32, heading: i32, n: u32) -> Bubble {
        Bubble::drifting(
            Vec2::new(x, y),
            SPAWN_RADIUS,
            heading,
            SpriteId(n),
            ImageId(n),
            SoundId(n),
        )
    }

    fn round_with_user_spawn(goal: u32) -> RoundState {
        let mut state = RoundState::new(goal);
        state.user_spawn = Some(UserSpawn {
            sprite: SpriteId(1000),
            image: ImageId(1000),
            sound: SoundId(1000),
        });
        state
    }

    fn click_at(x: f32, y: f32) -> TickInput {
        TickInput {
            click: Some(Vec2::new(x, y)),
        }
    }

    #[test]
    fn test_first_click_spawns_popping_user_bubble() {
        let mut state = round_with_user_spawn(1);
        let mut events = Vec::new();

        tick(&mut state, &click_at(50.0, 60.0), &mut events);

        let idx = state.user_bubble_index().unwrap();
        let user = &state.bubbles[idx];
        assert!(user.paused);
        assert!(user.is_popping());
        // Ticked by both the user step and the popping sweep: two expands
        assert_eq!(user.circle.radius(), SPAWN_RADIUS + 2);
        assert!(state.chain.started());
        assert_eq!(state.chain.popping_now(), 1);
        assert!(events.contains(&TickEvent::PopStarted {
            sound: SoundId(1000)
        }));

        // A second click never spawns another
        tick(&mut state, &click_at(10.0, 10.0), &mut events);
        assert_eq!(state.bubbles.len(), 1);
    }

    #[test]
    fn test_click_ignored_when_user_media_was_missing() {
        let mut state = RoundState::new(1);
        let mut events = Vec::new();

        tick(&mut state, &click_at(50.0, 60.0), &mut events);

        assert!(state.bubbles.is_empty());
        assert!(events.is_empty());
        assert!(!state.chain.started());
    }

    #[test]
    fn test_wall_bounce_updates_drifting_heading() {
        let mut state = RoundState::new(1);
        // Overlapping the bottom wall: 470 + 12 >= 480
        state.bubbles.push(drifting(300.0, 470.0, 100, 1));
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.bubbles[0].heading(), 80);
    }

    #[test]
    fn test_wall_bounce_skips_popping_bubbles() {
        let mut state = RoundState::new(1);
        state.bubbles.push(drifting(300.0, 470.0, 100, 1));
        let chain = &mut state.chain;
        state.bubbles[0].start_pop(chain);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.bubbles[0].heading(), 100);
    }

    #[test]
    fn test_contact_sweep_converts_and_scores() {
        let mut state = round_with_user_spawn(5);
        // Overlaps the click point once the user bubble has expanded a step
        state.bubbles.push(drifting(120.0, 100.0, 200, 1));
        let mut events = Vec::new();

        tick(&mut state, &click_at(100.0, 100.0), &mut events);

        let target = &state.bubbles[0];
        assert_eq!(target.phase, PopPhase::Expanding);
        assert!(target.paused);
        assert_eq!(state.level_points, 1);
        assert_eq!(state.chain.popping_now(), 2);
        assert!(events.contains(&TickEvent::PopStarted { sound: SoundId(1) }));
    }

    #[test]
    fn test_sweep_cascades_within_one_tick() {
        // A popping source at a low index converts its neighbor, which then
        // sweeps as a source itself before the tick ends
        let mut state = RoundState::new(10);
        state.bubbles.push(drifting(100.0, 100.0, 200, 1));
        state.bubbles.push(drifting(124.0, 100.0, 200, 2));
        state.bubbles.push(drifting(148.0, 100.0, 200, 3));
        let chain = &mut state.chain;
        state.bubbles[0].start_pop(chain);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);

        assert!(state.bubbles.iter().all(|b| b.is_popping()));
        assert_eq!(state.level_points, 2);
        assert_eq!(state.chain.popping_now(), 3);
    }

    #[test]
    fn test_goal_starts_fade_and_fade_completes() {
        let mut state = RoundState::new(2);
        state.bubbles.push(drifting(100.0, 100.0, 200, 1));
        state.bubbles.push(drifting(110.0, 100.0, 200, 2));
        state.bubbles.push(drifting(90.0, 100.0, 200, 3));
        let chain = &mut state.chain;
        state.bubbles[0].start_pop(chain);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.level_points, 2);
        assert!(events.contains(&TickEvent::FadeStarted));
        assert!(state.fade.running());
        assert!(state.fade.overlay_alpha() >= 1);

        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), &mut events);
        }
        assert!(state.fade.complete());
        assert_eq!(state.fade.overlay_alpha(), 60);
    }

    #[test]
    fn test_round_over_reports_win_once() {
        let mut state = round_with_user_spawn(1);
        state.bubbles.push(drifting(120.0, 100.0, 200, 1));
        let mut all_events = Vec::new();

        let mut events = Vec::new();
        tick(&mut state, &click_at(100.0, 100.0), &mut events);
        all_events.append(&mut events);

        for _ in 0..400 {
            tick(&mut state, &TickInput::default(), &mut events);
            all_events.append(&mut events);
        }

        let overs: Vec<_> = all_events
            .iter()
            .filter(|e| matches!(e, TickEvent::RoundOver { .. }))
            .collect();
        assert_eq!(overs.len(), 1);
        assert_eq!(*overs[0], TickEvent::RoundOver { won: true });
        assert!(state.remaining_contracted);
        assert!(state.all_contracted());
        assert!(state.bubbles.iter().all(|b| b.paused));
    }

    #[test]
    fn test_unreached_goal_contracts_leftovers_and_loses() {
        let mut state = round_with_user_spawn(99);
        // Far from the click; never joins the chain
        state.bubbles.push(drifting(100.0, 100.0, 200, 1));
        let mut events = Vec::new();

        tick(&mut state, &click_at(500.0, 400.0), &mut events);
        events.clear();

        let mut outcome = None;
        for _ in 0..400 {
            tick(&mut state, &TickInput::default(), &mut events);
            for event in events.drain(..) {
                if let TickEvent::RoundOver { won } = event {
                    outcome = Some(won);
                }
            }
            if outcome.is_some() {
                break;
            }
        }

        assert_eq!(outcome, Some(false));
        assert_eq!(state.chain.popping_now(), 0);
        assert!(state.all_contracted());
        assert!(state.bubbles[0].paused);
    }
}
