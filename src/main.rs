//! Prisms demo entry point
//!
//! Runs the game headless with a scripted player: it clicks through the
//! cut-screens and, shortly after each round starts, fires its one pop at
//! the busiest spot on the field. Doubles as a smoke run and as a reference
//! for wiring a real renderer behind the engine traits.

use std::time::{Duration, Instant};

use glam::Vec2;

use prisms::consts::{POP_GROWTH, REFRESH_RATE, SCREEN_HEIGHT, SCREEN_WIDTH, SPAWN_RADIUS};
use prisms::engine::{DiagnosticLog, HeadlessEngine};
use prisms::sim::RoundState;
use prisms::{Catalog, Flow, Screen, Session, Settings};

/// Frames the scripted player lingers on a cut-screen
const SCREEN_DELAY: u32 = 20;
/// Frames it watches the field drift before popping
const POP_DELAY: u32 = 45;
/// Lost attempts on one level before it gives up
const MAX_RETRIES: u32 = 5;

fn main() {
    env_logger::init();
    log::info!("Prisms starting");

    let settings = Settings::load(Settings::FILE);
    let base_seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("base seed {base_seed}");

    let diag = match settings.diag_log.as_deref() {
        Some(path) => DiagnosticLog::open(path),
        None => DiagnosticLog::disabled(),
    };
    let mut session = Session::new(
        HeadlessEngine::new(),
        Catalog::stock(),
        Flow::starting_at(settings.start_level),
        base_seed,
        diag,
    );

    let mut autoplay = Autoplay::new();
    let frame_time = Duration::from_secs(1) / REFRESH_RATE;
    let mut frames = 0u64;

    loop {
        let frame_start = Instant::now();

        autoplay.drive(&mut session);
        if !session.frame() {
            break;
        }

        frames += 1;
        if settings.max_frames.is_some_and(|cap| frames >= cap) {
            log::info!("frame cap reached after {frames} frames");
            session.shutdown();
            break;
        }

        if settings.paced {
            let elapsed = frame_start.elapsed();
            if elapsed < frame_time {
                std::thread::sleep(frame_time - elapsed);
            }
        }
    }

    log::info!(
        "demo finished after {frames} frames with {} total points",
        session.flow().total_points()
    );
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Scripted player: one click per cut-screen, one aimed pop per round
struct Autoplay {
    hold: u32,
    fired: bool,
    round_seen: u64,
    level_seen: u32,
    retries: u32,
}

impl Autoplay {
    fn new() -> Self {
        Self {
            hold: SCREEN_DELAY,
            fired: false,
            round_seen: 0,
            level_seen: 0,
            retries: 0,
        }
    }

    fn drive(&mut self, session: &mut Session<HeadlessEngine>) {
        if self.hold > 0 {
            self.hold -= 1;
            return;
        }
        match session.screen() {
            Screen::Intro | Screen::LevelStart => {
                click_center(session);
                self.hold = SCREEN_DELAY;
            }
            Screen::Retry => {
                self.retries += 1;
                if self.retries > MAX_RETRIES {
                    log::info!("giving up on level {}", session.flow().level());
                    session.engine_mut().press_escape();
                } else {
                    click_center(session);
                }
                self.hold = SCREEN_DELAY;
            }
            // One full run is enough for a demo
            Screen::WonGame => session.engine_mut().press_escape(),
            Screen::Playing => self.play(session),
        }
    }

    fn play(&mut self, session: &mut Session<HeadlessEngine>) {
        let round = session.flow().round_index();
        if round != self.round_seen {
            self.round_seen = round;
            self.fired = false;
            self.hold = POP_DELAY;
            if session.flow().level() != self.level_seen {
                self.level_seen = session.flow().level();
                self.retries = 0;
            }
            return;
        }
        if self.fired {
            return;
        }
        if let Some(target) = busiest_spot(session.round()) {
            session
                .engine_mut()
                .queue_click(target.x as i32, target.y as i32);
        }
        self.fired = true;
    }
}

fn click_center(session: &mut Session<HeadlessEngine>) {
    session
        .engine_mut()
        .queue_click(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);
}

/// Center of the bubble with the most neighbors inside one pop's reach
fn busiest_spot(round: &RoundState) -> Option<Vec2> {
    let reach = (POP_GROWTH + 2 * SPAWN_RADIUS) as f32;
    round
        .bubbles
        .iter()
        .map(|a| {
            let neighbors = round
                .bubbles
                .iter()
                .filter(|b| a.circle.center.distance(b.circle.center) <= reach)
                .count();
            (neighbors, a.circle.center)
        })
        .max_by_key(|(neighbors, _)| *neighbors)
        .map(|(_, center)| center)
}
