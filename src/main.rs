//! Turtle Combat entry point
//!
//! Headless runner: plays one match between two built-in brains and logs
//! the result. Set `RUST_LOG=debug` (or `trace`) to follow the match.
//!
//! Usage: `turtle-combat [brain1] [brain2] [layout] [seed] [rules.json]`

#[cfg(not(target_arch = "wasm32"))]
use turtle_combat::{
    Rules, brains,
    sim::{Layout, MatchState, Outcome},
};

/// Step limit used when the rules set no cutoff
#[cfg(not(target_arch = "wasm32"))]
const FALLBACK_MAX_STEPS: u64 = 20_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Turtle Combat (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the wasm surface
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize| args.get(i).map(String::as_str);

    let seed = match arg(3) {
        Some(s) => s.parse::<u64>()?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };
    let layout = match arg(2) {
        Some(id) => Layout::from_id(id.parse()?)?,
        None => Layout::Empty,
    };
    let rules = match arg(4) {
        Some(path) => Rules::load(path)?,
        None => Rules::default(),
    };

    // Separate streams so the two brains never share random draws
    let brain1 = brains::by_name(arg(0).unwrap_or("direct"), seed.wrapping_add(1))?;
    let brain2 = brains::by_name(arg(1).unwrap_or("turret"), seed.wrapping_add(2))?;

    log::info!("Game initialized with seed: {}", seed);
    let max_steps = if rules.step_cutoff > 0 {
        rules.step_cutoff
    } else {
        FALLBACK_MAX_STEPS
    };

    let mut state = MatchState::new(rules, layout, seed, brain1, brain2)?;
    match state.run(max_steps) {
        Some(Outcome::Winner(side)) => {
            let body = state.body(side);
            println!("{} ({}) wins with {} health", body.name(), side, body.health());
        }
        Some(Outcome::Tie) => println!("Tie!"),
        Some(Outcome::Timeout) => println!("Out of time! Even health."),
        None => {
            log::warn!("No result after {} steps", state.steps);
            println!("No result after {} steps", state.steps);
        }
    }
    Ok(())
}
