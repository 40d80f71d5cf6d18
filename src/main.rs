//! Planet Jumper headless runner
//!
//! Plays one run with a simple autopilot, records the final score and prints
//! the leaderboard. Useful for balancing tuning files without a renderer.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive GameSimulation directly
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "planet-jumper", version, about = "Play one headless Planet Jumper run")]
struct Args {
    /// Run seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks if the player never falls
    #[arg(long = "ticks")]
    max_ticks: Option<u64>,
    /// JSON tuning file
    #[arg(long)]
    tuning: Option<std::path::PathBuf>,
    /// JSON high score file (in-memory board if omitted)
    #[arg(long)]
    scores: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn run(args: Args) -> Result<(), planet_jumper::GameError> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use planet_jumper::consts::{SIM_DT, WORLD_HEIGHT, WORLD_WIDTH};
    use planet_jumper::{GameSimulation, HighScoreStore, ScoreStorage, Tuning};

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let max_ticks = args.max_ticks.unwrap_or(60 * 60 * 5);

    let storage = match args.scores {
        Some(path) => ScoreStorage::File(path),
        None => ScoreStorage::Memory,
    };
    let store = Rc::new(RefCell::new(HighScoreStore::open(storage)));

    let mut game = GameSimulation::with_config(WORLD_WIDTH, WORLD_HEIGHT, None, seed, tuning)?;
    log::info!("Planet Jumper (headless) seed={}", seed);

    game.on_event(|event| {
        if let Some(cue) = event.sound_cue() {
            log::trace!("play {}", cue);
        }
    });
    game.on_score_changed(|score| {
        if score % 1000 < 10 {
            log::debug!("score {}", score);
        }
    });
    {
        let store = store.clone();
        game.on_game_over(move |final_score| {
            match store.borrow_mut().add_score(final_score) {
                Some(rank) => log::info!("Final score {} ranks #{}", final_score, rank),
                None => log::info!("Final score {} didn't make the board", final_score),
            }
        });
    }

    let mut ticks = 0;
    while !game.is_over() && ticks < max_ticks {
        game.set_horizontal_input(autopilot(&game));
        game.step(SIM_DT);
        ticks += 1;
    }

    if !game.is_over() {
        log::info!("Stopped after {} ticks without falling", ticks);
        store.borrow_mut().add_score(game.current_score());
    }

    println!(
        "seed {} | score {} | ticks {} | platforms spawned {}",
        seed,
        game.current_score(),
        ticks,
        game.state().physics.total_spawned()
    );
    println!("High scores:");
    for (i, score) in store.borrow().top_scores().iter().enumerate() {
        println!("{:>3}. {}", i + 1, score);
    }
    Ok(())
}

/// Steer under the next platform up while rising, onto the nearest one below
/// while falling.
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(game: &planet_jumper::GameSimulation) -> f32 {
    let player = game.player_position();
    let radius = game.player_radius();

    let target = if game.player_velocity().y > 0.0 {
        game.platforms().find(|p| p.pos.y > player.y)
    } else {
        game.platforms()
            .rev()
            .find(|p| p.pos.y + p.radius <= player.y - radius)
    };

    match target {
        Some(platform) => {
            let dx = platform.pos.x - player.x;
            if dx.abs() < 4.0 { 0.0 } else { dx.signum() }
        }
        None => 0.0,
    }
}
