//! Headless demo: runs one scripted match to completion and dumps the final
//! snapshot as JSON. Set RUST_LOG=info to watch serves, points, and the
//! game-over transition.

use duel_pong::consts::SIM_DT;
use duel_pong::{MatchConfig, MatchController, MatchPhase, Side};

fn main() {
    env_logger::init();

    let mut game = match MatchController::new(MatchConfig::default()) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    game.start();

    // The opponent tracks the ball perfectly; the player trails it by more
    // than half a paddle width and keeps missing, so the match ends.
    let mut snapshot = game.step(SIM_DT);
    for _ in 0..50_000 {
        let ball_x = snapshot.ball.center.x;
        game.apply_paddle_input(Side::Opponent, ball_x);
        game.apply_paddle_input(Side::Player, ball_x + 60.0);

        snapshot = game.step(SIM_DT);
        if snapshot.phase == MatchPhase::GameOver {
            break;
        }
    }

    if let Ok(json) = serde_json::to_string_pretty(&snapshot) {
        println!("{json}");
    }
}
