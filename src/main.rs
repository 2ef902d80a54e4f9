//! Rumrunners entry point
//!
//! Plays a self-play match between two built-in bots and prints the summary
//! as JSON. Takes an optional seed or a path to a JSON match configuration,
//! then an optional league name:
//!
//! ```text
//! rumrunners [SEED | CONFIG.json] [wood3 | wood2 | wood1 | bronze]
//! ```
//!
//! Set `RUST_LOG=debug` to follow the match round by round.

use std::process::ExitCode;

use rumrunners::{Bot, MatchConfig, RumHunter, consts::PLAYER_COUNT, run_match};

fn main() -> ExitCode {
    env_logger::init();

    let config = match MatchConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Playing in league {}", config.league.as_str());

    let mut bots: [Box<dyn Bot>; PLAYER_COUNT] =
        [Box::new(RumHunter::default()), Box::new(RumHunter::default())];
    let summary = run_match(&config, &mut bots);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to encode match summary: {}", e);
            ExitCode::FAILURE
        }
    }
}
