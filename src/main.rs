//! Just Jump entry point
//!
//! The browser build starts from `just_jump::wasm`. Natively the game runs
//! headless with no input for a bounded number of frames and prints where
//! it ended up: `just-jump [levels.txt]`, plans separated by blank lines.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;
    use std::time::{SystemTime, UNIX_EPOCH};

    use just_jump::levels::{GAME_LEVELS, split_plans};
    use just_jump::sim::Input;
    use just_jump::{Progress, Session, Settings, display::TextDisplay, render_text};

    /// Fixed step used headless (60 Hz)
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Ten seconds of play
    const HEADLESS_FRAMES: u32 = 600;

    env_logger::init();
    log::info!("Just Jump (native) starting...");

    let settings = Settings::load();
    let plans: Vec<String> = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => split_plans(&text),
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => GAME_LEVELS.iter().map(|plan| plan.to_string()).collect(),
    };
    let plans: Vec<&str> = plans.iter().map(String::as_str).collect();

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let mut session = match Session::new(&plans, settings, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut display = TextDisplay::default();
    let input = Input::default();
    for _ in 0..HEADLESS_FRAMES {
        match session.frame(FRAME_DT, &input, &mut display) {
            Ok(Progress::Finished { .. }) => break,
            Ok(Progress::LevelEnded { level, status }) => {
                log::info!("Level {} {}", level + 1, status.as_str());
            }
            Ok(_) => {}
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    print!("{}", render_text(session.state()));
    println!(
        "level {}/{}  lives {}  status {}",
        (session.level_index() + 1).min(session.level_count()),
        session.level_count(),
        session.lives(),
        session.state().status().as_str()
    );
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is just_jump::wasm::start, this is just to satisfy the compiler
}
