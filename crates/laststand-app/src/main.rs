use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use laststand_app::cli::{self, CliArgs, Invocation};
use laststand_app::error::AppError;
use laststand_app::highscores::HighScores;
use laststand_app::session;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match cli::parse(std::env::args().skip(1)) {
        Ok(Invocation::Play(args)) => args,
        Ok(Invocation::Help) => {
            cli::print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}");
            cli::print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let mut config = session::load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;

    let summary = if args.realtime {
        session::play_realtime(config, args.seconds)?
    } else {
        session::play_headless(config, args.seconds)
    };
    println!(
        "score {} | wave {} | kills {} | {:.1}s",
        summary.score, summary.wave, summary.kills, summary.elapsed_secs
    );

    let mut scores = HighScores::load(&args.scores)?;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0);
    match scores.add_score(summary.score, summary.wave, timestamp) {
        Some(rank) => {
            println!("new high score, rank #{rank}");
            scores.save(&args.scores)?;
        }
        None => log::info!("score did not make the table"),
    }
    Ok(())
}
