//! Command-line arguments for the `laststand` binary.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown argument: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Overrides the config seed.
    pub seed: Option<u64>,
    /// Simulated seconds to play before stopping.
    pub seconds: f64,
    pub config: Option<PathBuf>,
    pub scores: PathBuf,
    /// Run on the game-loop thread at wall-clock speed.
    pub realtime: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            seed: None,
            seconds: 300.0,
            config: None,
            scores: PathBuf::from("laststand-scores.json"),
            realtime: false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Invocation {
    Play(CliArgs),
    Help,
}

pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Invocation, CliError> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => parsed.seed = Some(value(&arg, args.next())?),
            "--seconds" => {
                let seconds: f64 = value(&arg, args.next())?;
                if !(seconds > 0.0 && seconds.is_finite()) {
                    return Err(CliError::InvalidValue {
                        flag: arg,
                        value: seconds.to_string(),
                    });
                }
                parsed.seconds = seconds;
            }
            "--config" => parsed.config = Some(PathBuf::from(raw(&arg, args.next())?)),
            "--scores" => parsed.scores = PathBuf::from(raw(&arg, args.next())?),
            "--realtime" => parsed.realtime = true,
            "help" | "--help" | "-h" => return Ok(Invocation::Help),
            _ => return Err(CliError::Unknown(arg)),
        }
    }
    Ok(Invocation::Play(parsed))
}

fn raw(flag: &str, next: Option<String>) -> Result<String, CliError> {
    next.ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

fn value<T: std::str::FromStr>(flag: &str, next: Option<String>) -> Result<T, CliError> {
    let text = raw(flag, next)?;
    text.parse().map_err(|_| CliError::InvalidValue {
        flag: flag.to_string(),
        value: text,
    })
}

pub fn print_usage() {
    eprintln!(
        "laststand: headless LAST STAND autopilot run\n\
         \n\
         Usage: laststand [options]\n\
         \n\
           --seed <N>       RNG seed (overrides the config file)\n\
           --seconds <S>    Simulated seconds to play (default: 300)\n\
           --config <path>  JSON SimConfig file (missing fields use defaults)\n\
           --scores <path>  High score file (default: laststand-scores.json)\n\
           --realtime       Run on the game-loop thread at wall-clock speed\n\
         \n\
         RUST_LOG controls log verbosity (default: info)."
    );
}
