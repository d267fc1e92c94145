use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use wm_context::config::EngineConfig;
use wm_context::script::ScriptRunner;
use wm_context::tracing_sub;

const AFTER_HELP: &str = indoc::indoc! {"
    Script commands (one per line, `#` at the start of a word begins a comment):
      create NAME [frame=titled|untitled|transparent|extended]
                  [type=normal|utility|popup] [owner=NAME] [closable=yes|no]
      view NAME [none]            attach or drop the recording view
      show NAME | hide NAME | destroy NAME
      bounds NAME W H [X Y]       min-size / max-size NAME W H
      level NAME normal|floating|topmost
      owner NAME OWNER|none       add-child / remove-child PARENT CHILD
      grab / ungrab / drag-grab NAME, drag-ungrab, cursor NAME KIND
      event NAME KIND ARGS...     realize, press/release BUTTON X Y [MODS],
                                  motion X Y [MODS], scroll DIR X Y [MODS],
                                  enter/leave X Y, key-press/key-release KEY [MODS],
                                  focus-in, focus-out, state CHANGED NEW,
                                  configure X Y W H, configure-view W H,
                                  paint, delete, destroy
      expect owner|children|on-top|alive|grab|drag ...
"};

#[derive(Parser, Debug)]
#[command(
    name = "wm-replay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replays a window event script against a headless backend and prints peer notifications",
    after_help = AFTER_HELP
)]
struct ReplayCli {
    /// Script to replay.
    #[arg(short = 's', long = "script", value_name = "FILE")]
    script: PathBuf,

    /// Append engine logs to this file instead of stderr.
    #[arg(long = "log-file", value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Size given to windows shown before any size was requested.
    #[arg(long = "default-width", value_name = "PX", default_value_t = wm_context::constants::DEFAULT_WIDTH)]
    default_width: i32,

    #[arg(long = "default-height", value_name = "PX", default_value_t = wm_context::constants::DEFAULT_HEIGHT)]
    default_height: i32,
}

impl ReplayCli {
    fn level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

impl TryFrom<&ReplayCli> for EngineConfig {
    type Error = String;

    fn try_from(cli: &ReplayCli) -> Result<Self, Self::Error> {
        if cli.default_width <= 0 || cli.default_height <= 0 {
            return Err("default size must be positive".to_string());
        }
        Ok(Self {
            default_width: cli.default_width,
            default_height: cli.default_height,
            ..Self::default()
        })
    }
}

fn main() -> ExitCode {
    let args = ReplayCli::parse();
    let config = match EngineConfig::try_from(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("wm-replay: {message}");
            return ExitCode::from(2);
        }
    };
    if let Err(err) = tracing_sub::init_with(args.level(), args.log_file.as_deref()) {
        eprintln!("wm-replay: cannot open log file: {err}");
        return ExitCode::from(2);
    }

    let mut runner = ScriptRunner::new(config);
    let result = runner.run_file(&args.script);

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout.write_all(runner.render_log().as_bytes()) {
        eprintln!("wm-replay: {err}");
        return ExitCode::FAILURE;
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "script failed");
            eprintln!("wm-replay: {err}");
            ExitCode::FAILURE
        }
    }
}
