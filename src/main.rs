use clap::Parser;
use rpncalc::command::{CommandDispatcher, CommandManager, CommandRepository, register_core_commands};
use rpncalc::config::CalcConfig;
use rpncalc::logging::{LogListener, init_logging};
use rpncalc::messaging::STACK_ERROR;
use rpncalc::stack::OperandStack;
use rpncalc::ui::Cli;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "rpncalc", about = "Interactive RPN calculator with undo and redo", version)]
struct Args {
    /// Configuration file (RON); defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter directive, overrides RUST_LOG and the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Number of stack elements displayed
    #[arg(long)]
    depth: Option<usize>,

    /// Skip the startup message
    #[arg(long)]
    no_banner: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match CalcConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("rpncalc: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(depth) = args.depth {
        config.display.depth = depth;
    }
    if args.no_banner {
        config.show_banner = false;
    }
    if let Err(e) = config.validate() {
        eprintln!("rpncalc: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = init_logging(&config.log, args.log_level.as_deref()) {
        eprintln!("rpncalc: {e}");
        return ExitCode::FAILURE;
    }
    info!(?config, "configuration loaded");

    let mut stack = OperandStack::new();
    // Kept alive for the whole session; the bus only holds a weak reference
    let log_listener = Arc::new(LogListener);
    if let Err(e) = stack.subscribe(STACK_ERROR, &log_listener) {
        warn!(%e, "error log listener not attached");
    }

    let mut repository = CommandRepository::new();
    for e in register_core_commands(&mut repository) {
        eprintln!("rpncalc: {e}");
    }
    let mut dispatcher =
        CommandDispatcher::new(repository, CommandManager::with_capacity(config.history_limit));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut cli =
        Cli::new(stdin.lock(), stdout.lock(), config.display.clone()).with_banner(config.show_banner);

    match cli.run(&mut dispatcher, &mut stack) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rpncalc: {e}");
            ExitCode::FAILURE
        }
    }
}
