use clap::Parser;
use fexp::session::{self, BANNER};
use fexp::{BufReadSource, ExecContext, LineSource, Shell};
use fexp_config::{FexpConfig, LogFormat, LogLevel};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod completer;
mod editor;

/// fexp - Interactive explorer shell for the local filesystem
#[derive(Parser, Debug)]
#[command(name = "fexp", version, about)]
struct Args {
    /// Start directory (default: current directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Execute command and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Read plain lines from stdin, without the line editor
    #[arg(long)]
    plain: bool,

    /// Force debug logging
    #[arg(long)]
    debug: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("fexp: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => fexp_config::load_from_file(path)?,
        None => fexp_config::load()?,
    };
    init_tracing(&config, args.debug);

    let start = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let mut shell = Shell::new(&start)?.with_prompt(config.shell.prompt.clone());
    debug!(cwd = %shell.cwd().display(), "session started");

    let mut ctx = ExecContext::default();

    if let Some(command) = args.command {
        shell.execute(&command, &mut ctx)?;
        ctx.stdout.flush()?;
        return Ok(());
    }

    if config.shell.banner {
        ctx.stdout.writeln(BANNER)?;
    }

    let stdin = std::io::stdin();
    let interactive = !args.plain && config.shell.line_editor && stdin.is_terminal();
    let mut source: Box<dyn LineSource> = if interactive {
        Box::new(editor::EditorSource::new(shell.cwd(), &config.shell.history)?)
    } else {
        Box::new(BufReadSource::new(stdin.lock()))
    };

    session::run(&mut shell, source.as_mut(), &mut ctx)?;
    Ok(())
}

fn init_tracing(config: &FexpConfig, debug: bool) {
    let level = if debug {
        LogLevel::Debug
    } else {
        config.logging.level
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);
    match config.logging.format {
        LogFormat::Full => builder.init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
