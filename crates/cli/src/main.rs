mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mcfc_lib::consts::LOG_TARGET;
use tracing_subscriber::EnvFilter;

use cmd::{BuildArgs, cmd_build, cmd_pack};
use output::{OutputFormat, print_error};

/// mcfc - compile `#>` directive sources into datapacks
#[derive(Parser)]
#[command(name = "mcfc")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile one or more source files
  Build {
    /// Source files, processed in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output root (default: each source file's directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Zip the datapack after compiling
    #[arg(short, long)]
    zip: bool,

    /// Archive path; implies --zip (single source only)
    #[arg(long)]
    archive: Option<PathBuf>,
  },

  /// Zip an existing datapack directory
  Pack {
    /// The datapack directory
    dir: PathBuf,

    /// Archive path (default: <dir>.zip next to the directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
}

/// `log` directives always reach the user; everything else follows
/// `RUST_LOG`, or `--verbose`, or warnings only.
fn init_tracing(verbose: bool) {
  let base = std::env::var("RUST_LOG").unwrap_or_else(|_| {
    if verbose {
      "warn,mcfc_lib=debug,mcfc=debug".to_string()
    } else {
      "warn".to_string()
    }
  });
  let filter = EnvFilter::try_new(format!("{base},{LOG_TARGET}=info")).unwrap_or_else(|_| EnvFilter::new("warn"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Build {
      files,
      output,
      zip,
      archive,
    } => cmd_build(BuildArgs {
      files,
      output,
      zip,
      archive,
      verbose: cli.verbose,
      format: cli.format,
    }),
    Commands::Pack { dir, output } => cmd_pack(&dir, output.as_deref(), cli.format),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{e:#}"));
      ExitCode::FAILURE
    }
  }
}
