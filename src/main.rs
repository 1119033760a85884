use clap::Parser;
use miette::Result;
use tmx::cli::{Cli, Commands};
use tmx::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();

    match cli.command {
        Commands::Info(args) => tmx::cli::info::run(args, &printer)?,
        Commands::Check(args) => {
            if !tmx::cli::check::run(args, &printer)? {
                std::process::exit(1);
            }
        }
        Commands::Completions(args) => tmx::cli::completions::run(args)?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` decides the level unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tmx=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
