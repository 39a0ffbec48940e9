mod cli;
mod commands;
mod config;
#[allow(unused_assignments)]
mod diagnostic;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Install the stderr log subscriber. `RUST_LOG` overrides the flag-derived level.
fn init_tracing(global: &cli::GlobalOpts) {
    let level = match (global.quiet, global.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!global.no_color)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(&cli.global);
    let output = output::OutputContext::from_global(&cli.global);

    let result = config::load_config(cli.global.config.as_deref()).and_then(|config| {
        match cli.command {
            cli::Commands::Init(args) => commands::init::run(args, &output),
            cli::Commands::Check(args) => commands::check::run(args, &config, &output),
            cli::Commands::Validate(args) => commands::validate::run(args, &output),
            cli::Commands::Fields(args) => commands::fields::run(args, &output),
            cli::Commands::Assemble(args) => commands::assemble::run(args, &config, &output),
            cli::Commands::Completions(args) => commands::completions::run(args),
        }
    });

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            report(&e, &output);
            std::process::exit(e.exit_code() as i32);
        }
    }
}

/// Render parse diagnostics with miette in human mode, then the error itself.
fn report(err: &CliError, output: &output::OutputContext) {
    if let CliError::Parse {
        errors,
        source_text,
        file,
    } = err
    {
        if output.mode == output::OutputMode::Human {
            let filename = file.display().to_string();
            for report in diagnostic::render_diagnostics(errors, source_text, &filename) {
                eprintln!("{report:?}");
            }
        }
    }
    output.print_error(err);
}
