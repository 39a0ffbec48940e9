use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::CliError;

const BIN_NAME: &str = "prompt-forge";

/// Run the `completions` command: print the `prompt-forge` completion script
/// for one shell to stdout.
pub fn run(args: CompletionsArgs) -> Result<(), CliError> {
    let shell = parse_shell(&args.shell)?;
    write_script(shell, &mut std::io::stdout());
    Ok(())
}

fn parse_shell(name: &str) -> Result<Shell, CliError> {
    match name {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" => Ok(Shell::PowerShell),
        "elvish" => Ok(Shell::Elvish),
        other => Err(CliError::InvalidArgument {
            message: format!("unsupported shell: {other}"),
        }),
    }
}

/// The script covers every subcommand and global flag of the binary.
fn write_script(shell: Shell, out: &mut dyn Write) {
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, out);
}
