use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::CliError;

/// Write the completion script for `args.shell` to stdout.
pub fn run(args: CompletionsArgs) -> Result<(), CliError> {
    tracing::debug!(shell = %args.shell, "generating completions");
    let mut stdout = std::io::stdout().lock();
    write_script(args.shell, &mut stdout)
        .map_err(|e| CliError::Other(format!("failed to write completions: {e}")))
}

fn write_script<W: Write>(shell: Shell, out: &mut W) -> std::io::Result<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, bin_name, out);
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_name_the_binary_and_its_subcommands() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let mut buf = Vec::new();
            write_script(shell, &mut buf).unwrap();
            let script = String::from_utf8(buf).unwrap();
            assert!(script.contains("dbml"), "{shell}");
            assert!(script.contains("validate"), "{shell}");
        }
    }
}
