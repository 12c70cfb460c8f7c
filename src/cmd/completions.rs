//! Completions command implementation
//!
//! Handles the `bundle-sizes completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// bundle-sizes completions bash > /etc/bash_completion.d/bundle-sizes
///
/// # Zsh
/// bundle-sizes completions zsh > ~/.zfunc/_bundle-sizes
///
/// # Fish
/// bundle-sizes completions fish > ~/.config/fish/completions/bundle-sizes.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

/// Write a completion script for `cmd` into `out`
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn command() -> Command {
        Command::new("bundle-sizes")
            .subcommand(Command::new("report").arg(Arg::new("output_dir")))
            .subcommand(Command::new("history"))
    }

    #[test]
    fn test_write_completions_for_all_shells() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            let mut out = Vec::new();
            write_completions(shell, &mut command(), &mut out);

            let script = String::from_utf8(out).unwrap();
            assert!(script.contains("bundle-sizes"), "{shell:?} script missing bin name");
        }
    }

    #[test]
    fn test_bash_completions_list_subcommands() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut command(), &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("report"));
        assert!(script.contains("history"));
    }
}
