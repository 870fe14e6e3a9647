//! Shell completions command handler

use crate::cli::{Cli, CompletionsArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use clap::CommandFactory;

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs, output: &mut OutputWriter) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    let mut script = Vec::new();
    clap_complete::generate(args.shell.to_clap_shell(), &mut cmd, name, &mut script);

    let script = String::from_utf8(script)
        .map_err(|e| Error::other(format!("completion script is not UTF-8: {}", e)))?;
    output.write(&script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{OutputFormat, Shell};
    use crate::output::test_support::capture;

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let (mut output, buffer) = capture(OutputFormat::Human, true);
        handle_completions(CompletionsArgs { shell: Shell::Bash }, &mut output).unwrap();

        let script = buffer.contents();
        assert!(script.contains("techform"));
        assert!(script.contains("validate"));
        assert!(script.contains("session"));
    }
}
