use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Rename and optimize the static assets of a web project
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rename Cyrillic-named assets to their canonical Latin names
    Rename,

    /// Back up the asset folder, then resize and recompress its images in place
    Optimize,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_commands_take_no_arguments() {
        assert!(Cli::try_parse_from(["asset-tidy", "rename"]).is_ok());
        assert!(Cli::try_parse_from(["asset-tidy", "optimize"]).is_ok());
        assert!(Cli::try_parse_from(["asset-tidy", "optimize", "extra"]).is_err());
    }

    #[test]
    fn test_verbosity_is_global() {
        let cli = Cli::try_parse_from(["asset-tidy", "rename", "-q"]).unwrap();
        assert_eq!(cli.verbose.log_level_filter(), log::LevelFilter::Warn);
    }
}
