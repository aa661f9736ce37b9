use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Parse and validate DBML schema files.
///
/// Turns `.dbml` sources into a typed JSON document, or checks them for
/// syntax errors with line and column diagnostics.
#[derive(Parser)]
#[command(
    name = "dbml",
    version,
    about = "Parse and validate DBML schema files",
    after_help = "Use 'dbml <command> --help' for more information about a command.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Global options available to all subcommands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Configuration file path [env: DBML_CONFIG]
    #[arg(short = 'c', long = "config", global = true, env = "DBML_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: human (default), json, plain
    #[arg(
        long,
        global = true,
        default_value = "human",
        value_parser = ["human", "json", "plain"]
    )]
    pub format: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output [env: NO_COLOR]
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse .dbml files and print the documents as JSON
    Parse(ParseArgs),

    /// Check .dbml files for syntax errors only
    Validate(ValidateArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Arguments for `dbml parse`.
#[derive(Args)]
pub struct ParseArgs {
    /// Schema files or directories to parse (default: the configured schema dir)
    pub paths: Vec<PathBuf>,

    /// Extra column type alias, FROM=TO (repeatable)
    #[arg(short = 't', long = "type-alias", value_name = "FROM=TO", value_parser = parse_type_alias)]
    pub type_aliases: Vec<(String, String)>,

    /// Request strict parsing
    #[arg(long = "strict")]
    pub strict: bool,
}

/// Arguments for `dbml validate`.
#[derive(Args)]
pub struct ValidateArgs {
    /// Schema files or directories to check (default: the configured schema dir)
    pub paths: Vec<PathBuf>,
}

/// Arguments for `dbml completions`.
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

fn parse_type_alias(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim().to_string(), to.trim().to_string()))
        }
        _ => Err(format!("expected FROM=TO, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::try_parse_from(["dbml", "completions", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, clap_complete::Shell::Zsh),
            _ => panic!("expected completions command"),
        }
        assert!(Cli::try_parse_from(["dbml", "completions", "tcsh"]).is_err());
    }

    #[test]
    fn parse_global_verbose() {
        let cli = Cli::try_parse_from(["dbml", "-vvv", "validate"]).unwrap();
        assert_eq!(cli.global.verbose, 3);
    }

    #[test]
    fn parse_global_quiet() {
        let cli = Cli::try_parse_from(["dbml", "-q", "validate"]).unwrap();
        assert!(cli.global.quiet);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["dbml", "-q", "-v", "validate"]).is_err());
    }

    #[test]
    fn parse_format_json() {
        let cli = Cli::try_parse_from(["dbml", "--format", "json", "validate"]).unwrap();
        assert_eq!(cli.global.format, "json");
    }

    #[test]
    fn reject_unknown_format() {
        assert!(Cli::try_parse_from(["dbml", "--format", "xml", "validate"]).is_err());
    }

    #[test]
    fn parse_command_with_aliases() {
        let cli = Cli::try_parse_from([
            "dbml",
            "parse",
            "a.dbml",
            "--type-alias",
            "kinstant=timestamp with time zone",
            "-t",
            "money=numeric",
            "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Parse(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("a.dbml")]);
                assert_eq!(
                    args.type_aliases,
                    vec![
                        ("kinstant".to_string(), "timestamp with time zone".to_string()),
                        ("money".to_string(), "numeric".to_string()),
                    ]
                );
                assert!(args.strict);
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn type_alias_requires_both_sides() {
        assert!(parse_type_alias("money").is_err());
        assert!(parse_type_alias("=numeric").is_err());
        assert!(parse_type_alias("money=").is_err());
        assert_eq!(
            parse_type_alias("a = b").unwrap(),
            ("a".to_string(), "b".to_string())
        );
    }
}
