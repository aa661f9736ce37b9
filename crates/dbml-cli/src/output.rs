use console::{Style, Term};
use dbml_dsl::SyntaxError;

use crate::cli::GlobalOpts;
use crate::diagnostic::render_diagnostic;
use crate::error::CliError;

/// Output format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    fn from_format(format: &str) -> Self {
        match format {
            "json" => Self::Json,
            "plain" => Self::Plain,
            _ => Self::Human,
        }
    }
}

/// Output context derived from global flags.
///
/// Documents and machine-readable results go to stdout. Status lines,
/// diagnostics and logs go to stderr.
pub struct OutputContext {
    pub mode: OutputMode,
    pub verbose: u8,
    pub quiet: bool,
    pub use_color: bool,
}

impl OutputContext {
    /// Construct from global CLI options.
    pub fn from_global(global: &GlobalOpts) -> Self {
        let use_color = !global.no_color
            && std::env::var("TERM").map_or(true, |t| t != "dumb")
            && Term::stderr().is_term();

        Self {
            mode: OutputMode::from_format(&global.format),
            verbose: global.verbose,
            quiet: global.quiet,
            use_color,
        }
    }

    fn labelled(&self, label: &str, style: Style, msg: &str) {
        if self.use_color {
            eprintln!("{} {msg}", style.bold().apply_to(label));
        } else {
            eprintln!("{label} {msg}");
        }
    }

    /// Print a success line to stderr (human mode only, not in quiet mode).
    pub fn success(&self, msg: &str) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        self.labelled("ok", Style::new().green(), msg);
    }

    /// Print a warning to stderr (not in quiet mode).
    pub fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => self.labelled("warning:", Style::new().yellow(), msg),
            OutputMode::Json => eprintln!("{}", serde_json::json!({ "warning": msg })),
            OutputMode::Plain => eprintln!("warning\t{msg}"),
        }
    }

    /// Print a command failure using the appropriate output mode.
    pub fn print_error(&self, err: &CliError) {
        match self.mode {
            OutputMode::Human => self.labelled("error:", Style::new().red(), &err.to_string()),
            OutputMode::Json => eprintln!("{}", err.to_json()),
            OutputMode::Plain => eprintln!("error\t{err}"),
        }
    }

    /// Report a syntax error in `filename`.
    ///
    /// Human mode renders a miette diagnostic and plain mode a
    /// `file, line, column, message` row, both on stderr. JSON mode prints
    /// nothing and returns the result entry for the caller's summary.
    pub fn syntax_error(
        &self,
        filename: &str,
        source: &str,
        error: &SyntaxError,
    ) -> Option<serde_json::Value> {
        match self.mode {
            OutputMode::Human => {
                eprintln!("{:?}", render_diagnostic(error, source, filename));
                None
            }
            OutputMode::Json => Some(serde_json::json!({
                "file": filename,
                "valid": false,
                "error": error,
            })),
            OutputMode::Plain => {
                eprintln!(
                    "{filename}\t{}\t{}\t{}",
                    error.line, error.column, error.message
                );
                None
            }
        }
    }

    /// Print pretty JSON data to stdout.
    pub fn print_json(&self, value: &serde_json::Value) {
        if let Ok(s) = serde_json::to_string_pretty(value) {
            println!("{s}");
        }
    }

    /// Print a status message to stderr (human mode only, not in quiet mode).
    pub fn status(&self, msg: &str) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        eprintln!("{msg}");
    }

    /// Default tracing filter directive for the chosen verbosity.
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
