use dbml_dsl::Parser;

use crate::cli::ValidateArgs;
use crate::commands::{discover_schema_files, read_source};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

/// Run the `validate` command: check .dbml files against the grammar only.
pub fn run(args: ValidateArgs, config: &CliConfig, output: &OutputContext) -> Result<(), CliError> {
    let parser = Parser::new(config.parse.clone());
    let files = discover_schema_files(&config.schema_paths(&args.paths))?;

    let mut failed = 0usize;
    let mut results: Vec<serde_json::Value> = Vec::new();

    for file in &files {
        let source = read_source(file)?;
        let filename = file.display().to_string();

        match parser.check(&source) {
            Ok(()) => match output.mode {
                OutputMode::Human => output.success(&filename),
                OutputMode::Json => results.push(serde_json::json!({
                    "file": filename,
                    "valid": true,
                })),
                OutputMode::Plain => println!("{filename}\tvalid"),
            },
            Err(error) => {
                failed += 1;
                results.extend(output.syntax_error(&filename, &source, &error));
            }
        }
    }

    if output.mode == OutputMode::Json {
        output.print_json(&serde_json::json!({
            "files": files.len(),
            "failed": failed,
            "results": results,
        }));
    }

    if failed > 0 {
        return Err(CliError::ParseFailures {
            failed,
            total: files.len(),
        });
    }
    Ok(())
}
