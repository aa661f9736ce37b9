use dbml_core::Document;
use dbml_dsl::Parser;

use crate::cli::ParseArgs;
use crate::commands::{discover_schema_files, read_source};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

/// Run the `parse` command: turn .dbml files into documents and print them
/// as JSON on stdout. A file with a syntax error does not stop the run.
pub fn run(args: ParseArgs, config: &CliConfig, output: &OutputContext) -> Result<(), CliError> {
    let parser = Parser::new(config.parse_options(&args.type_aliases, args.strict));
    if parser.is_strict() {
        output.warn("strict mode is reserved and adds no checks");
    }
    let files = discover_schema_files(&config.schema_paths(&args.paths))?;

    let mut failed = 0usize;
    let mut results: Vec<serde_json::Value> = Vec::new();

    for file in &files {
        let source = read_source(file)?;
        let filename = file.display().to_string();

        match parser.parse(&source) {
            Ok(document) => {
                tracing::info!(file = %filename, tables = document.tables.len(), "parsed");
                emit_document(output, &filename, &document, &mut results)?;
                output.status(&format!("  {filename} .... {}", summarize(&document)));
            }
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
    output.success(&format!("{} file(s) parsed", files.len()));
    Ok(())
}

fn emit_document(
    output: &OutputContext,
    filename: &str,
    document: &Document,
    results: &mut Vec<serde_json::Value>,
) -> Result<(), CliError> {
    let value = serde_json::to_value(document).map_err(|e| CliError::Other(e.to_string()))?;
    match output.mode {
        OutputMode::Human => output.print_json(&value),
        OutputMode::Json => results.push(serde_json::json!({
            "file": filename,
            "document": value,
        })),
        OutputMode::Plain => println!("{filename}\t{value}"),
    }
    Ok(())
}

fn summarize(document: &Document) -> String {
    format!(
        "{} tables, {} refs, {} enums",
        document.tables.len(),
        document.references.len(),
        document.enums.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_counts_elements() {
        let document = dbml_dsl::parse(
            "Table a { id int }\nTable b { a_id int [ref: > a.id] }\nEnum s { x }\nRef: b.a_id > a.id",
        )
        .unwrap();
        assert_eq!(summarize(&document), "2 tables, 1 refs, 1 enums");
    }
}
