use dbml_dsl::{parse, validate};
use proptest::prelude::*;

/// Words that can never be bare identifiers.
const RESERVED: &[&str] = &[
    "project",
    "table",
    "tablepartial",
    "ref",
    "enum",
    "tablegroup",
    "indexes",
    "constraints",
];

/// Strategy for generating bare identifiers, keyword-like words included.
fn identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,12}",
        Just("type".to_string()),
        Just("name".to_string()),
        Just("action".to_string()),
        Just("note".to_string()),
        Just("pk".to_string()),
        Just("unique".to_string()),
        Just("default".to_string()),
        Just("where".to_string()),
    ]
    .prop_filter("not reserved", |s| !RESERVED.contains(&s.as_str()))
}

/// Strategy for generating a column type.
fn column_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("int".to_string()),
        Just("text".to_string()),
        Just("text[]".to_string()),
        Just("varchar(255)".to_string()),
        Just("decimal(10, 2)".to_string()),
        Just("timestamptz".to_string()),
    ]
}

/// Strategy for a column settings list.
fn settings() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop_oneof![
            Just("pk"),
            Just("unique"),
            Just("not null"),
            Just("null"),
            Just("increment"),
            Just("note: 'n'"),
            Just("default: 1"),
            Just("default: `now()`"),
        ],
        0..4,
    )
}

/// Flips the case of every other ASCII letter.
fn scramble_case(word: &str, seed: bool) -> String {
    word.chars()
        .enumerate()
        .map(|(i, c)| {
            if (i % 2 == 0) == seed {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    /// Any well-formed single-table document parses.
    #[test]
    fn generated_tables_parse(
        table in identifier(),
        columns in prop::collection::vec((identifier(), column_type(), settings()), 1..6),
    ) {
        let body: Vec<String> = columns
            .iter()
            .map(|(name, ty, settings)| {
                if settings.is_empty() {
                    format!("{name} {ty}")
                } else {
                    format!("{name} {ty} [{}]", settings.join(", "))
                }
            })
            .collect();
        let source = format!("Table {table} {{\n  {}\n}}", body.join("\n  "));

        let doc = parse(&source);
        prop_assert!(doc.is_ok(), "failed to parse: {source}");
        let doc = doc.unwrap();
        prop_assert_eq!(doc.tables.len(), 1);
        prop_assert_eq!(doc.tables[0].columns.len(), columns.len());
        prop_assert_eq!(doc.tables[0].elements.len(), columns.len());
        for (column, (name, _, _)) in doc.tables[0].columns.iter().zip(&columns) {
            prop_assert_eq!(&column.name, name);
        }
    }

    /// Reparsing identical text yields an equal document.
    #[test]
    fn parsing_is_deterministic(
        table in identifier(),
        column in identifier(),
        ty in column_type(),
    ) {
        let source = format!("Table {table} {{ {column} {ty} [pk] }}");
        prop_assert_eq!(parse(&source).unwrap(), parse(&source).unwrap());
    }

    /// Keyword case never changes the document.
    #[test]
    fn keyword_case_is_irrelevant(seed in any::<bool>(), column in identifier()) {
        let canonical = format!("table t {{ {column} int [not null, primary key] }}");
        let scrambled = format!(
            "{} t {{ {column} int [{} {}, {} {}] }}",
            scramble_case("table", seed),
            scramble_case("not", seed),
            scramble_case("null", !seed),
            scramble_case("primary", !seed),
            scramble_case("key", seed),
        );
        prop_assert_eq!(parse(&canonical).unwrap(), parse(&scrambled).unwrap());
    }

    /// Parse never panics on arbitrary input.
    #[test]
    fn parse_never_panics(input in "\\PC{0,200}") {
        let _ = parse(&input);
    }

    /// Validate never panics and agrees with parse on success.
    #[test]
    fn validate_agrees_with_parse(input in "\\PC{0,120}") {
        let validation = validate(&input);
        prop_assert_eq!(validation.valid, validation.error.is_none());
        if parse(&input).is_ok() {
            prop_assert!(validation.valid);
        }
    }

    /// Error positions always lie inside the source.
    #[test]
    fn error_positions_are_in_bounds(input in "[a-zA-Z{}\\[\\]:,'\\n ]{0,80}") {
        if let Err(err) = parse(&input) {
            prop_assert!(err.offset <= input.len());
            prop_assert!(err.line >= 1);
            prop_assert!(err.column >= 1);
            prop_assert!(err.line <= input.matches('\n').count() + 1);
        }
    }
}
