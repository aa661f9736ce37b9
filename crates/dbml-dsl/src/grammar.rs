use pest_derive::Parser;

/// The compiled grammar. Zero-sized; parse state lives in each call.
#[derive(Parser)]
#[grammar = "dbml.pest"]
pub struct DbmlGrammar;

/// Returns true for keyword tokens, which carry no data of their own.
pub(crate) fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_project
            | Rule::kw_table
            | Rule::kw_table_partial
            | Rule::kw_table_group
            | Rule::kw_ref
            | Rule::kw_enum
            | Rule::kw_indexes
            | Rule::kw_constraints
            | Rule::kw_note
            | Rule::kw_header_color
            | Rule::kw_as
            | Rule::kw_pk
            | Rule::kw_primary
            | Rule::kw_key
            | Rule::kw_unique
            | Rule::kw_not
            | Rule::kw_null
            | Rule::kw_increment
            | Rule::kw_generated
            | Rule::kw_always
            | Rule::kw_by
            | Rule::kw_default
            | Rule::kw_identity
            | Rule::kw_stored
            | Rule::kw_check
            | Rule::kw_type
            | Rule::kw_name
            | Rule::kw_where
            | Rule::kw_asc
            | Rule::kw_desc
            | Rule::kw_constraint
            | Rule::kw_exclude
            | Rule::kw_using
            | Rule::kw_with
            | Rule::kw_deferrable
            | Rule::kw_initially
            | Rule::kw_deferred
            | Rule::kw_immediate
            | Rule::kw_delete
            | Rule::kw_update
            | Rule::kw_cascade
            | Rule::kw_restrict
            | Rule::kw_set
            | Rule::kw_no
            | Rule::kw_action
    )
}

/// Returns a human-readable description of a rule for diagnostics.
///
/// Keywords render as the quoted word (`kw_header_color` -> `'headercolor'`),
/// other rules as their name with spaces.
pub fn describe(rule: &Rule) -> String {
    match rule {
        Rule::EOI => "end of input".to_string(),
        Rule::ident => "identifier".to_string(),
        Rule::quoted_ident => "quoted identifier".to_string(),
        Rule::relation => "relationship ('>', '<', '-', '<>')".to_string(),
        Rule::hex_color => "hex color".to_string(),
        Rule::enum_def => "enum".to_string(),
        Rule::reference => "ref".to_string(),
        other => {
            let name = format!("{other:?}");
            match name.strip_prefix("kw_") {
                Some(keyword) => format!("'{}'", keyword.replace('_', "")),
                None => name.replace('_', " "),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pest::Parser as _;

    use super::*;

    fn matches(rule: Rule, input: &str) -> bool {
        DbmlGrammar::parse(rule, input)
            .map(|mut pairs| pairs.next().map(|p| p.as_str() == input).unwrap_or(false))
            .unwrap_or(false)
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert!(matches(Rule::kw_table, "table"));
        assert!(matches(Rule::kw_table, "TABLE"));
        assert!(matches(Rule::kw_table, "TaBlE"));
    }

    #[test]
    fn keywords_stop_at_word_boundary() {
        assert!(!matches(Rule::kw_table, "tables"));
        assert!(DbmlGrammar::parse(Rule::kw_table, "tablepartial").is_err());
    }

    #[test]
    fn reserved_words_are_not_identifiers() {
        for word in [
            "project",
            "table",
            "tablepartial",
            "ref",
            "enum",
            "tablegroup",
            "indexes",
            "constraints",
        ] {
            assert!(!matches(Rule::ident, word), "{word} should be reserved");
        }
    }

    #[test]
    fn keyword_like_words_are_identifiers() {
        for word in ["type", "name", "action", "note", "pk", "unique", "tables", "refs", "Table"] {
            assert!(matches(Rule::ident, word), "{word} should be an identifier");
        }
    }

    #[test]
    fn quoted_identifier_admits_any_character() {
        assert!(matches(Rule::quoted_ident, "\"first name (legal)\""));
    }

    #[test]
    fn numbers() {
        assert!(matches(Rule::number, "42"));
        assert!(matches(Rule::number, "-3.5"));
        assert!(!matches(Rule::number, "1."));
        assert!(!matches(Rule::number, "10px"));
    }

    #[test]
    fn column_type_forms() {
        assert!(matches(Rule::column_type, "int"));
        assert!(matches(Rule::column_type, "text[]"));
        assert!(matches(Rule::column_type, "decimal(10, 2)"));
        assert!(matches(Rule::column_type, "geometry(Point, (4326))"));
        assert!(matches(Rule::column_type, "core.status"));
    }

    #[test]
    fn hex_color_shapes() {
        assert!(matches(Rule::hex_color, "#3498DB"));
        assert!(matches(Rule::hex_color, "#fff"));
        assert!(!matches(Rule::hex_color, "#12345"));
    }

    #[test]
    fn relation_prefers_many_to_many() {
        let pair = DbmlGrammar::parse(Rule::relation, "<>")
            .unwrap()
            .next()
            .unwrap();
        assert_eq!(pair.as_str(), "<>");
    }

    #[test]
    fn comments_are_skipped() {
        let source = "// leading\nTable t { /* inline */ id int // trailing\n }";
        assert!(DbmlGrammar::parse(Rule::document, source).is_ok());
    }

    #[test]
    fn keyword_descriptions() {
        assert_eq!(describe(&Rule::kw_header_color), "'headercolor'");
        assert_eq!(describe(&Rule::kw_pk), "'pk'");
        assert_eq!(describe(&Rule::column_settings), "column settings");
        assert_eq!(describe(&Rule::EOI), "end of input");
    }

    #[test]
    fn every_keyword_rule_is_filtered() {
        assert!(is_keyword(Rule::kw_action));
        assert!(!is_keyword(Rule::ident));
        assert!(!is_keyword(Rule::sort_order));
    }
}
