//! Go language profile.

use super::LanguageProfile;

/// Tree-sitter query for Go import references.
///
/// Captures the quoted import path; the capability strips the quotes.
const IMPORTS_QUERY: &str = r#"
(import_spec path: (interpreted_string_literal) @import.name)
"#;

/// Tree-sitter query for Go function, method, and type declarations.
const FUNCTIONS_QUERY: &str = r#"
(function_declaration name: (identifier) @function.name)
(method_declaration name: (field_identifier) @method.name)
(type_declaration (type_spec name: (type_identifier) @type.name))
"#;

fn grammar() -> tree_sitter::Language {
    tree_sitter_go::LANGUAGE.into()
}

/// Register the Go profile for .go files.
pub fn register() {
    super::register(LanguageProfile {
        name: "go",
        extensions: &["go"],
        grammar,
        imports_query: IMPORTS_QUERY,
        functions_query: FUNCTIONS_QUERY,
    });
}
