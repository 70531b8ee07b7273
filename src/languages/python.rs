//! Python language profile.

use super::LanguageProfile;

/// Tree-sitter query for Python import references.
///
/// Captures the dotted module name from both plain imports and
/// from-imports.
const IMPORTS_QUERY: &str = r#"
(import_statement (dotted_name) @import.name)
(import_from_statement module_name: (dotted_name) @import.name)
"#;

/// Tree-sitter query for Python function and class declarations.
const FUNCTIONS_QUERY: &str = r#"
(function_definition name: (identifier) @function.name)
(class_definition name: (identifier) @class.name)
"#;

fn grammar() -> tree_sitter::Language {
    tree_sitter_python::LANGUAGE.into()
}

/// Register the Python profile for .py and .pyw files.
pub fn register() {
    super::register(LanguageProfile {
        name: "python",
        extensions: &["py", "pyw"],
        grammar,
        imports_query: IMPORTS_QUERY,
        functions_query: FUNCTIONS_QUERY,
    });
}
