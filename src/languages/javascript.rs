//! JavaScript language profile.

use super::LanguageProfile;

/// Tree-sitter query for JavaScript import references.
///
/// Covers ES module imports. The captured source string keeps its quotes;
/// the capability strips them.
const IMPORTS_QUERY: &str = r#"
(import_statement source: (string) @import.name)
"#;

/// Tree-sitter query for JavaScript function, class, and method
/// declarations, including arrow functions bound to variables.
const FUNCTIONS_QUERY: &str = r#"
(function_declaration name: (identifier) @function.name)
(variable_declarator
    name: (identifier) @function.name
    value: [(arrow_function) (function_expression)])
(class_declaration name: (identifier) @class.name)
(method_definition name: (property_identifier) @method.name)
"#;

fn grammar() -> tree_sitter::Language {
    tree_sitter_javascript::LANGUAGE.into()
}

/// Register the JavaScript profile for .js, .jsx, .mjs, and .cjs files.
pub fn register() {
    super::register(LanguageProfile {
        name: "javascript",
        extensions: &["js", "jsx", "mjs", "cjs"],
        grammar,
        imports_query: IMPORTS_QUERY,
        functions_query: FUNCTIONS_QUERY,
    });
}
