//! TypeScript language profile.

use super::LanguageProfile;

/// Tree-sitter query for TypeScript import references.
const IMPORTS_QUERY: &str = r#"
(import_statement source: (string) @import.name)
"#;

/// Tree-sitter query for TypeScript declarations: functions, arrow
/// functions bound with let/const, classes, methods, and interfaces.
const FUNCTIONS_QUERY: &str = r#"
(function_declaration name: (identifier) @function.name)
(lexical_declaration
    (variable_declarator
        name: (identifier) @function.name
        value: (arrow_function)))
(class_declaration name: (type_identifier) @class.name)
(method_definition name: (property_identifier) @method.name)
(interface_declaration name: (type_identifier) @interface.name)
"#;

fn grammar() -> tree_sitter::Language {
    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
}

/// Register the TypeScript profile for .ts and .tsx files.
pub fn register() {
    super::register(LanguageProfile {
        name: "typescript",
        extensions: &["ts", "tsx"],
        grammar,
        imports_query: IMPORTS_QUERY,
        functions_query: FUNCTIONS_QUERY,
    });
}
