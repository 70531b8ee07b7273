//! Java language profile.

use super::LanguageProfile;

/// Tree-sitter query for Java import declarations.
const IMPORTS_QUERY: &str = r#"
(import_declaration (scoped_identifier) @import.name)
"#;

/// Tree-sitter query for Java method, class, and interface declarations.
const FUNCTIONS_QUERY: &str = r#"
(method_declaration name: (identifier) @function.name)
(class_declaration name: (identifier) @class.name)
(interface_declaration name: (identifier) @interface.name)
"#;

fn grammar() -> tree_sitter::Language {
    tree_sitter_java::LANGUAGE.into()
}

/// Register the Java profile for .java files.
pub fn register() {
    super::register(LanguageProfile {
        name: "java",
        extensions: &["java"],
        grammar,
        imports_query: IMPORTS_QUERY,
        functions_query: FUNCTIONS_QUERY,
    });
}
