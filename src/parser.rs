//! Narrow interface over the tree-sitter parsing engine.
//!
//! A `Capability` bundles a loaded grammar with its two compiled queries
//! (imports, functions). Loading is the expensive part; workers cache
//! loaded capabilities and reuse them across files of the same language.

use std::collections::BTreeSet;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser as TsParser, Query, QueryCursor};

use crate::languages::LanguageProfile;

/// A loaded per-language parsing capability: grammar plus compiled queries.
pub struct Capability {
    name: &'static str,
    language: Language,
    imports: Query,
    functions: Query,
}

/// Names extracted from one file, sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub functions: Vec<String>,
    pub imports: Vec<String>,
}

impl Capability {
    /// Load the grammar and compile both queries for a language profile.
    ///
    /// Query compilation fails if the query text does not match the
    /// grammar; callers treat that as the language being unavailable.
    pub fn load(profile: &LanguageProfile) -> anyhow::Result<Self> {
        let language: Language = (profile.grammar)();
        let imports = Query::new(&language, profile.imports_query)?;
        let functions = Query::new(&language, profile.functions_query)?;
        Ok(Self {
            name: profile.name,
            language,
            imports,
            functions,
        })
    }

    /// The language this capability handles.
    pub fn language(&self) -> &'static str {
        self.name
    }

    /// Parse source bytes and evaluate both queries against the tree.
    pub fn extract(&self, source: &[u8]) -> anyhow::Result<Extraction> {
        let mut parser = TsParser::new();
        parser.set_language(&self.language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse source"))?;

        let functions = collect_capture_text(&self.functions, tree.root_node(), source);
        let imports = collect_capture_text(&self.imports, tree.root_node(), source);

        Ok(Extraction { functions, imports })
    }
}

/// Collect the decoded text of every capture produced by a query.
///
/// Text is trimmed of surrounding whitespace and quote characters, then
/// deduplicated through a BTreeSet so the output is sorted regardless of
/// the order the engine yields matches.
fn collect_capture_text(query: &Query, root: tree_sitter::Node, source: &[u8]) -> Vec<String> {
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source);

    let mut names = BTreeSet::new();

    while let Some(m) = matches.next() {
        for capture in m.captures {
            let text = capture.node.utf8_text(source).unwrap_or("");
            let name = text.trim().trim_matches(|c| c == '"' || c == '\'');
            if !name.is_empty() {
                names.insert(name.to_string());
            }
        }
    }

    names.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages;

    fn capability(name: &str) -> Capability {
        languages::register_all();
        let profile = languages::profile(name).unwrap();
        Capability::load(&profile).unwrap()
    }

    #[test]
    fn test_python_extraction() {
        let cap = capability("python");
        let source = br#"
import os
import sys
from pathlib import Path

def main():
    pass

def helper(x):
    return x

class Runner:
    def run(self):
        pass
"#;

        let extraction = cap.extract(source).unwrap();
        assert_eq!(
            extraction.functions,
            vec!["Runner", "helper", "main", "run"]
        );
        assert_eq!(extraction.imports, vec!["os", "pathlib", "sys"]);
    }

    #[test]
    fn test_go_extraction_strips_quotes() {
        let cap = capability("go");
        let source = br#"
package main

import (
    "fmt"
    "os"
)

type Config struct{}

func main() {
    fmt.Println(os.Args)
}

func (c Config) Validate() error {
    return nil
}
"#;

        let extraction = cap.extract(source).unwrap();
        assert_eq!(extraction.functions, vec!["Config", "Validate", "main"]);
        // Quotes around import paths are stripped
        assert_eq!(extraction.imports, vec!["fmt", "os"]);
    }

    #[test]
    fn test_extraction_deduplicates() {
        let cap = capability("python");
        // The same module imported twice and re-imported via from
        let source = br#"
import os
import os
from os import path

def dup():
    pass

def dup():
    pass
"#;

        let extraction = cap.extract(source).unwrap();
        assert_eq!(extraction.imports, vec!["os"]);
        assert_eq!(extraction.functions, vec!["dup"]);
    }

    #[test]
    fn test_java_extraction() {
        let cap = capability("java");
        let source = br#"
import java.util.List;
import java.io.IOException;

public class Widget {
    public void render() {}
}

interface Drawable {
    void draw();
}
"#;

        let extraction = cap.extract(source).unwrap();
        assert!(extraction.functions.contains(&"Widget".to_string()));
        assert!(extraction.functions.contains(&"render".to_string()));
        assert!(extraction.functions.contains(&"Drawable".to_string()));
        assert_eq!(
            extraction.imports,
            vec!["java.io.IOException", "java.util.List"]
        );
    }

    #[test]
    fn test_empty_source() {
        let cap = capability("python");
        let extraction = cap.extract(b"").unwrap();
        assert!(extraction.functions.is_empty());
        assert!(extraction.imports.is_empty());
    }
}
