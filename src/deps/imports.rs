//! Import extraction from Python source using tree-sitter

use std::collections::BTreeSet;

use tree_sitter::{Node, Parser, Query, QueryCursor};

use super::ScanError;

// `from . import x` and `from .mod import x` carry a `relative_import` node
// instead of a `dotted_name`, so they never match.
const IMPORT_QUERY: &str = r#"
(import_statement name: (dotted_name) @module)
(import_statement name: (aliased_import name: (dotted_name) @module))
(import_from_statement module_name: (dotted_name) @module)
"#;

/// Root module names referenced by `import` / `from ... import` anywhere in `source`.
pub fn extract_imports(source: &str) -> Result<BTreeSet<String>, ScanError> {
    let language = tree_sitter_python::language();

    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| ScanError::Grammar(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ScanError::Grammar("parser returned no tree".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(ScanError::Syntax {
            line: first_error_line(root).unwrap_or(1),
        });
    }

    let query =
        Query::new(language, IMPORT_QUERY).map_err(|e| ScanError::Grammar(e.to_string()))?;
    let mut cursor = QueryCursor::new();
    let mut modules = BTreeSet::new();

    for m in cursor.matches(&query, root, source.as_bytes()) {
        for capture in m.captures {
            if let Ok(text) = capture.node.utf8_text(source.as_bytes()) {
                if let Some(name) = root_module(text) {
                    modules.insert(name);
                }
            }
        }
    }

    Ok(modules)
}

/// `os.path` -> `os`
pub fn root_module(dotted: &str) -> Option<String> {
    let compact: String = dotted.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// 1-based line of the first ERROR or missing node.
fn first_error_line(node: Node<'_>) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .filter(|child| child.has_error())
        .find_map(first_error_line)
}
