//! Scope: unique JavaScript identifiers for entity ids.
//!
//! One `Scope` lives for one generated module. Ids are assigned a name
//! the first time they are seen and keep it; two ids never share a name.

use std::collections::{HashMap, HashSet};

/// Words that can never be used as a binding name in a module.
pub const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield", "arguments",
    "eval", "undefined", "NaN", "Infinity",
];

const SEPARATOR: &str = "_";

#[derive(Debug, Clone, Default)]
pub struct Scope {
    names_by_id: HashMap<String, String>,
    occupied: HashSet<String>,
    /// Next suffix to try per normalized name.
    next_index: HashMap<String, usize>,
}

impl Scope {
    /// Create a scope where `occupied` identifiers (and reserved words)
    /// are never handed out.
    pub fn new<I, S>(occupied: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scope = Self::default();
        for word in RESERVED_WORDS {
            scope.occupied.insert((*word).to_string());
        }
        for identifier in occupied {
            scope.occupied.insert(identifier.into());
        }
        scope
    }

    /// Create a scope and replay earlier `(id, preferred name)` requests
    /// in order, so its assignments match a scope that saw the same calls.
    pub fn with_history<I, S, H, A, B>(occupied: I, history: H) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        H: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut scope = Self::new(occupied);
        for (id, preferred) in history {
            scope.get_name(id.as_ref(), preferred.as_ref());
        }
        scope
    }

    /// Name for `id`, derived from `preferred_name` on first use.
    pub fn get_name(&mut self, id: &str, preferred_name: &str) -> String {
        if let Some(name) = self.names_by_id.get(id) {
            return name.clone();
        }

        let base = normalize_js_name(preferred_name);
        let mut name = base.clone();
        if self.occupied.contains(&name) {
            let index = self.next_index.entry(base.clone()).or_insert(1);
            loop {
                name = format!("{}{}{}", base, SEPARATOR, index);
                *index += 1;
                if !self.occupied.contains(&name) {
                    break;
                }
            }
        }

        self.occupied.insert(name.clone());
        self.names_by_id.insert(id.to_string(), name.clone());
        name
    }

    /// Name already assigned to `id`, if any.
    pub fn assigned(&self, id: &str) -> Option<&str> {
        self.names_by_id.get(id).map(String::as_str)
    }

    pub fn is_occupied(&self, identifier: &str) -> bool {
        self.occupied.contains(identifier)
    }
}

/// Turn arbitrary text into a valid identifier: keep `[A-Za-z0-9_$]`,
/// drop everything else, prefix `_` when the result is empty or starts
/// with a digit.
pub fn normalize_js_name(name: &str) -> String {
    let mut normalized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if normalized.is_empty() {
        return "_".to_string();
    }
    if normalized.starts_with(|c: char| c.is_ascii_digit()) {
        normalized.insert(0, '_');
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize() {
        assert_eq!(normalize_js_name("Blog Posts"), "BlogPosts");
        assert_eq!(normalize_js_name("my-var"), "myvar");
        assert_eq!(normalize_js_name("1st"), "_1st");
        assert_eq!(normalize_js_name("ü ß"), "_");
        assert_eq!(normalize_js_name("$data_1"), "$data_1");
    }

    #[test]
    fn same_id_same_name() {
        let mut scope = Scope::new(Vec::<String>::new());
        let first = scope.get_name("a", "posts");
        let again = scope.get_name("a", "something else");
        assert_eq!(first, "posts");
        assert_eq!(again, "posts");
        assert_eq!(scope.assigned("a"), Some("posts"));
    }

    #[test]
    fn different_ids_get_suffixes() {
        let mut scope = Scope::new(Vec::<String>::new());
        assert_eq!(scope.get_name("a", "posts"), "posts");
        assert_eq!(scope.get_name("b", "posts"), "posts_1");
        assert_eq!(scope.get_name("c", "Posts!"), "Posts");
        assert_eq!(scope.get_name("d", "posts"), "posts_2");
    }

    #[test]
    fn suffix_skips_names_taken_verbatim() {
        let mut scope = Scope::new(Vec::<String>::new());
        assert_eq!(scope.get_name("a", "item_1"), "item_1");
        assert_eq!(scope.get_name("b", "item"), "item");
        assert_eq!(scope.get_name("c", "item"), "item_2");
    }

    #[test]
    fn occupied_and_reserved_names_are_avoided() {
        let mut scope = Scope::new(["sitemap"]);
        assert_eq!(scope.get_name("a", "sitemap"), "sitemap_1");
        assert_eq!(scope.get_name("b", "class"), "class_1");
        assert!(scope.is_occupied("sitemap"));
    }

    #[test]
    fn history_replay_matches() {
        let history = [("x", "data"), ("y", "data"), ("z", "system")];
        let mut left = Scope::with_history(["fetch"], history);
        let mut right = Scope::with_history(["fetch"], history);
        assert_eq!(left.assigned("y"), Some("data_1"));
        assert_eq!(left.get_name("w", "data"), right.get_name("w", "data"));
    }
}
