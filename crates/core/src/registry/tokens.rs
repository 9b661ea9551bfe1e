use std::collections::BTreeMap;

use canvas_style_protocol::{DesignToken, TokenCategory};

/// Read-only snapshot of the active design tokens, keyed by exact name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenRegistry {
    tokens: BTreeMap<String, DesignToken>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a token list. A later token with the same name replaces an
    /// earlier one.
    pub fn from_tokens(tokens: impl IntoIterator<Item = DesignToken>) -> Self {
        let mut registry = Self::new();
        for token in tokens {
            registry.insert(token);
        }
        registry
    }

    /// Insert or replace a token, returning the previous one.
    pub fn insert(&mut self, token: DesignToken) -> Option<DesignToken> {
        self.tokens.insert(token.name.clone(), token)
    }

    pub fn remove(&mut self, name: &str) -> Option<DesignToken> {
        self.tokens.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&DesignToken> {
        self.tokens.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|t| t.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &DesignToken> {
        self.tokens.values()
    }

    pub fn by_category(&self, category: TokenCategory) -> impl Iterator<Item = &DesignToken> {
        self.tokens.values().filter(move |t| t.category == category)
    }

    /// Custom-property declarations for every token (`--name` → value), for
    /// hosts that publish tokens on `:root`.
    pub fn css_variables(&self) -> BTreeMap<String, String> {
        self.tokens
            .values()
            .map(|t| (t.css_var_name(), t.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TokenRegistry {
        TokenRegistry::from_tokens([
            DesignToken::new("surface", TokenCategory::Color, "#111827"),
            DesignToken::new("primary", TokenCategory::Color, "#3b82f6"),
            DesignToken::new("font-body", TokenCategory::Font, "Inter"),
            DesignToken::new("spacing-md", TokenCategory::Spacing, "16"),
        ])
    }

    #[test]
    fn lookup_is_exact() {
        let tokens = registry();
        assert_eq!(tokens.value("surface"), Some("#111827"));
        assert_eq!(tokens.value("Surface"), None);
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn enumerates_by_category() {
        let tokens = registry();
        let colors: Vec<_> = tokens
            .by_category(TokenCategory::Color)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(colors, ["primary", "surface"]);
    }

    #[test]
    fn later_tokens_replace_earlier_ones() {
        let mut tokens = registry();
        let previous = tokens.insert(DesignToken::new("surface", TokenCategory::Color, "#000"));
        assert_eq!(previous.map(|t| t.value), Some("#111827".to_string()));
        assert_eq!(tokens.value("surface"), Some("#000"));

        tokens.remove("surface");
        assert!(!tokens.contains("surface"));
    }

    #[test]
    fn css_variables_use_custom_names() {
        let mut tokens = registry();
        tokens.insert(
            DesignToken::new("primary", TokenCategory::Color, "#3b82f6").with_css_var("--brand"),
        );
        let vars = tokens.css_variables();
        assert_eq!(vars.get("--brand").map(String::as_str), Some("#3b82f6"));
        assert_eq!(vars.get("--surface").map(String::as_str), Some("#111827"));
    }
}
