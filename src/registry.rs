//! Grammar registry
//!
//! Hosts look grammars up by identifier. An alias is just another
//! identifier resolving to the same grammar.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::{languages, Grammar};
use std::collections::HashMap;

/// Grammars by identifier, plus aliases pointing at them
#[derive(Debug, Default)]
pub struct Registry {
    grammars: HashMap<String, Grammar>,
    aliases: HashMap<String, String>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the WLangage grammar built from the bundled word list
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.define(&Config::builtin()?)?;
        Ok(registry)
    }

    /// Build the WLangage grammar from `config` and register it under the
    /// configured name and aliases
    pub fn define(&mut self, config: &Config) -> Result<()> {
        let grammar = languages::wlangage(config)?;
        let aliases: Vec<&str> = config.aliases.iter().map(String::as_str).collect();
        self.define_grammar(&config.name, grammar, &aliases)
    }

    /// Register `grammar` under `name`, along with any aliases.
    /// Redefining a name replaces the previous grammar.
    pub fn define_grammar(&mut self, name: &str, grammar: Grammar, aliases: &[&str]) -> Result<()> {
        let name = name.to_lowercase();
        if self.grammars.insert(name.clone(), grammar).is_some() {
            log::warn!("grammar {name} redefined");
        }
        // A real grammar shadows an alias of the same name
        self.aliases.remove(&name);
        log::debug!("defined grammar {name}");
        for alias in aliases {
            self.define_alias(alias, &name)?;
        }
        Ok(())
    }

    /// Make `short` resolve to the grammar registered as `name`
    pub fn define_alias(&mut self, short: &str, name: &str) -> Result<()> {
        let target = self
            .resolve(name)
            .ok_or_else(|| Error::UnknownGrammar(name.to_string()))?
            .to_string();
        let short = short.to_lowercase();
        if self.grammars.contains_key(&short) {
            log::warn!("alias {short} ignored, a grammar already has that name");
            return Ok(());
        }
        if let Some(previous) = self.aliases.insert(short.clone(), target.clone()) {
            if previous != target {
                log::warn!("alias {short} moved from {previous} to {target}");
            }
        }
        log::debug!("aliased {short} to {target}");
        Ok(())
    }

    /// The canonical name an identifier or alias refers to
    pub fn resolve(&self, id: &str) -> Option<&str> {
        let id = id.to_lowercase();
        if let Some((name, _)) = self.grammars.get_key_value(&id) {
            return Some(name);
        }
        self.aliases.get(&id).map(String::as_str)
    }

    /// Look a grammar up by identifier or alias
    pub fn get(&self, id: &str) -> Option<&Grammar> {
        self.grammars.get(self.resolve(id)?)
    }

    /// Registered grammar names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.grammars.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Aliases registered for `name`, sorted
    pub fn aliases_of(&self, name: &str) -> Vec<&str> {
        let name = name.to_lowercase();
        let mut aliases: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, target)| **target == name)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort();
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn tiny() -> Grammar {
        let mut g = Grammar::new();
        g.add(Category::Keyword, r"\bfoo\b").unwrap();
        g
    }

    #[test]
    fn builtin_resolves_alias() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.names(), vec!["wlangage"]);
        assert_eq!(registry.resolve("wl"), Some("wlangage"));
        assert_eq!(registry.resolve("WLangage"), Some("wlangage"));
        assert_eq!(registry.aliases_of("wlangage"), vec!["wl"]);
        let a = registry.get("wl").unwrap() as *const Grammar;
        let b = registry.get("wlangage").unwrap() as *const Grammar;
        assert_eq!(a, b);
        assert!(registry.get("rust").is_none());
    }

    #[test]
    fn alias_to_unknown_grammar() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.define_alias("x", "missing"),
            Err(Error::UnknownGrammar(_))
        ));
    }

    #[test]
    fn alias_of_alias_points_at_grammar() {
        let mut registry = Registry::new();
        registry.define_grammar("foo", tiny(), &["f"]).unwrap();
        registry.define_alias("ff", "f").unwrap();
        assert_eq!(registry.resolve("ff"), Some("foo"));
        assert!(registry.get("ff").is_some());
    }

    #[test]
    fn grammar_shadows_alias() {
        let mut registry = Registry::new();
        registry.define_grammar("foo", tiny(), &["bar"]).unwrap();
        registry.define_grammar("bar", Grammar::new(), &[]).unwrap();
        assert_eq!(registry.resolve("bar"), Some("bar"));
        assert!(registry.get("bar").unwrap().is_empty());
        registry.define_alias("foo", "bar").unwrap();
        assert_eq!(registry.resolve("foo"), Some("foo"));
    }
}
