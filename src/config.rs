//! Word list configuration
//!
//! The reserved words and operators evolve independently of the matching
//! rules, so they are loaded as data. A bundled list ships with the crate and
//! other revisions can be loaded from TOML:
//!
//! ```text
//! name = "wlangage"
//! aliases = ["wl"]
//! version = 3
//! emphasis = true
//! keywords = ["POUR TOUT", "SI", "SINON"]
//! operators = ["<=>", "<=", "="]
//! ```

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

static BUNDLED: &str = include_str!("../data/wlangage.toml");

/// A versioned set of reserved words and operators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    /// Revision of the list, informational only
    pub version: u32,
    /// Reserved words, possibly multi-word phrases
    pub keywords: Vec<String>,
    pub operators: Vec<String>,
}

/// Everything needed to build and register the WLangage grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Identifier the grammar is registered under
    pub name: String,
    /// Other identifiers resolving to the same grammar
    pub aliases: Vec<String>,
    /// Whether to add the `important` emphasis rules
    pub emphasis: bool,
    pub words: WordList,
}

impl Config {
    /// The word list bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUNDLED)
    }

    /// Load a word list from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        log::debug!("loading word list from {}", path.as_ref().display());
        Self::from_toml(&contents)
    }

    /// Parse a word list from TOML source
    pub fn from_toml(source: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(source)?;

        let name = table
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("wlangage")
            .to_string();

        let aliases = match table.get("aliases") {
            Some(v) => strings(v, "aliases")?,
            None => vec![],
        };

        let version = match table.get("version") {
            Some(v) => v
                .as_integer()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| Error::Config("`version` must be a positive integer".to_string()))?,
            None => 1,
        };

        let emphasis = match table.get("emphasis") {
            Some(v) => v
                .as_bool()
                .ok_or_else(|| Error::Config("`emphasis` must be a boolean".to_string()))?,
            None => false,
        };

        let keywords = required(&table, "keywords")?;
        let operators = required(&table, "operators")?;

        log::debug!(
            "word list {name} v{version}: {} keywords, {} operators",
            keywords.len(),
            operators.len()
        );

        Ok(Self {
            name,
            aliases,
            emphasis,
            words: WordList {
                version,
                keywords,
                operators,
            },
        })
    }
}

fn required(table: &toml::Table, key: &str) -> Result<Vec<String>> {
    let value = table
        .get(key)
        .ok_or_else(|| Error::Config(format!("missing `{key}`")))?;
    let list = strings(value, key)?;
    if list.is_empty() {
        return Err(Error::Config(format!("`{key}` is empty")));
    }
    Ok(list)
}

fn strings(value: &toml::Value, key: &str) -> Result<Vec<String>> {
    let array = value
        .as_array()
        .ok_or_else(|| Error::Config(format!("`{key}` must be an array")))?;
    array
        .iter()
        .map(|item| match item.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Some(_) => Err(Error::Config(format!("`{key}` contains an empty entry"))),
            None => Err(Error::Config(format!("`{key}` must only contain strings"))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_list_loads() {
        let config = Config::builtin().unwrap();
        assert_eq!(config.name, "wlangage");
        assert_eq!(config.aliases, vec!["wl".to_string()]);
        assert_eq!(config.words.version, 3);
        assert!(config.emphasis);
        assert_eq!(config.words.keywords.len(), 32);
        assert!(config
            .words
            .keywords
            .iter()
            .any(|k| k == "POUR TOUTE LIGNE SÉLECTIONNÉE"));
        assert!(config.words.operators.iter().any(|o| o == "<=>"));
    }

    #[test]
    fn defaults() {
        let config = Config::from_toml("keywords = [\"SI\"]\noperators = [\"=\"]").unwrap();
        assert_eq!(config.name, "wlangage");
        assert!(config.aliases.is_empty());
        assert_eq!(config.words.version, 1);
        assert!(!config.emphasis);
    }

    #[test]
    fn rejects_bad_lists() {
        assert!(matches!(
            Config::from_toml("operators = [\"=\"]"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("keywords = []\noperators = [\"=\"]"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("keywords = [\"SI\", 3]\noperators = [\"=\"]"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("keywords = [\" \"]\noperators = [\"=\"]"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("version = -1\nkeywords = [\"SI\"]\noperators = [\"=\"]"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("version = 0\nkeywords = [\"SI\"]\noperators = [\"=\"]"),
            Err(Error::Config(_))
        ));
        assert!(matches!(Config::from_toml("keywords = ["), Err(Error::Toml(_))));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/wlangage.toml"),
            Err(Error::Io(_))
        ));
    }
}
