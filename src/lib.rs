//! Lexical classification for WLangage source code.
//!
//! A [Grammar] is an ordered table of regex rules. Tokenizing text with it
//! yields [Span]s that cover the input exactly, each tagged with the
//! [Category] of the rule that matched it (or untagged, for plain text).

mod category;
mod config;
mod error;
mod grammar;
pub mod languages;
mod registry;
pub mod render;
mod theme;
mod tokenize;

pub use category::Category;
pub use config::{Config, WordList};
pub use error::{Error, Result};
pub use grammar::{Grammar, Rule};
pub use regex::Regex;
pub use registry::Registry;
pub use render::{trim, TokOpt};
pub use theme::{Style, Theme};
pub use tokenize::{Pass, Span, Tokens};

use std::sync::OnceLock;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The registry of built-in grammars, built on first use
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        Registry::builtin().expect("bundled WLangage grammar failed to load")
    })
}

/// Function to obtain a grammar based on a file extension or language identifier
pub fn from_extension(ext: &str) -> Option<&'static Grammar> {
    registry().get(ext.trim_start_matches('.'))
}
