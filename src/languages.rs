//! The WLangage ruleset.
//!
//! This grammar will produce the following categories:
//!
//! comment - line (`//`) and block (`/* */`) comments
//! string - double quoted strings, `\` escapes the next character
//! variable-assignment - `est un Entier`, with assignment-keyword and type children
//! visibility - public, privé, protégé, hérite de
//! keyword - reserved words taken from the word list
//! procedure - `PROCÉDURE [qualifier] Name`, with procedure-keyword (or important) and
//!   procedure-name children
//! important - emphasis alias of variable-assignment and visibility
//! function - any identifier followed by an opening parenthesis
//! property - any identifier following `.` or `..` after another identifier
//! number - integers and decimals, negatives included
//! operator - operators taken from the word list
//! punctuation - brackets, braces, parentheses, `,` `;` `:` `.`

use crate::config::{Config, WordList};
use crate::error::Result;
use crate::{Category, Grammar};

/// Letters and digits of any script, plus underscore
const IDENT: &str = r"[\p{L}\p{N}_]+";
const ASSIGNMENT: &str = r"est\s+une?|sont\s+des";
const VISIBILITY: &str = r"public|priv[eé]|prot[eé]g[eé]|h[eé]rite\s+de";
const PROCEDURE: &str = r"proc[eé]dure(?:\s+(?:interne|constructeur|destructeur|virtuelle))?";

/// Obtain the WLangage grammar for a word list
pub fn wlangage(config: &Config) -> Result<Grammar> {
    let words = &config.words;
    let mut g = Grammar::new();

    g.add(Category::Comment, r"//[^\r\n]*")?.greedy();
    g.add(Category::Comment, r"(?s)/\*.*?(?:\*/|\z)")?.greedy();
    g.add(Category::String, r#"(?s)"(?:[^"\\]|\\.)*""#)?.greedy();

    let variable_assignment = format!(r"(?i)\b(?:{ASSIGNMENT})\s+{IDENT}");
    let visibility = format!(r"(?i)({VISIBILITY})(?:\s|$)");
    let mut assignment = Grammar::new();
    assignment.add(Category::AssignmentKeyword, &format!(r"(?i)\b(?:{ASSIGNMENT})\b"))?;
    assignment.add(Category::Type, &format!(r"\b{IDENT}$"))?;

    let rule = g.add(Category::VariableAssignment, &variable_assignment)?;
    rule.inside(assignment);
    if config.emphasis {
        rule.yields_to_emphasis();
    }
    let rule = g
        .add(Category::Visibility, &visibility)?
        .preceded_by(r"^|\s")?;
    if config.emphasis {
        rule.yields_to_emphasis();
    }

    g.add(Category::Keyword, &keywords(words))?;

    let label = if config.emphasis {
        Category::Important
    } else {
        Category::ProcedureKeyword
    };
    let mut procedure = Grammar::new();
    // A qualifier only belongs to the phrase when a name still follows it
    procedure.add(label, &format!(r"(?i)\b({PROCEDURE})\s+[\p{{L}}\p{{N}}_]"))?;
    procedure.add(Category::ProcedureName, &format!(r"\b{IDENT}$"))?;
    g.add(Category::Procedure, &format!(r"(?i)\b{PROCEDURE}\s+{IDENT}"))?
        .inside(procedure);

    if config.emphasis {
        g.add(Category::Important, &variable_assignment)?;
        g.add(Category::Important, &visibility)?
            .preceded_by(r"^|\s")?;
    }

    g.add(Category::Function, &format!(r"\b({IDENT})\s*\("))?;
    g.add(Category::Property, &format!(r"(?:\.\.|\.)({IDENT})"))?
        .preceded_by(r"[\p{L}\p{N}_]")?;
    g.add(Category::Number, r"-?\b[0-9]+(?:\.[0-9]+)?\b")?;
    g.add(Category::Operator, &operators(words))?;
    g.add(Category::Punctuation, r"[(){}\[\],;:.]")?;

    log::debug!(
        "built {} grammar: {} rules, word list v{}",
        config.name,
        g.len(),
        words.version
    );
    Ok(g)
}

/// Whole-word, case-insensitive alternation of the reserved words
fn keywords(words: &WordList) -> String {
    let phrases: Vec<String> = longest_first(&words.keywords)
        .into_iter()
        .map(|k| {
            k.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    format!(r"(?i)\b(?:{})\b", phrases.join("|"))
}

/// Alternation of the operators, longest first
fn operators(words: &WordList) -> String {
    let escaped: Vec<String> = longest_first(&words.operators)
        .into_iter()
        .map(regex::escape)
        .collect();
    format!("(?:{})", escaped.join("|"))
}

/// Sort by descending length so no entry is preempted by one of its prefixes
fn longest_first(items: &[String]) -> Vec<&str> {
    let mut sorted: Vec<&str> = items.iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    sorted.dedup();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(keywords: &[&str], operators: &[&str]) -> WordList {
        WordList {
            version: 1,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            operators: operators.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn keyword_pattern() {
        let w = words(&["SI", "POUR TOUT", "POUR"], &["="]);
        assert_eq!(keywords(&w), r"(?i)\b(?:POUR\s+TOUT|POUR|SI)\b");
    }

    #[test]
    fn operator_pattern() {
        let w = words(&["SI"], &["<", "<=", "<=>", "??*", "+"]);
        assert_eq!(operators(&w), r"(?:<=>|\?\?\*|<=|\+|<)");
    }

    #[test]
    fn rule_table_order() {
        let mut config = Config::builtin().unwrap();
        let g = wlangage(&config).unwrap();
        let order: Vec<Category> = g.rules().iter().map(|r| r.category()).collect();
        assert_eq!(
            order,
            vec![
                Category::Comment,
                Category::Comment,
                Category::String,
                Category::VariableAssignment,
                Category::Visibility,
                Category::Keyword,
                Category::Procedure,
                Category::Important,
                Category::Important,
                Category::Function,
                Category::Property,
                Category::Number,
                Category::Operator,
                Category::Punctuation,
            ]
        );
        config.emphasis = false;
        let g = wlangage(&config).unwrap();
        assert_eq!(g.len(), 12);
        assert!(g.rules().iter().all(|r| r.category() != Category::Important));
    }

    #[test]
    fn greedy_rules() {
        let g = wlangage(&Config::builtin().unwrap()).unwrap();
        let greedy: Vec<Category> = g
            .rules()
            .iter()
            .filter(|r| r.is_greedy())
            .map(|r| r.category())
            .collect();
        assert_eq!(greedy, vec![Category::Comment, Category::Comment, Category::String]);
    }
}
