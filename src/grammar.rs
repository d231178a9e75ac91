use crate::error::{Error, Result};
use crate::tokenize::{Pass, Span, Tokens};
use crate::Category;
use regex::Regex;

/// A single classification rule.
///
/// If the pattern contains a capture group, only the first group becomes the
/// token and the rest of the match is treated as context that is not consumed
/// (for example the `(` that follows a function name).
#[derive(Debug, Clone)]
pub struct Rule {
    /// The category given to text this rule matches
    category: Category,
    /// The regex expression that defines this rule
    exp: Regex,
    /// Text that must sit immediately before the match, end-anchored
    preceded_by: Option<Regex>,
    /// Greedy rules are matched first, over the whole input
    greedy: bool,
    /// Disabled in the emphasis pass so that `important` rules take over
    yields_to_emphasis: bool,
    /// Rules applied to the text of each match of this rule
    inside: Option<Grammar>,
}

impl Rule {
    fn new(category: Category, exp: &str) -> Result<Self> {
        Ok(Self {
            category,
            exp: compile(category, exp)?,
            preceded_by: None,
            greedy: false,
            yields_to_emphasis: false,
            inside: None,
        })
    }

    /// Mark this rule as greedy: once opened it consumes up to its natural
    /// terminator, and nothing inside it is classified by other rules
    pub fn greedy(&mut self) -> &mut Self {
        self.greedy = true;
        self
    }

    /// Require the text directly before a match to end with `exp`
    pub fn preceded_by(&mut self, exp: &str) -> Result<&mut Self> {
        self.preceded_by = Some(compile(self.category, &format!("(?:{exp})$"))?);
        Ok(self)
    }

    /// Classify the inside of each match with a nested grammar
    pub fn inside(&mut self, grammar: Grammar) -> &mut Self {
        self.inside = Some(grammar);
        self
    }

    /// Step aside during [`Pass::Emphasis`]
    pub fn yields_to_emphasis(&mut self) -> &mut Self {
        self.yields_to_emphasis = true;
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn pattern(&self) -> &str {
        self.exp.as_str()
    }

    pub fn is_greedy(&self) -> bool {
        self.greedy
    }

    pub fn nested(&self) -> Option<&Grammar> {
        self.inside.as_ref()
    }

    pub(crate) fn enabled(&self, pass: Pass) -> bool {
        !(pass == Pass::Emphasis && self.yields_to_emphasis)
    }

    /// Find the first token this rule produces at or after `from`.
    /// Returns the byte range of the token within `haystack`.
    pub(crate) fn find_at(&self, haystack: &str, from: usize) -> Option<(usize, usize)> {
        let mut at = from;
        while at <= haystack.len() {
            let caps = self.exp.captures_at(haystack, at)?;
            let whole = caps.get(0)?;
            let token = caps.get(1).unwrap_or(whole);
            let context_ok = self
                .preceded_by
                .as_ref()
                .map_or(true, |before| before.is_match(&haystack[..whole.start()]));
            if context_ok && !token.is_empty() {
                return Some((token.start(), token.end()));
            }
            // Retry from the next character after this match started
            at = whole.start()
                + haystack[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
        None
    }
}

/// An ordered rule table.
///
/// Rule order is significant: a rule claims its matches before any rule
/// declared after it sees the text, wherever those matches start.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    /// Creates an empty grammar
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new rule, provide its category and regex.
    /// The pattern is compiled immediately so a malformed one fails here.
    pub fn add(&mut self, category: Category, exp: &str) -> Result<&mut Rule> {
        self.rules.push(Rule::new(category, exp)?);
        let idx = self.rules.len() - 1;
        Ok(&mut self.rules[idx])
    }

    /// Register several alternative patterns under the same category
    pub fn join(&mut self, category: Category, exps: &[&str]) -> Result<()> {
        for exp in exps {
            self.add(category, exp)?;
        }
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Lazily classify `text`, left to right, covering all of it
    pub fn tokenize<'g, 't>(&'g self, text: &'t str) -> Tokens<'g, 't> {
        Tokens::new(self, text, Pass::Semantic)
    }

    /// The alternate classification pass used for emphasis styling
    pub fn emphasis<'g, 't>(&'g self, text: &'t str) -> Tokens<'g, 't> {
        Tokens::new(self, text, Pass::Emphasis)
    }

    /// Eagerly classify `text`
    pub fn run(&self, text: &str) -> Vec<Span> {
        self.tokenize(text).collect()
    }
}

fn compile(category: Category, exp: &str) -> Result<Regex> {
    Regex::new(exp).map_err(|source| Error::Pattern {
        category,
        pattern: exp.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_fails_fast() {
        let mut g = Grammar::new();
        let err = g.add(Category::Keyword, "(unclosed").unwrap_err();
        assert!(matches!(err, Error::Pattern { category: Category::Keyword, .. }));
        assert!(g.is_empty());
        let err = g
            .add(Category::Property, "x")
            .unwrap()
            .preceded_by("[")
            .unwrap_err();
        assert!(matches!(err, Error::Pattern { category: Category::Property, .. }));
    }

    #[test]
    fn capture_group_is_the_token() {
        let mut g = Grammar::new();
        g.add(Category::Function, r"([a-z]+)\s*\(").unwrap();
        let rule = &g.rules()[0];
        assert_eq!(rule.find_at("x = foo (1)", 0), Some((4, 7)));
        assert_eq!(rule.find_at("x = foo (1)", 8), None);
    }

    #[test]
    fn preceded_by_retries() {
        let mut g = Grammar::new();
        g.add(Category::Property, r"\.([a-z]+)")
            .unwrap()
            .preceded_by("[a-z]")
            .unwrap();
        let rule = &g.rules()[0];
        assert_eq!(rule.find_at(" .no a.yes", 0), Some((7, 10)));
        assert_eq!(rule.find_at(".no", 0), None);
    }

    #[test]
    fn join_keeps_order() {
        let mut g = Grammar::new();
        g.join(Category::Comment, &["//.*", r"/\*"]).unwrap();
        g.add(Category::String, "\"[^\"]*\"").unwrap().greedy();
        assert_eq!(g.len(), 3);
        assert_eq!(g.rules()[1].pattern(), r"/\*");
        assert!(g.rules()[2].is_greedy());
        assert!(!g.rules()[0].is_greedy());
    }
}
