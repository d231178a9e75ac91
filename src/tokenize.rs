use crate::grammar::{Grammar, Rule};
use crate::Category;
use std::collections::VecDeque;
use std::ops::Range;

/// Which classification a tokenization produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pass {
    /// Rules apply in declaration order
    #[default]
    Semantic,
    /// Rules marked as yielding to emphasis are switched off, so the
    /// `important` rules claim the text they would have matched
    Emphasis,
}

/// A classified (or unclassified) contiguous range of the input.
/// Offsets are in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// `None` for text that no rule matched
    pub category: Option<Category>,
    pub start: usize,
    pub len: usize,
    /// Classified sub-spans produced by a nested rule table
    pub children: Vec<Span>,
}

impl Span {
    fn plain(range: Range<usize>) -> Self {
        Self {
            category: None,
            start: range.start,
            len: range.len(),
            children: vec![],
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The text this span covers in `source`
    pub fn text<'t>(&self, source: &'t str) -> &'t str {
        &source[self.range()]
    }

    pub fn is_classified(&self) -> bool {
        self.category.is_some()
    }

    fn shift(mut self, by: usize) -> Self {
        self.start += by;
        self.children = self.children.into_iter().map(|c| c.shift(by)).collect();
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    /// Needs to be searched again from the cursor
    Stale,
    /// The rule has no more matches in this haystack
    Exhausted,
    At(usize, usize),
}

/// Finds the leftmost token among a set of rules, remembering each rule's
/// next match so it is only searched for again once the cursor passes it
#[derive(Debug, Clone)]
struct Scanner<'g, 't> {
    haystack: &'t str,
    rules: Vec<&'g Rule>,
    slots: Vec<Slot>,
    cursor: usize,
}

impl<'g, 't> Scanner<'g, 't> {
    fn new(haystack: &'t str, rules: Vec<&'g Rule>) -> Self {
        let slots = vec![Slot::Stale; rules.len()];
        Self { haystack, rules, slots, cursor: 0 }
    }

    /// Returns (rule, start, end) of the leftmost token at or after the cursor.
    /// On a tie the rule declared first wins.
    fn peek(&mut self) -> Option<(usize, usize, usize)> {
        let mut best: Option<(usize, usize, usize)> = None;
        for (i, rule) in self.rules.iter().enumerate() {
            if let Slot::At(start, _) = self.slots[i] {
                if start < self.cursor {
                    self.slots[i] = Slot::Stale;
                }
            }
            if let Slot::Stale = self.slots[i] {
                self.slots[i] = match rule.find_at(self.haystack, self.cursor) {
                    Some((start, end)) => Slot::At(start, end),
                    None => Slot::Exhausted,
                };
            }
            if let Slot::At(start, end) = self.slots[i] {
                if best.map_or(true, |(_, s, _)| start < s) {
                    best = Some((i, start, end));
                }
            }
        }
        best
    }
}

/// Lazy, left to right sequence of spans covering an input.
///
/// Greedy rules are located first across the whole input. The text between
/// two greedy tokens is then classified on its own with the remaining rules,
/// so nothing inside a comment or string is classified twice. Cloning the
/// iterator restarts from the same position.
#[derive(Debug, Clone)]
pub struct Tokens<'g, 't> {
    text: &'t str,
    pass: Pass,
    greedy: Scanner<'g, 't>,
    others: Vec<&'g Rule>,
    /// Spans of the current gap, followed by the greedy token closing it
    queue: VecDeque<Span>,
}

impl<'g, 't> Tokens<'g, 't> {
    pub fn new(grammar: &'g Grammar, text: &'t str, pass: Pass) -> Self {
        let (greedy, others): (Vec<&Rule>, Vec<&Rule>) = grammar
            .rules()
            .iter()
            .filter(|r| r.enabled(pass))
            .partition(|r| r.is_greedy());
        Self {
            text,
            pass,
            greedy: Scanner::new(text, greedy),
            others,
            queue: VecDeque::new(),
        }
    }
}

impl<'g, 't> Iterator for Tokens<'g, 't> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        loop {
            if let Some(span) = self.queue.pop_front() {
                return Some(span);
            }
            let from = self.greedy.cursor;
            if from >= self.text.len() {
                return None;
            }
            let (to, closing) = match self.greedy.peek() {
                Some((rule, start, end)) => {
                    let rule = self.greedy.rules[rule];
                    self.greedy.cursor = end;
                    (start, Some(classify(rule, self.text, start..end, self.pass)))
                }
                None => {
                    self.greedy.cursor = self.text.len();
                    (self.text.len(), None)
                }
            };
            let gap = claim(&self.text[from..to], &self.others, self.pass);
            self.queue.extend(gap.into_iter().map(|span| span.shift(from)));
            self.queue.extend(closing);
        }
    }
}

/// Text of a gap that is either still unclassified or claimed by a rule
enum Piece {
    Open(Range<usize>),
    Claimed(Span),
}

/// Classify a gap. Rules take turns in declaration order: each one claims
/// every match it finds in the pieces earlier rules left open, and a match
/// never extends across a claimed piece. Every open piece is searched as a
/// haystack of its own, and so is the rest of a piece after a match.
fn claim(haystack: &str, rules: &[&Rule], pass: Pass) -> Vec<Span> {
    if haystack.is_empty() {
        return vec![];
    }
    let mut pieces = vec![Piece::Open(0..haystack.len())];
    for rule in rules {
        let mut next = Vec::with_capacity(pieces.len());
        for piece in pieces {
            let open = match piece {
                Piece::Open(open) => open,
                claimed => {
                    next.push(claimed);
                    continue;
                }
            };
            let mut from = open.start;
            while let Some((start, end)) = rule.find_at(&haystack[from..open.end], 0) {
                let (start, end) = (from + start, from + end);
                if start > from {
                    next.push(Piece::Open(from..start));
                }
                next.push(Piece::Claimed(classify(rule, haystack, start..end, pass)));
                from = end;
            }
            if from < open.end {
                next.push(Piece::Open(from..open.end));
            }
        }
        pieces = next;
    }
    pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Open(range) => Span::plain(range),
            Piece::Claimed(span) => span,
        })
        .collect()
}

/// Build the span for a match, running the rule's nested table over it
fn classify(rule: &Rule, haystack: &str, range: Range<usize>, pass: Pass) -> Span {
    let children = match rule.nested() {
        Some(inner) => Tokens::new(inner, &haystack[range.clone()], pass)
            .filter(Span::is_classified)
            .map(|child| child.shift(range.start))
            .collect(),
        None => vec![],
    };
    Span {
        category: Some(rule.category()),
        start: range.start,
        len: range.len(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> Grammar {
        let mut g = Grammar::new();
        g.add(Category::Comment, "#.*").unwrap().greedy();
        g.add(Category::Keyword, r"\bif\b").unwrap();
        g.add(Category::Function, r"\b(\w+)\s*\(").unwrap();
        g.add(Category::Punctuation, r"[()]").unwrap();
        g
    }

    fn kinds(spans: &[Span], text: &str) -> Vec<(Option<Category>, String)> {
        spans
            .iter()
            .map(|s| (s.category, s.text(text).to_string()))
            .collect()
    }

    #[test]
    fn covers_input() {
        let text = "if f(x) # if f(";
        let spans = toy().run(text);
        let rebuilt: String = spans.iter().map(|s| s.text(text)).collect();
        assert_eq!(rebuilt, text);
        assert_eq!(
            kinds(&spans, text),
            vec![
                (Some(Category::Keyword), "if".to_string()),
                (None, " ".to_string()),
                (Some(Category::Function), "f".to_string()),
                (Some(Category::Punctuation), "(".to_string()),
                (None, "x".to_string()),
                (Some(Category::Punctuation), ")".to_string()),
                (None, " ".to_string()),
                (Some(Category::Comment), "# if f(".to_string()),
            ]
        );
    }

    #[test]
    fn declaration_order_breaks_ties() {
        // Both keyword and function start at offset 0
        let text = "if(";
        let spans = toy().run(text);
        assert_eq!(spans[0].category, Some(Category::Keyword));
        assert_eq!(spans[0].len, 2);
    }

    #[test]
    fn declaration_order_beats_position() {
        let mut g = Grammar::new();
        g.add(Category::Keyword, "b+").unwrap();
        g.add(Category::Function, "ab+").unwrap();
        g.add(Category::Property, "^a").unwrap();
        let text = "abb ab";
        assert_eq!(
            kinds(&g.run(text), text),
            vec![
                (Some(Category::Property), "a".to_string()),
                (Some(Category::Keyword), "bb".to_string()),
                (None, " a".to_string()),
                (Some(Category::Keyword), "b".to_string()),
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(toy().run("").is_empty());
        assert!(Grammar::new().run("").is_empty());
        assert_eq!(Grammar::new().run("abc"), vec![Span::plain(0..3)]);
    }

    #[test]
    fn restartable() {
        let g = toy();
        let mut tokens = g.tokenize("if a # b");
        tokens.next();
        let copy = tokens.clone();
        assert_eq!(tokens.collect::<Vec<_>>(), copy.collect::<Vec<_>>());
    }

    #[test]
    fn nested_children_use_absolute_offsets() {
        let mut inner = Grammar::new();
        inner.add(Category::ProcedureKeyword, "^proc").unwrap();
        inner.add(Category::ProcedureName, r"\w+$").unwrap();
        let mut g = Grammar::new();
        g.add(Category::Procedure, r"proc\s+\w+").unwrap().inside(inner);
        let text = "x proc Foo";
        let spans = g.run(text);
        assert_eq!(spans.len(), 2);
        let proc = &spans[1];
        assert_eq!(proc.range(), 2..10);
        assert_eq!(
            kinds(&proc.children, text),
            vec![
                (Some(Category::ProcedureKeyword), "proc".to_string()),
                (Some(Category::ProcedureName), "Foo".to_string()),
            ]
        );
    }

    #[test]
    fn emphasis_pass_switches_rules_off() {
        let mut g = Grammar::new();
        g.add(Category::Visibility, r"\bpublic\b").unwrap().yields_to_emphasis();
        g.add(Category::Important, r"\bpublic\b").unwrap();
        assert_eq!(g.run("public")[0].category, Some(Category::Visibility));
        let emphasis: Vec<Span> = g.emphasis("public").collect();
        assert_eq!(emphasis[0].category, Some(Category::Important));
    }
}
