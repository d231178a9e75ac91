//! Turning spans into something a host can display: HTML markup, or
//! per-line token lists for terminal editors.

use crate::{Category, Span};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// This is an enum for representing tokens on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokOpt {
    /// A classified piece of text in the format Some(TEXT, CATEGORY).
    ///
    /// So for a comment you can expect to see Some("// note", Category::Comment)
    Some(String, Category),
    /// The None variant represents just plain text.
    None(String),
}

impl TokOpt {
    pub fn text(&self) -> &str {
        let (TokOpt::Some(text, _) | TokOpt::None(text)) = self;
        text
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            TokOpt::Some(_, category) => Some(*category),
            TokOpt::None(_) => None,
        }
    }

    /// Works out if this token is empty, and thus redundant
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Remove the first character of this token.
    /// A double width character leaves a space behind, as only one of its
    /// columns has been consumed.
    pub fn nibble(&mut self) -> Option<char> {
        let (TokOpt::Some(ref mut text, _) | TokOpt::None(ref mut text)) = self;
        let ch = text.chars().next()?;
        text.remove(0);
        if ch.width().unwrap_or(0) > 1 {
            text.insert(0, ' ');
        }
        Some(ch)
    }
}

/// Render spans as HTML, one `<span class="token ...">` per classified span.
/// Children are nested inside their parent and all text is escaped.
pub fn html(spans: &[Span], text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for span in spans {
        write_span(&mut out, span, text);
    }
    out
}

fn write_span(out: &mut String, span: &Span, text: &str) {
    let Some(category) = span.category else {
        escape_into(out, span.text(text));
        return;
    };
    out.push_str("<span class=\"token ");
    out.push_str(category.name());
    out.push_str("\">");
    let mut cursor = span.start;
    for child in &span.children {
        escape_into(out, &text[cursor..child.start]);
        write_span(out, child, text);
        cursor = child.end();
    }
    escape_into(out, &text[cursor..span.end()]);
    out.push_str("</span>");
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Split spans into lines of [TokOpt], for hosts that draw line by line.
///
/// Where a span has children, the innermost category wins, so the type in
/// `est un Entier` comes out as `type` rather than `variable-assignment`.
/// Tabs are expanded to `tab_width` spaces and carriage returns dropped.
pub fn lines(spans: &[Span], text: &str, tab_width: usize) -> Vec<Vec<TokOpt>> {
    let mut pieces = vec![];
    for span in spans {
        flatten(span, &mut pieces);
    }
    let tab = " ".repeat(tab_width);
    let mut result: Vec<Vec<TokOpt>> = vec![vec![]];
    for (category, range) in pieces {
        for (i, part) in text[range].split('\n').enumerate() {
            if i > 0 {
                result.push(vec![]);
            }
            let part = part.replace('\r', "").replace('\t', &tab);
            if part.is_empty() {
                continue;
            }
            let Some(line) = result.last_mut() else { continue };
            match category {
                Some(category) => line.push(TokOpt::Some(part, category)),
                None => {
                    // Runs of plain text are merged
                    if let Some(TokOpt::None(s)) = line.last_mut() {
                        s.push_str(&part);
                    } else {
                        line.push(TokOpt::None(part));
                    }
                }
            }
        }
    }
    result
}

/// Leaf ranges of a span tree, each with the innermost category covering it
fn flatten(span: &Span, out: &mut Vec<(Option<Category>, Range<usize>)>) {
    let mut cursor = span.start;
    for child in &span.children {
        if child.start > cursor {
            out.push((span.category, cursor..child.start));
        }
        flatten(child, out);
        cursor = child.end();
    }
    if span.end() > cursor {
        out.push((span.category, cursor..span.end()));
    }
}

/// Trim utility function to trim down a line of tokens to offset text,
/// dropping the first `start` display columns
pub fn trim(input: &[TokOpt], start: usize) -> Vec<TokOpt> {
    let mut opt: Vec<TokOpt> = input.to_vec();
    let mut removed = 0;
    while removed < start {
        let Some(token) = opt.first_mut() else { break };
        if let Some(ch) = token.nibble() {
            if ch.width().unwrap_or(0) > 0 {
                removed += 1;
            }
        }
        if token.is_empty() {
            opt.remove(0);
        }
    }
    opt
}
