//! Colour themes for the WLangage categories, with a CSS generator
//! for hosts that render to HTML.

use crate::Category;
use std::fmt::Write;

/// How a category is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground colour, CSS notation
    pub color: Option<&'static str>,
    pub bold: bool,
    pub italic: bool,
    pub uppercase: bool,
    /// Glow around the text, CSS colour
    pub shadow: Option<&'static str>,
}

impl Style {
    const fn color(color: &'static str) -> Self {
        Self {
            color: Some(color),
            bold: false,
            italic: false,
            uppercase: false,
            shadow: None,
        }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    const fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    const fn shadow(mut self, shadow: &'static str) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// CSS declarations for this style, without braces
    pub fn declarations(&self) -> String {
        let mut css = String::new();
        if let Some(color) = self.color {
            let _ = write!(css, "color: {color}; ");
        }
        if self.bold {
            css.push_str("font-weight: bold; ");
        }
        if self.italic {
            css.push_str("font-style: italic; ");
        }
        if self.uppercase {
            css.push_str("text-transform: uppercase; ");
        }
        if let Some(shadow) = self.shadow {
            let _ = write!(css, "text-shadow: 0 0 2px {shadow}; ");
        }
        css.trim_end().to_string()
    }
}

/// A colour scheme: the default text style plus one style per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Style of unclassified text
    pub code: Style,
    styles: [Style; Category::ALL.len()],
}

impl Theme {
    pub fn light() -> Self {
        let keyword = Style::color("#000000").uppercase();
        let assignment = Style::color("#555555");
        let string = Style::color("#800080");
        let mut theme = Self::blank("light", Style::color("#008000"));
        theme.set(Category::Comment, Style::color("#808080").italic());
        theme.set(Category::String, string);
        theme.set(Category::VariableAssignment, assignment);
        theme.set(Category::AssignmentKeyword, assignment);
        theme.set(Category::Type, Style::color("#5D00BA"));
        theme.set(Category::Visibility, Style::color("#0066CC").bold());
        theme.set(Category::Keyword, keyword);
        theme.set(Category::ProcedureKeyword, keyword);
        theme.set(Category::ProcedureName, Style::color("#008080").bold());
        theme.set(Category::Function, Style::color("#0000FF").shadow("rgba(0, 0, 255, 0.15)"));
        theme.set(Category::Property, Style::color("#000000"));
        theme.set(Category::Number, string);
        theme.set(Category::Operator, Style::color("#000000"));
        theme.set(Category::Punctuation, Style::color("#000000"));
        theme.set(Category::Important, Style::default().bold());
        theme
    }

    pub fn dark() -> Self {
        let keyword = Style::color("#FF8000").uppercase();
        let assignment = Style::color("#A6A8AB");
        let string = Style::color("#BA68C8");
        let plain = Style::color("#CDD3DE");
        let mut theme = Self::blank("dark", Style::color("#4CAF50"));
        theme.set(Category::Comment, Style::color("#808080").italic());
        theme.set(Category::String, string);
        theme.set(Category::VariableAssignment, assignment);
        theme.set(Category::AssignmentKeyword, assignment);
        theme.set(Category::Type, Style::color("#9575CD"));
        theme.set(Category::Visibility, Style::color("#4FC3F7").bold());
        theme.set(Category::Keyword, keyword);
        theme.set(Category::ProcedureKeyword, keyword);
        theme.set(
            Category::ProcedureName,
            Style::color("#009180").bold().shadow("rgba(0, 145, 128, 0.3)"),
        );
        theme.set(Category::Function, Style::color("#91B5FE").shadow("rgba(145, 181, 254, 0.3)"));
        theme.set(Category::Property, plain);
        theme.set(Category::Number, string);
        theme.set(Category::Operator, plain);
        theme.set(Category::Punctuation, plain);
        theme.set(Category::Important, Style::default().bold());
        theme
    }

    fn blank(name: &'static str, code: Style) -> Self {
        Self {
            name,
            code,
            styles: [Style::default(); Category::ALL.len()],
        }
    }

    /// Replace the style of one category
    pub fn set(&mut self, category: Category, style: Style) {
        self.styles[category as usize] = style;
    }

    pub fn style(&self, category: Category) -> Style {
        self.styles[category as usize]
    }

    /// Style for an optional category, unclassified text gets the code style
    pub fn style_of(&self, category: Option<Category>) -> Style {
        category.map_or(self.code, |c| self.style(c))
    }

    /// CSS rules scoped to `.language-<language>`. Token rules of the dark
    /// theme are additionally scoped under `.dark-theme`. The base colour
    /// goes on `code.language-<language>` under `.light-theme` or
    /// `.dark-theme`, marked `!important`.
    pub fn css(&self, language: &str) -> String {
        let (theme, scope) = if self.name == "dark" {
            (".dark-theme", format!(".dark-theme .language-{language}"))
        } else {
            (".light-theme", format!(".language-{language}"))
        };
        let mut css = String::new();
        if let Some(color) = self.code.color {
            let _ = writeln!(css, "{theme} code.language-{language} {{ color: {color} !important; }}");
        }
        for category in Category::ALL {
            let declarations = self.style(category).declarations();
            if declarations.is_empty() {
                continue;
            }
            let _ = writeln!(css, "{scope} .token.{category} {{ {declarations} }}");
        }
        css
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
