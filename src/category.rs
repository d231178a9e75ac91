use std::fmt;

/// The label attached to a classified span.
///
/// Categories have no lifecycle of their own, they only name the rule that
/// produced a span. Sub-categories (`AssignmentKeyword`, `Type`,
/// `ProcedureKeyword`, `ProcedureName`) only ever appear as children of a
/// nested span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Comment,
    String,
    VariableAssignment,
    AssignmentKeyword,
    Type,
    Visibility,
    Keyword,
    Procedure,
    ProcedureKeyword,
    ProcedureName,
    /// Styling-priority alias, used for emphasis rather than meaning
    Important,
    Function,
    Property,
    Number,
    Operator,
    Punctuation,
}

impl Category {
    /// Every category, in the order the WLangage ruleset declares them
    pub const ALL: [Category; 16] = [
        Category::Comment,
        Category::String,
        Category::VariableAssignment,
        Category::AssignmentKeyword,
        Category::Type,
        Category::Visibility,
        Category::Keyword,
        Category::Procedure,
        Category::ProcedureKeyword,
        Category::ProcedureName,
        Category::Important,
        Category::Function,
        Category::Property,
        Category::Number,
        Category::Operator,
        Category::Punctuation,
    ];

    /// The token class name a host theme styles this category with
    pub fn name(&self) -> &'static str {
        match self {
            Category::Comment => "comment",
            Category::String => "string",
            Category::VariableAssignment => "variable-assignment",
            Category::AssignmentKeyword => "assignment-keyword",
            Category::Type => "type",
            Category::Visibility => "visibility",
            Category::Keyword => "keyword",
            Category::Procedure => "procedure",
            Category::ProcedureKeyword => "procedure-keyword",
            Category::ProcedureName => "procedure-name",
            Category::Important => "important",
            Category::Function => "function",
            Category::Property => "property",
            Category::Number => "number",
            Category::Operator => "operator",
            Category::Punctuation => "punctuation",
        }
    }

    /// Parse a category from its token class name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
