// Syntax tree for a single s-expression

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// A function call: `(name arg...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Argument>,
    pub location: SourceLocation, // Location of the opening '('
}

impl Call {
    pub fn new(name: impl Into<String>, location: SourceLocation) -> Self {
        Call {
            name: name.into(),
            args: Vec::new(),
            location,
        }
    }

    pub fn with_arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }
}

/// One argument of a [`Call`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Numeric lexeme, kept verbatim (`-`, `1.2.3` included)
    Number(String),
    /// One of `+ * /`
    Operator(String),
    /// Nested call
    Call(Call),
}

impl Argument {
    pub fn number(text: impl Into<String>) -> Self {
        Argument::Number(text.into())
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Argument::Operator(text.into())
    }
}
