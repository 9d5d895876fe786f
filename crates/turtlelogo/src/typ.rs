use crate::{builtin::Keyword, palette::Color};

/// A location in the source text.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Span {
    /// Byte offset of the start of the span.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Span {
    /// The part of `source` covered by this span.
    pub fn fragment<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.offset..self.offset + self.len).unwrap_or("")
    }
}

impl<'a> From<crate::parse::Span<'a>> for Span {
    fn from(sp: crate::parse::Span<'a>) -> Self {
        Span {
            offset: sp.location_offset(),
            len: sp.fragment().len(),
            line: sp.location_line(),
            column: sp.get_utf8_column(),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single case-folded word (or bracket) of input.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn is_open(&self) -> bool {
        self.text == "["
    }

    pub fn is_close(&self) -> bool {
        self.text == "]"
    }
}

/// An input to a command, kept as written. Numbers are only coerced when the
/// command is dispatched.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
    pub text: String,
    pub span: Span,
}

impl Operand {
    pub fn num(&self) -> Option<f64> {
        self.text.parse::<f64>().ok().filter(|x| x.is_finite())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    pub keyword: Keyword,
    pub operands: Vec<Operand>,
    pub span: Span,
}

/// One statement of a parsed program.
///
/// A program is a tree stored in preorder: a `Repeat` is followed directly by
/// the nodes of its body, nested repeats included. Keeping it flat means that
/// nothing walking the tree has to recurse, however deep the nesting.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Command(Command),
    Repeat {
        count: u32,
        /// How many of the following nodes make up the body.
        len: usize,
        span: Span,
    },
    /// A word that isn't a command. Reported when execution reaches it.
    Unknown { word: String, span: Span },
    /// A value sitting where a command should be, like the `100` in `fd 10 100`.
    Stray { value: String, span: Span },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("REPEAT needs a count")]
    MissingCount,
    #[error("REPEAT doesn't like {0} as a count")]
    BadCount(String),
    #[error("REPEAT needs a [ ... ] list to run")]
    MissingBody,
    #[error("[ without a matching ]")]
    UnmatchedOpen,
    #[error("] without a matching [")]
    UnmatchedClose,
    #[error("[ only makes sense after REPEAT")]
    UnexpectedOpen,
}

/// Errors reported by the interpreter. None of them are fatal: the turtle is
/// still usable afterwards.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LogoError {
    #[error("syntax error at {span}: {kind}")]
    Syntax { kind: SyntaxErrorKind, span: Span },
    #[error("I don't know how to {word}")]
    UnknownCommand { word: String, span: Span },
    #[error("You don't say what to do with {value}")]
    UnusedValue { value: String, span: Span },
}

impl LogoError {
    pub fn span(&self) -> Span {
        match self {
            LogoError::Syntax { span, .. }
            | LogoError::UnknownCommand { span, .. }
            | LogoError::UnusedValue { span, .. } => *span,
        }
    }
}

/// Lenient substitutions made while dispatching. Execution carries on with
/// the substituted value.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Warning {
    #[error("{command} doesn't like {operand} as input, using 0")]
    MalformedOperand {
        command: Keyword,
        operand: String,
        span: Span,
    },
    #[error("not enough inputs to {command}")]
    MissingOperand { command: Keyword, span: Span },
    #[error("unknown color {name}, using {fallback}")]
    UnknownColor {
        name: String,
        fallback: Color,
        span: Span,
    },
}

impl Warning {
    pub fn span(&self) -> Span {
        match self {
            Warning::MalformedOperand { span, .. }
            | Warning::MissingOperand { span, .. }
            | Warning::UnknownColor { span, .. } => *span,
        }
    }
}
