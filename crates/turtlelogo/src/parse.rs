//! Tokenizing and repeat-block expansion.
//!
//! Input is split into whitespace-separated words, with `[` and `]` always
//! standing on their own. The words are then grouped into [`Node`]s: each
//! `REPEAT n [ ... ]` becomes a [`Node::Repeat`] followed by its body. Open
//! repeats are tracked on an explicit stack, so repeats can nest as deeply as
//! you like.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::one_of,
    combinator::{map, recognize},
    sequence::preceded,
    IResult,
};

use crate::{
    builtin::{Keyword, REPEAT},
    typ::{Command, LogoError, Node, Operand, SyntaxErrorKind, Token},
};

pub type Span<'a> = nom_locate::LocatedSpan<&'a str>;

fn bracket(input: Span) -> IResult<Span, Span> {
    recognize(one_of("[]"))(input)
}

fn word(input: Span) -> IResult<Span, Span> {
    take_while1(|c: char| !c.is_whitespace() && c != '[' && c != ']')(input)
}

fn ws(input: Span) -> IResult<Span, Span> {
    take_while(char::is_whitespace)(input)
}

pub fn token(input: Span) -> IResult<Span, Token> {
    map(preceded(ws, alt((bracket, word))), |sp: Span| Token {
        text: sp.fragment().to_uppercase(),
        span: sp.into(),
    })(input)
}

/// Splits `text` into upper case tokens. Spans refer to `text` itself.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut input = Span::new(text);
    let mut tokens = Vec::new();
    while let Ok((rest, tok)) = token(input) {
        tokens.push(tok);
        input = rest;
    }
    tokens
}

fn syntax(kind: SyntaxErrorKind, tok: &Token) -> LogoError {
    LogoError::Syntax {
        kind,
        span: tok.span,
    }
}

/// Can this token be an input to a command, or does it start something new?
fn is_operand(tok: &Token) -> bool {
    !tok.is_open() && !tok.is_close() && tok.text != REPEAT && Keyword::lookup(&tok.text).is_none()
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let tok = self.peek();
        self.pos += tok.is_some() as usize;
        tok
    }

    /// Takes up to `max` operand tokens.
    fn operands(&mut self, max: usize) -> Vec<Operand> {
        let mut ret = Vec::new();
        while ret.len() < max {
            match self.peek() {
                Some(tok) if is_operand(tok) => {
                    ret.push(Operand::from(tok));
                    self.pos += 1;
                }
                _ => break,
            }
        }
        ret
    }

    /// Parses a statement that isn't part of the repeat syntax.
    fn statement(&mut self, first: &'t Token) -> Result<Node, LogoError> {
        if first.is_open() {
            return Err(syntax(SyntaxErrorKind::UnexpectedOpen, first));
        }

        if let Some(keyword) = Keyword::lookup(&first.text) {
            let operands = self.operands(keyword.arity());
            Ok(Node::Command(Command {
                keyword,
                operands,
                span: first.span,
            }))
        } else if Operand::from(first).num().is_some() || first.text.starts_with('"') {
            Ok(Node::Stray {
                value: first.text.clone(),
                span: first.span,
            })
        } else {
            // Whatever follows an unknown word was presumably meant as its inputs.
            let skipped = self.operands(usize::MAX);
            log::debug!("unknown word {} (with {} inputs)", first.text, skipped.len());
            Ok(Node::Unknown {
                word: first.text.clone(),
                span: first.span,
            })
        }
    }

    /// Parses the `n [` after a `REPEAT`, returning the count and the bracket.
    fn repeat_header(&mut self, repeat: &'t Token) -> Result<(u32, &'t Token), LogoError> {
        let count_tok = match self.peek() {
            Some(tok) if !tok.is_open() && !tok.is_close() => tok,
            _ => return Err(syntax(SyntaxErrorKind::MissingCount, repeat)),
        };
        let count: u32 = count_tok
            .text
            .parse()
            .map_err(|_| syntax(SyntaxErrorKind::BadCount(count_tok.text.clone()), count_tok))?;
        self.pos += 1;

        match self.next() {
            Some(tok) if tok.is_open() => Ok((count, tok)),
            Some(tok) => Err(syntax(SyntaxErrorKind::MissingBody, tok)),
            None => Err(syntax(SyntaxErrorKind::MissingBody, count_tok)),
        }
    }
}

impl From<&Token> for Operand {
    fn from(tok: &Token) -> Self {
        Operand {
            text: tok.text.clone(),
            span: tok.span,
        }
    }
}

/// The result of parsing one input.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    /// The complete statements before the first syntax error (or all of them).
    pub nodes: Vec<Node>,
    /// The first syntax error. Nothing after it was parsed.
    pub error: Option<LogoError>,
}

/// A repeat whose `]` hasn't been seen yet.
struct Open<'t> {
    /// Index of the `Node::Repeat` in the output.
    node: usize,
    bracket: &'t Token,
}

pub fn program(text: &str) -> Program {
    let tokens = tokenize(text);
    let mut parser = Parser::new(&tokens);
    let mut nodes = Vec::new();
    let mut open: Vec<Open> = Vec::new();

    let error = loop {
        let Some(tok) = parser.next() else {
            break open
                .first()
                .map(|o| syntax(SyntaxErrorKind::UnmatchedOpen, o.bracket));
        };

        if tok.is_close() {
            let Some(o) = open.pop() else {
                break Some(syntax(SyntaxErrorKind::UnmatchedClose, tok));
            };
            let body_len = nodes.len() - o.node - 1;
            if let Some(Node::Repeat { len, .. }) = nodes.get_mut(o.node) {
                *len = body_len;
            }
        } else if tok.text == REPEAT {
            match parser.repeat_header(tok) {
                Ok((count, bracket)) => {
                    open.push(Open {
                        node: nodes.len(),
                        bracket,
                    });
                    nodes.push(Node::Repeat {
                        count,
                        len: 0,
                        span: tok.span,
                    });
                }
                Err(e) => break Some(e),
            }
        } else {
            match parser.statement(tok) {
                Ok(node) => nodes.push(node),
                Err(e) => break Some(e),
            }
        }
    };

    // An unfinished repeat doesn't run at all, not even the part of its body
    // that parsed.
    if let Some(o) = open.first() {
        nodes.truncate(o.node);
    }
    Program { nodes, error }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(s: &str) -> Vec<String> {
        tokenize(s).into_iter().map(|t| t.text).collect()
    }

    fn count_forwards(nodes: &[Node]) -> usize {
        let mut i = 0;
        let mut ret = 0;
        while i < nodes.len() {
            match &nodes[i] {
                Node::Command(c) if c.keyword == Keyword::Forward => ret += 1,
                Node::Repeat { count, len, .. } => {
                    ret += *count as usize * count_forwards(&nodes[i + 1..i + 1 + len]);
                    i += len;
                }
                _ => {}
            }
            i += 1;
        }
        ret
    }

    fn error_kind(text: &str) -> SyntaxErrorKind {
        match program(text).error {
            Some(LogoError::Syntax { kind, .. }) => kind,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn tokens() {
        assert_eq!(texts("fd 100  rt\t90\n"), ["FD", "100", "RT", "90"]);
        assert_eq!(
            texts("repeat 4[fd 10 rt 90]"),
            ["REPEAT", "4", "[", "FD", "10", "RT", "90", "]"]
        );
        assert_eq!(texts("setpc \"red\""), ["SETPC", "\"RED\""]);
        assert!(texts("  \n ").is_empty());
        for ws in ["\u{a0}", "\u{0b}", "\u{0c}", "\u{2003}"] {
            assert_eq!(texts(&format!("fd 10{ws}rt 90{ws}")), ["FD", "10", "RT", "90"]);
        }

        let toks = tokenize("fd 10\n  rt 90");
        assert_eq!(toks[2].span.offset, 8);
        assert_eq!(toks[2].span.line, 2);
        assert_eq!(toks[2].span.column, 3);
        assert_eq!(toks[2].span.len, 2);
    }

    #[test]
    fn nested_repeat() {
        let prog = program("REPEAT 2 [REPEAT 3 [FD 10]]");
        assert_eq!(prog.error, None);
        assert!(matches!(prog.nodes[..], [
            Node::Repeat { count: 2, len: 2, .. },
            Node::Repeat { count: 3, len: 1, .. },
            Node::Command(_),
        ]));
        assert_eq!(count_forwards(&prog.nodes), 6);

        let prog = program("repeat 2 [fd 1 repeat 2 [fd 1 repeat 2 [fd 1]] fd 1] fd 1");
        assert_eq!(prog.error, None);
        assert_eq!(prog.nodes.len(), 8);
        assert!(matches!(prog.nodes[0], Node::Repeat { count: 2, len: 6, .. }));
        assert_eq!(count_forwards(&prog.nodes), 2 * (2 + 2 * 3) + 1);
    }

    #[test]
    fn deep_nesting() {
        let n = 10_000;
        let prog = program(&format!("{}fd 1{}", "repeat 1 [".repeat(n), "]".repeat(n)));
        assert_eq!(prog.error, None);
        assert_eq!(prog.nodes.len(), n + 1);
        assert!(matches!(prog.nodes[0], Node::Repeat { len, .. } if len == n));
        assert_eq!(count_forwards(&prog.nodes[n - 1..]), 1);

        let prog = program(&format!("fd 1 {}fd 1", "repeat 1 [".repeat(n)));
        assert_eq!(prog.nodes.len(), 1);
        assert!(matches!(
            prog.error,
            Some(LogoError::Syntax { kind: SyntaxErrorKind::UnmatchedOpen, span }) if span.offset == 14
        ));
    }

    #[test]
    fn unfinished_repeat_is_dropped() {
        let prog = program("fd 10 repeat 2 [fd 5 repeat 3 [rt 1] fd 5");
        assert_eq!(prog.nodes.len(), 1);
        assert!(matches!(
            prog.error,
            Some(LogoError::Syntax { kind: SyntaxErrorKind::UnmatchedOpen, span }) if span.offset == 15
        ));

        let prog = program("fd 10 repeat 2 [fd 5 repeat x [rt 1]]");
        assert_eq!(prog.nodes.len(), 1);
        assert!(matches!(
            prog.error,
            Some(LogoError::Syntax { kind: SyntaxErrorKind::BadCount(_), .. })
        ));
    }

    #[test]
    fn operands() {
        let prog = program("fd rt 90 setxy 1 2 3");
        let Node::Command(fd) = &prog.nodes[0] else { panic!() };
        assert!(fd.operands.is_empty());
        let Node::Command(rt) = &prog.nodes[1] else { panic!() };
        assert_eq!(rt.operands[0].text, "90");
        let Node::Command(setxy) = &prog.nodes[2] else { panic!() };
        assert_eq!(setxy.operands.len(), 2);
        assert!(matches!(&prog.nodes[3], Node::Stray { value, .. } if value == "3"));
    }

    #[test]
    fn unknown_words_swallow_their_inputs() {
        let prog = program("jump 10 20 fd 5");
        assert_eq!(prog.nodes.len(), 2);
        assert!(matches!(&prog.nodes[0], Node::Unknown { word, .. } if word == "JUMP"));
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(error_kind("repeat [fd 10]"), SyntaxErrorKind::MissingCount);
        assert_eq!(error_kind("repeat"), SyntaxErrorKind::MissingCount);
        assert_eq!(
            error_kind("repeat 2.5 [fd 10]"),
            SyntaxErrorKind::BadCount("2.5".to_owned())
        );
        assert_eq!(
            error_kind("repeat -1 [fd 10]"),
            SyntaxErrorKind::BadCount("-1".to_owned())
        );
        assert_eq!(error_kind("repeat 3 fd 10"), SyntaxErrorKind::MissingBody);
        assert_eq!(error_kind("repeat 3"), SyntaxErrorKind::MissingBody);
        assert_eq!(error_kind("repeat 3 [fd 10"), SyntaxErrorKind::UnmatchedOpen);
        assert_eq!(
            error_kind("repeat 3 [repeat 2 [fd 10]"),
            SyntaxErrorKind::UnmatchedOpen
        );
        assert_eq!(error_kind("fd 10 ]"), SyntaxErrorKind::UnmatchedClose);
        assert_eq!(error_kind("[fd 10]"), SyntaxErrorKind::UnexpectedOpen);
        assert_eq!(
            error_kind("repeat 2 [fd 10 [rt 90]]"),
            SyntaxErrorKind::UnexpectedOpen
        );
    }

    #[test]
    fn statements_before_an_error_survive() {
        let prog = program("fd 10 rt 90 repeat x [fd 10] fd 20");
        assert_eq!(prog.nodes.len(), 2);
        assert!(prog.error.is_some());
    }

    #[test]
    fn zero_repeat() {
        let prog = program("repeat 0 [fd 10]");
        assert_eq!(prog.error, None);
        assert_eq!(count_forwards(&prog.nodes), 0);
    }
}
