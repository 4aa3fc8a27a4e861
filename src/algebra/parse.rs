use crate::algebra::Linear;
use smol_str::SmolStr;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Range,
};

/// Split one side of an equation into [`Token`]s, normalizing sign
/// notation along the way.
///
/// A `+` or `-` which appears where an operand is expected is a sign rather
/// than an operator:
///
/// - at the very start of the expression or straight after a `(`, a `0` is
///   inserted so the sign becomes a binary operation (`-x` is `0 - x`)
/// - straight after another operator, `-` becomes [`TokenKind::Negate`] and
///   `+` is dropped, so `3--2` is `3 - (-2)` and `3*-+-2` is `3 * (-(-2))`
///
/// An empty (or all-whitespace) expression produces no tokens.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens: Vec<Token<'_>> = Vec::new();

    for token in Tokens::new(src) {
        let token = token?;

        if !token.kind.is_sign() {
            tokens.push(token);
            continue;
        }

        match tokens.last().map(|t| t.kind) {
            None | Some(TokenKind::OpenParen) => {
                tokens.push(Token::implicit_zero(token.span.start));
                tokens.push(token);
            },
            Some(previous) if previous.is_operator() => {
                if token.kind == TokenKind::Minus {
                    tokens.push(Token {
                        kind: TokenKind::Negate,
                        ..token
                    });
                }
            },
            Some(_) => tokens.push(token),
        }
    }

    Ok(tokens)
}

/// Possible errors that may occur while tokenizing.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character which isn't part of the expression grammar.
    UnsupportedOperator { character: char, index: usize },
    /// A literal which doesn't fit in an `i64`.
    NumberOutOfRange { text: SmolStr, span: Range<usize> },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnsupportedOperator { character, index } => write!(
                f,
                "Unsupported operator, \"{}\", at index {}",
                character, index
            ),
            ParseError::NumberOutOfRange { text, .. } => {
                write!(f, "The number \"{}\" is too large", text)
            },
        }
    }
}

impl Error for ParseError {}

#[derive(Debug, Clone, PartialEq)]
struct Tokens<'a> {
    src: &'a str,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str) -> Self { Tokens { src, cursor: 0 } }

    fn rest(&self) -> &'a str { &self.src[self.cursor..] }

    fn peek(&self) -> Option<char> { self.rest().chars().next() }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    fn chomp(
        &mut self,
        kind: TokenKind,
    ) -> Option<Result<Token<'a>, ParseError>> {
        let start = self.cursor;
        self.advance()?;
        let end = self.cursor;

        Some(Ok(Token::from_text(self.src, start..end, kind)))
    }

    fn take_while<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(char) -> bool,
    {
        let start = self.cursor;

        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }

            self.advance();
        }

        self.cursor - start
    }

    /// The next character which isn't whitespace.
    fn peek_past_whitespace(&self) -> Option<char> {
        self.rest().chars().find(|c| !c.is_whitespace())
    }

    /// Consume a run of digits, optionally followed by a single `x`, or a
    /// bare `x`.
    ///
    /// Whitespace isn't significant, so `1 2 x` is the same as `12x`. The
    /// token never ends with whitespace though.
    fn chomp_number(&mut self) -> Token<'a> {
        let start = self.cursor;

        while self
            .peek_past_whitespace()
            .map_or(false, |c| c.is_ascii_digit())
        {
            self.take_while(char::is_whitespace);
            self.advance();
        }

        if self.peek_past_whitespace() == Some('x') {
            self.take_while(char::is_whitespace);
            self.advance();
        }

        let end = self.cursor;

        Token::from_text(self.src, start..end, TokenKind::Number)
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            return match self.peek()? {
                space if space.is_whitespace() => {
                    self.advance();
                    continue;
                },
                '(' => self.chomp(TokenKind::OpenParen),
                ')' => self.chomp(TokenKind::CloseParen),
                '+' => self.chomp(TokenKind::Plus),
                '-' => self.chomp(TokenKind::Minus),
                '*' => self.chomp(TokenKind::Times),
                '/' => self.chomp(TokenKind::Divide),
                '0'..='9' | 'x' => Some(Ok(self.chomp_number())),
                other => Some(Err(ParseError::UnsupportedOperator {
                    character: other,
                    index: self.cursor,
                })),
            };
        }
    }
}

/// A single token from an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The token's text. Tokens inserted during normalization aren't backed
    /// by the original source.
    pub text: &'a str,
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    fn from_text(
        original_source: &'a str,
        span: Range<usize>,
        kind: TokenKind,
    ) -> Self {
        Token {
            text: &original_source[span.clone()],
            span,
            kind,
        }
    }

    fn implicit_zero(index: usize) -> Self {
        Token {
            kind: TokenKind::Number,
            text: "0",
            span: index..index,
        }
    }

    /// Interpret a [`TokenKind::Number`] as a [`Linear`] value.
    ///
    /// A digit run sets the constant, a digit run followed by `x` sets the
    /// coefficient, and a bare `x` is `1·x`.
    pub(crate) fn literal(&self) -> Result<Linear, ParseError> {
        self.parse_literal("")
    }

    /// Interpret a [`TokenKind::Number`] as a negative [`Linear`] value.
    ///
    /// The sign is part of the literal, so `-9223372036854775808` is in
    /// range even though its magnitude isn't.
    pub(crate) fn negated_literal(&self) -> Result<Linear, ParseError> {
        self.parse_literal("-")
    }

    fn parse_literal(&self, sign: &str) -> Result<Linear, ParseError> {
        debug_assert_eq!(self.kind, TokenKind::Number);

        let mut text = String::from(sign);
        text.extend(self.text.chars().filter(|c| !c.is_whitespace()));

        let (digits, is_coefficient) = match text.strip_suffix('x') {
            Some(digits) if digits == sign => (format!("{}1", sign), true),
            Some(digits) => (digits.to_string(), true),
            None => (text.clone(), false),
        };

        let value: i64 =
            digits.parse().map_err(|_| ParseError::NumberOutOfRange {
                text: text.as_str().into(),
                span: self.span.clone(),
            })?;

        if is_coefficient {
            Ok(Linear::new(value, 0))
        } else {
            Ok(Linear::from_constant(value))
        }
    }
}

/// The kinds of token that can appear in an expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    OpenParen,
    CloseParen,
    Plus,
    Minus,
    Times,
    Divide,
    /// Unary minus.
    Negate,
}

impl TokenKind {
    fn is_sign(self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Times
                | TokenKind::Divide
                | TokenKind::Negate
        )
    }
}
