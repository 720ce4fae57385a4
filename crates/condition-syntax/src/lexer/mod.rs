use crate::{
    lexer::token::{Token, TokenKind},
    options::BooleanCase,
};
use pest::{Parser, iterators::Pair};
use pest_derive::Parser;
use std::time::Duration;
use tracing::trace;

pub mod token;

#[derive(Parser)]
#[grammar = "grammar/condition.pest"]
pub struct TokenGrammar;

/// On-demand tokenizer over condition text.
///
/// Each call to [`Lexer::next_token`] skips whitespace, matches a single
/// lexeme at the current position and advances past it. The lexer never
/// fails: anything it cannot recognise comes back as
/// [`TokenKind::Illegal`] and it is up to the parser to reject it. Once the
/// input is exhausted every further call returns [`TokenKind::Eof`].
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    boolean_case: BooleanCase,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_boolean_case(input, BooleanCase::default())
    }

    pub fn with_boolean_case(input: &'a str, boolean_case: BooleanCase) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
            boolean_case,
            finished: false,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let (start, line, column) = (self.pos, self.line, self.column);
        let rest = &self.input[self.pos..];

        if rest.is_empty() {
            return Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                line,
                column,
                span: (start, start),
            };
        }

        let matched = TokenGrammar::parse(Rule::token, rest)
            .ok()
            .and_then(|mut pairs| pairs.next())
            .and_then(|token| token.into_inner().next());

        let (kind, len) = match matched {
            Some(pair) => {
                let len = pair.as_str().len();
                (self.classify(pair), len)
            }
            None => illegal(rest),
        };

        let lexeme = rest[..len].to_string();
        self.advance(len);

        let token = Token {
            kind,
            lexeme,
            line,
            column,
            span: (start, self.pos),
        };
        trace!(kind = ?token.kind, line, column, "lexed token");
        token
    }

    fn classify(&self, pair: Pair<Rule>) -> TokenKind {
        let text = pair.as_str();

        match pair.as_rule() {
            Rule::variable => TokenKind::Variable(text[1..].to_string()),
            Rule::string => TokenKind::String(unescape(&text[1..text.len() - 1])),
            Rule::duration => match parse_duration(text) {
                Some(duration) => TokenKind::Duration(duration),
                None => TokenKind::Illegal(text.to_string()),
            },
            Rule::number => match text.parse::<f64>() {
                Ok(n) if n.is_finite() => TokenKind::Number(n),
                _ => TokenKind::Illegal(text.to_string()),
            },
            Rule::ident => TokenKind::from_word(text, self.boolean_case),
            Rule::op_eq => TokenKind::Equal,
            Rule::op_neq => TokenKind::NotEqual,
            Rule::op_gte => TokenKind::GreaterOrEqual,
            Rule::op_lte => TokenKind::LessOrEqual,
            Rule::op_gt => TokenKind::GreaterThan,
            Rule::op_lt => TokenKind::LessThan,
            Rule::lparen => TokenKind::LeftParen,
            Rule::rparen => TokenKind::RightParen,
            Rule::lbracket => TokenKind::LeftBracket,
            Rule::rbracket => TokenKind::RightBracket,
            Rule::comma => TokenKind::Comma,
            _ => TokenKind::Illegal(text.to_string()),
        }
    }

    fn skip_whitespace(&mut self) {
        let skipped = self.input[self.pos..]
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(self.input.len() - self.pos);
        self.advance(skipped);
    }

    fn advance(&mut self, len: usize) {
        for c in self.input[self.pos..self.pos + len].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += len;
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token including the final `Eof`, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is_eof();
        Some(token)
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | ',' | '"' | '=' | '!' | '<' | '>')
}

/// Illegal lexeme starting at the beginning of `rest` and its byte length.
fn illegal(rest: &str) -> (TokenKind, usize) {
    // An unmatched quote swallows the remainder of the input.
    let len = if rest.starts_with('"') {
        rest.len()
    } else {
        let run = rest.find(is_delimiter).unwrap_or(rest.len());
        if run == 0 {
            rest.chars().next().map_or(0, char::len_utf8)
        } else {
            run
        }
    };
    (TokenKind::Illegal(rest[..len].to_string()), len)
}

fn unescape(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn parse_duration(text: &str) -> Option<Duration> {
    let split = text.find(|c: char| c.is_ascii_alphabetic())?;
    let (value, unit) = text.split_at(split);
    let value = value.parse::<f64>().ok()?;
    let seconds = match unit {
        "ms" => value / 1_000.0,
        "s" => value,
        "m" => value * 60.0,
        "h" => value * 3_600.0,
        "d" => value * 86_400.0,
        "w" => value * 604_800.0,
        _ => return None,
    };
    Duration::try_from_secs_f64(seconds).ok()
}
