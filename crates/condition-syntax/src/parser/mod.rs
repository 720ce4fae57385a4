use crate::{
    ast::{BinaryOperator, Expression, Literal, Precedence, Span},
    error::SyntaxError,
    lexer::{
        Lexer,
        token::{Token, TokenKind},
    },
    options::SyntaxOptions,
};
use tracing::debug;

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Compile condition text into an expression tree using default options.
pub fn compile(input: &str) -> ParseResult<Expression> {
    compile_with(input, &SyntaxOptions::default())
}

pub fn compile_with(input: &str, options: &SyntaxOptions) -> ParseResult<Expression> {
    let result = Parser::with_options(input, *options).parse();
    match &result {
        Ok(expr) => debug!(condition = input, ast = %expr, "compiled condition"),
        Err(err) => debug!(condition = input, error = %err, "failed to compile condition"),
    }
    result
}

/// Recursive-descent parser with one function per precedence level.
///
/// Pulls tokens from the [`Lexer`] one at a time and keeps only the current
/// one. Both precedence levels are left-associative; parentheses are kept in
/// the tree as [`ExpressionKind::Paren`](crate::ast::ExpressionKind::Paren).
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    open_parens: Vec<Token>,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, SyntaxOptions::default())
    }

    pub fn with_options(input: &'a str, options: SyntaxOptions) -> Self {
        let mut lexer = Lexer::with_boolean_case(input, options.boolean_case);
        let current = lexer.next_token();
        Parser {
            lexer,
            current,
            open_parens: Vec::new(),
            max_depth: options.max_depth,
        }
    }

    /// Parse the whole input. Anything left over after a complete expression
    /// is an error.
    pub fn parse(mut self) -> ParseResult<Expression> {
        if self.current.is_eof() {
            return Err(SyntaxError::Empty);
        }

        let expr = self.parse_expression()?;

        match &self.current.kind {
            TokenKind::Eof => Ok(expr),
            TokenKind::RightParen => Err(SyntaxError::UnmatchedParen {
                paren: ')',
                line: self.current.line,
                column: self.current.column,
            }),
            TokenKind::Illegal(_) => Err(self.illegal()),
            _ => Err(SyntaxError::TrailingInput {
                found: describe(&self.current),
                line: self.current.line,
                column: self.current.column,
            }),
        }
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary(Precedence::LOWEST)
    }

    fn parse_binary(&mut self, level: Precedence) -> ParseResult<Expression> {
        let mut left = self.parse_tighter(level)?;

        while let Some(operator) = self.operator_at(level) {
            let op_token = self.advance();

            if matches!(self.current.kind, TokenKind::Eof | TokenKind::RightParen) {
                return Err(SyntaxError::MissingOperand {
                    operator: operator.to_string(),
                    line: op_token.line,
                    column: op_token.column,
                });
            }

            let right = self.parse_tighter(level)?;
            left = Expression::binary(left, operator, right);
        }

        Ok(left)
    }

    fn parse_tighter(&mut self, level: Precedence) -> ParseResult<Expression> {
        match level.tighter() {
            Some(next) => self.parse_binary(next),
            None => self.parse_operand(),
        }
    }

    fn operator_at(&self, level: Precedence) -> Option<BinaryOperator> {
        self.current
            .kind
            .binary_operator()
            .filter(|op| op.precedence() == level)
    }

    fn parse_operand(&mut self) -> ParseResult<Expression> {
        if let Some(literal) = scalar_literal(&self.current.kind) {
            let token = self.advance();
            return Ok(Expression::literal(literal, token_span(&token)));
        }

        match &self.current.kind {
            TokenKind::Variable(name) => {
                let name = name.clone();
                let token = self.advance();
                Ok(Expression::var_ref(name, token_span(&token)))
            }
            TokenKind::LeftParen => self.parse_paren(),
            TokenKind::LeftBracket => self.parse_list(),
            TokenKind::Eof => match self.open_parens.last() {
                Some(open) => Err(SyntaxError::UnmatchedParen {
                    paren: '(',
                    line: open.line,
                    column: open.column,
                }),
                None => Err(SyntaxError::Empty),
            },
            _ => Err(self.unexpected("an operand")),
        }
    }

    fn parse_paren(&mut self) -> ParseResult<Expression> {
        if self.open_parens.len() >= self.max_depth {
            return Err(SyntaxError::TooDeep {
                max_depth: self.max_depth,
                line: self.current.line,
                column: self.current.column,
            });
        }

        let open = self.advance();
        self.open_parens.push(open.clone());

        let inner = self.parse_expression()?;

        match self.current.kind {
            TokenKind::RightParen => {
                let close = self.advance();
                self.open_parens.pop();
                let span = Span::new(open.span.0, close.span.1, open.line, open.column);
                Ok(Expression::paren(inner, span))
            }
            TokenKind::Eof => Err(SyntaxError::UnmatchedParen {
                paren: '(',
                line: open.line,
                column: open.column,
            }),
            _ => Err(self.unexpected("')'")),
        }
    }

    /// `[ "A", "B" ]` or `[ 1, 2.5 ]`. Elements must all be strings or all
    /// numbers, and the list must not be empty.
    fn parse_list(&mut self) -> ParseResult<Expression> {
        let open = self.advance();
        let mut strings = Vec::new();
        let mut numbers = Vec::new();

        loop {
            match &self.current.kind {
                TokenKind::String(s) if numbers.is_empty() => strings.push(s.clone()),
                TokenKind::Number(n) if strings.is_empty() => numbers.push(*n),
                TokenKind::String(_) | TokenKind::Number(_) => {
                    return Err(self.invalid_list(
                        "elements must be all strings or all numbers",
                        self.current.line,
                        self.current.column,
                    ));
                }
                TokenKind::RightBracket if strings.is_empty() && numbers.is_empty() => {
                    return Err(self.invalid_list("list is empty", open.line, open.column));
                }
                TokenKind::Eof => {
                    return Err(self.invalid_list("missing closing ']'", open.line, open.column));
                }
                TokenKind::Illegal(_) => return Err(self.illegal()),
                _ => {
                    let message = format!(
                        "expected a string or number literal, found '{}'",
                        describe(&self.current)
                    );
                    return Err(self.invalid_list(&message, self.current.line, self.current.column));
                }
            }
            self.advance();

            match self.current.kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RightBracket => break,
                TokenKind::Eof => {
                    return Err(self.invalid_list("missing closing ']'", open.line, open.column));
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        let close = self.advance();
        let span = Span::new(open.span.0, close.span.1, open.line, open.column);
        let literal = if strings.is_empty() {
            Literal::NumberList(numbers)
        } else {
            Literal::StringList(strings)
        };
        Ok(Expression::literal(literal, span))
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        if let TokenKind::Illegal(_) = self.current.kind {
            return self.illegal();
        }
        SyntaxError::UnexpectedToken {
            found: describe(&self.current),
            expected: expected.to_string(),
            line: self.current.line,
            column: self.current.column,
        }
    }

    fn illegal(&self) -> SyntaxError {
        SyntaxError::IllegalToken {
            lexeme: self.current.lexeme.clone(),
            line: self.current.line,
            column: self.current.column,
        }
    }

    fn invalid_list(&self, message: &str, line: usize, column: usize) -> SyntaxError {
        SyntaxError::InvalidList {
            message: message.to_string(),
            line,
            column,
        }
    }
}

fn scalar_literal(kind: &TokenKind) -> Option<Literal> {
    match kind {
        TokenKind::String(s) => Some(Literal::String(s.clone())),
        TokenKind::Number(n) => Some(Literal::Number(*n)),
        TokenKind::Duration(d) => Some(Literal::Duration(*d)),
        TokenKind::Boolean(b) => Some(Literal::Boolean(*b)),
        _ => None,
    }
}

fn token_span(token: &Token) -> Span {
    Span::new(token.span.0, token.span.1, token.line, token.column)
}

fn describe(token: &Token) -> String {
    if token.lexeme.is_empty() {
        token.kind.to_string()
    } else {
        token.lexeme.clone()
    }
}
