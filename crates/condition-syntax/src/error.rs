use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("Empty condition")]
    Empty,

    #[error("Unexpected token '{found}' at line {line}, column {column}: expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: usize,
        column: usize,
    },

    #[error("Operator '{operator}' at line {line}, column {column} is missing its right operand")]
    MissingOperand {
        operator: String,
        line: usize,
        column: usize,
    },

    #[error("Unmatched '{paren}' at line {line}, column {column}")]
    UnmatchedParen {
        paren: char,
        line: usize,
        column: usize,
    },

    #[error("Unexpected trailing input '{found}' at line {line}, column {column}")]
    TrailingInput {
        found: String,
        line: usize,
        column: usize,
    },

    #[error("Illegal token '{lexeme}' at line {line}, column {column}")]
    IllegalToken {
        lexeme: String,
        line: usize,
        column: usize,
    },

    #[error("Invalid list literal at line {line}, column {column}: {message}")]
    InvalidList {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Nesting deeper than {max_depth} levels at line {line}, column {column}")]
    TooDeep {
        max_depth: usize,
        line: usize,
        column: usize,
    },
}

impl SyntaxError {
    /// Line and column the error points at, if it has a location.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            SyntaxError::Empty => None,
            SyntaxError::UnexpectedToken { line, column, .. }
            | SyntaxError::MissingOperand { line, column, .. }
            | SyntaxError::UnmatchedParen { line, column, .. }
            | SyntaxError::TrailingInput { line, column, .. }
            | SyntaxError::IllegalToken { line, column, .. }
            | SyntaxError::InvalidList { line, column, .. }
            | SyntaxError::TooDeep { line, column, .. } => Some((*line, *column)),
        }
    }

    /// Format error with the offending source line and a caret under it
    pub fn format_error(&self, source: &str) -> String {
        match self.position() {
            Some((line, column)) => {
                let snippet = source.lines().nth(line.saturating_sub(1)).unwrap_or("");
                format!(
                    "Syntax error at line {}, column {}:\n{}\n{}^\n{}",
                    line,
                    column,
                    snippet,
                    " ".repeat(column.saturating_sub(1)),
                    self
                )
            }
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_points_at_column() {
        let err = SyntaxError::IllegalToken {
            lexeme: "@".into(),
            line: 1,
            column: 4,
        };
        let formatted = err.format_error("$a @ 1");
        let lines: Vec<&str> = formatted.lines().collect();

        assert_eq!(lines[1], "$a @ 1");
        assert_eq!(lines[2], "   ^");
        assert!(lines[3].contains("Illegal token '@'"));
    }

    #[test]
    fn test_empty_has_no_position() {
        assert_eq!(SyntaxError::Empty.position(), None);
        assert_eq!(SyntaxError::Empty.format_error(""), "Empty condition");
    }
}
