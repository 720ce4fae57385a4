use serde::{Deserialize, Serialize};

/// Default limit on nested parentheses.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How `true`/`false` literals are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanCase {
    /// Only lowercase `true` and `false`.
    Exact,
    /// Any casing, e.g. `TRUE` or `False`.
    #[default]
    Insensitive,
}

impl BooleanCase {
    pub fn parse(self, word: &str) -> Option<bool> {
        match self {
            BooleanCase::Exact => match word {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            BooleanCase::Insensitive => {
                if word.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if word.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }
}

/// Options controlling how condition text is compiled.
///
/// Deserializable so hosts can embed it in their own configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxOptions {
    pub boolean_case: BooleanCase,
    pub max_depth: usize,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        SyntaxOptions {
            boolean_case: BooleanCase::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SyntaxOptions {
    pub fn with_boolean_case(mut self, boolean_case: BooleanCase) -> Self {
        self.boolean_case = boolean_case;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_case_exact() {
        assert_eq!(BooleanCase::Exact.parse("true"), Some(true));
        assert_eq!(BooleanCase::Exact.parse("false"), Some(false));
        assert_eq!(BooleanCase::Exact.parse("TRUE"), None);
    }

    #[test]
    fn test_boolean_case_insensitive() {
        assert_eq!(BooleanCase::Insensitive.parse("TRUE"), Some(true));
        assert_eq!(BooleanCase::Insensitive.parse("False"), Some(false));
        assert_eq!(BooleanCase::Insensitive.parse("yes"), None);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: SyntaxOptions = serde_json::from_str(r#"{ "boolean_case": "exact" }"#).unwrap();
        assert_eq!(options.boolean_case, BooleanCase::Exact);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }
}
