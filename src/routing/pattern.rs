//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile pattern text into a token sequence at table construction
//! - Match patterns against request paths (full or prefix)
//! - Reverse-fill patterns with parameter values for URL generation
//!
//! # Pattern Syntax
//! Patterns are relative (no leading slash):
//! - Literal text matches itself, case-sensitively
//! - `{name}` captures exactly one non-empty path segment
//! - `{*name}` captures the remaining path and must be last
//! - The empty pattern matches only the empty remaining path
//!
//! # Design Decisions
//! - Paths are matched literally: no percent-decoding, no slash appending
//! - Segment captures never cross a `/` boundary
//! - Compilation errors surface at startup, never during dispatch

use crate::routing::handler::PathParams;

/// Error raised when compiling a malformed pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("unclosed '{{' in pattern {0:?}")]
    UnclosedBrace(String),

    #[error("unmatched '}}' in pattern {0:?}")]
    UnmatchedBrace(String),

    #[error("empty parameter name in pattern {0:?}")]
    EmptyParamName(String),

    #[error("duplicate parameter {name:?} in pattern {pattern:?}")]
    DuplicateParam { pattern: String, name: String },

    #[error("tail capture must be the last element of pattern {0:?}")]
    TailNotLast(String),
}

/// Error raised when reverse URL generation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReverseError {
    #[error("no route named {0:?}")]
    UnknownName(String),

    #[error("missing value for parameter {0:?}")]
    MissingParam(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Param(String),
    Tail(String),
}

/// A compiled path pattern.
///
/// Immutable after compilation; matching borrows the pattern and the path
/// and allocates only for captured parameter values.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compile pattern text into its token sequence.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let mut tokens = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        let mut rest = text;

        while !rest.is_empty() {
            if tokens.iter().any(|t| matches!(t, Token::Tail(_))) {
                return Err(PatternError::TailNotLast(text.to_string()));
            }
            match rest.find(['{', '}']) {
                None => {
                    tokens.push(Token::Literal(rest.to_string()));
                    rest = "";
                }
                Some(at) if rest.as_bytes()[at] == b'}' => {
                    return Err(PatternError::UnmatchedBrace(text.to_string()));
                }
                Some(at) => {
                    if at > 0 {
                        tokens.push(Token::Literal(rest[..at].to_string()));
                    }
                    let after = &rest[at + 1..];
                    let close = after
                        .find('}')
                        .ok_or_else(|| PatternError::UnclosedBrace(text.to_string()))?;
                    let inner = &after[..close];
                    let (is_tail, name) = match inner.strip_prefix('*') {
                        Some(n) => (true, n),
                        None => (false, inner),
                    };
                    if name.is_empty() {
                        return Err(PatternError::EmptyParamName(text.to_string()));
                    }
                    if names.contains(&name) {
                        return Err(PatternError::DuplicateParam {
                            pattern: text.to_string(),
                            name: name.to_string(),
                        });
                    }
                    names.push(name);
                    tokens.push(if is_tail {
                        Token::Tail(name.to_string())
                    } else {
                        Token::Param(name.to_string())
                    });
                    rest = &after[close + 1..];
                }
            }
        }

        Ok(Self {
            text: text.to_string(),
            tokens,
        })
    }

    /// The original pattern text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Match the entire remaining path. Used for view routes, which must
    /// consume everything that is left.
    pub fn match_full(&self, path: &str) -> Option<PathParams> {
        match self.match_at(path) {
            Some((params, "")) => Some(params),
            _ => None,
        }
    }

    /// Match a prefix of the remaining path, returning captures and the
    /// unconsumed remainder. Used for include routes.
    pub fn match_prefix<'p>(&self, path: &'p str) -> Option<(PathParams, &'p str)> {
        self.match_at(path)
    }

    fn match_at<'p>(&self, path: &'p str) -> Option<(PathParams, &'p str)> {
        let mut rest = path;
        let mut params = PathParams::new();
        for token in &self.tokens {
            match token {
                Token::Literal(lit) => {
                    rest = rest.strip_prefix(lit.as_str())?;
                }
                Token::Param(name) => {
                    let end = rest.find('/').unwrap_or(rest.len());
                    if end == 0 {
                        return None;
                    }
                    params.push(name, &rest[..end]);
                    rest = &rest[end..];
                }
                Token::Tail(name) => {
                    params.push(name, rest);
                    rest = "";
                }
            }
        }
        Some((params, rest))
    }

    /// Substitute parameter values back into the pattern.
    pub fn reverse(&self, params: &[(&str, &str)]) -> Result<String, ReverseError> {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(lit) => out.push_str(lit),
                Token::Param(name) | Token::Tail(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| *key == name.as_str())
                        .map(|(_, value)| *value)
                        .ok_or_else(|| ReverseError::MissingParam(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_matches_only_empty_path() {
        let pattern = Pattern::parse("").unwrap();
        assert!(pattern.match_full("").is_some());
        assert!(pattern.match_full("x").is_none());
    }

    #[test]
    fn literal_pattern_is_exact_for_full_match() {
        let pattern = Pattern::parse("whoami/").unwrap();
        assert!(pattern.match_full("whoami/").is_some());
        assert!(pattern.match_full("whoami").is_none());
        assert!(pattern.match_full("whoami/extra").is_none());
        assert!(pattern.match_full("WHOAMI/").is_none());
    }

    #[test]
    fn param_captures_one_segment() {
        let pattern = Pattern::parse("workouts/{id}/").unwrap();
        let params = pattern.match_full("workouts/5/").unwrap();
        assert_eq!(params.get("id"), Some("5"));
        // A capture never crosses a slash.
        assert!(pattern.match_full("workouts/5/sets/").is_none());
        // An empty segment is not a capture.
        assert!(pattern.match_full("workouts//").is_none());
    }

    #[test]
    fn prefix_match_returns_remainder() {
        let pattern = Pattern::parse("api/").unwrap();
        let (params, rest) = pattern.match_prefix("api/workouts/5/").unwrap();
        assert!(params.is_empty());
        assert_eq!(rest, "workouts/5/");
        assert!(pattern.match_prefix("blog/post/").is_none());
    }

    #[test]
    fn tail_captures_remaining_path() {
        let pattern = Pattern::parse("files/{*path}").unwrap();
        let params = pattern.match_full("files/a/b/c.txt").unwrap();
        assert_eq!(params.get("path"), Some("a/b/c.txt"));
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert!(matches!(
            Pattern::parse("workouts/{id"),
            Err(PatternError::UnclosedBrace(_))
        ));
        assert!(matches!(
            Pattern::parse("workouts/id}/"),
            Err(PatternError::UnmatchedBrace(_))
        ));
        assert!(matches!(
            Pattern::parse("workouts/{}/"),
            Err(PatternError::EmptyParamName(_))
        ));
        assert!(matches!(
            Pattern::parse("{id}/{id}/"),
            Err(PatternError::DuplicateParam { .. })
        ));
        assert!(matches!(
            Pattern::parse("{*rest}/more"),
            Err(PatternError::TailNotLast(_))
        ));
    }

    #[test]
    fn reverse_fills_params() {
        let pattern = Pattern::parse("workouts/{id}/").unwrap();
        assert_eq!(pattern.reverse(&[("id", "5")]).unwrap(), "workouts/5/");
        assert_eq!(
            pattern.reverse(&[]),
            Err(ReverseError::MissingParam("id".to_string()))
        );
    }
}
