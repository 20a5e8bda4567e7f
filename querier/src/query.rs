//! Query line parsing.
//!
//! A query is a sequence of words joined by `and` / `or`. Adjacent words
//! with no operator between them are joined by an implicit `and`, which
//! binds tighter than `or`.

use std::fmt;
use thiserror::Error;

use common::tokenizer::normalize_word;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Term(String),
    And,
    Or,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Term(word) => f.write_str(word),
            Token::And => f.write_str("and"),
            Token::Or => f.write_str("or"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("'{0}' contains a non-letter character")]
    NonAlphabetic(String),
    #[error("'{0}' cannot be first")]
    LeadingOperator(String),
    #[error("'{0}' cannot be last")]
    TrailingOperator(String),
    #[error("'{0}' and '{1}' cannot be adjacent")]
    AdjacentOperators(String, String),
}

/// A validated, case-folded query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    tokens: Vec<Token>,
}

impl Query {
    /// Validate one input line. A blank line is `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Query>, QueryError> {
        let mut tokens = Vec::new();
        for raw in line.split_whitespace() {
            if !raw.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(QueryError::NonAlphabetic(raw.to_string()));
            }
            let word = normalize_word(raw);
            let token = match word.as_str() {
                "and" => Token::And,
                "or" => Token::Or,
                _ => Token::Term(word),
            };
            if is_operator(&token) {
                match tokens.last() {
                    None => return Err(QueryError::LeadingOperator(token.to_string())),
                    Some(prev) if is_operator(prev) => {
                        return Err(QueryError::AdjacentOperators(prev.to_string(), token.to_string()))
                    }
                    _ => {}
                }
            }
            tokens.push(token);
        }
        match tokens.last() {
            None => Ok(None),
            Some(last) if is_operator(last) => Err(QueryError::TrailingOperator(last.to_string())),
            Some(_) => Ok(Some(Query { tokens })),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Terms grouped into and-runs, one group per `or` branch.
    pub fn runs(&self) -> Vec<Vec<&str>> {
        let mut runs = vec![Vec::new()];
        for token in &self.tokens {
            match token {
                Token::Term(word) => {
                    if let Some(run) = runs.last_mut() {
                        run.push(word.as_str());
                    }
                }
                Token::And => {}
                Token::Or => runs.push(Vec::new()),
            }
        }
        runs
    }
}

fn is_operator(token: &Token) -> bool {
    matches!(token, Token::And | Token::Or)
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
