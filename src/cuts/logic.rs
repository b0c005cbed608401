// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cut-combination logic expressions.
//!
//! A logic expression is a boolean formula over `{cutname}` placeholders
//! with `and`, `or`, `not` and parentheses:
//!
//! ```text
//! {fiducial_cut} and ({numu_cc} or not {true_nue_cc})
//! ```
//!
//! The expression is parsed once, at configuration time, into an AST that is
//! evaluated against a name -> bool map per event. Nothing is ever spliced
//! into source text and handed to a general evaluator, and coverage checks
//! ("does the expression reference every configured cut?") are AST
//! traversals rather than substring searches.
//!
//! Grammar:
//!
//! ```text
//! expr    := or
//! or      := and ( "or" and )*
//! and     := unary ( "and" unary )*
//! unary   := "not" unary | primary
//! primary := "(" expr ")" | "{" NAME "}"
//! ```

use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogicError {
    #[error("failed to parse cut logic: {reason}")]
    Parse { reason: String },

    #[error("cut logic does not reference configured cuts: {}", missing.join(", "))]
    UnreferencedCuts { missing: Vec<String> },

    #[error("cut logic references unconfigured cuts: {}", unknown.join(", "))]
    UnknownCuts { unknown: Vec<String> },

    #[error("cut logic references '{name}' but no result is available for it")]
    MissingResult { name: String },
}

/// Parsed boolean formula over cut names.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicExpr {
    Cut(String),
    Not(Box<LogicExpr>),
    And(Box<LogicExpr>, Box<LogicExpr>),
    Or(Box<LogicExpr>, Box<LogicExpr>),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
}

impl LogicExpr {
    pub fn parse(text: &str) -> Result<Self, LogicError> {
        let tokens = tokenize(text)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return Err(LogicError::Parse {
                reason: format!("unexpected trailing input after position {}", parser.pos),
            });
        }
        Ok(expr)
    }

    /// Every cut name the expression references.
    pub fn cut_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut BTreeSet<String>) {
        match self {
            LogicExpr::Cut(name) => {
                names.insert(name.clone());
            }
            LogicExpr::Not(inner) => inner.collect_names(names),
            LogicExpr::And(lhs, rhs) | LogicExpr::Or(lhs, rhs) => {
                lhs.collect_names(names);
                rhs.collect_names(names);
            }
        }
    }

    /// Check the expression against the configured cut set, both ways:
    /// every configured cut must be referenced (all missing names reported
    /// in one pass), and every referenced name must be configured.
    pub fn validate(&self, configured: &[String]) -> Result<(), LogicError> {
        let referenced = self.cut_names();

        let unknown: Vec<String> = referenced
            .iter()
            .filter(|name| !configured.contains(name))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(LogicError::UnknownCuts { unknown });
        }

        let missing: Vec<String> = configured
            .iter()
            .filter(|name| !referenced.contains(*name))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(LogicError::UnreferencedCuts { missing });
        }

        Ok(())
    }

    /// Evaluate against per-cut results. Total for any expression that
    /// passed [`LogicExpr::validate`] against the evaluated cut set.
    pub fn evaluate(&self, results: &HashMap<String, bool>) -> Result<bool, LogicError> {
        match self {
            LogicExpr::Cut(name) => {
                results
                    .get(name)
                    .copied()
                    .ok_or_else(|| LogicError::MissingResult { name: name.clone() })
            }
            LogicExpr::Not(inner) => Ok(!inner.evaluate(results)?),
            LogicExpr::And(lhs, rhs) => Ok(lhs.evaluate(results)? && rhs.evaluate(results)?),
            LogicExpr::Or(lhs, rhs) => Ok(lhs.evaluate(results)? || rhs.evaluate(results)?),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, LogicError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                tokens.push(Token::LeftParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RightParen);
                chars.next();
            }
            '{' => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(LogicError::Parse {
                        reason: format!("unclosed '{{' at position {pos}"),
                    });
                }
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(LogicError::Parse {
                        reason: format!("empty cut placeholder at position {pos}"),
                    });
                }
                if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    return Err(LogicError::Parse {
                        reason: format!("invalid cut name '{name}' at position {pos}"),
                    });
                }
                tokens.push(Token::Name(name));
            }
            c if c.is_alphabetic() => {
                let mut word = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        word.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match word.as_str() {
                    "and" => tokens.push(Token::And),
                    "or" => tokens.push(Token::Or),
                    "not" => tokens.push(Token::Not),
                    other => {
                        return Err(LogicError::Parse {
                            reason: format!(
                                "unexpected word '{other}' at position {pos}; cut names must be written as '{{{other}}}'"
                            ),
                        });
                    }
                }
            }
            other => {
                return Err(LogicError::Parse {
                    reason: format!("unexpected character '{other}' at position {pos}"),
                });
            }
        }
    }

    if tokens.is_empty() {
        return Err(LogicError::Parse {
            reason: "empty expression".to_string(),
        });
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_or(&mut self) -> Result<LogicExpr, LogicError> {
        let mut expr = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.advance();
            let rhs = self.parse_and()?;
            expr = LogicExpr::Or(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<LogicExpr, LogicError> {
        let mut expr = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.advance();
            let rhs = self.parse_unary()?;
            expr = LogicExpr::And(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<LogicExpr, LogicError> {
        if self.peek() == Some(&Token::Not) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(LogicExpr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<LogicExpr, LogicError> {
        match self.advance() {
            Some(Token::Name(name)) => Ok(LogicExpr::Cut(name)),
            Some(Token::LeftParen) => {
                let expr = self.parse_or()?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(expr),
                    _ => Err(LogicError::Parse {
                        reason: "expected ')'".to_string(),
                    }),
                }
            }
            Some(token) => Err(LogicError::Parse {
                reason: format!("unexpected token {token:?}"),
            }),
            None => Err(LogicError::Parse {
                reason: "unexpected end of expression".to_string(),
            }),
        }
    }
}
