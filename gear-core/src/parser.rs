//! Textual constraint parser.
//!
//! Reads linear constraints such as `2*x + y <= 4`, `-1/2*i >= -3` or
//! `o' = o` into terms.
//!
//! ```text
//! constraint := expr rel expr
//! rel        := "<=" | ">=" | "==" | "="
//! expr       := ["+" | "-"] atom (("+" | "-") atom)*
//! atom       := number ["*"] [ident] | ident [("*" | "/") number]
//! number     := digits ["." digits] ["/" digits]
//! ident      := (letter | "_") (letter | digit | "_" | "'")*
//! ```
//!
//! Variables may appear on both sides; the constraint is normalized to
//! `Σ aᵢ·vᵢ ≤ c`. An equality yields two opposite terms.

use crate::error::{GearError, Result};
use crate::term::Term;
use crate::term_set::TermSet;
use crate::variable::Var;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Number(BigRational),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Le,
    Ge,
    Eq,
    Eof,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Le,
    Ge,
    Eq,
}

/// An affine expression collected while parsing one side.
#[derive(Debug, Default)]
struct Side {
    coeffs: BTreeMap<Var, BigRational>,
    constant: BigRational,
}

impl Side {
    fn push(&mut self, var: Option<Var>, value: BigRational) {
        match var {
            Some(v) => *self.coeffs.entry(v).or_insert_with(BigRational::zero) += value,
            None => self.constant += value,
        }
    }
}

fn malformed(position: usize, message: impl std::fmt::Display) -> GearError {
    GearError::MalformedTerm(format!("at {}: {}", position, message))
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (position, c) = chars[i];
        let next = chars.get(i + 1).map(|&(_, c)| c);
        let kind = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '<' if next == Some('=') => {
                i += 1;
                TokenKind::Le
            }
            '>' if next == Some('=') => {
                i += 1;
                TokenKind::Ge
            }
            '=' => {
                if next == Some('=') {
                    i += 1;
                }
                TokenKind::Eq
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().map(|&(_, c)| c).collect();
                tokens.push(Token {
                    kind: TokenKind::Number(parse_decimal(&text, position)?),
                    position,
                });
                continue;
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].1.is_alphanumeric() || chars[i].1 == '_' || chars[i].1 == '\'')
                {
                    i += 1;
                }
                let text: String = chars[start..i].iter().map(|&(_, c)| c).collect();
                tokens.push(Token {
                    kind: TokenKind::Ident(text),
                    position,
                });
                continue;
            }
            other => return Err(malformed(position, format!("unexpected character '{}'", other))),
        };
        tokens.push(Token { kind, position });
        i += 1;
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        position: input.len(),
    });
    Ok(tokens)
}

/// Parse `digits[.digits]` exactly.
fn parse_decimal(text: &str, position: usize) -> Result<BigRational> {
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    if (whole.is_empty() && frac.is_empty()) || frac.contains('.') {
        return Err(malformed(position, format!("invalid number '{}'", text)));
    }

    let digits = format!("{}{}", whole, frac);
    let numerator = BigInt::from_str(&digits)
        .map_err(|_| malformed(position, format!("invalid number '{}'", text)))?;
    let denominator = num_traits::pow(BigInt::from(10), frac.len());
    Ok(BigRational::new(numerator, denominator))
}

/// Recursive-descent parser over a token stream.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
        })
    }

    fn peek(&self) -> &Token {
        // The stream always ends with Eof, which is never consumed
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn parse_constraint(&mut self) -> Result<(Side, Relation, Side)> {
        let lhs = self.parse_expr()?;
        let token = self.advance();
        let relation = match token.kind {
            TokenKind::Le => Relation::Le,
            TokenKind::Ge => Relation::Ge,
            TokenKind::Eq => Relation::Eq,
            other => {
                return Err(malformed(
                    token.position,
                    format!("expected '<=', '>=' or '=', found {:?}", other),
                ));
            }
        };
        let rhs = self.parse_expr()?;

        let token = self.peek();
        if token.kind != TokenKind::Eof {
            return Err(malformed(
                token.position,
                format!("trailing input {:?}", token.kind),
            ));
        }
        Ok((lhs, relation, rhs))
    }

    fn parse_expr(&mut self) -> Result<Side> {
        let mut side = Side::default();
        let mut sign = match self.peek().kind {
            TokenKind::Minus => {
                self.advance();
                -BigRational::one()
            }
            TokenKind::Plus => {
                self.advance();
                BigRational::one()
            }
            _ => BigRational::one(),
        };

        loop {
            let (var, value) = self.parse_atom()?;
            side.push(var, sign * value);

            sign = match self.peek().kind {
                TokenKind::Plus => BigRational::one(),
                TokenKind::Minus => -BigRational::one(),
                _ => break,
            };
            self.advance();
        }
        Ok(side)
    }

    fn parse_atom(&mut self) -> Result<(Option<Var>, BigRational)> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(value) => {
                let value = self.parse_fraction(value)?;
                if self.peek().kind == TokenKind::Star {
                    self.advance();
                    let token = self.advance();
                    return match token.kind {
                        TokenKind::Ident(name) => Ok((Some(Var::new(name)), value)),
                        other => Err(malformed(
                            token.position,
                            format!("expected variable after '*', found {:?}", other),
                        )),
                    };
                }
                if let TokenKind::Ident(name) = &self.peek().kind {
                    let var = Var::new(name);
                    self.advance();
                    return Ok((Some(var), value));
                }
                Ok((None, value))
            }
            TokenKind::Ident(name) => {
                let var = Var::new(name);
                match self.peek().kind {
                    TokenKind::Star => {
                        self.advance();
                        let value = self.expect_number()?;
                        Ok((Some(var), value))
                    }
                    TokenKind::Slash => {
                        let position = self.advance().position;
                        let divisor = self.expect_number()?;
                        if divisor.is_zero() {
                            return Err(malformed(position, "division by zero"));
                        }
                        Ok((Some(var), divisor.recip()))
                    }
                    _ => Ok((Some(var), BigRational::one())),
                }
            }
            other => Err(malformed(
                token.position,
                format!("expected number or variable, found {:?}", other),
            )),
        }
    }

    /// Consume an optional `/ number` after a numerator.
    fn parse_fraction(&mut self, numerator: BigRational) -> Result<BigRational> {
        if self.peek().kind != TokenKind::Slash {
            return Ok(numerator);
        }
        let position = self.advance().position;
        let denominator = self.expect_number()?;
        if denominator.is_zero() {
            return Err(malformed(position, "division by zero"));
        }
        Ok(numerator / denominator)
    }

    fn expect_number(&mut self) -> Result<BigRational> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(value) => self.parse_fraction(value),
            other => Err(malformed(
                token.position,
                format!("expected number, found {:?}", other),
            )),
        }
    }
}

/// Parse a constraint into one term (`<=`, `>=`) or two (`=`).
pub fn parse_constraint(input: &str) -> Result<Vec<Term>> {
    let (lhs, relation, rhs) = Parser::new(input)?.parse_constraint()?;

    let mut coeffs = lhs.coeffs;
    for (var, c) in rhs.coeffs {
        *coeffs.entry(var).or_insert_with(BigRational::zero) -= c;
    }
    let le = Term::new(coeffs, rhs.constant - lhs.constant);

    Ok(match relation {
        Relation::Le => vec![le],
        Relation::Ge => vec![le.negate()],
        Relation::Eq => {
            let ge = le.negate();
            vec![le, ge]
        }
    })
}

/// Parse a single inequality.
pub fn parse_term(input: &str) -> Result<Term> {
    let mut terms = parse_constraint(input)?;
    match (terms.pop(), terms.is_empty()) {
        (Some(term), true) => Ok(term),
        _ => Err(GearError::MalformedTerm(format!(
            "'{}' is an equality; use parse_constraint",
            input
        ))),
    }
}

/// Parse a collection of constraints into one set.
pub fn parse_terms<I, S>(inputs: I) -> Result<TermSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = TermSet::new();
    for input in inputs {
        set.extend(parse_constraint(input.as_ref())?);
    }
    Ok(set)
}

impl FromStr for Term {
    type Err = GearError;

    fn from_str(s: &str) -> Result<Self> {
        parse_term(s)
    }
}
