//! Expression parser
//!
//! A recursive descent parser used to reject malformed input before the
//! postfix pipeline runs. It accepts a superset of what the converter
//! understands: any identifier is allowed as a function name or variable
//! here, and the trial evaluator decides what is actually callable.

use crate::ast::Expr;
use crate::error::{ExprError, ExprResult};
use crate::token::Operator;

/// Parse an infix expression into an [`Expr`]
///
/// # Example
/// ```rust
/// use smartcalc_expr::parser::parse_expression;
///
/// let ast = parse_expression("1 + 2 * 3").unwrap();
/// let ast = parse_expression("sin(x) ^ 2").unwrap();
/// assert!(parse_expression("5 + * 3").is_err());
/// ```
pub fn parse_expression(text: &str) -> ExprResult<Expr> {
    let mut parser = ExprParser::new(text);
    let expr = parser.parse_additive()?;

    if !matches!(parser.current_token(), Token::Eof) {
        return Err(ExprError::syntax(format!(
            "Unexpected {:?} after expression",
            parser.current_token()
        )));
    }

    Ok(expr)
}

/// Scanner tokens
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LeftParen,
    RightParen,
    Unknown(char),
    Eof,
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Token,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: Token::Eof,
        };
        parser.advance_token();
        parser
    }

    // === Token scanning ===

    fn advance_token(&mut self) {
        self.current_token = self.scan_token();
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(c) = self.peek_char() else {
            return Token::Eof;
        };

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '%' => Some(Token::Percent),
            '^' => Some(Token::Caret),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return token;
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if c.is_ascii_alphabetic() || c == '_' {
            return self.scan_identifier();
        }

        self.advance();
        Token::Unknown(c)
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Scanned text is digits with at most one '.', so parsing cannot fail
        let num: f64 = self.input[start..self.pos].parse().unwrap_or(0.0);
        Token::Number(num)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        Token::Identifier(self.input[start..self.pos].to_string())
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        &self.current_token
    }

    fn consume(&mut self) -> Token {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token();
        token
    }

    fn expect(&mut self, expected: &Token) -> ExprResult<()> {
        if self.current_token() == expected {
            self.consume();
            Ok(())
        } else {
            Err(ExprError::syntax(format!(
                "Expected {:?}, got {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division/Remainder: *, /, %
    // 3. Unary sign: -, +
    // 4. Exponentiation: ^ (right associative)
    // 5. Primary: numbers, identifiers, calls, parentheses

    fn parse_additive(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => Operator::Add,
                Token::Minus => Operator::Subtract,
                _ => break,
            };

            self.consume();
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => Operator::Multiply,
                Token::Slash => Operator::Divide,
                Token::Percent => Operator::Modulo,
                _ => break,
            };

            self.consume();
            let right = self.parse_unary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ExprResult<Expr> {
        match self.current_token() {
            Token::Minus => {
                self.consume();
                let operand = self.parse_unary()?;
                Ok(Expr::Negate(Box::new(operand)))
            }
            Token::Plus => {
                self.consume();
                self.parse_unary()
            }
            _ => self.parse_exponent(),
        }
    }

    fn parse_exponent(&mut self) -> ExprResult<Expr> {
        let left = self.parse_primary()?;

        if matches!(self.current_token(), Token::Caret) {
            self.consume();
            // Right associative; the exponent may carry its own sign
            let right = self.parse_unary()?;
            return Ok(Expr::BinaryOp {
                op: Operator::Power,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> ExprResult<Expr> {
        match self.consume() {
            Token::Number(n) => Ok(Expr::Number(n)),

            Token::LeftParen => {
                let expr = self.parse_additive()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::Identifier(name) => {
                if matches!(self.current_token(), Token::LeftParen) {
                    self.consume();
                    let arg = self.parse_additive()?;
                    self.expect(&Token::RightParen)?;
                    Ok(Expr::Call {
                        name,
                        arg: Box::new(arg),
                    })
                } else {
                    Ok(Expr::Variable(name))
                }
            }

            other => Err(ExprError::syntax(format!("Unexpected token: {:?}", other))),
        }
    }
}
