//! Condition expressions for choosing between description patterns
//!
//! Seeds may attach a small boolean expression to a pattern instead of a
//! host-registered predicate. The expression is compiled when the currency is
//! loaded and evaluated against the amount being described.
//!
//! **Supported Syntax:**
//! - Literals: `100`, `2.5`, `true`, `false`
//! - Variable: `$amount` (signed amount in base units)
//! - Functions: `abs(expr)`
//! - Operators: `==`, `!=`, `>`, `<`, `>=`, `<=`, `&&`, `||`, `!`, unary `-`, parentheses
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use super::errors::PredicateError;
use super::select::SelectorPredicate;

/// Token types for lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Identifier(String),
    Number(Decimal),
    Variable(String),

    And,
    Or,
    Not,
    Minus,
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,

    LeftParen,
    RightParen,

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(s) => write!(f, "identifier '{}'", s),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Variable(v) => write!(f, "variable ${}", v),
            Token::And => write!(f, "&&"),
            Token::Or => write!(f, "||"),
            Token::Not => write!(f, "!"),
            Token::Minus => write!(f, "-"),
            Token::Equal => write!(f, "=="),
            Token::NotEqual => write!(f, "!="),
            Token::Greater => write!(f, ">"),
            Token::Less => write!(f, "<"),
            Token::GreaterEqual => write!(f, ">="),
            Token::LessEqual => write!(f, "<="),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    And,
    Or,
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
}

/// Parsed condition
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Decimal),
    Boolean(bool),
    Amount,
    Abs(Box<Expr>),
    Negate(Box<Expr>),
    Not(Box<Expr>),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Value type for evaluation results
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(Decimal),
    Boolean(bool),
}

impl Value {
    fn as_bool(self) -> Result<bool, String> {
        match self {
            Value::Boolean(b) => Ok(b),
            Value::Number(n) => Err(format!("expected true/false, found number {}", n)),
        }
    }

    fn as_number(self) -> Result<Decimal, String> {
        match self {
            Value::Number(n) => Ok(n),
            Value::Boolean(b) => Err(format!("expected a number, found {}", b)),
        }
    }
}

/// Tokenizer for condition expressions
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current();
        self.position += 1;
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_number(&mut self) -> Result<Decimal, String> {
        let mut result = String::new();
        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() || ch == '.' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        Decimal::from_str(&result).map_err(|_| format!("Invalid number '{}'", result))
    }

    /// Consume `second` if it follows, yielding `double`; otherwise `single`.
    fn pair(&mut self, second: char, double: Token, single: Option<Token>, lone: char) -> Result<Token, String> {
        self.advance();
        if self.current() == Some(second) {
            self.advance();
            Ok(double)
        } else {
            single.ok_or_else(|| format!("Expected '{}{}', found single '{}'", lone, second, lone))
        }
    }

    pub fn next_token(&mut self) -> Result<Token, String> {
        self.skip_whitespace();

        match self.current() {
            None => Ok(Token::Eof),
            Some('(') => {
                self.advance();
                Ok(Token::LeftParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RightParen)
            }
            Some('-') => {
                self.advance();
                Ok(Token::Minus)
            }
            Some('&') => self.pair('&', Token::And, None, '&'),
            Some('|') => self.pair('|', Token::Or, None, '|'),
            Some('=') => self.pair('=', Token::Equal, None, '='),
            Some('!') => self.pair('=', Token::NotEqual, Some(Token::Not), '!'),
            Some('>') => self.pair('=', Token::GreaterEqual, Some(Token::Greater), '>'),
            Some('<') => self.pair('=', Token::LessEqual, Some(Token::Less), '<'),
            Some('$') => {
                self.advance();
                let var_name = self.read_identifier();
                if var_name.is_empty() {
                    Err("Expected variable name after '$'".to_string())
                } else {
                    Ok(Token::Variable(var_name))
                }
            }
            Some(ch) if ch.is_ascii_digit() => Ok(Token::Number(self.read_number()?)),
            Some(ch) if ch.is_alphabetic() || ch == '_' => Ok(Token::Identifier(self.read_identifier())),
            Some(ch) => Err(format!("Unexpected character: '{}'", ch)),
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, String> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Recursive-descent parser producing an [`Expr`]
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn expect(&mut self, expected: Token) -> Result<(), String> {
        let current = self.current().clone();
        if std::mem::discriminant(&current) == std::mem::discriminant(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(format!("Expected {}, found {}", expected, current))
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, String> {
        match self.current().clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            Token::Variable(v) => {
                self.advance();
                match v.as_str() {
                    "amount" => Ok(Expr::Amount),
                    _ => Err(format!("Unknown variable: ${}", v)),
                }
            }
            Token::Identifier(name) => {
                self.advance();
                match name.as_str() {
                    "true" => Ok(Expr::Boolean(true)),
                    "false" => Ok(Expr::Boolean(false)),
                    "abs" => {
                        self.expect(Token::LeftParen)?;
                        let inner = self.parse_or()?;
                        self.expect(Token::RightParen)?;
                        Ok(Expr::Abs(Box::new(inner)))
                    }
                    _ => Err(format!("Unknown function or constant: {}", name)),
                }
            }
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_or()?;
                self.expect(Token::RightParen)?;
                Ok(expr)
            }
            token => Err(format!("Unexpected token in expression: {}", token)),
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, String> {
        match self.current() {
            Token::Not => {
                self.advance();
                Ok(Expr::Not(Box::new(self.parse_unary()?)))
            }
            Token::Minus => {
                self.advance();
                Ok(Expr::Negate(Box::new(self.parse_unary()?)))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_comparison(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current() {
                Token::Equal => BinaryOperator::Equal,
                Token::NotEqual => BinaryOperator::NotEqual,
                Token::Greater => BinaryOperator::Greater,
                Token::Less => BinaryOperator::Less,
                Token::GreaterEqual => BinaryOperator::GreaterEqual,
                Token::LessEqual => BinaryOperator::LessEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_comparison()?;
        while matches!(self.current(), Token::And) {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::BinaryOp {
                op: BinaryOperator::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_and()?;
        while matches!(self.current(), Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::BinaryOp {
                op: BinaryOperator::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    pub fn parse(&mut self) -> Result<Expr, String> {
        let expr = self.parse_or()?;
        if !matches!(self.current(), Token::Eof) {
            return Err(format!("Unexpected token after expression: {}", self.current()));
        }
        Ok(expr)
    }
}

impl Expr {
    pub fn evaluate(&self, amount: Decimal) -> Result<Value, String> {
        match self {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Boolean(b) => Ok(Value::Boolean(*b)),
            Expr::Amount => Ok(Value::Number(amount)),
            Expr::Abs(inner) => Ok(Value::Number(inner.evaluate(amount)?.as_number()?.abs())),
            Expr::Negate(inner) => Ok(Value::Number(-inner.evaluate(amount)?.as_number()?)),
            Expr::Not(inner) => Ok(Value::Boolean(!inner.evaluate(amount)?.as_bool()?)),
            Expr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, amount),
        }
    }
}

fn evaluate_binary_op(
    op: BinaryOperator,
    left: &Expr,
    right: &Expr,
    amount: Decimal,
) -> Result<Value, String> {
    match op {
        BinaryOperator::And => {
            if !left.evaluate(amount)?.as_bool()? {
                return Ok(Value::Boolean(false));
            }
            Ok(Value::Boolean(right.evaluate(amount)?.as_bool()?))
        }
        BinaryOperator::Or => {
            if left.evaluate(amount)?.as_bool()? {
                return Ok(Value::Boolean(true));
            }
            Ok(Value::Boolean(right.evaluate(amount)?.as_bool()?))
        }
        BinaryOperator::Equal => Ok(Value::Boolean(left.evaluate(amount)? == right.evaluate(amount)?)),
        BinaryOperator::NotEqual => Ok(Value::Boolean(left.evaluate(amount)? != right.evaluate(amount)?)),
        BinaryOperator::Greater
        | BinaryOperator::Less
        | BinaryOperator::GreaterEqual
        | BinaryOperator::LessEqual => {
            let l = left.evaluate(amount)?.as_number()?;
            let r = right.evaluate(amount)?.as_number()?;
            Ok(Value::Boolean(match op {
                BinaryOperator::Greater => l > r,
                BinaryOperator::Less => l < r,
                BinaryOperator::GreaterEqual => l >= r,
                _ => l <= r,
            }))
        }
    }
}

/// A compiled condition expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    source: String,
    expr: Expr,
}

impl Condition {
    pub fn compile(source: &str) -> Result<Self, String> {
        let mut tokenizer = Tokenizer::new(source);
        let tokens = tokenizer.tokenize()?;
        let expr = Parser::new(tokens).parse()?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl SelectorPredicate for Condition {
    fn evaluate(&self, amount: Decimal) -> Result<bool, PredicateError> {
        self.expr
            .evaluate(amount)
            .and_then(Value::as_bool)
            .map_err(|e| PredicateError(format!("{}: {}", self.source, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eval(src: &str, amount: Decimal) -> Result<bool, PredicateError> {
        Condition::compile(src).unwrap().evaluate(amount)
    }

    #[test]
    fn test_tokenize_operators() {
        let mut tokenizer = Tokenizer::new("&& || == != > < >= <= ! -");
        let tokens = tokenizer.tokenize().unwrap();
        assert!(matches!(tokens[0], Token::And));
        assert!(matches!(tokens[1], Token::Or));
        assert!(matches!(tokens[2], Token::Equal));
        assert!(matches!(tokens[3], Token::NotEqual));
        assert!(matches!(tokens[4], Token::Greater));
        assert!(matches!(tokens[5], Token::Less));
        assert!(matches!(tokens[6], Token::GreaterEqual));
        assert!(matches!(tokens[7], Token::LessEqual));
        assert!(matches!(tokens[8], Token::Not));
        assert!(matches!(tokens[9], Token::Minus));
    }

    #[test]
    fn test_tokenize_decimal_number() {
        let tokens = Tokenizer::new("2.75").tokenize().unwrap();
        assert_eq!(tokens[0], Token::Number(dec!(2.75)));
    }

    #[test]
    fn test_zero_check() {
        assert!(eval("$amount == 0", dec!(0)).unwrap());
        assert!(!eval("$amount == 0", dec!(5)).unwrap());
    }

    #[test]
    fn test_abs_and_ranges() {
        let src = "abs($amount) >= 100 && abs($amount) < 960";
        assert!(eval(src, dec!(-250)).unwrap());
        assert!(eval(src, dec!(100)).unwrap());
        assert!(!eval(src, dec!(99)).unwrap());
        assert!(!eval(src, dec!(960)).unwrap());
    }

    #[test]
    fn test_negation_and_grouping() {
        assert!(eval("!($amount > 0) || false", dec!(-1)).unwrap());
        assert!(eval("$amount < -10", dec!(-11)).unwrap());
        assert!(!eval("!true", dec!(0)).unwrap());
    }

    #[test]
    fn test_type_errors_fail_at_evaluation() {
        assert!(eval("$amount", dec!(3)).is_err());
        assert!(eval("true > 1", dec!(3)).is_err());
    }

    #[test]
    fn test_compile_errors() {
        assert!(Condition::compile("$player == 1").is_err());
        assert!(Condition::compile("$amount = 1").is_err());
        assert!(Condition::compile("floor($amount)").is_err());
        assert!(Condition::compile("($amount > 1").is_err());
        assert!(Condition::compile("$amount > 1 2").is_err());
        assert!(Condition::compile("#").is_err());
    }
}
