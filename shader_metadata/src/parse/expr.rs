/// Macro value expressions
///
/// A small evaluator for `#define` values and array sizes: integer, float
/// and string literals, names of already resolved macros, the binary
/// operators `+ - * / %`, unary `+ -` and parentheses. Nothing else is
/// accepted, so a macro value is never executed as code.

use std::fmt;

use rustc_hash::FxHashMap;

/// Maximum nesting of parentheses and unary operators
const MAX_DEPTH: usize = 64;

/// A resolved macro value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Literal {
    /// Integer value, if this literal is a non-negative integer
    pub fn as_count(&self) -> Option<u32> {
        match self {
            Literal::Int(v) => u32::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    /// Source text used when substituting the macro back into a shader
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            // Debug keeps the decimal point (2.0 rather than 2)
            Literal::Float(v) => write!(f, "{:?}", v),
            Literal::Str(s) => f.write_str(s),
        }
    }
}

/// Why an expression could not be evaluated
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The expression uses a name with no resolved value (yet)
    Unresolved(String),
    /// Malformed or unsupported expression
    Syntax(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Unresolved(name) => write!(f, "unresolved name '{}'", name),
            EvalError::Syntax(msg) => f.write_str(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Op(char),
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) {
            let (token, next) = lex_number(&chars, i)?;
            tokens.push(token);
            i = next;
        } else if c == '"' || c == '\'' {
            let mut value = String::new();
            let mut j = i + 1;
            loop {
                match chars.get(j) {
                    None => return Err(EvalError::Syntax("unterminated string literal".to_string())),
                    Some('\\') => {
                        if let Some(&escaped) = chars.get(j + 1) {
                            value.push(escaped);
                        }
                        j += 2;
                    }
                    Some(&q) if q == c => break,
                    Some(&other) => {
                        value.push(other);
                        j += 1;
                    }
                }
            }
            tokens.push(Token::Str(value));
            i = j + 1;
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
        } else {
            let token = match c {
                '+' | '-' | '*' | '/' | '%' => Token::Op(c),
                '(' => Token::Open,
                ')' => Token::Close,
                _ => return Err(EvalError::Syntax(format!("unexpected character '{}'", c))),
            };
            tokens.push(token);
            i += 1;
        }
    }

    Ok(tokens)
}

fn lex_number(chars: &[char], start: usize) -> Result<(Token, usize), EvalError> {
    let mut i = start;

    // Hexadecimal integer
    if chars[i] == '0' && matches!(chars.get(i + 1), Some('x') | Some('X')) {
        i += 2;
        let digits_start = i;
        while i < chars.len() && chars[i].is_ascii_hexdigit() {
            i += 1;
        }
        let digits: String = chars[digits_start..i].iter().collect();
        let value = i64::from_str_radix(&digits, 16)
            .map_err(|_| EvalError::Syntax(format!("invalid hex literal '0x{}'", digits)))?;
        if matches!(chars.get(i), Some('u') | Some('U')) {
            i += 1;
        }
        return Ok((Token::Int(value), i));
    }

    let mut is_float = false;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if chars.get(i) == Some(&'.') {
        is_float = true;
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }
    if matches!(chars.get(i), Some('e') | Some('E')) {
        let mut j = i + 1;
        if matches!(chars.get(j), Some('+') | Some('-')) {
            j += 1;
        }
        if chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            i = j;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
    }

    let text: String = chars[start..i].iter().collect();
    let token = match chars.get(i) {
        Some('f') | Some('F') => {
            i += 1;
            parse_float(&text)?
        }
        Some('u') | Some('U') if !is_float => {
            i += 1;
            parse_int(&text)?
        }
        _ if is_float => parse_float(&text)?,
        _ => parse_int(&text)?,
    };
    Ok((token, i))
}

fn parse_int(text: &str) -> Result<Token, EvalError> {
    text.parse::<i64>()
        .map(Token::Int)
        .map_err(|_| EvalError::Syntax(format!("invalid integer literal '{}'", text)))
}

fn parse_float(text: &str) -> Result<Token, EvalError> {
    text.parse::<f64>()
        .map(Token::Float)
        .map_err(|_| EvalError::Syntax(format!("invalid float literal '{}'", text)))
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    names: &'a FxHashMap<String, Literal>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::Syntax("nesting too deep".to_string()));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Literal, EvalError> {
        let mut lhs = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek().cloned() {
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Result<Literal, EvalError> {
        let mut lhs = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/' | '%'))) = self.peek().cloned() {
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    // unary := ('+' | '-') unary | primary
    fn unary(&mut self) -> Result<Literal, EvalError> {
        match self.peek() {
            Some(Token::Op('-')) => {
                self.pos += 1;
                match self.nested(Self::unary)? {
                    Literal::Int(v) => v
                        .checked_neg()
                        .map(Literal::Int)
                        .ok_or_else(|| EvalError::Syntax("integer overflow".to_string())),
                    Literal::Float(v) => Ok(Literal::Float(-v)),
                    Literal::Str(_) => Err(EvalError::Syntax("cannot negate a string".to_string())),
                }
            }
            Some(Token::Op('+')) => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Literal, EvalError> {
        match self.next() {
            Some(Token::Int(v)) => Ok(Literal::Int(v)),
            Some(Token::Float(v)) => Ok(Literal::Float(v)),
            Some(Token::Str(s)) => Ok(Literal::Str(s)),
            Some(Token::Ident(name)) => self
                .names
                .get(&name)
                .cloned()
                .ok_or(EvalError::Unresolved(name)),
            Some(Token::Open) => {
                let value = self.nested(Self::expr)?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(EvalError::Syntax("missing ')'".to_string())),
                }
            }
            Some(other) => Err(EvalError::Syntax(format!("unexpected token {:?}", other))),
            None => Err(EvalError::Syntax("unexpected end of expression".to_string())),
        }
    }
}

fn binary(op: char, lhs: Literal, rhs: Literal) -> Result<Literal, EvalError> {
    match (lhs, rhs) {
        (Literal::Int(a), Literal::Int(b)) => {
            let value = match op {
                '+' => a.checked_add(b),
                '-' => a.checked_sub(b),
                '*' => a.checked_mul(b),
                '/' => a.checked_div(b),
                _ => a.checked_rem(b),
            };
            value
                .map(Literal::Int)
                .ok_or_else(|| EvalError::Syntax(format!("integer overflow or division by zero in {} {} {}", a, op, b)))
        }
        (Literal::Str(a), rhs) if op == '+' => Ok(Literal::Str(format!("{}{}", a, rhs))),
        (lhs, Literal::Str(b)) if op == '+' => Ok(Literal::Str(format!("{}{}", lhs, b))),
        (Literal::Str(_), _) | (_, Literal::Str(_)) => {
            Err(EvalError::Syntax(format!("operator '{}' is not defined for strings", op)))
        }
        (lhs, rhs) => {
            let a = to_float(&lhs);
            let b = to_float(&rhs);
            let value = match op {
                '+' => a + b,
                '-' => a - b,
                '*' => a * b,
                '/' => a / b,
                _ => a % b,
            };
            Ok(Literal::Float(value))
        }
    }
}

fn to_float(literal: &Literal) -> f64 {
    match literal {
        Literal::Int(v) => *v as f64,
        Literal::Float(v) => *v,
        Literal::Str(_) => f64::NAN,
    }
}

/// Evaluate `input` with `names` as the set of resolved macros
pub fn evaluate(input: &str, names: &FxHashMap<String, Literal>) -> Result<Literal, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Syntax("empty expression".to_string()));
    }

    let mut parser = Parser { tokens, pos: 0, depth: 0, names };
    let value = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(EvalError::Syntax(format!("unexpected token {:?}", token)));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;
