use crate::token::Token;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum CompilerError {
    FileNotFound(String),
    IO(std::io::Error),
    Lex(LexError),
    Syntax(SyntaxError),
    Arithmetic(ArithmeticError),
    Name(NameError),
}

impl Error for CompilerError {}

impl fmt::Display for CompilerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompilerError::IO(err) => write!(f, "IOError: {}", err),
            CompilerError::FileNotFound(err) => write!(f, "FileNotFoundError: {}", err),
            CompilerError::Lex(err) => write!(f, "LexError: {}", err),
            CompilerError::Syntax(err) => write!(f, "SyntaxError: {}", err),
            CompilerError::Arithmetic(err) => write!(f, "ArithmeticError: {}", err),
            CompilerError::Name(err) => write!(f, "NameError: {}", err),
        }
    }
}

#[derive(Debug)]
pub struct LexError {
    pub(crate) message: String,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Error for LexError {}

impl LexError {
    pub fn new(message: String, line: usize, column: usize) -> Self {
        Self {
            message,
            line,
            column,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.line, self.column
        )
    }
}

#[derive(Debug)]
pub struct SyntaxError {
    pub(crate) message: String,
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) lexeme: String,
}

impl Error for SyntaxError {}

impl SyntaxError {
    pub fn from_token(token: &Token, message: String) -> Self {
        Self {
            message,
            line: token.line,
            column: token.column,
            lexeme: token.text.clone(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.line, self.column
        )
    }
}

#[derive(Debug)]
pub struct ArithmeticError {
    pub(crate) message: String,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Error for ArithmeticError {}

impl ArithmeticError {
    pub fn from_token(token: &Token, message: String) -> Self {
        Self {
            message,
            line: token.line,
            column: token.column,
        }
    }
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.line, self.column
        )
    }
}

#[derive(Debug)]
pub struct NameError {
    pub(crate) name: String,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Error for NameError {}

impl NameError {
    pub fn from_token(token: &Token) -> Self {
        Self {
            name: token.text.clone(),
            line: token.line,
            column: token.column,
        }
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "undefined variable '{}' at line {}, column {}",
            self.name, self.line, self.column
        )
    }
}
