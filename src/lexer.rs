use crate::error::LexError;
use crate::token::{Kind, Token};

pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
        }
    }

    fn at(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn advance(&mut self) {
        self.current += 1;
        self.column += 1;
        // A newline resets the counters for the character that follows it.
        if self.at() == Some('\n') {
            self.line += 1;
            self.column = 0;
        }
    }

    // Yields EOF forever once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        while let Some(ch) = self.at() {
            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            if ch.is_alphabetic() || ch == '_' {
                return Ok(self.identifier());
            }

            if ch.is_ascii_digit() {
                return Ok(self.number());
            }

            let kind = match ch {
                '=' => Kind::Equals,
                ';' => Kind::Semicolon,
                '+' => Kind::Plus,
                '-' => Kind::Minus,
                '*' => Kind::Multiply,
                '/' => Kind::Divide,
                '(' => Kind::LParen,
                ')' => Kind::RParen,
                _ => {
                    return Err(LexError::new(
                        format!("invalid character '{}'", ch),
                        self.line,
                        self.column,
                    ));
                }
            };

            let token = Token::new(kind, ch.to_string(), self.line, self.column);
            self.advance();
            return Ok(token);
        }

        Ok(Token::new(Kind::EOF, String::new(), self.line, self.column))
    }

    fn identifier(&mut self) -> Token {
        let line_start = self.line;
        let column_start = self.column;
        let mut text = String::new();

        while let Some(ch) = self.at() {
            if !ch.is_alphanumeric() && ch != '_' {
                break;
            }
            text.push(ch);
            self.advance();
        }

        let kind = self.keyword_kind(&text).unwrap_or(Kind::Identifier);
        Token::new(kind, text, line_start, column_start)
    }

    fn number(&mut self) -> Token {
        let line_start = self.line;
        let column_start = self.column;
        let mut text = String::new();

        while let Some(ch) = self.at() {
            if !ch.is_ascii_digit() {
                break;
            }
            text.push(ch);
            self.advance();
        }

        Token::new(Kind::Number, text, line_start, column_start)
    }

    // Keyword matching is case-insensitive; identifier text keeps its case.
    fn keyword_kind(&self, text: &str) -> Option<Kind> {
        match text.to_lowercase().as_str() {
            "if" => Some(Kind::If),
            "else" => Some(Kind::Else),
            "while" => Some(Kind::While),
            "print" => Some(Kind::Print),
            _ => None,
        }
    }
}
